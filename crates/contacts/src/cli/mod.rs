//! Command-line interface for contacts.
//!
//! This module provides the CLI structure and command handlers for the
//! `contacts` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{ConfigCommand, SubmitCommand, VisitCommand};

/// contacts - A contact manager driven by a route table
///
/// Every command resolves a path against the route table: loaders fetch
/// data, actions handle form submissions, and the result is printed as a
/// rendered page.
#[derive(Debug, Parser)]
#[command(name = "contacts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Navigate to a path and print the page
    Visit(VisitCommand),

    /// Submit a form to a path and print the resulting page
    Submit(SubmitCommand),

    /// Print the route tree
    Routes,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
