//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::contact::FormData;

/// Visit command arguments.
#[derive(Debug, Args)]
pub struct VisitCommand {
    /// Path to navigate to (e.g. "/", "/contacts/abc123", "/?q=ada")
    #[arg(default_value = "/")]
    pub path: String,

    /// Output the page as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Path whose action receives the form (e.g. "/contacts/abc123/edit")
    pub path: String,

    /// Form field as key=value (repeatable)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Output the page as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl SubmitCommand {
    /// Collect the fields into form data. Later duplicates win.
    #[must_use]
    pub fn form(&self) -> FormData {
        self.fields.iter().cloned().collect()
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file to validate (default: standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
