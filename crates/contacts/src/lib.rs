//! `contacts` - A contact manager built on a nested route table
//!
//! Paths resolve to a chain of routes. Each route may load data, handle a
//! form submission, render into its parent's outlet and catch errors raised
//! below it. Contacts live in an injected [`store::ContactStore`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod router;
pub mod store;

pub use config::Config;
pub use contact::{Contact, ContactId, ContactUpdate, FormData};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use router::{Navigation, Navigator, Outcome, Page};
pub use store::ContactStore;
