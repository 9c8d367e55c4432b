//! Contact store.
//!
//! The store is the sole owner of contacts. It is constructed once at
//! startup and injected into the route table as `Arc<dyn ContactStore>`.
//! Two backends exist: [`MemoryStore`] and the persistent [`SqliteStore`].

pub mod memory;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::contact::{Contact, ContactId, ContactUpdate};
use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Async access to the contact collection.
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug {
    /// List contacts, optionally filtered by a name query.
    ///
    /// Results are sorted by last name, then creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn list_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>>;

    /// Fetch a single contact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ContactNotFound`] if no contact has this id.
    async fn get_contact(&self, id: &ContactId) -> Result<Contact>;

    /// Create a contact with empty fields and a previously unused id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn create_contact(&self) -> Result<Contact>;

    /// Merge `update` into an existing contact and return the result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ContactNotFound`] if no contact has this id.
    async fn update_contact(&self, id: &ContactId, update: &ContactUpdate) -> Result<Contact>;

    /// Delete a contact. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn delete_contact(&self, id: &ContactId) -> Result<bool>;
}

/// Artificial delay applied before every store call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency(Duration);

impl Latency {
    /// No delay.
    pub const NONE: Self = Self(Duration::ZERO);

    /// Delay of `ms` milliseconds.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Sleep for the configured delay, if any.
    pub async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Listing order shared by all backends.
pub(crate) fn listing_order(a: &Contact, b: &Contact) -> Ordering {
    a.last
        .to_lowercase()
        .cmp(&b.last.to_lowercase())
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Open the store selected by `config`.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened.
pub fn open_store(config: &Config) -> Result<Arc<dyn ContactStore>> {
    let latency = Latency::from_millis(config.store.latency_ms);
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory contact store");
            Ok(Arc::new(MemoryStore::with_latency(latency)))
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(config.database_path())?.with_latency(latency);
            Ok(Arc::new(store))
        }
    }
}
