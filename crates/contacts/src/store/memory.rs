//! In-memory contact store.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::contact::{Contact, ContactId, ContactUpdate};
use crate::error::{Error, Result};

use super::{listing_order, ContactStore, Latency};

/// Contact store backed by a map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: RwLock<BTreeMap<ContactId, Contact>>,
    latency: Latency,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that delays every call.
    #[must_use]
    pub fn with_latency(latency: Latency) -> Self {
        Self {
            contacts: RwLock::default(),
            latency,
        }
    }
}

#[async_trait::async_trait]
impl ContactStore for MemoryStore {
    async fn list_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>> {
        self.latency.wait().await;
        let contacts = self.contacts.read().await;
        let mut listed: Vec<Contact> = contacts
            .values()
            .filter(|contact| query.map_or(true, |q| contact.matches_query(q)))
            .cloned()
            .collect();
        listed.sort_by(listing_order);
        Ok(listed)
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        self.latency.wait().await;
        self.contacts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::contact_not_found(id.as_str()))
    }

    async fn create_contact(&self) -> Result<Contact> {
        self.latency.wait().await;
        let mut contacts = self.contacts.write().await;
        let mut id = ContactId::generate();
        while contacts.contains_key(&id) {
            debug!("Regenerating colliding contact id {}", id);
            id = ContactId::generate();
        }
        let contact = Contact::empty(id.clone());
        contacts.insert(id, contact.clone());
        info!("Created contact {}", contact.id);
        Ok(contact)
    }

    async fn update_contact(&self, id: &ContactId, update: &ContactUpdate) -> Result<Contact> {
        self.latency.wait().await;
        let mut contacts = self.contacts.write().await;
        let contact = contacts
            .get_mut(id)
            .ok_or_else(|| Error::contact_not_found(id.as_str()))?;
        update.apply(contact);
        info!("Updated contact {}", id);
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<bool> {
        self.latency.wait().await;
        let removed = self.contacts.write().await.remove(id).is_some();
        if removed {
            info!("Deleted contact {}", id);
        }
        Ok(removed)
    }
}
