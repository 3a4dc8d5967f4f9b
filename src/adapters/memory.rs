use crate::adapters::ContactStore;
use crate::domain::contact::{Contact, ContactFields};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local contact store. Contents are lost on restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryContactStore {
    contacts: Arc<RwLock<HashMap<Uuid, Contact>>>,
}

impl MemoryContactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed record, e.g. to seed a fixture with a chosen `created_at`.
    pub async fn insert(&self, contact: Contact) {
        self.contacts.write().await.insert(contact.id, contact);
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        let mut contacts: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        // Ties on `created_at` fall back to the id: `now_v7` ids from one process
        // sort in creation order, even within the same millisecond.
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(contacts)
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact> {
        let contact = Contact {
            id: Uuid::now_v7(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            message: fields.message,
            created_at: OffsetDateTime::now_utc(),
        };
        self.contacts.write().await.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: Uuid, fields: ContactFields) -> Result<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.get_mut(&id).map(|contact| {
            contact.apply(fields);
            contact.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.contacts.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
