use crate::domain::contact::{Contact, ContactFields};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod database;
pub mod memory;

pub use database::PostgresContactStore;
pub use memory::MemoryContactStore;

/// Persistence for contact records.
///
/// Every operation is a single independent write; there is no cross-record
/// invariant, so implementations need neither transactions nor locking beyond
/// what a single call requires.
#[async_trait]
pub trait ContactStore: Send + Sync + std::fmt::Debug + 'static {
    /// All contacts ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Contact>>;

    /// Stores a new contact, assigning its `id` and `created_at`.
    async fn create(&self, fields: ContactFields) -> Result<Contact>;

    /// Replaces the user fields of an existing contact. `None` if `id` is unknown.
    async fn update(&self, id: Uuid, fields: ContactFields) -> Result<Option<Contact>>;

    /// Removes a contact. Returns whether anything was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Cheap connectivity check used by the readiness probe.
    async fn ping(&self) -> Result<()>;
}
