use crate::adapters::ContactStore;
use crate::domain::contact::{Contact, ContactFields};
use crate::error::{AppError, Result};
use opentelemetry::{global, metrics::Counter};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    created_total: Counter<u64>,
    updated_total: Counter<u64>,
    deleted_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("contact-manager");
        Self {
            created_total: meter
                .u64_counter("contacts_created_total")
                .with_description("Total contacts created")
                .build(),
            updated_total: meter
                .u64_counter("contacts_updated_total")
                .with_description("Total contacts updated")
                .build(),
            deleted_total: meter
                .u64_counter("contacts_deleted_total")
                .with_description("Total contacts actually removed by a delete call")
                .build(),
        }
    }
}

/// Validates contact input and delegates persistence to a [`ContactStore`].
#[derive(Clone, Debug)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    metrics: Metrics,
}

impl ContactService {
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Lists every contact, newest first.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    #[tracing::instrument(err, skip(self))]
    pub async fn list(&self) -> Result<Vec<Contact>> {
        self.store.list_all().await
    }

    /// Creates a contact after validating every field.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if a required field is blank or malformed.
    #[tracing::instrument(err, skip(self, input))]
    pub async fn create(&self, input: ContactFields) -> Result<Contact> {
        input.validate()?;
        let contact = self.store.create(input.normalized()).await?;

        tracing::info!(contact.id = %contact.id, "Contact created");
        self.metrics.created_total.add(1, &[]);
        Ok(contact)
    }

    /// Replaces the user fields of a contact.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for bad input and `AppError::NotFound` if `id` is unknown.
    #[tracing::instrument(err, skip(self, input), fields(contact.id = %id))]
    pub async fn update(&self, id: Uuid, input: ContactFields) -> Result<Contact> {
        input.validate()?;
        let contact = self.store.update(id, input.normalized()).await?.ok_or(AppError::NotFound)?;

        tracing::info!("Contact updated");
        self.metrics.updated_total.add(1, &[]);
        Ok(contact)
    }

    /// Deletes a contact. Deleting an unknown `id` is not an error.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store write fails.
    #[tracing::instrument(err, skip(self), fields(contact.id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.delete(id).await? {
            tracing::info!("Contact deleted");
            self.metrics.deleted_total.add(1, &[]);
        } else {
            tracing::debug!("Delete of unknown contact ignored");
        }
        Ok(())
    }
}
