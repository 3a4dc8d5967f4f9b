use crate::adapters::database::records::ContactRecord;
use crate::domain::contact::{Contact, ContactFields};
use crate::error::Result;
use sqlx::PgConnection;
use uuid::Uuid;

const COLUMNS: &str = "id, name, email, phone, message, created_at";

#[derive(Clone, Debug, Default)]
pub struct ContactRepository {}

impl ContactRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Fetches every contact, newest first.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn), err)]
    pub(crate) async fn find_all(&self, conn: &mut PgConnection) -> Result<Vec<Contact>> {
        let records = sqlx::query_as::<_, ContactRecord>(&format!(
            "SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Inserts a contact. `created_at` is assigned by the database.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, fields), err)]
    pub(crate) async fn create(&self, conn: &mut PgConnection, id: Uuid, fields: &ContactFields) -> Result<Contact> {
        let record = sqlx::query_as::<_, ContactRecord>(&format!(
            r"
            INSERT INTO contacts (id, name, email, phone, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.message.as_deref())
        .fetch_one(conn)
        .await?;

        Ok(record.into())
    }

    /// Replaces the user fields of a contact.
    /// Returns `None` if no contact has the given ID.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the update fails.
    #[tracing::instrument(level = "debug", skip(self, conn, fields), err)]
    pub(crate) async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        fields: &ContactFields,
    ) -> Result<Option<Contact>> {
        let record = sqlx::query_as::<_, ContactRecord>(&format!(
            r"
            UPDATE contacts
            SET name = $2, email = $3, phone = $4, message = $5
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.message.as_deref())
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Deletes a contact. Returns whether a row was removed.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the deletion fails.
    #[tracing::instrument(level = "debug", skip(self, conn), err)]
    pub(crate) async fn delete(&self, conn: &mut PgConnection, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1").bind(id).execute(conn).await?;
        Ok(result.rows_affected() > 0)
    }
}
