use crate::api::schemas::contacts::{ContactRequest, ContactResponse, DeleteResponse, ErrorResponse};
use crate::domain::contact::{Contact, ContactFields};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/contacts";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Contact not found")]
    NotFound,
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// The remote operations the contact view needs.
#[async_trait]
pub trait ContactsApi: Send + Sync + std::fmt::Debug {
    async fn list(&self) -> Result<Vec<Contact>, ClientError>;

    async fn create(&self, fields: &ContactFields) -> Result<Contact, ClientError>;

    /// # Errors
    /// Returns `ClientError::NotFound` if the server no longer has the contact.
    async fn update(&self, id: Uuid, fields: &ContactFields) -> Result<Contact, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

/// [`ContactsApi`] over the JSON REST interface.
#[derive(Clone, Debug)]
pub struct HttpContactsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContactsApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn contact_url(&self, id: Uuid) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };
        Err(ClientError::Status { status: status.as_u16(), message })
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list(&self) -> Result<Vec<Contact>, ClientError> {
        let resp = Self::check(self.client.get(&self.base_url).send().await?).await?;
        let contacts: Vec<ContactResponse> = resp.json().await?;
        Ok(contacts.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(level = "debug", skip(self, fields), err)]
    async fn create(&self, fields: &ContactFields) -> Result<Contact, ClientError> {
        let resp =
            Self::check(self.client.post(&self.base_url).json(&ContactRequest::from(fields)).send().await?).await?;
        Ok(resp.json::<ContactResponse>().await?.into())
    }

    #[tracing::instrument(level = "debug", skip(self, fields), err)]
    async fn update(&self, id: Uuid, fields: &ContactFields) -> Result<Contact, ClientError> {
        let resp =
            Self::check(self.client.put(self.contact_url(id)).json(&ContactRequest::from(fields)).send().await?)
                .await?;
        Ok(resp.json::<ContactResponse>().await?.into())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let resp = Self::check(self.client.delete(self.contact_url(id)).send().await?).await?;
        let body: DeleteResponse = resp.json().await?;
        tracing::debug!(message = %body.message, "Delete acknowledged");
        Ok(())
    }
}
