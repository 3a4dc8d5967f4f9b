use crate::api::AppState;
use crate::api::schemas::contacts::{ContactRequest, ContactResponse, DeleteResponse};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid contact id: {raw}")))
}

/// Lists all contacts, newest first.
///
/// # Errors
/// Returns `AppError::Database` if the store cannot be read.
pub async fn list_contacts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let contacts = state.contact_service.list().await?;
    Ok(Json(contacts.into_iter().map(ContactResponse::from).collect::<Vec<_>>()))
}

/// Creates a contact.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not a JSON contact.
/// Returns `AppError::Validation` if name, email or phone is missing or malformed.
pub async fn create_contact(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = body?;
    let contact = state.contact_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ContactResponse::from(contact))))
}

/// Replaces every user field of a contact.
///
/// # Errors
/// Returns `AppError::BadRequest` if the id or the body is malformed.
/// Returns `AppError::Validation` if a field is missing or malformed.
/// Returns `AppError::NotFound` if no contact has the id.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(payload) = body?;
    let contact = state.contact_service.update(id, payload.into()).await?;
    Ok(Json(ContactResponse::from(contact)))
}

/// Deletes a contact. Succeeds whether or not the contact existed.
///
/// # Errors
/// Returns `AppError::BadRequest` if the id is malformed.
pub async fn delete_contact(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.contact_service.delete(id).await?;
    Ok(Json(DeleteResponse { message: "Contact deleted".to_string() }))
}
