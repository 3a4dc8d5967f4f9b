#![allow(clippy::unwrap_used, clippy::panic, missing_debug_implementations, unreachable_pub)]
mod common;

use async_trait::async_trait;
use common::{TestApp, contact_payload};
use contact_manager::adapters::ContactStore;
use contact_manager::client::{ClientError, ContactsApi, HttpContactsApi};
use contact_manager::domain::contact::{Contact, ContactFields};
use contact_manager::error::{AppError, Result};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// A store whose every read and write fails as if the pool were gone.
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl ContactStore for BrokenStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _fields: ContactFields) -> Result<Contact> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn update(&self, _id: Uuid, _fields: ContactFields) -> Result<Option<Contact>> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_create_then_list_newest_first() {
    let app = TestApp::spawn().await;

    let first = app.create_contact("Alice", "5551234567").await;
    let second = app.create_contact("Bob", "5559876543").await;

    assert!(Uuid::parse_str(second["id"].as_str().unwrap()).is_ok());
    assert!(second["createdAt"].is_string());
    assert_eq!(second["name"], "Bob");

    let listed = app.list_contacts().await;
    assert_eq!(listed, vec![second, first]);
}

#[tokio::test]
async fn test_create_with_missing_fields_is_rejected() {
    let app = TestApp::spawn().await;

    let payloads = [
        json!({ "email": "a@example.com", "phone": "5551234567" }),
        json!({ "name": "   ", "email": "a@example.com", "phone": "5551234567" }),
        json!({ "name": "Ann", "email": "", "phone": "5551234567" }),
        json!({ "name": "Ann", "email": "a@example.com", "phone": null }),
    ];

    for payload in payloads {
        let resp = app.client.post(&app.contacts_url).json(&payload).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload} should be rejected");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Please fill required fields");
    }

    assert!(app.list_contacts().await.is_empty());
}

#[tokio::test]
async fn test_create_with_malformed_fields_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(&app.contacts_url)
        .json(&json!({ "name": "Ann", "email": "ann@company", "phone": "5551234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid email format");

    let resp = app
        .client
        .post(&app.contacts_url)
        .json(&json!({ "name": "Ann", "email": "ann@company.com", "phone": "555123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Phone must be at least 10 digits");

    assert!(app.list_contacts().await.is_empty());
}

#[tokio::test]
async fn test_message_is_optional_and_round_trips() {
    let app = TestApp::spawn().await;

    let mut payload = contact_payload("Carol", "5550001111");
    payload["message"] = json!("Met at the conference");
    let resp = app.client.post(&app.contacts_url).json(&payload).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["message"], "Met at the conference");

    let plain = app.create_contact("Dan", "5550002222").await;
    assert!(plain["message"].is_null());
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_identity() {
    let app = TestApp::spawn().await;
    let created = app.create_contact("Alice", "5551234567").await;
    let id = created["id"].as_str().unwrap();

    let resp = app
        .client
        .put(format!("{}/{id}", app.contacts_url))
        .json(&json!({
            "name": "Alicia",
            "email": "alicia@example.org",
            "phone": "5550009999",
            "message": "Promoted",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["name"], "Alicia");
    assert_eq!(updated["message"], "Promoted");

    assert_eq!(app.list_contacts().await, vec![updated]);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .put(format!("{}/{}", app.contacts_url, Uuid::new_v4()))
        .json(&contact_payload("Ghost", "5551234567"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Contact not found");
    assert!(app.list_contacts().await.is_empty());
}

#[tokio::test]
async fn test_update_validates_like_create() {
    let app = TestApp::spawn().await;
    let created = app.create_contact("Alice", "5551234567").await;

    let resp = app
        .client
        .put(format!("{}/{}", app.contacts_url, created["id"].as_str().unwrap()))
        .json(&json!({ "name": "Alice", "email": "", "phone": "5551234567" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.list_contacts().await, vec![created]);
}

#[tokio::test]
async fn test_delete_existing_and_unknown() {
    let app = TestApp::spawn().await;
    let keep = app.create_contact("Keep", "5551234567").await;
    let gone = app.create_contact("Gone", "5559876543").await;

    let resp = app.client.delete(format!("{}/{}", app.contacts_url, gone["id"].as_str().unwrap())).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Contact deleted");
    assert_eq!(app.list_contacts().await, vec![keep.clone()]);

    let resp = app.client.delete(format!("{}/{}", app.contacts_url, Uuid::new_v4())).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Contact deleted");
    assert_eq!(app.list_contacts().await, vec![keep]);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app.client.delete(format!("{}/not-a-uuid", app.contacts_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(&app.contacts_url)
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let resp = app
        .client
        .request(reqwest::Method::OPTIONS, &app.contacts_url)
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(&app.contacts_url).send().await.unwrap();
    let generated = resp.headers()["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());

    let resp = app.client.get(&app.contacts_url).header("x-request-id", "trace-me-123").send().await.unwrap();
    assert_eq!(resp.headers()["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn test_storage_failure_surfaces_driver_message() {
    let app = TestApp::spawn_with_store(Arc::new(BrokenStore)).await;
    let expected = sqlx::Error::PoolClosed.to_string();
    let item_url = format!("{}/{}", app.contacts_url, Uuid::new_v4());
    let payload = contact_payload("Alice", "5551234567");

    let requests = [
        app.client.get(&app.contacts_url),
        app.client.post(&app.contacts_url).json(&payload),
        app.client.put(&item_url).json(&payload),
        app.client.delete(&item_url),
    ];

    for request in requests {
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], expected.as_str());
    }
}

#[tokio::test]
async fn test_client_reports_storage_failure() {
    let app = TestApp::spawn_with_store(Arc::new(BrokenStore)).await;
    let api = HttpContactsApi::new(&app.contacts_url);

    match api.list().await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, sqlx::Error::PoolClosed.to_string());
        }
        other => panic!("expected a 500, got {other:?}"),
    }
    assert!(matches!(api.delete(Uuid::new_v4()).await, Err(ClientError::Status { status: 500, .. })));
}
