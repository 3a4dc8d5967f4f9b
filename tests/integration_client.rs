#![allow(clippy::unwrap_used, clippy::panic, missing_debug_implementations, unreachable_pub)]
mod common;

use common::TestApp;
use contact_manager::client::render::{EMPTY_STATE, render_list};
use contact_manager::client::view_model::SUBMIT_FAILED_NOTICE;
use contact_manager::client::{ClientError, ContactsApi, ContactsView, Event, HttpContactsApi, Outcome};
use contact_manager::domain::contact::ContactFields;
use contact_manager::domain::validation::Field;
use uuid::Uuid;

async fn fill(view: &mut ContactsView, api: &HttpContactsApi, name: &str, email: &str, phone: &str) {
    for (field, value) in [(Field::Name, name), (Field::Email, email), (Field::Phone, phone)] {
        assert_eq!(view.dispatch(api, Event::ChangeField(field, value.to_string())).await, Outcome::Changed);
    }
}

#[tokio::test]
async fn test_view_round_trip_against_server() {
    let app = TestApp::spawn().await;
    let api = HttpContactsApi::new(&app.contacts_url);
    let mut view = ContactsView::new();

    view.dispatch(&api, Event::Load).await;
    assert!(!view.is_loading());
    assert!(render_list(&view).contains(EMPTY_STATE));

    fill(&mut view, &api, "Alice", "alice@example.com", "5551234567").await;
    let Outcome::Saved(alice) = view.dispatch(&api, Event::Submit).await else { panic!("create failed") };

    fill(&mut view, &api, "Bob", "bob@example.com", "5559876543").await;
    let Outcome::Saved(bob) = view.dispatch(&api, Event::Submit).await else { panic!("create failed") };

    // The optimistic cache matches what a fresh fetch returns.
    let mut fresh = ContactsView::new();
    fresh.load(&api).await;
    assert_eq!(view.contacts(), fresh.contacts());
    assert_eq!(view.contacts(), &[bob.clone(), alice.clone()]);

    view.dispatch(&api, Event::Edit(alice.id)).await;
    view.dispatch(&api, Event::ChangeField(Field::Name, "Alicia".into())).await;
    let Outcome::Saved(alicia) = view.dispatch(&api, Event::Submit).await else { panic!("update failed") };
    assert_eq!(alicia.id, alice.id);
    assert_eq!(alicia.created_at, alice.created_at);

    view.dispatch(&api, Event::RequestDelete(bob.id)).await;
    assert_eq!(view.dispatch(&api, Event::ConfirmDelete).await, Outcome::Deleted(bob.id));

    fresh.load(&api).await;
    assert_eq!(fresh.contacts(), &[alicia]);
    assert_eq!(view.contacts(), fresh.contacts());
}

#[tokio::test]
async fn test_http_api_reports_not_found_and_validation() {
    let app = TestApp::spawn().await;
    let api = HttpContactsApi::new(format!("{}/", app.contacts_url));

    let fields = ContactFields {
        name: "Ghost".into(),
        email: "ghost@example.com".into(),
        phone: "5551234567".into(),
        message: None,
    };
    assert!(matches!(api.update(Uuid::new_v4(), &fields).await, Err(ClientError::NotFound)));

    let bad = ContactFields { email: "ghost@nowhere".into(), ..fields };
    match api.create(&bad).await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid email format");
        }
        other => panic!("expected a 400, got {other:?}"),
    }

    api.delete(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_stale_edit_is_evicted() {
    let app = TestApp::spawn().await;
    let api = HttpContactsApi::new(&app.contacts_url);
    let created = app.create_contact("Alice", "5551234567").await;
    let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();

    let mut view = ContactsView::new();
    view.load(&api).await;
    assert_eq!(view.contacts().len(), 1);

    // Removed behind the view's back.
    app.store.delete(id).await.unwrap();

    view.dispatch(&api, Event::Edit(id)).await;
    assert_eq!(view.dispatch(&api, Event::Submit).await, Outcome::Failed);
    assert_eq!(view.notice(), Some(SUBMIT_FAILED_NOTICE));
    assert!(view.contacts().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_leaves_empty_view() {
    let api = HttpContactsApi::new("http://127.0.0.1:9/api/contacts");
    let mut view = ContactsView::new();
    view.load(&api).await;

    assert!(!view.is_loading());
    assert!(view.contacts().is_empty());
}
