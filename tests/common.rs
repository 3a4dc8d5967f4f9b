#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]

use contact_manager::AppBuilder;
use contact_manager::adapters::{ContactStore, MemoryContactStore};
use contact_manager::api::{MgmtState, app_router, mgmt_router};
use contact_manager::config::Config;
use serde_json::{Value, json};
use std::sync::{Arc, Once};
use tokio::net::TcpListener;
use tokio::sync::watch;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("contact_manager=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config() -> Config {
    <Config as clap::Parser>::parse_from([
        "contact-manager",
        "--host",
        "127.0.0.1",
        "--port",
        "0",
        "--mgmt-port",
        "0",
        "--store",
        "memory",
        "--health-db-timeout-ms",
        "500",
    ])
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub contacts_url: String,
    pub client: reqwest::Client,
    pub store: Arc<dyn ContactStore>,
    pub shutdown_tx: watch::Sender<bool>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(MemoryContactStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn ContactStore>) -> Self {
        setup_tracing();
        let app = AppBuilder::new(get_test_config()).with_store(Arc::clone(&store)).build().unwrap();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        let mut api_rx = shutdown_rx.clone();
        let router = app_router(app.contact_service);
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = api_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());
        let mut mgmt_rx = shutdown_rx;
        let mgmt = mgmt_router(MgmtState { health_service: app.health_service });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt)
                .with_graceful_shutdown(async move {
                    let _ = mgmt_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        Self {
            contacts_url: format!("{server_url}/api/contacts"),
            server_url,
            mgmt_url,
            client: reqwest::Client::new(),
            store,
            shutdown_tx,
        }
    }

    pub async fn create_contact(&self, name: &str, phone: &str) -> Value {
        let resp = self
            .client
            .post(&self.contacts_url)
            .json(&contact_payload(name, phone))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201, "create should succeed for {name}");
        resp.json().await.unwrap()
    }

    pub async fn list_contacts(&self) -> Vec<Value> {
        let resp = self.client.get(&self.contacts_url).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }
}

pub fn contact_payload(name: &str, phone: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phone": phone,
    })
}
