#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::{ContactStore, MemoryContactStore, PostgresContactStore, database};
use crate::config::{Config, StoreKind};
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use std::sync::Arc;
use tokio::sync::watch;

/// Fully wired application components.
#[derive(Debug)]
pub struct App {
    pub contact_service: ContactService,
    pub health_service: HealthService,
}

/// Wires services on top of a contact store.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn ContactStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ContactStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the application components.
    ///
    /// # Errors
    /// Returns an error if no store was supplied.
    pub fn build(self) -> anyhow::Result<App> {
        let store = self.store.ok_or_else(|| anyhow::anyhow!("A contact store is required"))?;
        Ok(App {
            contact_service: ContactService::new(Arc::clone(&store)),
            health_service: HealthService::new(store, self.config.health),
        })
    }
}

/// Opens the store selected by configuration, running migrations for Postgres.
///
/// # Errors
/// Returns an error if the database is unreachable or a migration fails.
pub async fn init_store(config: &Config) -> anyhow::Result<Arc<dyn ContactStore>> {
    match config.database.store {
        StoreKind::Postgres => {
            let pool = database::init_pool(&config.database).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("Connected to Postgres contact store");
            Ok(Arc::new(PostgresContactStore::new(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory contact store; contacts will not survive a restart");
            Ok(Arc::new(MemoryContactStore::new()))
        }
    }
}

/// Routes panics through `tracing` so they reach the configured log sinks.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Process panicked");
        default_hook(info);
    }));
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
            () = terminate => tracing::info!("Received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });
}
