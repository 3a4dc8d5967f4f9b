pub mod contact_repo;
pub mod records;

use crate::adapters::ContactStore;
use crate::config::DatabaseConfig;
use crate::domain::contact::{Contact, ContactFields};
use crate::error::Result;
use async_trait::async_trait;
use contact_repo::ContactRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use uuid::Uuid;

pub type DbPool = Pool<Postgres>;

/// Initializes the database connection pool.
///
/// # Errors
/// Returns `sqlx::Error` if the connection fails.
pub async fn init_pool(config: &DatabaseConfig) -> std::result::Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Applies the embedded schema migrations.
///
/// # Errors
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!().run(pool).await
}

/// Contact store backed by the `contacts` table.
#[derive(Clone, Debug)]
pub struct PostgresContactStore {
    pool: DbPool,
    repo: ContactRepository,
}

impl PostgresContactStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool, repo: ContactRepository::new() }
    }
}

#[async_trait]
impl ContactStore for PostgresContactStore {
    async fn list_all(&self) -> Result<Vec<Contact>> {
        let mut conn = self.pool.acquire().await?;
        self.repo.find_all(&mut conn).await
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact> {
        let mut conn = self.pool.acquire().await?;
        self.repo.create(&mut conn, Uuid::now_v7(), &fields).await
    }

    async fn update(&self, id: Uuid, fields: ContactFields) -> Result<Option<Contact>> {
        let mut conn = self.pool.acquire().await?;
        self.repo.update(&mut conn, id, &fields).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        self.repo.delete(&mut conn, id).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
