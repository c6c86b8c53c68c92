use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::mapper::StorageField;
use crate::models::{Admin, EventRecord};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAdminRepository, InMemoryEventRepository};
pub use postgres::{PgAdminRepository, PgEventRepository};

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::UniqueViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the `events` table.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Every event whose status is not `draft`, earliest start first.
    async fn list_public(&self) -> StoreResult<Vec<EventRecord>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EventRecord>>;

    async fn insert(&self, fields: &[StorageField]) -> StoreResult<EventRecord>;

    /// Writes only the given columns. `None` when no row has this id.
    async fn update(&self, id: Uuid, fields: &[StorageField]) -> StoreResult<Option<EventRecord>>;

    /// `false` when no row has this id.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Read-only access to the seeded `admin_user` table.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Admin>>;
}
