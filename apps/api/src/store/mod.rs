//! Document store for user documents.
//!
//! `AppState` holds an `Arc<dyn UserStore>`; the backend is picked at startup
//! from `DATABASE_URL`. Every mutation of an embedded skill or job is a
//! read-modify-write of the whole parent document through `save`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::UserDocument;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All user documents in creation order.
    async fn list(&self) -> Result<Vec<UserDocument>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserDocument>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, StoreError>;

    /// Inserts a new document. Fails with `DuplicateUsername` if the username exists.
    async fn create(&self, user: UserDocument) -> Result<UserDocument, StoreError>;

    /// Replaces the stored document with the same id.
    /// Returns false if no such document exists.
    async fn save(&self, user: &UserDocument) -> Result<bool, StoreError>;

    /// Returns false if no such document exists.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
