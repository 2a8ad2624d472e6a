mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{ActivityEntry, Design, Note};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Storage for notes, the activity log and saved designs.
///
/// Lists are ordered newest first: by creation time descending, ties broken
/// by id descending.
///
/// Note writes record their audit entry atomically with the note itself:
/// `insert_note` appends an `Added Note` entry and `delete_note` a
/// `Deleted Note` entry, and either both land or neither does.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_note(&self, text: &str) -> Result<Note, StoreError>;

    async fn list_notes(&self, limit: usize) -> Result<Vec<Note>, StoreError>;

    /// Returns the removed note, or `None` if no note has this id.
    async fn delete_note(&self, id: i64) -> Result<Option<Note>, StoreError>;

    async fn insert_activity(&self, action: &str, meta: Value)
    -> Result<ActivityEntry, StoreError>;

    async fn list_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, StoreError>;

    async fn delete_activity(&self, id: i64) -> Result<bool, StoreError>;

    async fn insert_design(&self, user_id: &str, design: Value) -> Result<Design, StoreError>;

    async fn list_designs(&self, user_id: &str) -> Result<Vec<Design>, StoreError>;
}
