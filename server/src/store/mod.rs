//! Persistence for items.
//!
//! A store is a collection of item documents addressed by id. It does not
//! validate and does not read the clock; the service hands it finished
//! documents and timestamps. Each call is atomic for the single document it
//! touches.

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::item::Item;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item {0} already exists")]
    Duplicate(Uuid),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("item document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists a new document. Fails if the id is already taken.
    async fn insert(&self, item: Item) -> Result<Item, StoreError>;

    /// Every item, newest `created_at` first. Ties go to the later insert.
    async fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Sets `bought` and `updated_at`; `None` if no such item.
    async fn update_bought(
        &self,
        id: Uuid,
        bought: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError>;

    /// Removes the item, returning it; `None` if no such item.
    async fn delete(&self, id: Uuid) -> Result<Option<Item>, StoreError>;
}

/// Opens the store named by a connection string.
///
/// - `memory://` keeps items in process memory
/// - `sqlite::memory:` uses a private in-memory SQLite database
/// - `sqlite://<path>` or a bare path opens (or creates) a SQLite file
pub fn open(database_url: &str) -> Result<Arc<dyn ItemStore>, StoreError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(StoreError::UnsupportedUrl(database_url.to_string()));
    }
    if url == "memory://" || url == "memory" {
        return Ok(Arc::new(MemoryStore::new()));
    }
    if url == "sqlite::memory:" {
        return Ok(Arc::new(SqliteStore::open_in_memory()?));
    }
    if let Some(path) = url.strip_prefix("sqlite://") {
        return Ok(Arc::new(SqliteStore::open(path)?));
    }
    if url.contains("://") {
        return Err(StoreError::UnsupportedUrl(database_url.to_string()));
    }
    Ok(Arc::new(SqliteStore::open(url)?))
}
