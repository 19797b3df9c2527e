use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::info;
use uuid::Uuid;

use super::{ItemStore, StoreError};
use crate::item::Item;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS items (
        seq        INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT    NOT NULL UNIQUE,
        created_at INTEGER NOT NULL,
        document   TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_items_created ON items(created_at);
";

/// SQLite-backed document collection.
///
/// Each row holds the item as a JSON document plus the two columns needed
/// for lookup and ordering. The connection is shared behind a mutex and every
/// call runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened SQLite item store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn)
        })
        .await?
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl ItemStore for SqliteStore {
    async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        self.run(move |conn| {
            let document = serde_json::to_string(&item)?;
            conn.execute(
                "INSERT INTO items (id, created_at, document) VALUES (?1, ?2, ?3)",
                params![item.id.to_string(), item.created_at.timestamp_micros(), document],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate(item.id)
                } else {
                    StoreError::Sqlite(e)
                }
            })?;
            Ok(item)
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        self.run(|conn| {
            let mut stmt =
                conn.prepare("SELECT document FROM items ORDER BY created_at DESC, seq DESC")?;
            let documents = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            documents
                .iter()
                .map(|document| serde_json::from_str(document).map_err(StoreError::from))
                .collect()
        })
        .await
    }

    async fn update_bought(
        &self,
        id: Uuid,
        bought: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError> {
        self.run(move |conn| {
            let key = id.to_string();
            let document: Option<String> = conn
                .query_row("SELECT document FROM items WHERE id = ?1", [&key], |row| row.get(0))
                .optional()?;
            let Some(document) = document else {
                return Ok(None);
            };

            let mut item: Item = serde_json::from_str(&document)?;
            item.bought = bought;
            item.updated_at = updated_at;
            conn.execute(
                "UPDATE items SET document = ?2 WHERE id = ?1",
                params![key, serde_json::to_string(&item)?],
            )?;
            Ok(Some(item))
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        self.run(move |conn| {
            let key = id.to_string();
            let document: Option<String> = conn
                .query_row("SELECT document FROM items WHERE id = ?1", [&key], |row| row.get(0))
                .optional()?;
            let Some(document) = document else {
                return Ok(None);
            };

            conn.execute("DELETE FROM items WHERE id = ?1", [&key])?;
            Ok(Some(serde_json::from_str(&document)?))
        })
        .await
    }
}
