use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ItemStore, StoreError};
use crate::item::Item;

/// In-process collection. Items are kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<Vec<Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert(&self, item: Item) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(StoreError::Duplicate(item.id));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().await;
        let mut newest_first: Vec<Item> = items.iter().rev().cloned().collect();
        // stable sort keeps later inserts ahead on equal timestamps
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest_first)
    }

    async fn update_bought(
        &self,
        id: Uuid,
        bought: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        item.bought = bought;
        item.updated_at = updated_at;
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        let mut items = self.items.write().await;
        let position = items.iter().position(|item| item.id == id);
        Ok(position.map(|index| items.remove(index)))
    }
}
