use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shopping-list entry as stored and as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub bought: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// A fresh, not-yet-bought item stamped with a single clock reading.
    pub fn new(name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            bought: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated create payload. `name` is already trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
}

/// A validated update payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoughtUpdate {
    pub bought: bool,
}
