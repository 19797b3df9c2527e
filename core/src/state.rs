//! List state for a shopping-list front end.
//!
//! # Design
//! `ListState` is a plain value. Every transition takes the state by value
//! and returns the next one, so a host can keep it wherever it likes and
//! tests can check transitions without any I/O. Results from the client are
//! fed in as they arrive; nothing is changed before the server confirms.

use uuid::Uuid;

use crate::error::ApiError;
use crate::types::Item;

pub const LOAD_FAILED: &str =
    "failed to load the shopping list, make sure the backend server is running";
pub const ADD_FAILED: &str = "failed to add the item";
pub const UPDATE_FAILED: &str = "failed to update the item";
pub const DELETE_FAILED: &str = "failed to delete the item";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub items: Vec<Item>,
    pub loading: bool,
    pub error: Option<String>,
    pub adding: bool,
}

impl ListState {
    /// The state before the first load completes.
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn load_started(self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self
        }
    }

    /// Replaces the list wholesale on success.
    pub fn loaded(self, result: Result<Vec<Item>, ApiError>) -> Self {
        match result {
            Ok(items) => Self {
                items,
                loading: false,
                ..self
            },
            Err(_) => Self {
                loading: false,
                error: Some(LOAD_FAILED.to_string()),
                ..self
            },
        }
    }

    pub fn add_started(self) -> Self {
        Self {
            adding: true,
            ..self
        }
    }

    /// Appends the server's copy of the new item.
    pub fn added(mut self, result: Result<Item, ApiError>) -> Self {
        self.adding = false;
        match result {
            Ok(item) => self.items.push(item),
            Err(_) => self.error = Some(ADD_FAILED.to_string()),
        }
        self
    }

    /// Swaps in the server's copy of an updated item, matched by id.
    pub fn updated(mut self, result: Result<Item, ApiError>) -> Self {
        match result {
            Ok(updated) => {
                for item in self.items.iter_mut().filter(|item| item.id == updated.id) {
                    *item = updated.clone();
                }
            }
            Err(_) => self.error = Some(UPDATE_FAILED.to_string()),
        }
        self
    }

    /// Drops the item once the server confirms the delete.
    pub fn deleted<T>(mut self, id: Uuid, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(_) => self.items.retain(|item| item.id != id),
            Err(_) => self.error = Some(DELETE_FAILED.to_string()),
        }
        self
    }

    pub fn error_dismissed(self) -> Self {
        Self { error: None, ..self }
    }

    pub fn find(&self, id: Uuid) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn bought_count(&self) -> usize {
        self.items.iter().filter(|item| item.bought).count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn item(name: &str, bought: bool) -> Item {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bought,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn new_state_is_loading_and_empty() {
        let state = ListState::new();
        assert!(state.loading);
        assert!(state.items.is_empty());
        assert!(state.error.is_none());
        assert!(!state.adding);
    }

    #[test]
    fn load_replaces_items_wholesale() {
        let stale = item("stale", false);
        let fresh = vec![item("a", false), item("b", true)];
        let state = ListState {
            items: vec![stale],
            ..ListState::new()
        }
        .load_started()
        .loaded(Ok(fresh.clone()));

        assert_eq!(state.items, fresh);
        assert!(!state.loading);
        assert_eq!(state.bought_count(), 1);
    }

    #[test]
    fn load_failure_keeps_items_and_sets_message() {
        let kept = vec![item("a", false)];
        let state = ListState {
            items: kept.clone(),
            ..ListState::new()
        }
        .loaded(Err(ApiError::TransportError("refused".into())));

        assert_eq!(state.items, kept);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
    }

    #[test]
    fn load_started_clears_previous_error() {
        let state = ListState {
            error: Some(ADD_FAILED.to_string()),
            ..ListState::default()
        }
        .load_started();
        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn add_appends_only_after_confirmation() {
        let existing = item("a", false);
        let state = ListState {
            items: vec![existing.clone()],
            ..ListState::default()
        }
        .add_started();
        assert!(state.adding);
        assert_eq!(state.items.len(), 1);

        let created = item("b", false);
        let state = state.added(Ok(created.clone()));
        assert!(!state.adding);
        assert_eq!(state.items, vec![existing, created]);
    }

    #[test]
    fn add_failure_clears_adding_flag() {
        let state = ListState::default()
            .add_started()
            .added(Err(ApiError::BadRequest("name cannot be empty".into())));
        assert!(!state.adding);
        assert!(state.items.is_empty());
        assert_eq!(state.error.as_deref(), Some(ADD_FAILED));
    }

    #[test]
    fn update_replaces_matching_item_in_place() {
        let a = item("a", false);
        let b = item("b", false);
        let mut bought_a = a.clone();
        bought_a.bought = true;

        let state = ListState {
            items: vec![a, b.clone()],
            ..ListState::default()
        }
        .updated(Ok(bought_a.clone()));
        assert_eq!(state.items, vec![bought_a, b]);
    }

    #[test]
    fn update_failure_leaves_items_untouched() {
        let items = vec![item("a", false)];
        let state = ListState {
            items: items.clone(),
            ..ListState::default()
        }
        .updated(Err(ApiError::NotFound));
        assert_eq!(state.items, items);
        assert_eq!(state.error.as_deref(), Some(UPDATE_FAILED));
    }

    #[test]
    fn delete_filters_by_id_and_second_delete_is_non_fatal() {
        let a = item("a", false);
        let b = item("b", false);
        let state = ListState {
            items: vec![a.clone(), b.clone()],
            ..ListState::default()
        }
        .deleted(a.id, Ok(()));
        assert_eq!(state.items, vec![b.clone()]);
        assert!(state.error.is_none());

        let state = state.deleted::<()>(a.id, Err(ApiError::NotFound));
        assert_eq!(state.items, vec![b]);
        assert_eq!(state.error.as_deref(), Some(DELETE_FAILED));

        let state = state.error_dismissed();
        assert!(state.error.is_none());
    }

    #[test]
    fn find_and_counts() {
        let a = item("a", true);
        let state = ListState {
            items: vec![a.clone(), item("b", false)],
            ..ListState::default()
        };
        assert_eq!(state.find(a.id), Some(&a));
        assert!(state.find(Uuid::nil()).is_none());
        assert_eq!(state.bought_count(), 1);
    }
}
