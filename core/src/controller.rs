//! Drives a [`ListState`] through the client and a host transport.
//!
//! Each user action issues exactly one request, feeds the outcome into the
//! matching state transition, and never returns the failure to the caller:
//! errors end up in `state().error`. Repeated actions are not de-duplicated.

use tracing::warn;
use uuid::Uuid;

use crate::client::ShoppingClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::state::ListState;
use crate::transport::Transport;
use crate::types::{CreateItem, UpdateItem};

pub struct ListController<T> {
    client: ShoppingClient,
    transport: T,
    state: ListState,
}

impl<T: Transport> ListController<T> {
    pub fn new(client: ShoppingClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: ListState::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    fn round_trip<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&ShoppingClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let response = self.transport.execute(request?)?;
        parse(&self.client, response)
    }

    fn transition(&mut self, f: impl FnOnce(ListState) -> ListState) {
        self.state = f(std::mem::take(&mut self.state));
    }

    /// Loads the full list, replacing local state.
    pub fn mount(&mut self) {
        self.transition(ListState::load_started);
        let result = self.round_trip(
            Ok(self.client.build_list_items()),
            ShoppingClient::parse_list_items,
        );
        if let Err(e) = &result {
            warn!("Failed to load items: {e}");
        }
        self.transition(|state| state.loaded(result));
    }

    /// Returns whether the item was created, so the host can keep the typed
    /// name on failure.
    pub fn add(&mut self, name: &str) -> bool {
        self.transition(ListState::add_started);
        let input = CreateItem {
            name: name.to_string(),
        };
        let result = self.round_trip(
            self.client.build_create_item(&input),
            ShoppingClient::parse_create_item,
        );
        let created = result.is_ok();
        if let Err(e) = &result {
            warn!("Failed to add item {name:?}: {e}");
        }
        self.transition(|state| state.added(result));
        created
    }

    pub fn set_bought(&mut self, id: Uuid, bought: bool) {
        let result = self.round_trip(
            self.client.build_update_item(id, &UpdateItem { bought }),
            ShoppingClient::parse_update_item,
        );
        if let Err(e) = &result {
            warn!("Failed to update item {id}: {e}");
        }
        self.transition(|state| state.updated(result));
    }

    /// Flips the local `bought` flag through the server. Ids not in the
    /// current list are ignored.
    pub fn toggle(&mut self, id: Uuid) {
        if let Some(bought) = self.state.find(id).map(|item| item.bought) {
            self.set_bought(id, !bought);
        }
    }

    pub fn delete(&mut self, id: Uuid) {
        let result = self.round_trip(
            Ok(self.client.build_delete_item(id)),
            ShoppingClient::parse_delete_item,
        );
        if let Err(e) = &result {
            warn!("Failed to delete item {id}: {e}");
        }
        self.transition(|state| state.deleted(id, result));
    }

    pub fn dismiss_error(&mut self) {
        self.transition(ListState::error_dismissed);
    }
}
