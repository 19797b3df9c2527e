use std::sync::Arc;

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    service::ItemService,
    store::{self, ItemStore, StoreError},
};

#[derive(Clone)]
pub struct AppState {
    pub service: ItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service: ItemService::new(store, clock),
        }
    }

    /// Opens the configured store with the wall clock.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store = store::open(&config.database_url)?;
        Ok(Self::new(store, Arc::new(SystemClock)))
    }
}
