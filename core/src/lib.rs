//! Client core for the shopping-list API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the list state a
//! front end renders from.
//!
//! # Design
//! - `ShoppingClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. Hosts plug their HTTP stack in through
//!   `Transport`.
//! - `ListState` is a plain value moved through pure transitions;
//!   `ListController` sequences client, transport and transitions.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;

pub use client::ShoppingClient;
pub use controller::ListController;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::ListState;
pub use transport::Transport;
pub use types::{CreateItem, DeleteConfirmation, ErrorBody, Item, UpdateItem};
