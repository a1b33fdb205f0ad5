//! Single-user todo list rendered server-side and persisted to a flat JSON file.
//!
//! Reads go through [`TodoStore::load`] into [`todo_page`], writes are parsed into
//! an [`Action`], applied to the loaded collection and persisted with [`TodoStore::save`]
//! before redirecting back to the list.

mod actions;
mod config;
mod html;
mod host;
mod result;
mod store;
mod todo;

pub use actions::*;
pub use config::*;
pub use html::*;
pub use host::*;
pub use result::{Error, Result};
pub use store::*;
pub use todo::*;

use axum::routing::method_routing;
pub use axum::{
    self,
    body::Body,
    extract::{Form, Query, Request, State},
    http::{self, header, HeaderValue, Method, StatusCode},
    response::*,
    routing::{get, post},
    Router,
};
pub use maud::{html, Markup, Render, DOCTYPE};
pub use serde::{Deserialize, Serialize};
pub use std::{env, sync::Arc};
pub use tower::{self, ServiceBuilder};
pub use tracing::{debug, error, info, trace, warn};

/// A little helper to init router and route in a single call to improve formatting
pub fn route<S: Clone + Send + Sync + 'static>(
    path: &str,
    method_router: method_routing::MethodRouter<S>,
) -> Router<S> {
    Router::<S>::new().route(path, method_router)
}
