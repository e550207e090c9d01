//! HTTP route handlers.

pub mod admin;
pub mod health;
pub mod helpers;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resource uris that collide with non-admin routes when the admin is
/// mounted at the root.
pub const RESERVED_ROOT_URIS: &[&str] = &["health"];

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(admin::router(state.routes()))
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
