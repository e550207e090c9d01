//! Admin pages: dashboard and per-resource index.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use tracing::debug;

use crate::drawbridge::Viewer;
use crate::error::{AppError, AppResult};
use crate::menu::{NavKind, RouteTable, resource_label};
use crate::state::AppState;

use super::helpers::render_admin_template;

/// Admin dashboard.
///
/// GET {prefix}
async fn dashboard(State(state): State<AppState>, viewer: Viewer) -> AppResult<Html<String>> {
    let resources: Vec<_> = state
        .navigation(&viewer, None)
        .into_iter()
        .filter(|link| link.kind == NavKind::Resource)
        .collect();

    let mut context = tera::Context::new();
    context.insert("resources", &resources);

    render_admin_template(
        &state,
        &viewer,
        None,
        "admin/dashboard.html",
        "Dashboard",
        context,
    )
}

/// Resource index page.
///
/// GET {prefix}/{uri}
async fn resource_index(
    State(state): State<AppState>,
    Path(uri): Path<String>,
    viewer: Viewer,
) -> AppResult<Html<String>> {
    let resource = state.resources().get(&uri).ok_or(AppError::NotFound)?;

    if !state.can_manage(&viewer, &resource.model) {
        debug!(uri = %uri, model = %resource.model, "resource access denied");
        return Err(AppError::Forbidden);
    }

    let mut context = tera::Context::new();
    context.insert("resource", resource);

    render_admin_template(
        &state,
        &viewer,
        Some(&uri),
        "admin/resource.html",
        &resource_label(&uri),
        context,
    )
}

/// Create the admin router for the given route table.
pub fn router(routes: &RouteTable) -> Router<AppState> {
    Router::new()
        .route(&routes.dashboard_path(), get(dashboard))
        .route(&format!("{}/{{uri}}", routes.prefix()), get(resource_index))
}
