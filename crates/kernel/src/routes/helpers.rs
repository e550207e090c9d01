//! Shared route helpers for page rendering.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderName};
use axum::http::request::Parts;
use axum::response::Html;

use crate::drawbridge::Viewer;
use crate::error::AppResult;
use crate::state::AppState;
use crate::theme::PageShell;

/// Read the viewer's roles from the configured header.
///
/// A missing or non-UTF-8 header yields an anonymous viewer.
pub fn viewer_from_headers(headers: &HeaderMap, header: &HeaderName) -> Viewer {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(Viewer::from_header_value)
        .unwrap_or_default()
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(viewer_from_headers(&parts.headers, state.viewer_header()))
    }
}

/// Render an admin page template inside the shell.
///
/// Builds the sidebar for `viewer` with `current` active and inserts the
/// shell values on top of `context`.
pub fn render_admin_template(
    state: &AppState,
    viewer: &Viewer,
    current: Option<&str>,
    template: &str,
    title: &str,
    context: tera::Context,
) -> AppResult<Html<String>> {
    let nav = state.navigation(viewer, current);
    let page = PageShell {
        title,
        nav: &nav,
        content: "",
    };

    let html = state.theme().render_page(template, &page, context)?;
    Ok(Html(html))
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
