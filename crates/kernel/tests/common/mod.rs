#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the REAL router from an in-memory admin configuration, so tests
//! exercise the same state, templates and handlers as the binary.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use caravel_kernel::{AdminConfig, AppState};

/// Header carrying viewer roles in the default configuration.
pub const ROLES_HEADER: &str = "x-caravel-roles";

/// Configuration used by most tests: three resources, the user accounts
/// resource restricted to admins, and a relative logout path.
pub const BLOG_CONFIG: &str = r#"
logout = "logout"

[[resources]]
uri = "posts"
model = "App\\Post"

[[resources]]
uri = "user-accounts"
model = "App\\User"

[[resources]]
uri = "tags"
model = "App\\Tag"

[[policies]]
model = "App\\User"
manage = ["admin"]
"#;

/// Test application wrapper around the real router.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Build an app from TOML admin configuration.
    pub fn from_toml(toml: &str) -> Self {
        let config = AdminConfig::from_toml_str(toml).expect("invalid test configuration");
        let state = AppState::new(&config).expect("failed to initialize AppState");
        Self::from_state(state)
    }

    /// Build an app from prepared state.
    pub fn from_state(state: AppState) -> Self {
        let router = caravel_kernel::routes::app(state.clone());
        Self { router, state }
    }

    /// Send a GET request, optionally as a viewer with the given roles.
    pub async fn get(&self, path: &str, roles: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().uri(path);
        if let Some(roles) = roles {
            request = request.header(ROLES_HEADER, roles);
        }
        let request = request.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

/// Extract the sidebar markup from a rendered page.
pub fn sidebar(html: &str) -> &str {
    let start = html
        .find(r#"<ul class="nav nav-pills nav-stacked">"#)
        .expect("page has no navigation");
    let end = html[start..].find("</ul>").expect("unterminated navigation") + start;
    &html[start..end]
}
