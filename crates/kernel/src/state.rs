//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use tracing::info;

use crate::config::AdminConfig;
use crate::drawbridge::{Ability, Drawbridge, PolicyDrawbridge, Viewer};
use crate::menu::{NavLink, RouteTable, build_navigation};
use crate::resource::ResourceRegistry;
use crate::routes::RESERVED_ROOT_URIS;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Managed resources in display order.
    resources: ResourceRegistry,

    /// Authorization gate.
    drawbridge: Arc<dyn Drawbridge>,

    /// Named route table for the admin prefix.
    routes: RouteTable,

    /// Theme engine for template rendering.
    theme: ThemeEngine,

    /// Configured logout path, as written in configuration.
    logout: Option<String>,

    /// Header carrying the viewer's roles.
    viewer_header: HeaderName,
}

impl AppState {
    /// Create application state using the configured policies.
    pub fn new(config: &AdminConfig) -> Result<Self> {
        let drawbridge = PolicyDrawbridge::new(&config.policies);
        Self::with_drawbridge(config, Arc::new(drawbridge))
    }

    /// Create application state with a host-supplied authorization gate.
    pub fn with_drawbridge(config: &AdminConfig, drawbridge: Arc<dyn Drawbridge>) -> Result<Self> {
        let viewer_header =
            HeaderName::from_bytes(config.viewer_header.to_ascii_lowercase().as_bytes())
                .with_context(|| format!("invalid viewer_header: {}", config.viewer_header))?;

        let theme = ThemeEngine::new(config.assets.clone())
            .context("failed to initialize theme engine")?;

        let routes = RouteTable::new(&config.prefix);
        let reserved: &[&str] = if routes.prefix().is_empty() {
            RESERVED_ROOT_URIS
        } else {
            &[]
        };
        let resources =
            ResourceRegistry::from_entries_reserving(config.resources.iter().cloned(), reserved);

        info!(
            resources = resources.len(),
            prefix = %routes.dashboard_path(),
            "admin state initialized"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                resources,
                drawbridge,
                routes,
                theme,
                logout: config.logout_path().map(str::to_string),
                viewer_header,
            }),
        })
    }

    /// Get the resource registry.
    pub fn resources(&self) -> &ResourceRegistry {
        &self.inner.resources
    }

    /// Get the route table.
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Get the configured logout path.
    pub fn logout(&self) -> Option<&str> {
        self.inner.logout.as_deref()
    }

    /// Get the header carrying viewer roles.
    pub fn viewer_header(&self) -> &HeaderName {
        &self.inner.viewer_header
    }

    /// Whether `viewer` may manage resources of `model`.
    pub fn can_manage(&self, viewer: &Viewer, model: &str) -> bool {
        self.inner.drawbridge.allows(viewer, Ability::Manage, model)
    }

    /// Build the sidebar for `viewer` with `current` as the active resource.
    pub fn navigation(&self, viewer: &Viewer, current: Option<&str>) -> Vec<NavLink> {
        build_navigation(
            current,
            self.inner.resources.entries(),
            |model| self.can_manage(viewer, model),
            &self.inner.routes,
            self.logout(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resources", &self.inner.resources.len())
            .field("routes", &self.inner.routes)
            .field("theme", &self.inner.theme)
            .finish()
    }
}
