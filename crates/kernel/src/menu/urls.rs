//! Named route generation for admin links.

/// Route name of the admin dashboard.
pub const DASHBOARD_ROUTE: &str = "caravel::dashboard";

const ROUTE_NAMESPACE: &str = "caravel::";
const INDEX_SUFFIX: &str = ".index";

/// Maps a route name to a URL.
pub trait UrlGenerator: Send + Sync {
    /// Resolve a named route, or `None` if the name is unknown.
    fn route(&self, name: &str) -> Option<String>;
}

/// Route name of a resource's index page (e.g. `caravel::posts.index`).
pub fn index_route_name(uri: &str) -> String {
    format!("{ROUTE_NAMESPACE}{uri}{INDEX_SUFFIX}")
}

/// Route table for an admin mounted under a single prefix.
///
/// - `caravel::dashboard` -> `{prefix}`
/// - `caravel::{uri}.index` -> `{prefix}/{uri}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    prefix: String,
}

impl RouteTable {
    /// Create a route table. The prefix is normalized to `/segment` form;
    /// an empty prefix mounts the admin at the site root.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    /// The normalized prefix (empty for root).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Dashboard path.
    pub fn dashboard_path(&self) -> String {
        if self.prefix.is_empty() {
            "/".to_string()
        } else {
            self.prefix.clone()
        }
    }

    /// Index path of a resource.
    pub fn resource_path(&self, uri: &str) -> String {
        format!("{}/{uri}", self.prefix)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("/admin")
    }
}

impl UrlGenerator for RouteTable {
    fn route(&self, name: &str) -> Option<String> {
        if name == DASHBOARD_ROUTE {
            return Some(self.dashboard_path());
        }

        let uri = name
            .strip_prefix(ROUTE_NAMESPACE)?
            .strip_suffix(INDEX_SUFFIX)?;
        if uri.is_empty() || uri.contains('/') {
            return None;
        }

        Some(self.resource_path(uri))
    }
}
