//! Navigation builder - turns the resource list into sidebar links.

use serde::Serialize;
use tracing::warn;

use super::urls::{DASHBOARD_ROUTE, UrlGenerator, index_route_name};
use crate::resource::ResourceEntry;

/// What a navigation link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKind {
    Dashboard,
    Resource,
    Logout,
}

/// A single sidebar link, built per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
    pub kind: NavKind,
}

/// Build the sidebar links.
///
/// The dashboard link always comes first and is active when no resource is
/// current. Resources follow in the given order, filtered by `can_manage`
/// (called with the resource's model type). A logout link is appended when
/// `logout` is set and non-empty.
pub fn build_navigation<F>(
    current: Option<&str>,
    resources: &[ResourceEntry],
    can_manage: F,
    urls: &dyn UrlGenerator,
    logout: Option<&str>,
) -> Vec<NavLink>
where
    F: Fn(&str) -> bool,
{
    let mut links = Vec::with_capacity(resources.len() + 2);

    links.push(NavLink {
        label: "Dashboard".to_string(),
        href: urls.route(DASHBOARD_ROUTE).unwrap_or_else(|| "/".to_string()),
        active: current.is_none(),
        kind: NavKind::Dashboard,
    });

    for resource in resources {
        if !can_manage(&resource.model) {
            continue;
        }

        let Some(href) = urls.route(&index_route_name(&resource.uri)) else {
            warn!(uri = %resource.uri, "no route for resource, omitting from navigation");
            continue;
        };

        links.push(NavLink {
            label: resource_label(&resource.uri),
            href,
            active: current == Some(resource.uri.as_str()),
            kind: NavKind::Resource,
        });
    }

    if let Some(path) = logout.filter(|p| !p.is_empty()) {
        links.push(NavLink {
            label: "Logout".to_string(),
            href: normalize_logout_path(path),
            active: false,
            kind: NavKind::Logout,
        });
    }

    links
}

/// Human label for a resource uri: hyphens become spaces and every word's
/// first letter is upper-cased ("user-accounts" -> "User Accounts").
///
/// Words are split on any whitespace after hyphen replacement, so spaces
/// already present in the uri start a new word too.
pub fn resource_label(uri: &str) -> String {
    let mut label = String::with_capacity(uri.len());
    let mut word_start = true;

    for c in uri.chars() {
        let c = if c == '-' { ' ' } else { c };
        if word_start {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        word_start = c.is_whitespace();
    }

    label
}

/// Make a logout path absolute by prefixing `/` when it is missing.
pub fn normalize_logout_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
