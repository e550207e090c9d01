//! Admin navigation.
//!
//! Builds the sidebar links from the resource registry:
//! - A fixed dashboard entry
//! - One entry per resource the viewer may manage
//! - An optional logout entry

mod navigation;
mod urls;

pub use navigation::{
    NavKind, NavLink, build_navigation, normalize_logout_path, resource_label,
};
pub use urls::{DASHBOARD_ROUTE, RouteTable, UrlGenerator, index_route_name};
