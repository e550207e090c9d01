//! Managed resources exposed in the admin navigation.
//!
//! Resources come from configuration as an ordered list of
//! `(uri, model)` pairs; list order is display order.

mod registry;

pub use registry::{ResourceEntry, ResourceRegistry};
