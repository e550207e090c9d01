//! Theme engine and template rendering.
//!
//! Provides the Tera-based page shell: master layout, sidebar navigation,
//! and the inline CSS/JS snippets every admin page carries.

mod engine;

pub use engine::{MASTER_TEMPLATE, PageShell, ThemeEngine};
