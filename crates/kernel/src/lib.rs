//! Caravel admin shell library.
//!
//! This library exposes the shell internals for embedding and integration
//! testing. The main entry point for running the server is the `caravel`
//! binary.

pub mod config;
pub mod drawbridge;
pub mod error;
pub mod menu;
pub mod resource;
pub mod routes;
pub mod state;
pub mod theme;

pub use config::{AdminConfig, Config};
pub use drawbridge::{Ability, Drawbridge, PolicyDrawbridge, Viewer};
pub use state::AppState;
