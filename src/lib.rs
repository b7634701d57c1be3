//! vtracker library: API client, view-models and the UI shared by the
//! terminal and browser runtimes.

pub mod api;
pub mod app_core;
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod model;
pub mod runtime;
pub mod theme;
pub mod ui;
