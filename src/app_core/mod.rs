//! Shared application core: state, input types, reducer, routes and view-models.

pub mod catalog;
pub mod input;
pub mod leaderboard;
pub mod reducer;
pub mod request;
pub mod route;
pub mod state;
