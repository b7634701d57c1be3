//! Runtime-specific modules split by target platform.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;
