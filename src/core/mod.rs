// LogTally - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
