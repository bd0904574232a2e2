// LogTally - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: core (read-only models), owo-colors.
// Must NOT depend on: platform, app.

pub mod report;
pub mod theme;
