// LogTally - app/mod.rs
//
// Application layer: orchestration of one analysis run.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod analysis;
