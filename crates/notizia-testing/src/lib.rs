//! Testing infrastructure for notizia tests.
//!
//! This crate provides utilities shared by unit and integration tests:
//! - `fixtures`: builders for denormalized session rows
//! - `TestWorld`: isolated data directory plus CLI invocation helpers
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::TestWorld;
