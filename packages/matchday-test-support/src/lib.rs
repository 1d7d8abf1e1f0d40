//! Shared helpers for matchday integration tests: one-time logging bootstrap
//! and unique naming for fixtures created inside a test database.

pub mod logging;
pub mod unique_helpers;
