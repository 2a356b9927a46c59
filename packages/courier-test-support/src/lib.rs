//! Shared helpers for courier test binaries: logging bootstrap and
//! collision-free test data.

pub mod logging;
pub mod unique_helpers;

pub use unique_helpers::{unique_filename, unique_str, unique_username};
