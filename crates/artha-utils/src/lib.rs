//! Shared utilities for ArthaVision
//!
//! Common functionality used across the workspace. Currently this is the
//! tracing setup shared by every binary.

pub mod logging;

pub use logging::{LogFormat, init_tracing, init_tracing_with};
