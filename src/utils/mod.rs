//! Utility functions and helpers for the relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and credential scrubbing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
