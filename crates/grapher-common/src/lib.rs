//! # Grapher Common
//!
//! Shared error type, logging setup and test helpers for Grapher.
//!
//! This crate provides the foundational pieces used across all other crates
//! in the Grapher workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{GrapherError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig, LOG_ENV_VAR};
