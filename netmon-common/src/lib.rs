//! Common types and utilities for netmon
//!
//! This crate provides the identity types, configuration structures, error
//! types and logging bootstrap shared by the reconciliation core and its
//! front-ends.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{DeviceProfile, LoggingConfig, NetmonConfig, PipelineConfig};
pub use error::{AcquisitionError, Error};
pub use logging::{init_logging, init_logging_with_filter, try_init_logging, LogLevel};
pub use types::*;
