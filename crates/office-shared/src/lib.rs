//! # Office Shared
//!
//! Shared utilities, types, and telemetry for the office management core.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
