//! Utility modules for common functionality.
//!
//! - constants: Constants for the application
//! - logging: Logging utilities
//! - macros: Macros for common functionality
//! - metrics: Metrics utilities
//! - parsing: Parsing utilities
//! - tests: Test utilities

pub mod constants;
pub mod logging;
pub mod macros;
pub mod metrics;
pub mod parsing;

pub use constants::*;
pub use macros::*;
pub use parsing::*;
