//! Security models
//!
//! - `error`: Error types for security operations
//! - `secret`: Secret values with zeroization on drop

mod error;
mod secret;

pub use error::{SecurityError, SecurityResult};
pub use secret::{SecretString, SecretValue};
