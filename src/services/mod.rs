//! Core services implementing the head tracking logic.
//!
//! - `blockchain`: Blockchain client interfaces, transports and implementations
//! - `headwatcher`: Header subscription, reconciliation and engine lifecycle

pub mod blockchain;
pub mod headwatcher;
