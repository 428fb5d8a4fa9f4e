//! EVM head tracking service.
//!
//! Subscribes to new block headers over WebSocket and reconciles every announced header
//! against the canonical block and its transaction receipts fetched over JSON-RPC.
//!
//! # Module Structure
//!
//! - `bootstrap`: Loads configuration and wires transports into the head watcher
//! - `models`: Data structures for configuration and blockchain data
//! - `services`: Blockchain clients, transports and the head watcher
//! - `utils`: Logging, metrics and other common utilities

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
