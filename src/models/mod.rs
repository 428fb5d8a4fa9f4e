//! Domain models for head tracking.
//!
//! - `blockchain`: EVM headers, blocks, transactions and receipts
//! - `config`: Configuration loading and validation
//! - `core`: Tracker configuration model
//! - `security`: Secret values

mod blockchain;
mod config;
mod core;
mod security;

pub use blockchain::evm::{
	EVMBaseBlock, EVMBaseReceipt, EVMBaseTransaction, EVMBlock, EVMHeader, EVMReceiptLog,
	EVMTransaction, EVMTransactionReceipt, HeaderDecodeError, EMPTY_ROOT_HASH,
};

pub use core::{FetchMode, OverflowPolicy, QueueConfig, TrackerConfig};

pub use config::{ConfigError, ConfigLoader};

pub use security::{SecretString, SecretValue, SecurityError, SecurityResult};
