//! Blockchain client interfaces and implementations.
//!
//! - [`BlockChainClient`] / [`EvmClientTrait`]: the request/response operations used to
//!   reconcile announced heads
//! - [`EvmClient`]: implementation over any [`BlockchainTransport`]
//! - Transports: HTTP JSON-RPC and WebSocket (JSON-RPC plus `eth_subscribe`)

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::{EvmClient, EvmClientTrait};
pub use error::BlockChainError;
pub use transports::{
	BlockchainTransport, EVMTransportClient, HttpTransportClient, NotificationStream,
	SubscriptionTransport, TransportError, WsTransportClient,
};
