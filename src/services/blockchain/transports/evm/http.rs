//! EVM transport implementation for blockchain interactions.
//!
//! Wraps [`HttpTransportClient`] and verifies the endpoint with `net_version`, which every
//! EVM node answers.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
	models::TrackerConfig,
	services::blockchain::transports::{BlockchainTransport, HttpTransportClient, TransportError},
};

/// HTTP JSON-RPC transport for EVM-compatible nodes
#[derive(Clone, Debug)]
pub struct EVMTransportClient {
	/// The underlying HTTP transport client that handles actual RPC communications
	pub http_client: HttpTransportClient,
}

impl EVMTransportClient {
	/// Connects to the configured RPC endpoint of `config`.
	pub async fn new(config: &TrackerConfig) -> Result<Self, anyhow::Error> {
		Self::connect(
			config.rpc_url.as_str(),
			Duration::from_millis(config.request_timeout_ms),
		)
		.await
	}

	/// Connects to `rpc_url` and checks the node answers `net_version`.
	pub async fn connect(rpc_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
		let test_connection_payload =
			Some(r#"{"id":1,"jsonrpc":"2.0","method":"net_version","params":[]}"#.to_string());
		let http_client =
			HttpTransportClient::new(rpc_url, timeout, test_connection_payload).await?;
		Ok(Self { http_client })
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for EVMTransportClient {
	async fn get_current_url(&self) -> String {
		self.http_client.get_current_url().await
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		self.http_client.send_raw_request(method, params).await
	}
}
