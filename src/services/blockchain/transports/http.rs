//! HTTP transport implementation for blockchain interactions.
//!
//! A single JSON-RPC endpoint reached through a pooled `reqwest` client. Requests are not
//! retried: a failed request surfaces immediately as a [`TransportError`].

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};
use url::Url;

use crate::services::blockchain::transports::{
	check_rpc_error, BlockchainTransport, TransportError,
};

/// Basic HTTP transport client for JSON-RPC requests.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	pub client: reqwest::Client,
	url: String,
	/// The stringified JSON RPC payload used to test the connection
	test_connection_payload: Option<String>,
}

impl HttpTransportClient {
	/// Creates a client for `rpc_url` and verifies the endpoint answers a test request.
	///
	/// # Arguments
	/// * `rpc_url` - HTTP(S) JSON-RPC endpoint
	/// * `timeout` - Timeout applied to every request
	/// * `test_connection_payload` - JSON-RPC payload used for the check, `net_version` if `None`
	pub async fn new(
		rpc_url: &str,
		timeout: Duration,
		test_connection_payload: Option<String>,
	) -> Result<Self, anyhow::Error> {
		let url = Url::parse(rpc_url).with_context(|| format!("Invalid RPC URL: {}", rpc_url))?;

		let client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(timeout)
			.connect_timeout(timeout.min(Duration::from_secs(20)))
			.build()
			.context("Failed to create base HTTP client")?;

		let transport = Self {
			client,
			url: url.as_str().trim_end_matches('/').to_string(),
			test_connection_payload,
		};
		transport.try_connect().await?;

		Ok(transport)
	}

	/// Sends the test payload and fails unless the endpoint answers with a success status.
	pub async fn try_connect(&self) -> Result<(), anyhow::Error> {
		let test_request = match &self.test_connection_payload {
			Some(payload) => {
				serde_json::from_str(payload).context("Failed to parse test payload as JSON")?
			}
			None => json!({
				"jsonrpc": "2.0",
				"id": 1,
				"method": "net_version",
				"params": []
			}),
		};

		let response = self
			.client
			.post(&self.url)
			.json(&test_request)
			.send()
			.await
			.with_context(|| format!("Failed to connect to {}", self.url))?;

		let status = response.status();
		if !status.is_success() {
			return Err(anyhow::anyhow!(
				"Failed to connect to {}: {}",
				self.url,
				status.as_u16()
			));
		}

		Ok(())
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.url.clone()
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = self.customize_request(method, params).await;
		let request_body = serde_json::to_string(&request_body).map_err(|e| {
			TransportError::request_serialization(
				"Failed to serialize request JSON",
				Some(Box::new(e)),
				None,
			)
		})?;

		let metadata = || {
			Some(HashMap::from([
				("method".to_string(), method.to_string()),
				("url".to_string(), self.url.clone()),
			]))
		};

		let response = self
			.client
			.post(&self.url)
			.header("Content-Type", "application/json")
			.body(request_body)
			.send()
			.await
			.map_err(|e| {
				TransportError::network(
					format!("Failed to send {} request", method),
					Some(Box::new(e)),
					metadata(),
				)
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(
				status,
				self.url.clone(),
				body,
				None,
				metadata(),
			));
		}

		let body: Value = response.json().await.map_err(|e| {
			TransportError::response_parse(
				"Failed to parse JSON response",
				Some(Box::new(e)),
				metadata(),
			)
		})?;

		check_rpc_error(method, body)
	}
}
