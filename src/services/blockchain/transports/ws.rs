//! WebSocket transport built on alloy's pub-sub client.
//!
//! One socket serves both `eth_subscribe` notifications and ordinary JSON-RPC requests, so
//! the same transport can feed the header subscription and the block/receipt fetches.

use std::collections::HashMap;

use alloy::{
	network::Ethereum,
	providers::{Provider, RootProvider, WsConnect},
	rpc::client::ClientBuilder,
	transports::{RpcError, TransportErrorKind},
};
use async_trait::async_trait;
use futures::stream;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;

use crate::services::blockchain::transports::{
	BlockchainTransport, NotificationStream, SubscriptionTransport, TransportError,
};

/// JSON-RPC and subscription transport over a single WebSocket connection
#[derive(Clone)]
pub struct WsTransportClient {
	provider: RootProvider<Ethereum>,
	url: String,
}

impl std::fmt::Debug for WsTransportClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WsTransportClient")
			.field("url", &self.url)
			.finish_non_exhaustive()
	}
}

impl WsTransportClient {
	/// Opens the WebSocket connection to `ws_url`.
	///
	/// A lost connection is not re-established; open subscriptions end with an error.
	pub async fn connect(ws_url: &str) -> Result<Self, TransportError> {
		let client = ClientBuilder::default()
			.ws(WsConnect::new(ws_url).with_max_retries(0))
			.await
			.map_err(|e| {
				TransportError::network(
					format!("Failed to connect to WebSocket endpoint {}", ws_url),
					Some(Box::new(e)),
					None,
				)
			})?;

		tracing::info!(url = %ws_url, "WebSocket connection established");

		Ok(Self {
			provider: RootProvider::new(client),
			url: ws_url.to_string(),
		})
	}
}

fn map_rpc_error(method: &str, url: &str, err: RpcError<TransportErrorKind>) -> TransportError {
	if let Some(payload) = err.as_error_resp() {
		return TransportError::rpc(method, payload.code, payload.message.to_string(), None);
	}

	TransportError::network(
		format!("{} request failed", method),
		Some(Box::new(err)),
		Some(HashMap::from([("url".to_string(), url.to_string())])),
	)
}

#[async_trait]
impl BlockchainTransport for WsTransportClient {
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
		let params: Value = params.map(Into::into).unwrap_or_else(|| json!([]));

		let result: Value = self
			.provider
			.client()
			.request::<_, Value>(method.to_string(), params)
			.await
			.map_err(|e| map_rpc_error(method, &self.url, e))?;

		// Same envelope as the HTTP transport so clients stay transport agnostic
		Ok(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"result": result
		}))
	}
}

#[async_trait]
impl SubscriptionTransport for WsTransportClient {
	async fn subscribe_raw(&self, topic: &str) -> Result<NotificationStream, TransportError> {
		let subscription = self
			.provider
			.subscribe::<_, Value>((topic.to_string(),))
			.await
			.map_err(|e| {
				TransportError::subscription(
					format!("eth_subscribe({}) failed", topic),
					Some(Box::new(e)),
					Some(HashMap::from([("url".to_string(), self.url.clone())])),
				)
			})?;

		tracing::info!(topic = %topic, url = %self.url, "Subscription established");

		let topic = topic.to_string();
		let notifications = stream::unfold(
			(subscription, topic, false),
			|(mut subscription, topic, failed)| async move {
				if failed {
					return None;
				}
				loop {
					match subscription.recv().await {
						Ok(payload) => return Some((Ok(payload), (subscription, topic, false))),
						Err(RecvError::Lagged(skipped)) => {
							tracing::warn!(
								topic = %topic,
								skipped,
								"Subscription lagged behind, notifications were skipped"
							);
						}
						Err(RecvError::Closed) => {
							let error = TransportError::subscription(
								"subscription stream closed",
								None,
								Some(HashMap::from([("topic".to_string(), topic.clone())])),
							);
							return Some((Err(error), (subscription, topic, true)));
						}
					}
				}
			},
		);

		Ok(Box::pin(notifications))
	}
}
