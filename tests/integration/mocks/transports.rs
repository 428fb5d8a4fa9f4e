use futures::channel::mpsc;
use head_tracker::services::blockchain::{
	BlockchainTransport, NotificationStream, SubscriptionTransport, TransportError,
};
use mockall::mock;
use serde::Serialize;
use serde_json::Value;

// Mock implementation of a EVM transport client.
// Used for testing Ethereum compatible blockchain interactions.
// Provides functionality to simulate raw JSON-RPC request handling.
mock! {
	pub EVMTransportClient {
		pub async fn send_raw_request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError>;
		pub async fn get_current_url(&self) -> String;
	}

	impl Clone for EVMTransportClient {
		fn clone(&self) -> Self;
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for MockEVMTransportClient {
	async fn get_current_url(&self) -> String {
		self.get_current_url().await
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		self.send_raw_request(method, params.map(Into::into)).await
	}
}

// Mock implementation of a pub-sub transport.
// Tests hand it a stream, usually the receiving half of a channel.
mock! {
	pub SubscriptionTransport {}

	#[async_trait::async_trait]
	impl SubscriptionTransport for SubscriptionTransport {
		async fn subscribe_raw(&self, topic: &str) -> Result<NotificationStream, TransportError>;
	}
}

/// Sending half feeding a channel backed subscription
pub type NotificationSender = mpsc::UnboundedSender<Result<Value, TransportError>>;

/// A subscription transport that accepts exactly one `topic` subscription and yields what
/// is sent through the returned sender.
pub fn channel_subscription_transport(topic: &'static str) -> (NotificationSender, MockSubscriptionTransport) {
	let (tx, rx) = mpsc::unbounded();
	let mut transport = MockSubscriptionTransport::new();
	transport
		.expect_subscribe_raw()
		.withf(move |requested: &str| requested == topic)
		.times(1)
		.return_once(move |_| Ok(Box::pin(rx)));
	(tx, transport)
}

/// A subscription stream fed by the returned sender
pub fn channel_notification_stream() -> (NotificationSender, NotificationStream) {
	let (tx, rx) = mpsc::unbounded();
	(tx, Box::pin(rx))
}

pub fn subscription_closed() -> TransportError {
	TransportError::subscription("subscription stream closed", None, None)
}
