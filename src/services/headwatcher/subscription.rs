//! Header subscription source.
//!
//! Opens a pub-sub subscription, decodes every notification into an [`EVMHeader`] and hands
//! the headers to the engine through a bounded [`HeaderQueue`]. The pump task stops at the
//! first stream error (or at the end of the stream) and reports it once as the terminal
//! error, which takes precedence over headers still waiting in the queue.

use std::{collections::HashMap, sync::Arc};

use futures::StreamExt;
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
	models::{EVMHeader, QueueConfig},
	services::{
		blockchain::{NotificationStream, SubscriptionTransport},
		headwatcher::{
			error::HeadWatcherError,
			queue::{HeaderQueue, PushOutcome},
		},
	},
	utils::metrics::{HEADERS_RECEIVED, HEADER_DECODE_FAILURES, LATEST_HEAD},
};

/// A running head subscription
///
/// Dropping it aborts the pump task.
#[derive(Debug)]
pub struct HeadSubscription {
	topic: String,
	queue: Arc<HeaderQueue>,
	terminal: Option<oneshot::Receiver<HeadWatcherError>>,
	pump: JoinHandle<()>,
}

impl HeadSubscription {
	/// Subscribes to `topic` on `transport` and starts pumping headers.
	///
	/// # Arguments
	/// * `transport` - Transport able to open `eth_subscribe` subscriptions
	/// * `topic` - Subscription topic, `newHeads` for block headers
	/// * `queue_config` - Capacity and overflow policy of the header queue
	///
	/// # Errors
	/// Returns [`HeadWatcherError::SubscriptionError`] when the subscription is refused.
	pub async fn subscribe<T: SubscriptionTransport + ?Sized>(
		transport: &T,
		topic: &str,
		queue_config: QueueConfig,
	) -> Result<Self, HeadWatcherError> {
		let stream = transport.subscribe_raw(topic).await.map_err(|e| {
			HeadWatcherError::subscription_error(
				format!("Failed to subscribe to {}", topic),
				Some(Box::new(e)),
				Some(HashMap::from([("topic".to_string(), topic.to_string())])),
			)
		})?;

		Ok(Self::from_stream(stream, topic, queue_config))
	}

	/// Starts pumping an already opened notification stream.
	pub fn from_stream(stream: NotificationStream, topic: &str, queue_config: QueueConfig) -> Self {
		let queue = Arc::new(HeaderQueue::new(queue_config));
		let (terminal_tx, terminal_rx) = oneshot::channel();

		let pump = tokio::spawn(pump_headers(
			stream,
			queue.clone(),
			topic.to_string(),
			terminal_tx,
		));

		Self {
			topic: topic.to_string(),
			queue,
			terminal: Some(terminal_rx),
			pump,
		}
	}

	pub fn topic(&self) -> &str {
		&self.topic
	}

	/// Next header in arrival order, or the error that terminated the subscription.
	///
	/// The terminal error is reported as soon as it is known. Headers still queued at that
	/// point are discarded. Calls after the terminal error return an engine error.
	pub async fn next_header(&mut self) -> Result<EVMHeader, HeadWatcherError> {
		let Some(terminal) = self.terminal.as_mut() else {
			return Err(HeadWatcherError::engine_error(
				"subscription already terminated",
				None,
				Some(HashMap::from([("topic".to_string(), self.topic.clone())])),
			));
		};

		let reported = tokio::select! {
			biased;
			received = &mut *terminal => Some(received),
			header = self.queue.pop() => match header {
				Some(header) => return Ok(header),
				None => None,
			},
		};
		// The pump closes the queue right after reporting
		let received = match reported {
			Some(received) => received,
			None => terminal.await,
		};
		self.terminal = None;

		Err(received.unwrap_or_else(|_| {
			HeadWatcherError::engine_error(
				"subscription pump stopped without reporting an error",
				None,
				Some(HashMap::from([("topic".to_string(), self.topic.clone())])),
			)
		}))
	}
}

impl Drop for HeadSubscription {
	fn drop(&mut self) {
		self.pump.abort();
	}
}

async fn pump_headers(
	mut stream: NotificationStream,
	queue: Arc<HeaderQueue>,
	topic: String,
	terminal: oneshot::Sender<HeadWatcherError>,
) {
	let metadata = || Some(HashMap::from([("topic".to_string(), topic.clone())]));

	let error = loop {
		let payload = match stream.next().await {
			Some(Ok(payload)) => payload,
			Some(Err(e)) => {
				break HeadWatcherError::subscription_error(
					"Subscription stream failed",
					Some(Box::new(e)),
					metadata(),
				);
			}
			None => {
				break HeadWatcherError::subscription_error(
					"Subscription stream ended",
					None,
					metadata(),
				);
			}
		};

		let header = match EVMHeader::decode(payload) {
			Ok(header) => header,
			Err(e) => {
				HEADER_DECODE_FAILURES.inc();
				tracing::warn!(topic = %topic, error = %e, "DecodeError: discarding notification");
				continue;
			}
		};

		HEADERS_RECEIVED.inc();
		LATEST_HEAD.set(i64::try_from(header.number_u64()).unwrap_or(i64::MAX));
		tracing::debug!(number = header.number_u64(), hash = %header.hash, "Header received");

		match queue.push(header).await {
			PushOutcome::Queued => {}
			PushOutcome::Evicted(evicted) => {
				tracing::warn!(
					number = evicted.number_u64(),
					hash = %evicted.hash,
					capacity = queue.capacity(),
					"Header queue full, dropped oldest header"
				);
			}
			PushOutcome::Closed => return,
		}
	};

	let _ = terminal.send(error);
	queue.close();
}
