//! Bounded header queue between the subscription pump and the engine.
//!
//! The queue has one producer (the pump) and one consumer (the engine). When it is full the
//! configured [`OverflowPolicy`] decides between evicting the oldest header and suspending
//! the producer.

use std::{
	collections::VecDeque,
	sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::Notify;

use crate::{
	models::{EVMHeader, OverflowPolicy, QueueConfig},
	utils::metrics::{HEADERS_DROPPED, QUEUE_DEPTH},
};

/// Result of [`HeaderQueue::push`]
#[derive(Debug)]
pub enum PushOutcome {
	/// The header was appended
	Queued,
	/// The header was appended after evicting the returned one
	Evicted(Box<EVMHeader>),
	/// The queue is closed; the header was discarded
	Closed,
}

#[derive(Debug, Default)]
struct QueueState {
	headers: VecDeque<EVMHeader>,
	closed: bool,
	dropped: u64,
}

/// FIFO of decoded headers with a fixed capacity
#[derive(Debug)]
pub struct HeaderQueue {
	state: Mutex<QueueState>,
	items: Notify,
	space: Notify,
	capacity: usize,
	overflow: OverflowPolicy,
}

impl HeaderQueue {
	/// Creates an empty queue. A zero capacity is raised to one.
	pub fn new(config: QueueConfig) -> Self {
		let capacity = config.capacity.max(1);
		Self {
			state: Mutex::new(QueueState {
				headers: VecDeque::with_capacity(capacity),
				..Default::default()
			}),
			items: Notify::new(),
			space: Notify::new(),
			capacity,
			overflow: config.overflow,
		}
	}

	fn lock(&self) -> MutexGuard<'_, QueueState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Appends `header`, applying the overflow policy when the queue is full.
	pub async fn push(&self, header: EVMHeader) -> PushOutcome {
		loop {
			let notified = self.space.notified();
			tokio::pin!(notified);
			notified.as_mut().enable();

			{
				let mut state = self.lock();
				if state.closed {
					return PushOutcome::Closed;
				}

				if state.headers.len() < self.capacity {
					state.headers.push_back(header);
					QUEUE_DEPTH.set(state.headers.len() as i64);
					drop(state);
					self.items.notify_one();
					return PushOutcome::Queued;
				}

				if self.overflow == OverflowPolicy::DropOldest {
					let evicted = state.headers.pop_front();
					state.headers.push_back(header);
					state.dropped += 1;
					drop(state);
					HEADERS_DROPPED.inc();
					self.items.notify_one();
					return match evicted {
						Some(evicted) => PushOutcome::Evicted(Box::new(evicted)),
						None => PushOutcome::Queued,
					};
				}
			}

			notified.await;
		}
	}

	/// Removes the oldest header, waiting while the queue is empty.
	///
	/// Returns `None` once the queue is closed and drained.
	pub async fn pop(&self) -> Option<EVMHeader> {
		loop {
			let notified = self.items.notified();
			tokio::pin!(notified);
			notified.as_mut().enable();

			{
				let mut state = self.lock();
				if let Some(header) = state.headers.pop_front() {
					QUEUE_DEPTH.set(state.headers.len() as i64);
					drop(state);
					self.space.notify_one();
					return Some(header);
				}
				if state.closed {
					return None;
				}
			}

			notified.await;
		}
	}

	/// Stops accepting headers. Queued headers stay available to [`HeaderQueue::pop`].
	pub fn close(&self) {
		self.lock().closed = true;
		self.items.notify_waiters();
		self.space.notify_waiters();
	}

	pub fn is_closed(&self) -> bool {
		self.lock().closed
	}

	pub fn len(&self) -> usize {
		self.lock().headers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Number of headers evicted by the drop-oldest policy
	pub fn dropped(&self) -> u64 {
		self.lock().dropped
	}
}
