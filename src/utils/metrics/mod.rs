//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the head tracking counters and gauges.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

lazy_static! {
	/// Global Prometheus registry.
	///
	/// This registry holds all metrics defined in this module and is used
	/// to gather metrics for exposure via the metrics endpoint.
	pub static ref REGISTRY: Registry = Registry::new();

	/// Counter for subscription notifications that decoded into a header.
	pub static ref HEADERS_RECEIVED: IntCounter = {
		let counter = IntCounter::new("headers_received_total", "Headers received from the subscription").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for notifications discarded because they did not decode.
	pub static ref HEADER_DECODE_FAILURES: IntCounter = {
		let counter = IntCounter::new("header_decode_failures_total", "Notifications that failed to decode into a header").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for headers evicted from a full queue.
	pub static ref HEADERS_DROPPED: IntCounter = {
		let counter = IntCounter::new("headers_dropped_total", "Headers evicted from the full header queue").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref BLOCKS_FETCHED: IntCounter = {
		let counter = IntCounter::new("blocks_fetched_total", "Blocks fetched by hash").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref BLOCK_FETCH_FAILURES: IntCounter = {
		let counter = IntCounter::new("block_fetch_failures_total", "Failed block fetches").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for blocks without transactions announced with a non-empty transactions root.
	pub static ref CONSISTENCY_ERRORS: IntCounter = {
		let counter = IntCounter::new("consistency_errors_total", "Headers contradicted by the fetched block").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref RECEIPTS_FETCHED: IntCounter = {
		let counter = IntCounter::new("receipts_fetched_total", "Transaction receipts fetched").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref RECEIPT_FETCH_FAILURES: IntCounter = {
		let counter = IntCounter::new("receipt_fetch_failures_total", "Failed transaction receipt fetches").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Gauge for the number of the most recently received header.
	pub static ref LATEST_HEAD: IntGauge = {
		let gauge = IntGauge::new("latest_head_number", "Number of the latest received header").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Gauge for the headers waiting in the queue.
	pub static ref QUEUE_DEPTH: IntGauge = {
		let gauge = IntGauge::new("header_queue_depth", "Headers waiting to be reconciled").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Forces registration of every metric so a scrape lists them before their first update.
pub fn init_metrics() {
	lazy_static::initialize(&HEADERS_RECEIVED);
	lazy_static::initialize(&HEADER_DECODE_FAILURES);
	lazy_static::initialize(&HEADERS_DROPPED);
	lazy_static::initialize(&BLOCKS_FETCHED);
	lazy_static::initialize(&BLOCK_FETCH_FAILURES);
	lazy_static::initialize(&CONSISTENCY_ERRORS);
	lazy_static::initialize(&RECEIPTS_FETCHED);
	lazy_static::initialize(&RECEIPT_FETCH_FAILURES);
	lazy_static::initialize(&LATEST_HEAD);
	lazy_static::initialize(&QUEUE_DEPTH);
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}
