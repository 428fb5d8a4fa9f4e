//! Core domain models for head tracking.
//!
//! - `tracker`: Tracker configuration (endpoints, fetch mode, header queue)

mod tracker;

pub use tracker::{FetchMode, OverflowPolicy, QueueConfig, TrackerConfig};
