//! Head watcher service implementation.
//!
//! Subscribes to new block headers, reconciles each of them against the canonical block and
//! its receipts, and reports the single terminal failure of the subscription.
//!
//! - [`HeadSubscription`]: decoded headers from a pub-sub subscription
//! - [`HeadReconciler`]: per-header block and receipt checks
//! - [`HeadWatcherService`]: engine task lifecycle and cancellation

mod error;
mod queue;
mod reconciler;
mod service;
mod subscription;

pub use error::{HeadWatcherError, ReconcileError};
pub use queue::{HeaderQueue, PushOutcome};
pub use reconciler::{run_engine, EngineExit, EngineState, HeadReconciler, ReconcileReport};
pub use service::{HeadWatcherService, ShutdownReason};
pub use subscription::HeadSubscription;
