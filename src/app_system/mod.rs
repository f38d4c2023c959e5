//! System orchestration, startup, and shutdown logic.

pub mod pickup_system;
pub mod poller;
pub mod seed;
pub mod telemetry;
pub mod error;

pub use pickup_system::*;
pub use poller::*;
pub use telemetry::*;
pub use error::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Id generator for a `ResourceActor`, counting up from `start`.
pub fn sequence(start: u64) -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start));
    move || counter.fetch_add(1, Ordering::SeqCst)
}
