//! EventSink trait for delivering flattened events to the analytics backend.
//!
//! This trait enables dependency injection for testability,
//! allowing unit tests to use mock implementations.

use std::future::Future;
use std::pin::Pin;

use crate::domain::Event;
use crate::error::RelayError;

/// Trait for delivering flattened telemetry events.
///
/// This trait is dyn-compatible by using boxed futures. Implementations
/// include `HoneycombSink` for production and mock sinks for testing.
/// Implementations must be safe for concurrent use from multiple
/// request-handling tasks.
pub trait EventSink: Send + Sync {
    /// Deliver a single event. One call per log record, no batching.
    fn send_event(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), RelayError>> + Send + '_>>;
}
