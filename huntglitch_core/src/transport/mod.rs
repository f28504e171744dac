/**
 * Transport layer — HTTP delivery and the bounded retry loop.
 *
 * Everything related to *how* we deliver events to the collector:
 * - `http` — ureq-based HTTP POST with outcome classification
 * - `retry` — the attempt loop driven by `DeliveryError::is_transient`
 */
use crate::error::DeliveryError;

pub mod http;
pub mod retry;

pub use http::HttpTransport;
pub use retry::RetryPolicy;

/**
 * One transmission attempt of a serialized envelope.
 *
 * The production implementation is `HttpTransport`; tests substitute
 * scripted implementations to observe attempt counts. Implementations must
 * be usable from multiple threads, matching the client's concurrency
 * contract.
 */
pub trait Transport: Send + Sync {
    /// Attempts to deliver one JSON body to the collector.
    fn deliver(&self, body: &str) -> Result<(), DeliveryError>;
}
