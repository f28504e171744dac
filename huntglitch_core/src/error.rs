/**
 * Error types for the HuntGlitch SDK.
 *
 * Two separate taxonomies with different propagation rules:
 *
 * - `ConfigError` — integration misuse (missing keys, invalid values,
 *   double initialization). Always surfaced to the caller, never silenced.
 * - `DeliveryError` — a failed transmission. Transient variants are
 *   retried up to the configured limit; definitive variants are reported
 *   after a single attempt. Whether the final failure propagates or is
 *   swallowed depends on `ClientConfig::silent_failures`.
 */
use std::time::Duration;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Configuration problems detected at construction or first use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key is absent from the environment.
    #[error("missing required configuration key {key}")]
    MissingKey {
        /// Name of the absent key.
        key: &'static str,
    },

    /// A required key is present but empty.
    #[error("configuration key {key} must not be empty")]
    EmptyKey {
        /// Name of the empty key.
        key: &'static str,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Name of the offending field.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// `init` was called a second time.
    #[error("the HuntGlitch SDK is already initialized")]
    AlreadyInitialized,
}

// ---------------------------------------------------------------------------
// DeliveryError
// ---------------------------------------------------------------------------

/// A failed attempt (or exhausted sequence of attempts) to deliver an event.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Connection-level failure before any HTTP response arrived.
    #[error("network error: {message}")]
    Network {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// One attempt exceeded the per-attempt timeout.
    #[error("attempt timed out after {timeout:?}")]
    Timeout {
        /// The configured per-attempt bound that was exceeded.
        timeout: Duration,
    },

    /// The collector answered with a 5xx (or otherwise non-definitive) status.
    #[error("collector responded with HTTP {status}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// The collector definitively rejected the event (4xx).
    #[error("collector rejected the event with HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        body: String,
    },

    /// The event could not be serialized into the wire payload.
    #[error("failed to serialize event: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },

    /// Every attempt failed transiently.
    #[error("delivery failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts consumed, including the initial one.
        attempts: u32,
        /// The failure observed on the final attempt.
        last: Box<DeliveryError>,
    },
}

impl DeliveryError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Creates a server error from an HTTP response.
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server { status, body: body.into() }
    }

    /// Creates a rejection from an HTTP response.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected { status, body: body.into() }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into() }
    }

    /// Creates a retries-exhausted error wrapping the final failure.
    pub fn retries_exhausted(attempts: u32, last: DeliveryError) -> Self {
        Self::RetriesExhausted { attempts, last: Box::new(last) }
    }

    /**
     * Whether this failure may succeed on a later attempt.
     *
     * Network errors, timeouts, and 5xx responses are transient and consume
     * retry slots. Rejections (4xx), serialization failures, and an already
     * exhausted sequence are definitive.
     */
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } | Self::Server { .. } => true,
            Self::Rejected { .. }
            | Self::Serialization { .. }
            | Self::RetriesExhausted { .. } => false,
        }
    }
}
