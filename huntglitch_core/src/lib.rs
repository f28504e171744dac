/*!
 * HuntGlitch Core — the internal SDK engine.
 *
 * This crate provides the protocol types, configuration, transport, and
 * delivery client. End users should depend on the `huntglitch` facade
 * crate instead, which re-exports everything and wires up addons (panic
 * hook, etc.).
 *
 * # Module structure
 *
 * - `protocol/` — what we send: envelope, event types, constants
 * - `transport/` — how we deliver: HTTP client, retry loop
 * - `config` — ClientConfig and environment loading
 * - `error` — ConfigError and DeliveryError taxonomies
 * - `client` — the delivery client and the process-wide instance
 */

mod client;
mod config;
mod error;
mod protocol;
mod transport;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use client::{get_client, DeliveryResult, HuntGlitchClient};
pub use config::ClientConfig;
pub use error::{ConfigError, DeliveryError};
pub use protocol::constants::{CLIENT_TYPE, CLIENT_VERSION, COLLECTOR_ENDPOINT};
pub use protocol::types::{
    AdditionalData, BacktraceFrame, Envelope, Event, EventKind, EventPayload, ExceptionInfo,
    LogLevel, LogRecord, Tags,
};
pub use transport::{HttpTransport, RetryPolicy, Transport};

// ---------------------------------------------------------------------------
// Public functions
// ---------------------------------------------------------------------------

/**
 * Installs the process-wide client.
 *
 * Validates the config, builds a `HuntGlitchClient` over the HTTP
 * transport, and stores it for the free functions below (and for addons
 * such as the panic hook).
 *
 * Returns `Err` if the config is invalid or `init` was already called.
 */
pub fn init(config: ClientConfig) -> Result<(), ConfigError> {
    let client = HuntGlitchClient::new(config)?;
    client::install(client)
}

/**
 * Captures a caught error and reports it through the process-wide client.
 *
 * Fire and forget: the delivery outcome is discarded (failures remain
 * visible through the diagnostic tracing events), and the call is a
 * silent no-op if `init` has not been called. Hold a `HuntGlitchClient`
 * directly when you need to react to delivery outcomes.
 */
#[track_caller]
pub fn capture_exception<E>(error: &E)
where
    E: std::error::Error + ?Sized,
{
    if let Some(client) = client::get_client() {
        let _ = client.capture_exception(error, None, None);
    }
}

/**
 * Reports a log message through the process-wide client.
 *
 * Same fire-and-forget contract as `capture_exception`.
 */
#[track_caller]
pub fn send_log(level: LogLevel, message: &str) {
    if let Some(client) = client::get_client() {
        let _ = client.send_log(level, message, None, None);
    }
}

/**
 * Sends a pre-built `Event` through the process-wide client.
 *
 * Low-level entry used by addons (e.g. `huntglitch_panic`) to deliver
 * events with custom payloads. Silent no-op if not initialized.
 */
pub fn capture_event(event: Event) {
    if let Some(client) = client::get_client() {
        let _ = client.send(&event);
    }
}

// ---------------------------------------------------------------------------
// Backtrace helpers
// ---------------------------------------------------------------------------

/**
 * Captures a backtrace at the current call site.
 * Returns `None` if no useful frames were resolved.
 */
pub fn get_backtrace() -> Option<Vec<BacktraceFrame>> {
    let bt = backtrace::Backtrace::new();
    let frames = convert_backtrace(&bt);
    if frames.is_empty() {
        None
    } else {
        Some(frames)
    }
}

/**
 * Converts a `backtrace::Backtrace` into `Vec<BacktraceFrame>`.
 * Filters out frames with no useful info (no file AND no function).
 */
pub fn convert_backtrace(bt: &backtrace::Backtrace) -> Vec<BacktraceFrame> {
    let mut frames = Vec::new();

    for frame in bt.frames() {
        for symbol in frame.symbols() {
            let function = symbol.name().map(|n| n.to_string());
            let file = symbol.filename().map(|p| p.display().to_string());

            if function.is_none() && file.is_none() {
                continue;
            }

            frames.push(BacktraceFrame {
                file,
                line: symbol.lineno(),
                column: symbol.colno(),
                function,
            });
        }
    }

    frames
}
