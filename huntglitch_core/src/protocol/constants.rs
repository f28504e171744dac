/**
 * SDK-wide constants.
 *
 * These values identify the client to the HuntGlitch backend and supply
 * the defaults used when `ClientConfig` fields are not set explicitly.
 */
use std::time::Duration;

/// The client type identifier sent in every envelope.
/// Tells the backend which SDK family produced this event.
pub const CLIENT_TYPE: &str = "logger/rust";

/// SDK version string included in every envelope.
/// Derived at compile time from the `huntglitch_core` package version in `Cargo.toml`.
pub const CLIENT_VERSION: &str = concat!("huntglitch-rust/", env!("CARGO_PKG_VERSION"));

/// The production collector endpoint (the HuntGlitch Lighthouse API).
/// Overridable per config for self-hosted or staging collectors.
pub const COLLECTOR_ENDPOINT: &str = "https://lighthouse.huntglitch.com/add-log";

/// Environment variable holding the project key.
pub const ENV_PROJECT_KEY: &str = "PROJECT_KEY";

/// Environment variable holding the deliverable key.
pub const ENV_DELIVERABLE_KEY: &str = "DELIVERABLE_KEY";

/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default per-attempt timeout for one HTTP POST to the collector.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default fixed pause between delivery attempts.
pub const DEFAULT_RETRY_PAUSE: Duration = Duration::from_millis(250);
