/**
 * Client configuration.
 *
 * A `ClientConfig` is built once at startup, validated, and bound read-only
 * to a `HuntGlitchClient` for its entire lifetime. The two credential keys
 * can be sourced from the environment (`PROJECT_KEY`, `DELIVERABLE_KEY`)
 * through `from_env`, or passed directly; everything else has defaults.
 *
 * Timeout semantics are per attempt, not cumulative across retries. The
 * pause between attempts is fixed (no exponential backoff).
 */
use std::time::Duration;

use crate::error::ConfigError;
use crate::protocol::constants::{
    COLLECTOR_ENDPOINT, DEFAULT_RETRIES, DEFAULT_RETRY_PAUSE, DEFAULT_TIMEOUT,
    ENV_DELIVERABLE_KEY, ENV_PROJECT_KEY,
};

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/**
 * Configuration for a `HuntGlitchClient`.
 *
 * # Example
 * ```ignore
 * let config = ClientConfig::new("my-project-key", "my-deliverable-key")
 *     .with_retries(2)
 *     .with_timeout(Duration::from_secs(15))
 *     .with_silent_failures(true);
 * ```
 */
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The project key identifying the account. Required, non-empty.
    pub project_key: String,

    /// The deliverable key identifying the application. Required, non-empty.
    pub deliverable_key: String,

    /// When true, delivery failures are swallowed and returned as a
    /// non-raising `DeliveryResult::Failed` instead of an `Err`.
    /// Configuration errors are surfaced regardless.
    pub silent_failures: bool,

    /// Number of retries after the initial attempt. Total attempts made
    /// for a transiently failing event is `retries + 1`.
    pub retries: u32,

    /// Per-attempt timeout for one HTTP POST. Must be positive.
    pub timeout: Duration,

    /// Fixed pause between attempts.
    pub retry_pause: Duration,

    /// Collector URL events are POSTed to.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project_key: String::new(),
            deliverable_key: String::new(),
            silent_failures: false,
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            retry_pause: DEFAULT_RETRY_PAUSE,
            endpoint: COLLECTOR_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a config with the given credentials and default settings.
    pub fn new(project_key: impl Into<String>, deliverable_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            deliverable_key: deliverable_key.into(),
            ..Default::default()
        }
    }

    /**
     * Builds a config from the environment.
     *
     * Reads `PROJECT_KEY` and `DELIVERABLE_KEY`; all other fields take
     * their defaults and can be adjusted afterwards with the `with_*`
     * methods. Fails if either variable is missing or empty.
     */
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_key = std::env::var(ENV_PROJECT_KEY)
            .map_err(|_| ConfigError::MissingKey { key: ENV_PROJECT_KEY })?;
        let deliverable_key = std::env::var(ENV_DELIVERABLE_KEY)
            .map_err(|_| ConfigError::MissingKey { key: ENV_DELIVERABLE_KEY })?;

        let config = Self::new(project_key, deliverable_key);
        config.validate()?;
        Ok(config)
    }

    /// Sets the retry count.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the failure-handling mode.
    pub fn with_silent_failures(mut self, silent: bool) -> Self {
        self.silent_failures = silent;
        self
    }

    /// Sets the pause between attempts.
    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    /// Points the client at a different collector.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /**
     * Checks the invariants a `HuntGlitchClient` relies on.
     *
     * Called by the client constructors; exposed so configuration loaders
     * can fail fast before wiring anything up.
     */
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_key.is_empty() {
            return Err(ConfigError::EmptyKey { key: ENV_PROJECT_KEY });
        }
        if self.deliverable_key.is_empty() {
            return Err(ConfigError::EmptyKey { key: ENV_DELIVERABLE_KEY });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "timeout",
                message: "must be positive".into(),
            });
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "endpoint",
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
