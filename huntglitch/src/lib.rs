/**
 * HuntGlitch — Rust error tracking SDK.
 *
 * This is the main crate users should depend on. It re-exports the core
 * SDK API and wires up addons (panic hook) through a single `init` call.
 *
 * # Quick start
 *
 * ```ignore
 * fn main() {
 *     // Reads PROJECT_KEY and DELIVERABLE_KEY from the environment;
 *     // panics are automatically captured from here on.
 *     huntglitch::init_from_env().expect("HuntGlitch configuration");
 *
 *     huntglitch::send_log(huntglitch::LogLevel::Info, "application started");
 *
 *     if let Err(e) = std::fs::read_to_string("settings.toml") {
 *         huntglitch::capture_exception(&e);
 *     }
 * }
 * ```
 *
 * # With options
 *
 * ```ignore
 * use huntglitch::{ClientConfig, Options};
 *
 * fn main() {
 *     huntglitch::init(Options {
 *         config: ClientConfig::new("my-project-key", "my-deliverable-key")
 *             .with_retries(2)
 *             .with_silent_failures(true),
 *         catch_panics: false,
 *     })
 *     .expect("HuntGlitch configuration");
 * }
 * ```
 *
 * Callers that need to observe delivery outcomes (attempt counts, swallowed
 * failures) construct a `HuntGlitchClient` directly instead of going through
 * the process-wide instance.
 */

// ---------------------------------------------------------------------------
// Re-exports from huntglitch_core — the public surface area
// ---------------------------------------------------------------------------

pub use huntglitch_core::{
    capture_event, capture_exception, get_backtrace, get_client, send_log, AdditionalData,
    BacktraceFrame, ClientConfig, ConfigError, DeliveryError, DeliveryResult, Event, EventKind,
    EventPayload, ExceptionInfo, HuntGlitchClient, LogLevel, LogRecord, Tags, Transport,
    CLIENT_VERSION,
};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/**
 * Configuration for the SDK as a whole: the delivery client config plus
 * addon switches.
 *
 * Implements `From<ClientConfig>` so `init(config)` works when the
 * defaults (panic capture on) are what you want.
 */
pub struct Options {
    /// Delivery client configuration.
    pub config: ClientConfig,

    /// Whether to install a panic hook that auto-captures panics.
    /// Defaults to `true`.
    pub catch_panics: bool,
}

impl From<ClientConfig> for Options {
    fn from(config: ClientConfig) -> Self {
        Self {
            config,
            catch_panics: true,
        }
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

/**
 * Initializes the HuntGlitch SDK.
 *
 * Accepts either a bare `ClientConfig` or a full `Options` struct.
 * Installs the process-wide client and, unless disabled, the panic hook.
 *
 * # Errors
 * Returns a `ConfigError` if the config is invalid or `init` was already
 * called. Configuration errors are integration bugs and are never subject
 * to `silent_failures`.
 */
pub fn init(options: impl Into<Options>) -> Result<(), ConfigError> {
    let opts = options.into();

    huntglitch_core::init(opts.config)?;

    /*
     * Install addons. The panic hook is opt-out because most applications
     * want panics reported.
     */
    if opts.catch_panics {
        huntglitch_panic::install();
    }

    Ok(())
}

/**
 * Initializes the SDK from `PROJECT_KEY` and `DELIVERABLE_KEY` in the
 * environment, with default settings and panic capture enabled.
 */
pub fn init_from_env() -> Result<(), ConfigError> {
    init(ClientConfig::from_env()?)
}
