/**
 * The HuntGlitch delivery client.
 *
 * A `HuntGlitchClient` is bound to exactly one immutable `ClientConfig`
 * for its entire lifetime. `send` blocks the calling thread until the
 * event is delivered, definitively rejected, or out of attempts; because
 * no state is mutated across calls, any number of threads may share one
 * client without locking.
 *
 * Two ways to use it:
 * 1. Construct a client and pass it around explicitly. This is the core
 *    API and the one every test exercises.
 * 2. Install a process-wide instance via `init()` (stored in a `OnceLock`)
 *    and use the fire-and-forget free functions in the crate root. This
 *    is what the panic hook and the facade crate build on.
 */
use std::panic::Location;
use std::sync::OnceLock;

use crate::config::ClientConfig;
use crate::error::{ConfigError, DeliveryError};
use crate::protocol::constants::{CLIENT_TYPE, CLIENT_VERSION};
use crate::protocol::types::{
    AdditionalData, Envelope, Event, EventPayload, ExceptionInfo, LogLevel, LogRecord, Tags,
};
use crate::transport::{retry, HttpTransport, RetryPolicy, Transport};

// ---------------------------------------------------------------------------
// Global singleton
// ---------------------------------------------------------------------------

/**
 * Process-wide client installed by `init()`.
 *
 * `OnceLock` ensures installation can only succeed once; a second `init`
 * call fails with `ConfigError::AlreadyInitialized`. The free functions in
 * the crate root access this through `get_client()`.
 */
static GLOBAL_CLIENT: OnceLock<HuntGlitchClient> = OnceLock::new();

/**
 * Returns a reference to the global client, or `None` if `init()` has not
 * been called yet.
 */
pub fn get_client() -> Option<&'static HuntGlitchClient> {
    GLOBAL_CLIENT.get()
}

/// Stores the client in the global slot. Called by `crate::init`.
pub(crate) fn install(client: HuntGlitchClient) -> Result<(), ConfigError> {
    GLOBAL_CLIENT
        .set(client)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

// ---------------------------------------------------------------------------
// DeliveryResult
// ---------------------------------------------------------------------------

/**
 * The outcome of one `send` call.
 *
 * `Failed` is only ever *returned* when `silent_failures` is on; with the
 * mode off the same condition surfaces as an `Err` instead.
 */
#[derive(Debug)]
pub enum DeliveryResult {
    /// The collector accepted the event.
    Delivered {
        /// Attempts consumed, including the successful one.
        attempts: u32,
    },

    /// Delivery failed and the failure was swallowed per configuration.
    Failed {
        /// Attempts consumed before giving up.
        attempts: u32,
        /// What went wrong on the deciding attempt.
        error: DeliveryError,
    },
}

impl DeliveryResult {
    /// Whether the collector accepted the event.
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered { .. })
    }

    /// Attempts consumed by this send, successful or not.
    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryResult::Delivered { attempts } => *attempts,
            DeliveryResult::Failed { attempts, .. } => *attempts,
        }
    }
}

// ---------------------------------------------------------------------------
// HuntGlitchClient
// ---------------------------------------------------------------------------

/**
 * The delivery client.
 *
 * Owns the validated config, the retry policy derived from it, and the
 * transport used for every attempt.
 */
pub struct HuntGlitchClient {
    config: ClientConfig,
    policy: RetryPolicy,
    transport: Box<dyn Transport>,
}

impl HuntGlitchClient {
    /**
     * Creates a client over the real HTTP transport.
     *
     * Fails fast with a `ConfigError` if the config violates its
     * invariants (empty key, zero timeout). Configuration errors are never
     * subject to `silent_failures`.
     */
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = HttpTransport::new(config.endpoint.clone(), config.timeout);
        Ok(Self::assemble(config, Box::new(transport)))
    }

    /**
     * Creates a client over a caller-supplied transport.
     *
     * The seam used by tests to substitute scripted transports; also handy
     * for routing events through custom delivery paths.
     */
    pub fn with_transport(
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        let policy = RetryPolicy::new(config.retries, config.retry_pause);
        Self {
            config,
            policy,
            transport,
        }
    }

    /// The config this client is bound to.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /**
     * Delivers one event to the collector, blocking until done.
     *
     * Pipeline:
     * 1. Serialize the event into the envelope JSON. A serialization
     *    failure is definitive: zero attempts consumed, never retried.
     * 2. Run the attempt loop (`retries + 1` attempts, transient failures
     *    only, fixed pause in between).
     * 3. Map the outcome through the failure-handling mode: failures
     *    return `Ok(DeliveryResult::Failed { .. })` when `silent_failures`
     *    is on, and `Err` otherwise.
     */
    pub fn send(&self, event: &Event) -> Result<DeliveryResult, DeliveryError> {
        let envelope = Envelope {
            project_key: &self.config.project_key,
            deliverable_key: &self.config.deliverable_key,
            payload: &event.payload,
            additional_data: event.additional_data.as_ref(),
            tags: event.tags.as_ref(),
            client_type: CLIENT_TYPE,
            client_version: CLIENT_VERSION,
        };

        let body = match serde_json::to_string(&envelope) {
            Ok(body) => body,
            Err(err) => return self.conclude(0, DeliveryError::serialization(err.to_string())),
        };

        let (attempts, outcome) = retry::run(&self.policy, self.transport.as_ref(), &body);
        match outcome {
            Ok(()) => {
                tracing::debug!(attempts, kind = %event.kind(), "event delivered");
                Ok(DeliveryResult::Delivered { attempts })
            }
            Err(error) => self.conclude(attempts, error),
        }
    }

    /**
     * Captures a caught error and delivers it as an exception event.
     *
     * A backtrace is taken here so the dashboard shows where the error was
     * captured, and the call site's file and line are recorded via
     * `#[track_caller]`.
     */
    #[track_caller]
    pub fn capture_exception<E>(
        &self,
        error: &E,
        additional_data: Option<AdditionalData>,
        tags: Option<Tags>,
    ) -> Result<DeliveryResult, DeliveryError>
    where
        E: std::error::Error + ?Sized,
    {
        let caller = Location::caller();
        let mut info = ExceptionInfo::from_error(error);
        info.file = Some(caller.file().to_string());
        info.line = Some(caller.line());
        info.backtrace = crate::get_backtrace();

        let event = Event {
            payload: EventPayload::Exception(info),
            additional_data,
            tags,
        };
        self.send(&event)
    }

    /**
     * Delivers a log message at the given severity.
     *
     * The call site's file and line are recorded via `#[track_caller]`.
     * For full control over the record (custom label, explicit location)
     * build a `LogRecord` and use `send` directly.
     */
    #[track_caller]
    pub fn send_log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        additional_data: Option<AdditionalData>,
        tags: Option<Tags>,
    ) -> Result<DeliveryResult, DeliveryError> {
        let caller = Location::caller();
        let mut record = LogRecord::new(level, message);
        record.file = Some(caller.file().to_string());
        record.line = Some(caller.line());

        let event = Event {
            payload: EventPayload::Log(record),
            additional_data,
            tags,
        };
        self.send(&event)
    }

    /// Applies the failure-handling mode to a terminal failure.
    fn conclude(
        &self,
        attempts: u32,
        error: DeliveryError,
    ) -> Result<DeliveryResult, DeliveryError> {
        if self.config.silent_failures {
            tracing::warn!(
                attempts,
                error = %error,
                "delivery failed, swallowing per silent_failures"
            );
            Ok(DeliveryResult::Failed { attempts, error })
        } else {
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Scripted transport: one outcome per attempt, every call counted.
    struct ScriptedTransport {
        outcomes: Mutex<Vec<Result<(), DeliveryError>>>,
        calls: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(mut outcomes: Vec<Result<(), DeliveryError>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn deliver(&self, _body: &str) -> Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(DeliveryError::network("script exhausted")))
        }
    }

    fn config(retries: u32, silent: bool) -> ClientConfig {
        ClientConfig::new("p1", "d1")
            .with_retries(retries)
            .with_retry_pause(Duration::ZERO)
            .with_silent_failures(silent)
    }

    fn exception_event(message: &str) -> Event {
        Event::exception(ExceptionInfo {
            name: "ValueError".into(),
            message: message.into(),
            file: None,
            line: None,
            backtrace: None,
        })
    }

    #[test]
    fn test_construction_rejects_empty_keys() {
        assert!(HuntGlitchClient::new(ClientConfig::new("", "d1")).is_err());
        assert!(HuntGlitchClient::new(ClientConfig::new("p1", "")).is_err());
        assert!(HuntGlitchClient::new(ClientConfig::new("p1", "d1")).is_ok());
    }

    #[test]
    fn test_first_attempt_success_transmits_once() {
        let client =
            HuntGlitchClient::with_transport(config(5, false), Box::new(ScriptedTransport::new(vec![Ok(())])))
                .unwrap();

        let result = client.send(&exception_event("boom")).unwrap();
        assert!(result.is_delivered());
        assert_eq!(result.attempts(), 1);
    }

    #[test]
    fn test_exhaustion_surfaces_when_not_silent() {
        let client =
            HuntGlitchClient::with_transport(config(2, false), Box::new(ScriptedTransport::new(vec![])))
                .unwrap();

        let err = client.send(&exception_event("boom")).unwrap_err();
        match err {
            DeliveryError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
            other => unreachable!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_exhaustion_is_swallowed_when_silent() {
        let client =
            HuntGlitchClient::with_transport(config(2, true), Box::new(ScriptedTransport::new(vec![])))
                .unwrap();

        let result = client.send(&exception_event("boom")).unwrap();
        assert!(!result.is_delivered());
        assert_eq!(result.attempts(), 3);
        match result {
            DeliveryResult::Failed { error, .. } => {
                assert!(matches!(error, DeliveryError::RetriesExhausted { .. }));
            }
            other => unreachable!("expected a failed result, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_is_not_retried() {
        let transport =
            ScriptedTransport::new(vec![Err(DeliveryError::rejected(400, "bad request"))]);
        let client = HuntGlitchClient::with_transport(config(5, false), Box::new(transport)).unwrap();

        let err = client.send(&exception_event("boom")).unwrap_err();
        assert!(matches!(err, DeliveryError::Rejected { status: 400, .. }));
    }

    #[test]
    fn test_rejection_respects_silent_mode() {
        let transport =
            ScriptedTransport::new(vec![Err(DeliveryError::rejected(403, "bad key"))]);
        let client = HuntGlitchClient::with_transport(config(5, true), Box::new(transport)).unwrap();

        let result = client.send(&exception_event("boom")).unwrap();
        assert_eq!(result.attempts(), 1);
        assert!(!result.is_delivered());
    }

    /**
     * The reference scenario: retries=2, silent failures on, an exception
     * event succeeding on the second attempt. Expect at most 3 attempts
     * and a delivered result.
     */
    #[test]
    fn test_recovery_scenario() {
        let transport = ScriptedTransport::new(vec![
            Err(DeliveryError::server(502, "bad gateway")),
            Ok(()),
        ]);
        let client = HuntGlitchClient::with_transport(
            ClientConfig::new("p1", "d1")
                .with_retries(2)
                .with_timeout(Duration::from_secs(5))
                .with_retry_pause(Duration::ZERO)
                .with_silent_failures(true),
            Box::new(transport),
        )
        .unwrap();

        let result = client.send(&exception_event("ValueError: bad input")).unwrap();
        assert!(result.is_delivered());
        assert_eq!(result.attempts(), 2);
    }

    #[test]
    fn test_capture_exception_records_call_site() {
        let client =
            HuntGlitchClient::with_transport(config(0, false), Box::new(ScriptedTransport::new(vec![Ok(())])))
                .unwrap();

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let result = client.capture_exception(&io_err, None, None).unwrap();
        assert!(result.is_delivered());
    }

    #[test]
    fn test_send_log_attaches_metadata() {
        let client =
            HuntGlitchClient::with_transport(config(0, false), Box::new(ScriptedTransport::new(vec![Ok(())])))
                .unwrap();

        let mut data = AdditionalData::new();
        data.insert("attempt_count".into(), serde_json::json!(3));
        let mut tags = Tags::new();
        tags.insert("severity".into(), "high".into());

        let result = client
            .send_log(LogLevel::Warning, "login failed", Some(data), Some(tags))
            .unwrap();
        assert!(result.is_delivered());
    }
}
