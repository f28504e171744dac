/**
 * The bounded attempt loop.
 *
 * Drives a `Transport` through up to `max_attempts` transmissions of one
 * serialized envelope:
 *
 * ```text
 *  Idle ──► Attempting ──► Success
 *              │  ▲
 *   transient  │  │ after fixed pause
 *              ▼  │
 *           Retrying ──► ExhaustedFailure (attempts used up)
 *              │
 *   definitive └────────► immediate failure, no retry
 * ```
 *
 * Only transient failures (network, timeout, 5xx) consume retry slots; a
 * definitive failure ends the loop on the attempt that observed it. The
 * pause between attempts is fixed, with no backoff growth.
 */
use std::thread;
use std::time::Duration;

use crate::error::DeliveryError;
use crate::transport::Transport;

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// How many times to attempt delivery, and how long to pause in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the initial one. Always at least 1.
    pub max_attempts: u32,

    /// Fixed pause between attempts.
    pub pause: Duration,
}

impl RetryPolicy {
    /// Builds a policy from a retry count (`retries` retries after the
    /// initial attempt) and an inter-attempt pause.
    pub fn new(retries: u32, pause: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            pause,
        }
    }
}

// ---------------------------------------------------------------------------
// The loop
// ---------------------------------------------------------------------------

/**
 * Runs the attempt loop for one serialized envelope.
 *
 * Returns the number of attempts consumed together with the outcome:
 * - `Ok(())` — some attempt succeeded.
 * - `Err(DeliveryError::RetriesExhausted { .. })` — every attempt failed
 *   transiently; the final attempt's failure is wrapped inside.
 * - any other `Err` — a definitive failure ended the loop early.
 */
pub fn run(
    policy: &RetryPolicy,
    transport: &dyn Transport,
    body: &str,
) -> (u32, Result<(), DeliveryError>) {
    let mut last: Option<DeliveryError> = None;

    for attempt in 1..=policy.max_attempts {
        match transport.deliver(body) {
            Ok(()) => return (attempt, Ok(())),
            Err(err) if !err.is_transient() => return (attempt, Err(err)),
            Err(err) => {
                if attempt < policy.max_attempts {
                    tracing::debug!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "transient delivery failure, retrying"
                    );
                    if !policy.pause.is_zero() {
                        thread::sleep(policy.pause);
                    }
                }
                last = Some(err);
            }
        }
    }

    /* max_attempts is at least 1, so the loop ran and recorded a failure. */
    let last = last.unwrap_or_else(|| DeliveryError::network("delivery was never attempted"));
    (
        policy.max_attempts,
        Err(DeliveryError::retries_exhausted(policy.max_attempts, last)),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Pops one scripted outcome per attempt; counts every call.
    struct ScriptedTransport {
        outcomes: Mutex<Vec<Result<(), DeliveryError>>>,
        calls: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(mut outcomes: Vec<Result<(), DeliveryError>>) -> Self {
            /* stored reversed so deliver() can pop from the back */
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
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

    fn policy(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::ZERO)
    }

    #[test]
    fn test_success_on_first_attempt_makes_one_call() {
        let transport = ScriptedTransport::new(vec![Ok(())]);
        let (attempts, outcome) = run(&policy(5), &transport, "{}");
        assert_eq!(attempts, 1);
        assert!(outcome.is_ok());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_transient_failures_consume_all_attempts() {
        for retries in [0u32, 1, 3] {
            let transport = ScriptedTransport::new(vec![]);
            let (attempts, outcome) = run(&policy(retries), &transport, "{}");

            assert_eq!(attempts, retries + 1);
            assert_eq!(transport.calls(), retries + 1);
            match outcome {
                Err(DeliveryError::RetriesExhausted { attempts, .. }) => {
                    assert_eq!(attempts, retries + 1);
                }
                other => unreachable!("expected exhaustion, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejection_ends_the_loop_without_retrying() {
        let transport =
            ScriptedTransport::new(vec![Err(DeliveryError::rejected(422, "bad payload"))]);
        let (attempts, outcome) = run(&policy(5), &transport, "{}");

        assert_eq!(attempts, 1);
        assert_eq!(transport.calls(), 1);
        assert!(matches!(outcome, Err(DeliveryError::Rejected { status: 422, .. })));
    }

    #[test]
    fn test_recovery_after_transient_failures() {
        let transport = ScriptedTransport::new(vec![
            Err(DeliveryError::server(503, "unavailable")),
            Err(DeliveryError::timeout(Duration::from_secs(5))),
            Ok(()),
        ]);
        let (attempts, outcome) = run(&policy(3), &transport, "{}");

        assert_eq!(attempts, 3);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_exhaustion_preserves_the_final_failure() {
        let transport = ScriptedTransport::new(vec![
            Err(DeliveryError::network("refused")),
            Err(DeliveryError::server(500, "oops")),
        ]);
        let (_, outcome) = run(&policy(1), &transport, "{}");

        match outcome {
            Err(DeliveryError::RetriesExhausted { last, .. }) => {
                assert!(matches!(*last, DeliveryError::Server { status: 500, .. }));
            }
            other => unreachable!("expected exhaustion, got {other:?}"),
        }
    }
}
