/*!
 * HTTP transport for sending events to the HuntGlitch collector.
 *
 * Uses `ureq` — a pure-Rust blocking HTTP client with no async runtime.
 * `send` already blocks the calling thread until the event is delivered or
 * given up on, so blocking I/O is the natural fit.
 *
 * Classification of one attempt:
 * - 2xx response — success
 * - 4xx response — definitive rejection, never retried
 * - any other status — transient server failure
 * - timeout — transient, counts against the per-attempt bound
 * - transport error — transient network failure
 */

use std::time::Duration;

use ureq::Agent;

use crate::error::DeliveryError;
use crate::transport::Transport;

/**
 * `ureq::Agent`-backed `Transport`.
 *
 * One instance is created per `HuntGlitchClient` and reused across all
 * sends; connection pooling and keep-alive are handled by the agent
 * internally.
 */
pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    /**
     * Creates a transport POSTing to `endpoint`, with `timeout` bounding
     * each request end to end (connect, write, read).
     *
     * `http_status_as_error(false)` keeps non-2xx responses on the `Ok`
     * path so they can be classified by status range rather than pattern
     * matched out of `ureq::Error`.
     */
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl Transport for HttpTransport {
    fn deliver(&self, body: &str) -> Result<(), DeliveryError> {
        let result = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .send(body);

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                if (200..300).contains(&status) {
                    return Ok(());
                }

                let body = response
                    .into_body()
                    .read_to_string()
                    .unwrap_or_else(|_| "<unreadable body>".into());

                if (400..500).contains(&status) {
                    Err(DeliveryError::rejected(status, body))
                } else {
                    Err(DeliveryError::server(status, body))
                }
            }
            Err(ureq::Error::Timeout(_)) => Err(DeliveryError::timeout(self.timeout)),
            Err(ureq::Error::Io(err)) if err.kind() == std::io::ErrorKind::TimedOut => {
                Err(DeliveryError::timeout(self.timeout))
            }
            Err(err) => Err(DeliveryError::network(err.to_string())),
        }
    }
}
