/*!
 * Protocol layer — data structures and constants.
 *
 * Everything related to *what* we send to the HuntGlitch collector:
 * - `types` — Envelope, Event, ExceptionInfo, LogRecord, LogLevel, BacktraceFrame
 * - `constants` — CLIENT_TYPE, CLIENT_VERSION, collector endpoint, defaults
 */

pub mod constants;
pub mod types;
