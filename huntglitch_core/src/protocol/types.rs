/**
 * Core type definitions for the HuntGlitch Rust SDK.
 *
 * These structures define the JSON protocol accepted by the HuntGlitch
 * collector. The outermost structure is `Envelope`, which carries the two
 * credential keys alongside a discriminated event payload:
 *
 * ```json
 * {
 *   "project_key": "...",
 *   "deliverable_key": "...",
 *   "kind": "exception",
 *   "payload": { ... },
 *   "additional_data": { ... },
 *   "tags": { ... },
 *   "client_type": "logger/rust",
 *   "client_version": "huntglitch-rust/0.1.0"
 * }
 * ```
 */
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Aliases for event metadata
// ---------------------------------------------------------------------------

/// Free-form metadata attached to an event (string keys, arbitrary JSON values).
pub type AdditionalData = serde_json::Map<String, serde_json::Value>;

/// Indexed string key-value pairs for filtering events in the dashboard.
pub type Tags = HashMap<String, String>;

// ---------------------------------------------------------------------------
// LogLevel
// ---------------------------------------------------------------------------

/**
 * Severity of a log record.
 *
 * The collector expects the numeric codes 1 through 5. String names are
 * accepted on the construction side (`FromStr`) so callers can pass
 * either form.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// The numeric wire code for this level.
    pub fn code(self) -> u8 {
        match self {
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warning => 3,
            LogLevel::Error => 4,
            LogLevel::Critical => 5,
        }
    }

    /// Converts a numeric wire code back into a level.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /**
     * Parses a level from either a name (`"warning"`, `"warn"`, `"fatal"`)
     * or a numeric code (`"3"`). Case-insensitive.
     */
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" | "fatal" => Ok(LogLevel::Critical),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(LogLevel::from_code)
                .ok_or_else(|| format!("unknown log level: {s}")),
        }
    }
}

impl Serialize for LogLevel {
    /// Serialized as the numeric wire code, not the name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// ---------------------------------------------------------------------------
// BacktraceFrame
// ---------------------------------------------------------------------------

/**
 * A single frame in a captured backtrace.
 *
 * Populated from `backtrace::BacktraceFrame` where debug info allows:
 * - `file` — source file path (if resolved)
 * - `line` / `column` — position within the file (column often unavailable)
 * - `function` — demangled function name
 */
#[derive(Debug, Clone, Serialize)]
pub struct BacktraceFrame {
    /// Source file path, if debug info is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Line number within the source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Column number within the source line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Demangled function / symbol name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

// ---------------------------------------------------------------------------
// ExceptionInfo — the payload of an exception event
// ---------------------------------------------------------------------------

/**
 * A serializable representation of a caught error: the error's name, its
 * rendered message, and whatever source position / backtrace the capture
 * site could provide.
 */
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionInfo {
    /// Error type name, e.g. `"std::io::error::Error"` or `"panic"`.
    pub name: String,

    /// Rendered error message.
    pub message: String,

    /// Source file of the capture site, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Line number of the capture site, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Stack frames from the most recent call to the earliest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<Vec<BacktraceFrame>>,
}

impl ExceptionInfo {
    /**
     * Builds an `ExceptionInfo` from any `std::error::Error`.
     *
     * The name is the error's type path as the compiler knows it. Capture
     * site and backtrace are left empty; callers that know them (the client
     * methods, the panic hook) fill them in.
     */
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self {
            name: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            file: None,
            line: None,
            backtrace: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LogRecord — the payload of a log event
// ---------------------------------------------------------------------------

/**
 * A log message with a severity level.
 *
 * `name` is an optional label for grouping related records; `file` and
 * `line` identify the call site when the record was produced through
 * `send_log`.
 */
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Optional label for the record, e.g. `"CustomEvent"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The log message itself.
    pub message: String,

    /// Severity, serialized as its numeric code.
    pub level: LogLevel,

    /// Source file of the call site, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Line number of the call site, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl LogRecord {
    /// Builds a minimal record with no label or call-site information.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: message.into(),
            level,
            file: None,
            line: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Event — one exception or log record plus optional metadata
// ---------------------------------------------------------------------------

/**
 * The discriminated payload of an event.
 *
 * Serializes adjacently tagged so the envelope carries
 * `"kind": "exception" | "log"` next to the `"payload"` object.
 */
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum EventPayload {
    Exception(ExceptionInfo),
    Log(LogRecord),
}

/// The discriminant of an `Event`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Exception,
    Log,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Exception => f.write_str("exception"),
            EventKind::Log => f.write_str("log"),
        }
    }
}

/**
 * One exception or log record to be delivered.
 *
 * Immutable once constructed; its lifecycle is create, serialize, transmit,
 * discard. The optional `additional_data` and `tags` maps travel alongside
 * the payload in the envelope.
 */
#[derive(Debug, Clone)]
pub struct Event {
    /// The discriminated record itself.
    pub payload: EventPayload,

    /// Free-form metadata (string keys, arbitrary JSON values).
    pub additional_data: Option<AdditionalData>,

    /// Indexed string key-value pairs.
    pub tags: Option<Tags>,
}

impl Event {
    /// Wraps an `ExceptionInfo` into an event with no metadata.
    pub fn exception(info: ExceptionInfo) -> Self {
        Self {
            payload: EventPayload::Exception(info),
            additional_data: None,
            tags: None,
        }
    }

    /// Wraps a `LogRecord` into an event with no metadata.
    pub fn log(record: LogRecord) -> Self {
        Self {
            payload: EventPayload::Log(record),
            additional_data: None,
            tags: None,
        }
    }

    /// Attaches free-form metadata, replacing any previous map.
    pub fn with_additional_data(mut self, data: AdditionalData) -> Self {
        self.additional_data = Some(data);
        self
    }

    /// Attaches tags, replacing any previous map.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Which kind of record this event carries.
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Exception(_) => EventKind::Exception,
            EventPayload::Log(_) => EventKind::Log,
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope — the top-level structure POSTed to the collector
// ---------------------------------------------------------------------------

/**
 * The outer envelope sent to the collector via HTTP POST.
 *
 * Borrows from the config and the event; built immediately before
 * serialization in `HuntGlitchClient::send`. The `kind` and `payload`
 * fields come from flattening the adjacently tagged `EventPayload`.
 */
#[derive(Serialize)]
pub struct Envelope<'a> {
    /// The project key identifying the account.
    pub project_key: &'a str,

    /// The deliverable key identifying the application within the project.
    pub deliverable_key: &'a str,

    /// Flattens into `"kind": ..., "payload": {...}`.
    #[serde(flatten)]
    pub payload: &'a EventPayload,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<&'a AdditionalData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a Tags>,

    /// Identifies the SDK family. Always `"logger/rust"` for this SDK.
    pub client_type: &'a str,

    /// SDK version string, e.g. `"huntglitch-rust/0.1.0"`.
    pub client_version: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{CLIENT_TYPE, CLIENT_VERSION};

    /**
     * Verifies that level names and numeric strings both parse, and that
     * unknown input is rejected.
     */
    #[test]
    fn test_level_parsing() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("2".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert!("9".parse::<LogLevel>().is_err());
    }

    /**
     * Verifies the level round-trip between enum values and wire codes.
     */
    #[test]
    fn test_level_codes() {
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Critical,
        ] {
            assert_eq!(LogLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(LogLevel::from_code(0), None);
    }

    /**
     * Serializes a full exception envelope and checks the top-level fields
     * the collector requires.
     */
    #[test]
    fn test_envelope_shape_for_exception() {
        let mut info = ExceptionInfo::from_error(&std::fmt::Error);
        info.file = Some("src/main.rs".into());
        info.line = Some(42);

        let mut tags = Tags::new();
        tags.insert("environment".into(), "production".into());
        let event = Event::exception(info).with_tags(tags);

        let envelope = Envelope {
            project_key: "p1",
            deliverable_key: "d1",
            payload: &event.payload,
            additional_data: event.additional_data.as_ref(),
            tags: event.tags.as_ref(),
            client_type: CLIENT_TYPE,
            client_version: CLIENT_VERSION,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();

        assert_eq!(value["project_key"], "p1");
        assert_eq!(value["deliverable_key"], "d1");
        assert_eq!(value["kind"], "exception");
        assert_eq!(value["payload"]["file"], "src/main.rs");
        assert_eq!(value["payload"]["line"], 42);
        assert_eq!(value["tags"]["environment"], "production");
        assert_eq!(value["client_type"], "logger/rust");
        /* additional_data was never set, so the key must be absent */
        assert!(value.get("additional_data").is_none());
    }

    /**
     * Verifies that a log envelope carries the numeric level and the
     * `"log"` kind tag.
     */
    #[test]
    fn test_envelope_shape_for_log() {
        let mut record = LogRecord::new(LogLevel::Warning, "disk almost full");
        record.name = Some("CapacityWatch".into());
        let event = Event::log(record);

        let envelope = Envelope {
            project_key: "p1",
            deliverable_key: "d1",
            payload: &event.payload,
            additional_data: None,
            tags: None,
            client_type: CLIENT_TYPE,
            client_version: CLIENT_VERSION,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();

        assert_eq!(value["kind"], "log");
        assert_eq!(value["payload"]["level"], 3);
        assert_eq!(value["payload"]["name"], "CapacityWatch");
        assert_eq!(value["payload"]["message"], "disk almost full");
    }
}
