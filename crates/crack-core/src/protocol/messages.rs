//! All controller ↔ worker protocol message types.
//!
//! Every record on the wire is a single JSON object whose `"type"` field names
//! the message kind.  The remaining fields are flattened into the same object:
//!
//! ```json
//! {"type":"REGISTER","worker":"node-7"}
//! {"type":"ACK","status":"OK"}
//! {"type":"JOB","username":"alice","full_hash":"$1$salt$...","alg":"md5","charset":"ab","password_len":2}
//! {"type":"RESULT","status":"FOUND","password":"ba","worker_compute_ns":1200}
//! ```
//!
//! Field names are the interoperability contract and must not change.
//!
//! # Why are `alg` and `password_len` loosely typed?
//!
//! The worker has to *validate* a job it cannot honour and answer with a
//! `RESULT{status=ERROR}`.  If `alg` were the [`crate::Algorithm`] enum, an
//! unknown tag like `"sha1"` would fail deserialization and look like line
//! noise instead of a job the worker can reject politely.  The typed view is
//! produced by `JobExpectations::validate` on the worker side.

use serde::{Deserialize, Serialize};

// ── Message type tags ─────────────────────────────────────────────────────────

/// The four message kinds of the protocol, in the order they are exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Register,
    Ack,
    Job,
    Result,
}

impl MessageType {
    /// Returns the tag exactly as it appears in the `"type"` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Register => "REGISTER",
            MessageType::Ack => "ACK",
            MessageType::Job => "JOB",
            MessageType::Result => "RESULT",
        }
    }

    /// Parses a `"type"` field value.  Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "REGISTER" => Some(MessageType::Register),
            "ACK" => Some(MessageType::Ack),
            "JOB" => Some(MessageType::Job),
            "RESULT" => Some(MessageType::Result),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Status codes ──────────────────────────────────────────────────────────────

/// Status carried by an `ACK` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AckStatus {
    Ok,
    Error,
}

/// Status carried by a `RESULT` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Found,
    NotFound,
    Error,
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ResultStatus::Found => "FOUND",
            ResultStatus::NotFound => "NOT_FOUND",
            ResultStatus::Error => "ERROR",
        })
    }
}

// ── Per-message payload structs ───────────────────────────────────────────────

/// REGISTER – first message of a session, sent by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMessage {
    /// Identity of the worker (its hostname by default).  An absent field
    /// reads as an empty name.
    #[serde(default)]
    pub worker: String,
}

/// ACK – the controller's answer to REGISTER.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub status: AckStatus,
    /// Human-readable reason, only present when `status` is `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckMessage {
    /// Builds an accepting ACK.
    pub fn ok() -> Self {
        Self {
            status: AckStatus::Ok,
            error: None,
        }
    }

    /// Builds a rejecting ACK carrying `reason`.
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: AckStatus::Error,
            error: Some(reason.into()),
        }
    }
}

/// JOB – the single unit of work the controller hands to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMessage {
    pub username: String,
    /// The complete crypt-style hash string, salt and parameters included.
    pub full_hash: String,
    /// Lower-case algorithm tag (`md5`, `sha256`, `sha512`, `bcrypt`, `yescrypt`).
    pub alg: String,
    /// Ordered candidate alphabet.
    pub charset: String,
    /// Candidate length.  Signed so that nonsense values reach validation.
    pub password_len: i64,
}

/// RESULT – the single terminal answer of the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub status: ResultStatus,
    /// Recovered password, only present when `status` is `FOUND`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Failure description, only present when `status` is `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall time the worker spent searching, in nanoseconds.
    #[serde(default)]
    pub worker_compute_ns: u64,
}

impl ResultMessage {
    /// Builds an `ERROR` result that carries no compute time.
    ///
    /// Used when the worker gives up before a search starts (bad JOB, wrong
    /// message type, failed validation).
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            password: None,
            error: Some(reason.into()),
            worker_compute_ns: 0,
        }
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// A single protocol record.
///
/// `#[serde(tag = "type")]` writes the discriminant into the `"type"` field
/// and flattens the payload struct's fields next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    Register(RegisterMessage),
    Ack(AckMessage),
    Job(JobMessage),
    Result(ResultMessage),
}

impl Message {
    /// Returns the [`MessageType`] corresponding to this message variant.
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Register(_) => MessageType::Register,
            Message::Ack(_) => MessageType::Ack,
            Message::Job(_) => MessageType::Job,
            Message::Result(_) => MessageType::Result,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
