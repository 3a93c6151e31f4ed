//! Newline-delimited JSON codec for controller ↔ worker records.
//!
//! Wire format:
//! ```text
//! {"type":"<KIND>", ...fields...}\n
//! ```
//! One UTF-8 JSON object per line, no length prefix.  A record is either
//! returned complete and parsed, or an error is returned; callers never see
//! fragments.
//!
//! The pure functions [`encode_message`] and [`decode_message`] do the
//! (de)serialization.  [`read_message`] and [`write_message`] add the stream
//! framing on top of any tokio byte stream, so sessions can run over a real
//! `TcpStream` in production and over `tokio::io::duplex` in tests.

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::protocol::messages::{Message, MessageType};

/// Errors that can occur while framing, encoding or decoding a record.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The line was empty, not JSON, not an object, or missing fields.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The line is a well-formed record whose `"type"` is not part of the protocol.
    #[error("unexpected message type: {0:?}")]
    UnexpectedType(String),

    /// The peer closed the stream before a line terminator was read.
    #[error("stream closed before a complete record was received")]
    StreamClosed,

    /// The record could not be serialized.
    #[error("failed to encode record: {0}")]
    Encode(String),

    /// The underlying stream failed.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`Message`] as one JSON line, terminator included.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use crack_core::protocol::{decode_message, encode_message};
/// use crack_core::protocol::messages::{Message, RegisterMessage};
///
/// let msg = Message::Register(RegisterMessage { worker: "node-1".into() });
/// let bytes = encode_message(&msg).unwrap();
/// assert_eq!(bytes.last(), Some(&b'\n'));
///
/// let line = std::str::from_utf8(&bytes).unwrap();
/// assert_eq!(decode_message(line).unwrap(), msg);
/// ```
pub fn encode_message(msg: &Message) -> Result<Vec<u8>, CodecError> {
    let mut buf = serde_json::to_vec(msg).map_err(|e| CodecError::Encode(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Decodes one record from a single line of text.
///
/// Surrounding whitespace (including the `\n` or `\r\n` terminator) is
/// ignored.
///
/// # Errors
///
/// - [`CodecError::MalformedRecord`] if the line is empty, is not a JSON
///   object, has no string `"type"` field, or its fields do not match the
///   declared type.
/// - [`CodecError::UnexpectedType`] if `"type"` names no known message.
pub fn decode_message(line: &str) -> Result<Message, CodecError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(CodecError::MalformedRecord("empty record".to_string()));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| CodecError::MalformedRecord(e.to_string()))?;

    let tag = value
        .as_object()
        .ok_or_else(|| CodecError::MalformedRecord("record is not a JSON object".to_string()))?
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| CodecError::MalformedRecord("missing \"type\" field".to_string()))?;

    if MessageType::from_tag(tag).is_none() {
        return Err(CodecError::UnexpectedType(tag.to_string()));
    }

    serde_json::from_value(value).map_err(|e| CodecError::MalformedRecord(e.to_string()))
}

/// Reads exactly one record from `reader`.
///
/// Suspends until a full line is available.  There is no timeout: a silent
/// peer keeps the caller waiting until the connection closes.
///
/// # Errors
///
/// - [`CodecError::StreamClosed`] if EOF arrives before a `\n`.
/// - [`CodecError::MalformedRecord`] / [`CodecError::UnexpectedType`] as for
///   [`decode_message`], and for lines that are not valid UTF-8.
/// - [`CodecError::Io`] for any other read failure.
pub async fn read_message<R>(reader: &mut R) -> Result<Message, CodecError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let n = match reader.read_line(&mut line).await {
        Ok(n) => n,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(CodecError::MalformedRecord(
                "record is not valid UTF-8".to_string(),
            ));
        }
        Err(e) => return Err(CodecError::Io(e)),
    };

    // `read_line` returns 0 at EOF, and a line without terminator when the
    // peer hung up mid-record.  Both mean no complete record will arrive.
    if n == 0 || !line.ends_with('\n') {
        return Err(CodecError::StreamClosed);
    }

    let msg = decode_message(&line)?;
    debug!("received {} record", msg.message_type());
    Ok(msg)
}

/// Writes one record to `writer` and flushes it.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] or [`CodecError::Io`].
pub async fn write_message<W>(writer: &mut W, msg: &Message) -> Result<(), CodecError>
where
    W: AsyncWrite + Unpin,
{
    let bytes = encode_message(msg)?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    debug!("sent {} record ({} bytes)", msg.message_type(), bytes.len());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
