//! ControllerSession: the server side of the one-job protocol.
//!
//! # Exchange (for beginners)
//!
//! ```text
//! worker                      controller
//!   │ ── REGISTER{worker} ──►    │
//!   │ ◄── ACK{OK} ───────────    │   (ACK{ERROR} + abort if not REGISTER)
//!   │ ◄── JOB{...} ──────────    │   ← dispatch time measured here
//!   │ ── RESULT{...} ───────►    │   ← result wait time measured here
//! ```
//!
//! The session is generic over the reader and writer so tests can run it over
//! an in-memory `tokio::io::duplex` pipe instead of a TCP socket.  Every
//! failure is fatal: there are no retries and no timeouts.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crack_core::protocol::messages::{AckMessage, MessageType, ResultMessage};
use crack_core::{read_message, write_message, CodecError, JobSpec, Message};

/// Fatal controller-side session failures.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The peer sent something other than the message the protocol expects.
    #[error("protocol error: expected {expected}, got {got}")]
    UnexpectedMessage { expected: MessageType, got: String },

    /// Reading or writing a record failed.
    #[error("{context} failed: {source}")]
    Codec {
        context: &'static str,
        #[source]
        source: CodecError,
    },
}

impl ControllerError {
    fn codec(context: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| ControllerError::Codec { context, source }
    }

    /// `true` for transport failures, `false` for protocol violations.
    pub fn is_io(&self) -> bool {
        match self {
            ControllerError::UnexpectedMessage { .. } => false,
            ControllerError::Codec { source, .. } => {
                matches!(source, CodecError::Io(_) | CodecError::StreamClosed)
            }
        }
    }
}

/// What a completed session hands back for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Identity the worker registered with.
    pub worker: String,
    pub result: ResultMessage,
    /// Time spent writing the JOB record.
    pub dispatch: Duration,
    /// Time from JOB sent to RESULT fully received.
    pub result_wait: Duration,
}

/// One controller session over an accepted connection.
pub struct ControllerSession<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> ControllerSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Runs the whole exchange for `job`.
    ///
    /// A `RESULT` with status `ERROR` is a successful exchange; it is the
    /// worker's legitimate answer and is returned in [`Exchange::result`].
    ///
    /// # Errors
    ///
    /// [`ControllerError`] on any I/O or protocol failure.
    pub async fn run(mut self, job: &JobSpec) -> Result<Exchange, ControllerError> {
        let worker = self.expect_register().await?;
        info!("worker {worker:?} registered");

        write_message(&mut self.writer, &Message::Ack(AckMessage::ok()))
            .await
            .map_err(ControllerError::codec("send ACK"))?;

        let dispatch_started = Instant::now();
        write_message(&mut self.writer, &Message::Job(job.to_message()))
            .await
            .map_err(ControllerError::codec("send JOB"))?;
        let dispatch = dispatch_started.elapsed();
        info!(
            "dispatched job for {} ({}, length {})",
            job.username(),
            job.algorithm(),
            job.password_length()
        );

        let wait_started = Instant::now();
        let reply = read_message(&mut self.reader)
            .await
            .map_err(|e| match e {
                CodecError::UnexpectedType(tag) => ControllerError::UnexpectedMessage {
                    expected: MessageType::Result,
                    got: tag,
                },
                other => ControllerError::codec("read RESULT")(other),
            })?;
        let result_wait = wait_started.elapsed();

        let result = match reply {
            Message::Result(result) => result,
            other => {
                return Err(ControllerError::UnexpectedMessage {
                    expected: MessageType::Result,
                    got: other.message_type().to_string(),
                })
            }
        };
        info!("worker answered {}", result.status);

        Ok(Exchange {
            worker,
            result,
            dispatch,
            result_wait,
        })
    }

    /// Reads the first record; anything but REGISTER is rejected with an
    /// `ACK{ERROR}` before the session aborts.
    async fn expect_register(&mut self) -> Result<String, ControllerError> {
        let got = match read_message(&mut self.reader).await {
            Ok(Message::Register(register)) => return Ok(register.worker),
            Ok(other) => other.message_type().to_string(),
            Err(CodecError::UnexpectedType(tag)) => tag,
            Err(CodecError::MalformedRecord(reason)) => format!("malformed record ({reason})"),
            Err(e) => return Err(ControllerError::codec("read REGISTER")(e)),
        };

        let reject = Message::Ack(AckMessage::error("expected REGISTER"));
        if let Err(e) = write_message(&mut self.writer, &reject).await {
            warn!("could not deliver ACK{{ERROR}}: {e}");
        }
        Err(ControllerError::UnexpectedMessage {
            expected: MessageType::Register,
            got,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
