//! WorkerSession: the client side of the one-job protocol.
//!
//! ```text
//! Connected ─► REGISTER sent ─► ACK{OK} ─► JOB received ─► validated
//!                                  │            │              │
//!                             abort (no reply)  │              ▼
//!                                  RESULT{ERROR} + abort   search (blocking thread)
//!                                                              │
//!                                                      exactly one RESULT
//! ```
//!
//! The search runs on Tokio's blocking pool so the optional progress
//! indicator can keep ticking; the session itself simply awaits it.  Once a
//! JOB has been read, every path out of the session tries to send exactly one
//! RESULT.

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crack_core::protocol::messages::{
    AckMessage, AckStatus, JobMessage, MessageType, RegisterMessage, ResultMessage,
};
use crack_core::{read_message, write_message, CodecError, CrackingEngine, HashVerifier, Message};

use crate::application::validate::{JobExpectations, ValidationError};
use crate::infrastructure::progress::ProgressIndicator;

/// Fatal worker-side session failures.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The controller answered REGISTER with `ACK{ERROR}`.
    #[error("registration rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    #[error("protocol error: expected {expected}, got {got}")]
    UnexpectedMessage { expected: MessageType, got: String },

    /// The JOB failed validation; a `RESULT{ERROR}` was sent.
    #[error("invalid job: {0}")]
    Validation(#[from] ValidationError),

    #[error("{context} failed: {source}")]
    Codec {
        context: &'static str,
        #[source]
        source: CodecError,
    },

    /// The blocking search task panicked or was cancelled.
    #[error("search task failed: {0}")]
    SearchAborted(String),
}

impl WorkerError {
    fn codec(context: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| WorkerError::Codec { context, source }
    }

    /// `true` for transport failures.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            WorkerError::Codec {
                source: CodecError::Io(_) | CodecError::StreamClosed,
                ..
            }
        )
    }
}

/// One worker session over a connected stream.
pub struct WorkerSession<R, W> {
    reader: R,
    writer: W,
    identity: String,
    progress_every: Option<Duration>,
}

impl<R, W> WorkerSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, identity: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            identity: identity.into(),
            progress_every: None,
        }
    }

    /// Enables the progress indicator.  A zero interval leaves it disabled.
    pub fn with_progress(mut self, every: Duration) -> Self {
        self.progress_every = (!every.is_zero()).then_some(every);
        self
    }

    /// Runs the whole exchange and returns the RESULT that was sent.
    ///
    /// # Errors
    ///
    /// [`WorkerError`] on any I/O or protocol failure, or when the JOB is
    /// refused by `expectations`.
    pub async fn run<V>(
        mut self,
        expectations: &JobExpectations,
        verifier: V,
    ) -> Result<ResultMessage, WorkerError>
    where
        V: HashVerifier + 'static,
    {
        self.register().await?;

        let job = match self.receive_job().await {
            Ok(job) => job,
            Err(e) => {
                self.send_best_effort(ResultMessage::error(e.to_string())).await;
                return Err(e);
            }
        };
        info!(
            "job received: user={}, alg={}, length={}",
            job.username, job.alg, job.password_len
        );

        let spec = match expectations.validate(&job) {
            Ok(spec) => spec,
            Err(e) => {
                warn!("refusing job: {e}");
                self.send_result(ResultMessage::error(e.to_string())).await?;
                return Err(e.into());
            }
        };

        let progress = self.progress_every.map(ProgressIndicator::start);
        let mode = expectations.mode();
        let search = tokio::task::spawn_blocking(move || {
            let mut engine = CrackingEngine::new(verifier, mode);
            engine.run(&spec)
        })
        .await;
        if let Some(progress) = progress {
            progress.stop().await;
        }

        let result = match search {
            Ok(result) => result,
            Err(e) => {
                let reason = e.to_string();
                self.send_best_effort(ResultMessage::error(format!("search task failed: {reason}")))
                    .await;
                return Err(WorkerError::SearchAborted(reason));
            }
        };

        let message = result.to_message();
        self.send_result(message.clone()).await?;
        info!("result sent: {}", message.status);
        Ok(message)
    }

    async fn register(&mut self) -> Result<(), WorkerError> {
        let register = Message::Register(RegisterMessage {
            worker: self.identity.clone(),
        });
        write_message(&mut self.writer, &register)
            .await
            .map_err(WorkerError::codec("send REGISTER"))?;

        match read_message(&mut self.reader).await {
            Ok(Message::Ack(AckMessage {
                status: AckStatus::Ok,
                ..
            })) => {
                info!("registered as {:?}", self.identity);
                Ok(())
            }
            Ok(Message::Ack(AckMessage { error, .. })) => Err(WorkerError::Rejected(error)),
            Ok(other) => Err(WorkerError::UnexpectedMessage {
                expected: MessageType::Ack,
                got: other.message_type().to_string(),
            }),
            Err(CodecError::UnexpectedType(tag)) => Err(WorkerError::UnexpectedMessage {
                expected: MessageType::Ack,
                got: tag,
            }),
            Err(e) => Err(WorkerError::codec("read ACK")(e)),
        }
    }

    async fn receive_job(&mut self) -> Result<JobMessage, WorkerError> {
        match read_message(&mut self.reader).await {
            Ok(Message::Job(job)) => Ok(job),
            Ok(other) => Err(WorkerError::UnexpectedMessage {
                expected: MessageType::Job,
                got: other.message_type().to_string(),
            }),
            Err(CodecError::UnexpectedType(tag)) => Err(WorkerError::UnexpectedMessage {
                expected: MessageType::Job,
                got: tag,
            }),
            Err(e) => Err(WorkerError::codec("read JOB")(e)),
        }
    }

    async fn send_result(&mut self, result: ResultMessage) -> Result<(), WorkerError> {
        write_message(&mut self.writer, &Message::Result(result))
            .await
            .map_err(WorkerError::codec("send RESULT"))
    }

    async fn send_best_effort(&mut self, result: ResultMessage) {
        if let Err(e) = self.send_result(result).await {
            warn!("could not deliver RESULT{{ERROR}}: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
