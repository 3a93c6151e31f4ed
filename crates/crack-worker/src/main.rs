//! crack-worker entry point.
//!
//! Connects to a controller, receives one job, searches it and reports back.
//!
//! # Usage
//!
//! ```text
//! crack-worker -c <controller_host> -p <port> [OPTIONS]
//!
//! Options:
//!   -c <HOST>              Controller host name or IP address
//!   -p <PORT>              Controller TCP port (1-65535)
//!   --name <NAME>          Identity sent in REGISTER [default: host name]
//!   --config <FILE>        TOML search settings (charset, password_len, mode)
//!   --progress-secs <N>    Seconds between progress lines, 0 disables [default: 10]
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `info`).
//!
//! # Exit codes
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | a RESULT was sent (FOUND, NOT_FOUND or a search ERROR)   |
//! | 1    | the search task panicked                                 |
//! | 2    | usage or settings error                                  |
//! | 3    | I/O error (connect, read, write, peer closed)            |
//! | 4    | protocol error (rejected, wrong or malformed record)     |
//! | 5    | the JOB was refused; RESULT{ERROR} was sent              |

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crack_core::protocol::messages::ResultStatus;
use crack_core::SearchSettings;
use crack_worker::application::{JobExpectations, WorkerError, WorkerSession};
use crack_worker::infrastructure::crypt::CryptVerifier;
use crack_worker::infrastructure::{identity, network};

const USAGE: &str = "usage: crack-worker -c <controller_host> -p <port>";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Password recovery worker.
///
/// Takes one brute-force job from a controller and searches it.
#[derive(Debug, Parser)]
#[command(name = "crack-worker", version)]
struct Cli {
    /// Controller host name or IP address.
    #[arg(short = 'c', value_name = "HOST", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    controller: String,

    /// Controller TCP port.
    #[arg(short = 'p', value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Identity announced in REGISTER.
    #[arg(long, env = "CRACK_WORKER_NAME")]
    name: Option<String>,

    /// TOML file overriding the search settings.
    #[arg(long, value_name = "FILE", env = "CRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds between "still searching" lines; 0 disables them.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    progress_secs: u64,
}

// ── Failure classes ───────────────────────────────────────────────────────────

#[derive(Debug)]
enum Fatal {
    Usage(anyhow::Error),
    Io(anyhow::Error),
    Session(WorkerError),
}

impl Fatal {
    fn exit_code(&self) -> u8 {
        match self {
            Fatal::Usage(_) => 2,
            Fatal::Io(_) => 3,
            Fatal::Session(e) => match e {
                WorkerError::SearchAborted(_) => 1,
                WorkerError::Validation(_) => 5,
                e if e.is_io() => 3,
                _ => 4,
            },
        }
    }

    /// One-line description printed before the usage reminder.
    fn message(&self) -> String {
        match self {
            Fatal::Usage(e) | Fatal::Io(e) => format!("{e:#}"),
            Fatal::Session(e) => e.to_string(),
        }
    }
}

fn load_expectations(path: Option<&Path>) -> anyhow::Result<JobExpectations> {
    let settings = match path {
        Some(p) => SearchSettings::load(p)
            .with_context(|| format!("failed to load settings from {}", p.display()))?,
        None => SearchSettings::default(),
    };
    JobExpectations::from_settings(&settings).context("invalid search settings")
}

async fn run(cli: Cli) -> Result<ResultStatus, Fatal> {
    let expectations = load_expectations(cli.config.as_deref()).map_err(Fatal::Usage)?;
    let identity = identity::worker_identity(cli.name.as_deref());

    let stream = network::connect(&cli.controller, cli.port)
        .await
        .with_context(|| format!("cannot connect to {}:{}", cli.controller, cli.port))
        .map_err(Fatal::Io)?;
    let (reader, writer) = network::split(stream);

    let result = WorkerSession::new(reader, writer, identity)
        .with_progress(Duration::from_secs(cli.progress_secs))
        .run(&expectations, CryptVerifier::system_default())
        .await
        .map_err(Fatal::Session)?;
    Ok(result.status)
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(status) => {
            info!("done: {status}");
            ExitCode::SUCCESS
        }
        Err(fatal) => {
            eprintln!("error: {}", fatal.message());
            eprintln!("{USAGE}");
            ExitCode::from(fatal.exit_code())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
