//! crack-controller entry point.
//!
//! Looks up the target user's hash, waits for one worker, hands it the job and
//! prints the final result with a timing breakdown.
//!
//! # Usage
//!
//! ```text
//! crack-controller -f <shadow file> -u <username> -p <port> [OPTIONS]
//!
//! Options:
//!   -f <FILE>          Shadow file to read the hash from
//!   -u <USER>          Account whose password is recovered
//!   -p <PORT>          TCP port to listen on (1-65535)
//!   --bind <IP>        Address to bind [default: ::, IPv4 clients included]
//!   --config <FILE>    TOML search settings (charset, password_len, mode)
//! ```
//!
//! The report goes to stdout; logs go to stderr and are filtered with
//! `RUST_LOG` (default `info`).
//!
//! # Exit codes
//!
//! | Code | Meaning                                                 |
//! |------|---------------------------------------------------------|
//! | 0    | a RESULT was received and reported (any status)         |
//! | 2    | usage, shadow lookup, hash detection or settings error  |
//! | 3    | I/O error (bind, accept, read, write, peer closed)      |
//! | 4    | protocol error (wrong or malformed record)              |

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crack_controller::application::{ControllerError, ControllerSession, TimingReport};
use crack_controller::infrastructure::{network, shadow};
use crack_core::{JobSpec, SearchSettings};

const USAGE: &str = "usage: crack-controller -f <shadow file> -u <username> -p <port>";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Password recovery controller.
///
/// Serves a single brute-force job to the first worker that connects.
#[derive(Debug, Parser)]
#[command(name = "crack-controller", version)]
struct Cli {
    /// Path to the shadow file.
    #[arg(short = 'f', value_name = "FILE")]
    shadow_file: PathBuf,

    /// Username whose hash is attacked.
    #[arg(short = 'u', value_name = "USER", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    username: String,

    /// TCP port to listen on.
    #[arg(short = 'p', value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// IP address to bind the listener to.
    #[arg(long, value_name = "IP", default_value = "::", env = "CRACK_BIND")]
    bind: IpAddr,

    /// TOML file overriding the search settings.
    #[arg(long, value_name = "FILE", env = "CRACK_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

// ── Failure classes ───────────────────────────────────────────────────────────

/// A fatal error together with the exit code it maps to.
#[derive(Debug)]
enum Fatal {
    Usage(anyhow::Error),
    Io(anyhow::Error),
    Session(ControllerError),
}

impl Fatal {
    fn exit_code(&self) -> u8 {
        match self {
            Fatal::Usage(_) => 2,
            Fatal::Io(_) => 3,
            Fatal::Session(e) if e.is_io() => 3,
            Fatal::Session(_) => 4,
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

/// Reads settings from `path`, or returns the defaults.
fn load_settings(path: Option<&Path>) -> anyhow::Result<SearchSettings> {
    match path {
        Some(p) => SearchSettings::load(p)
            .with_context(|| format!("failed to load settings from {}", p.display())),
        None => Ok(SearchSettings::default()),
    }
}

/// Builds the job from the shadow file and the settings.
fn prepare_job(cli: &Cli, settings: &SearchSettings) -> anyhow::Result<JobSpec> {
    let target = shadow::load_target(&cli.shadow_file, &cli.username)?;
    let charset = settings.charset()?;
    Ok(JobSpec::new(
        cli.username.clone(),
        target,
        charset,
        settings.password_len,
    )?)
}

async fn run(cli: Cli, started: Instant) -> Result<TimingReport, Fatal> {
    let settings = load_settings(cli.config.as_deref()).map_err(Fatal::Usage)?;
    let addr = cli.listen_addr();

    let parse_started = Instant::now();
    let job = prepare_job(&cli, &settings).map_err(Fatal::Usage)?;
    let parse = parse_started.elapsed();
    info!(
        "target {}: alg={}, charset size={}, length={}, mode={}",
        job.username(),
        job.algorithm(),
        job.charset().len(),
        job.password_length(),
        settings.mode.as_str()
    );

    let listener = network::bind(addr)
        .await
        .with_context(|| format!("listen on {addr} failed"))
        .map_err(Fatal::Io)?;
    let (stream, _peer) = network::accept_one(listener)
        .await
        .context("accept failed")
        .map_err(Fatal::Io)?;
    let (reader, writer) = network::split(stream);

    let exchange = ControllerSession::new(reader, writer)
        .run(&job)
        .await
        .map_err(Fatal::Session)?;

    Ok(TimingReport {
        result: exchange.result,
        parse,
        dispatch: exchange.dispatch,
        result_wait: exchange.result_wait,
        total: started.elapsed(),
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let started = Instant::now();

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

    match run(cli, started).await {
        Ok(report) => {
            println!("{report}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::net::Ipv6Addr;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("crack-controller").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_required_arguments() {
        // Arrange / Act
        let cli = parse(&["-f", "/etc/shadow", "-u", "alice", "-p", "9000"]).unwrap();

        // Assert
        assert_eq!(cli.shadow_file, PathBuf::from("/etc/shadow"));
        assert_eq!(cli.username, "alice");
        assert_eq!(cli.port, 9000);
        assert_eq!(cli.bind, IpAddr::V6(Ipv6Addr::UNSPECIFIED));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_missing_username_is_error() {
        let err = parse(&["-f", "shadow", "-p", "9000"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_port_zero_is_rejected() {
        assert!(parse(&["-f", "shadow", "-u", "alice", "-p", "0"]).is_err());
    }

    #[test]
    fn test_cli_port_above_range_is_rejected() {
        assert!(parse(&["-f", "shadow", "-u", "alice", "-p", "65536"]).is_err());
    }

    #[test]
    fn test_cli_empty_username_is_rejected() {
        assert!(parse(&["-f", "shadow", "-u", "", "-p", "9000"]).is_err());
    }

    #[test]
    fn test_listen_addr_combines_bind_and_port() {
        let cli = parse(&["-f", "s", "-u", "a", "-p", "7000", "--bind", "127.0.0.1"]).unwrap();
        assert_eq!(cli.listen_addr().to_string(), "127.0.0.1:7000");
    }

    #[test]
    fn test_listen_addr_brackets_ipv6() {
        let cli = parse(&["-f", "s", "-u", "a", "-p", "7000"]).unwrap();
        assert_eq!(cli.listen_addr().to_string(), "[::]:7000");

        let cli = parse(&["-f", "s", "-u", "a", "-p", "7000", "--bind", "::1"]).unwrap();
        assert_eq!(cli.listen_addr().to_string(), "[::1]:7000");
    }

    #[test]
    fn test_cli_rejects_invalid_bind_ip() {
        assert!(parse(&["-f", "s", "-u", "a", "-p", "7000", "--bind", "not.an.ip"]).is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(load_settings(None).unwrap(), SearchSettings::default());
    }

    #[test]
    fn test_usage_failures_exit_two() {
        let fatal = Fatal::Usage(anyhow::anyhow!("username not in shadow file"));
        assert_eq!(fatal.exit_code(), 2);
    }

    #[test]
    fn test_io_and_protocol_failures_have_one_line_messages() {
        // Arrange
        let io = Fatal::Io(anyhow::anyhow!("connection reset").context("accept failed"));
        let protocol = Fatal::Session(ControllerError::UnexpectedMessage {
            expected: crack_core::protocol::messages::MessageType::Register,
            got: "JOB".to_string(),
        });

        // Act / Assert
        assert_eq!(io.message(), "accept failed: connection reset");
        assert_eq!(io.exit_code(), 3);
        assert_eq!(protocol.message(), "protocol error: expected REGISTER, got JOB");
        assert_eq!(protocol.exit_code(), 4);
        assert!(!io.message().contains('\n'));
    }
}
