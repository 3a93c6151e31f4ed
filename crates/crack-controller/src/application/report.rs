//! Final report printed by the controller.
//!
//! ```text
//! ----- FINAL RESULT -----
//! status: FOUND
//! password: ba
//! ----- TIMING -----
//! controller_parse_ms: 0.412
//! job_dispatch_ms: 0.031
//! worker_compute_ms: 1532.008
//! result_return_ms: 1533.112
//! total_end_to_end_ms: 1540.778
//! ```
//!
//! Local durations are truncated to whole microseconds before conversion;
//! the worker's compute time is converted from its nanosecond count.

use std::fmt;
use std::time::Duration;

use crack_core::protocol::messages::{ResultMessage, ResultStatus};

/// Outcome plus the five timing figures of one controller run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    pub result: ResultMessage,
    /// Shadow lookup and algorithm detection.
    pub parse: Duration,
    pub dispatch: Duration,
    pub result_wait: Duration,
    /// Process start to report.
    pub total: Duration,
}

impl TimingReport {
    pub fn worker_compute(&self) -> Duration {
        Duration::from_nanos(self.result.worker_compute_ns)
    }
}

fn ms(d: Duration) -> f64 {
    d.as_micros() as f64 / 1000.0
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- FINAL RESULT -----")?;
        writeln!(f, "status: {}", self.result.status)?;
        match self.result.status {
            ResultStatus::Found => writeln!(
                f,
                "password: {}",
                self.result.password.as_deref().unwrap_or_default()
            )?,
            ResultStatus::Error => writeln!(
                f,
                "error: {}",
                self.result.error.as_deref().unwrap_or_default()
            )?,
            ResultStatus::NotFound => {}
        }
        writeln!(f, "----- TIMING -----")?;
        writeln!(f, "controller_parse_ms: {:.3}", ms(self.parse))?;
        writeln!(f, "job_dispatch_ms: {:.3}", ms(self.dispatch))?;
        writeln!(
            f,
            "worker_compute_ms: {:.3}",
            self.result.worker_compute_ns as f64 / 1e6
        )?;
        writeln!(f, "result_return_ms: {:.3}", ms(self.result_wait))?;
        write!(f, "total_end_to_end_ms: {:.3}", ms(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(result: ResultMessage) -> TimingReport {
        TimingReport {
            result,
            parse: Duration::from_micros(412),
            dispatch: Duration::from_nanos(31_999),
            result_wait: Duration::from_millis(1533),
            total: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_found_report_layout() {
        // Arrange
        let r = report(ResultMessage {
            status: ResultStatus::Found,
            password: Some("ba".to_string()),
            error: None,
            worker_compute_ns: 1_532_008_400,
        });

        // Act
        let text = r.to_string();

        // Assert
        let expected = "\
----- FINAL RESULT -----
status: FOUND
password: ba
----- TIMING -----
controller_parse_ms: 0.412
job_dispatch_ms: 0.031
worker_compute_ms: 1532.008
result_return_ms: 1533.000
total_end_to_end_ms: 2000.000";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_not_found_has_no_password_or_error_line() {
        let text = report(ResultMessage {
            status: ResultStatus::NotFound,
            password: None,
            error: None,
            worker_compute_ns: 0,
        })
        .to_string();

        assert!(text.contains("status: NOT_FOUND\n----- TIMING -----"));
        assert!(!text.contains("password:"));
        assert!(!text.contains("error:"));
    }

    #[test]
    fn test_error_report_shows_reason() {
        let text = report(ResultMessage::error("unsupported alg: sha1")).to_string();

        assert!(text.contains("status: ERROR\nerror: unsupported alg: sha1\n"));
        assert!(text.contains("worker_compute_ms: 0.000"));
    }

    #[test]
    fn test_worker_compute_duration() {
        let r = report(ResultMessage::error("x"));
        assert_eq!(r.worker_compute(), Duration::ZERO);
    }
}
