//! Application layer for the controller.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer orchestrates domain objects to fulfil one user goal,
//! here "hand one job to one worker and report what came back".  It talks to
//! the outside world only through the async reader/writer it is given, so it
//! never opens sockets or files itself.
//!
//! # Sub-modules
//!
//! - **`session`** – The REGISTER → ACK → JOB → RESULT exchange.
//! - **`report`** – The final result and timing report printed on stdout.

pub mod report;
pub mod session;

pub use report::TimingReport;
pub use session::{ControllerError, ControllerSession, Exchange};
