//! Application layer use cases for the worker.
//!
//! - **`validate`** – Turns a loosely typed JOB into a [`crack_core::JobSpec`],
//!   or says why it is refused.
//!
//! - **`session`** – Drives the REGISTER → ACK → JOB → RESULT exchange and
//!   runs the search in between.

pub mod session;
pub mod validate;

pub use session::{WorkerError, WorkerSession};
pub use validate::{JobExpectations, ValidationError};
