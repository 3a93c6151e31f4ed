//! Domain entities for password recovery jobs.
//!
//! This module contains plain data types with no I/O.  Everything here can be
//! built and tested without a network or a hashing backend.
//!
//! - [`algorithm`] – the closed set of hash families and prefix detection.
//! - [`charset`] – the ordered, duplicate-free candidate alphabet.
//! - [`job`] – the search target and the immutable job specification.
//! - [`result`] – the single terminal result of a job.

pub mod algorithm;
pub mod charset;
pub mod job;
pub mod result;

pub use algorithm::{Algorithm, AlgorithmError};
pub use charset::{Charset, CharsetError, REFERENCE_CHARSET};
pub use job::{HashTarget, JobSpec, JobSpecError};
pub use result::{SearchOutcome, SearchResult};
