//! # crack-core
//!
//! Shared library for the controller/worker password recovery tool: the wire
//! protocol, the domain entities, the candidate enumerator and the cracking
//! engine.
//!
//! This crate is used by both the controller and the worker binaries.  It
//! opens no sockets and links no hashing backend: the engine checks
//! candidates through the [`HashVerifier`] trait, which the worker implements
//! on top of real crypt primitives.
//!
//! # Architecture overview (for beginners)
//!
//! The system recovers a password from a Unix shadow-file hash by trying every
//! candidate in a fixed search space.  Two processes cooperate over one TCP
//! connection:
//!
//! - The **controller** reads the shadow file, detects the hash algorithm and
//!   sends a single JOB.
//! - The **worker** registers, receives the JOB, runs the search and sends back
//!   a single RESULT with the time it spent computing.
//!
//! This crate defines the pieces both sides share:
//!
//! - **`protocol`** – Newline-delimited JSON messages (REGISTER, ACK, JOB,
//!   RESULT) and the async codec that reads and writes them.
//!
//! - **`domain`** – Plain data: hash algorithms, the ordered charset, the job
//!   specification and the search result.
//!
//! - **`search`** – The enumerator that maps an index to a candidate, the
//!   verifier seam and the engine that drives them.
//!
//! - **`settings`** – The charset / length / mode both roles must agree on,
//!   with TOML overrides.

pub mod domain;
pub mod protocol;
pub mod search;
pub mod settings;

// Re-export the most-used types at the crate root so callers can write
// `crack_core::JobSpec` instead of `crack_core::domain::job::JobSpec`.
pub use domain::{
    Algorithm, AlgorithmError, Charset, CharsetError, HashTarget, JobSpec, JobSpecError,
    SearchOutcome, SearchResult, REFERENCE_CHARSET,
};
pub use protocol::codec::{decode_message, encode_message, read_message, write_message, CodecError};
pub use protocol::messages::Message;
pub use search::{CrackingEngine, EngineState, HashVerifier, Verdict, VerifyError};
pub use settings::{SearchMode, SearchSettings, SettingsError};
