//! Candidate search.
//!
//! - [`enumerator`] – index ↔ candidate bijection and the ordered iterator.
//! - [`verifier`] – the [`HashVerifier`] seam the engine checks candidates through.
//! - [`engine`] – the [`CrackingEngine`] state machine tying the two together.

pub mod engine;
pub mod enumerator;
pub mod verifier;

pub use engine::{CrackingEngine, EngineState};
pub use enumerator::{candidate_at, search_space_size, Candidates, SpaceTooLarge};
pub use verifier::{HashVerifier, Verdict, VerifyError};
