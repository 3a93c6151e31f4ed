//! crack-worker library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the worker do? (for beginners)
//!
//! The *worker* is the machine that burns CPU.  It:
//!
//! 1. Connects to the controller over TCP and introduces itself (REGISTER).
//! 2. Waits for the controller's ACK and then for exactly one JOB.
//! 3. Checks the JOB against its own expectations (charset, length,
//!    algorithm) and refuses anything it was not configured to search.
//! 4. Tries every candidate in order until one hashes to the target.
//! 5. Sends back a single RESULT and exits.

/// Application layer: the worker session and job validation.
pub mod application;

/// Infrastructure layer: hashing backends, network, identity and progress.
pub mod infrastructure;
