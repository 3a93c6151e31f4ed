//! Infrastructure layer for the worker.
//!
//! **Dependency rule**: this layer may depend on `application` and `crack_core`,
//! but MUST NOT be imported by the domain layer.
//!
//! # Sub-modules
//!
//! - **`crypt`** – The production [`crack_core::HashVerifier`], backed by the
//!   `bcrypt` crate plus a crypt(3) backend: the host libcrypt on Linux
//!   (default `libcrypt` feature), the pure-Rust schemes elsewhere.
//! - **`identity`** – The name announced in REGISTER.
//! - **`network`** – The single outbound TCP connection.
//! - **`progress`** – Periodic "still searching" log line.

pub mod crypt;
pub mod identity;
pub mod network;
pub mod progress;
