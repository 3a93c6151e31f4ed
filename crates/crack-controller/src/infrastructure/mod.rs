//! Infrastructure layer for the controller.
//!
//! Contains the OS-facing adapters: the shadow-file reader and the one-shot
//! TCP listener.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `crack_core`, but MUST NOT be imported by the `application` layer.

pub mod network;
pub mod shadow;
