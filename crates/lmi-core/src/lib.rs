//! lmi-core: Core abstractions and configuration for the lldb-mi debug adapter
//!
//! This crate provides the request configuration and its normalizer, the
//! per-session state machine, error types, and the traits describing the
//! collaborators (backend driver, owning session) that the session layer
//! drives.

pub mod config;
pub mod error;
pub mod escape;
pub mod traits;
pub mod types;

pub use error::AdapterError;
pub use types::{CrashLatch, PathRewrite, RequestMode, SessionState, StartupPhase};
