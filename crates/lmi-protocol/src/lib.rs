//! lmi-protocol: Host-facing message types for the lldb-mi debug adapter
//!
//! The host transport (framing, sequencing of outgoing messages) lives
//! outside this workspace. This crate only defines the shapes the session
//! layer consumes and produces: incoming requests, responses, events, and the
//! capability set announced on `initialize`.

pub mod capabilities;
pub mod message;

pub use capabilities::Capabilities;
pub use message::{Event, OutputCategory, Request, Response, StopInfo};
