//! lmi-session: Session bootstrap for the lldb-mi debug adapter
//!
//! Takes a launch or attach request from normalized configuration to a
//! running (or attached) target: it picks the connection path, drives the
//! backend driver through the startup handshake, answers the request, and
//! replays a crash that raced the startup.

pub mod connect;
pub mod sequencer;
pub mod session;

pub use connect::{Connection, ConnectionKind};
pub use sequencer::StartupSequencer;
pub use session::LldbSession;
