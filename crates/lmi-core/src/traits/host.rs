//! Owning session traits

use lmi_protocol::{Event, Response, StopInfo};

/// The generic debug session that owns this bootstrap layer.
///
/// It handles breakpoints, stack frames, variables and evaluation, and hands
/// responses and events to the host transport.
pub trait SessionHost: Send {
    /// Send a response to a host request
    fn send_response(&mut self, response: Response);

    /// Send an event to the host
    fn send_event(&mut self, event: Event);

    /// Process a stop of the target.
    ///
    /// `None` means no stop record was received; this is how a crash that
    /// raced the startup sequence is replayed.
    fn handle_pause(&mut self, stop: Option<StopInfo>);
}
