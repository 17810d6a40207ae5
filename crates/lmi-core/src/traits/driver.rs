//! Backend driver traits
//!
//! The driver owns the lldb-mi child process (or the tunnel to it), speaks MI
//! and parses its output. The session layer only decides when each of these
//! calls is made and with what.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::config::TunnelConfig;
use crate::error::DriverError;
use crate::types::CrashLatch;

/// Events the session raises on the driver's event bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// The UI may now issue break-related commands
    UiBreakDone,
}

impl DriverEvent {
    /// Wire name of the event
    pub fn name(self) -> &'static str {
        match self {
            DriverEvent::UiBreakDone => "ui-break-done",
        }
    }
}

impl fmt::Display for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thread-safe handle for raising driver events from detached tasks
pub trait DriverEmitter: Send + Sync {
    /// Raise an event
    fn emit(&self, event: DriverEvent);
}

/// Abstraction over an MI backend driver
#[async_trait]
pub trait BackendDriver: Send {
    /// Spawn the driver locally and run the pre-run commands
    async fn connect_local(
        &mut self,
        cwd: &str,
        target: &str,
        pre_run: &[String],
        program_args: &str,
    ) -> Result<(), DriverError>;

    /// Reach the driver through a tunnel and run the pre-run commands
    async fn connect_tunnel(
        &mut self,
        tunnel: &TunnelConfig,
        remote_cwd: &str,
        target: &str,
        pre_run: &[String],
        program_args: &str,
    ) -> Result<(), DriverError>;

    /// Attach to a running target and run the pre-run commands
    async fn attach(
        &mut self,
        cwd: &str,
        executable: &str,
        target: &str,
        pre_run: &[String],
    ) -> Result<(), DriverError>;

    /// Run (or continue) the target
    async fn start(&mut self) -> Result<(), DriverError>;

    /// Queue a command as if typed by the user. Does not wait for the reply.
    fn send_user_input(&mut self, command: &str);

    /// Event handle usable after the driver has been borrowed elsewhere
    fn emitter(&self) -> Arc<dyn DriverEmitter>;

    /// Route the driver's crash notifications into `latch`.
    ///
    /// A crash may be reported at any time after connecting starts,
    /// including while `start` is still pending.
    fn on_crash(&mut self, latch: CrashLatch);

    /// Echo MI commands as they are sent
    fn set_print_calls(&mut self, enabled: bool);

    /// Echo raw driver output
    fn set_debug_output(&mut self, enabled: bool);
}

/// Creates one driver per launch/attach request
pub trait DriverFactory: Send + Sync {
    /// The driver type produced
    type Driver: BackendDriver;

    /// Create a driver for the given executable and extra flags
    fn create(&self, driver_path: &str, driver_args: &[String]) -> Self::Driver;
}
