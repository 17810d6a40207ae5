//! Startup sequencing against the backend driver
//!
//! For a launch the sequencer runs:
//!
//! 1. connect through the selected [`Connection`]
//! 2. send every `autorun` command as user input (non-blocking batch send)
//! 3. schedule the `ui-break-done` readiness signal after the grace delay
//! 4. answer the request with success
//! 5. start the target; once it runs, replay a crash that raced steps 1-5
//!
//! An attach stops after step 4: the target is already running, and the
//! owning session continues it on `configurationDone`.
//!
//! The request is always answered before `start` is awaited, so the host
//! gets its response even when starting is slow or immediately stops.

use std::time::Duration;

use lmi_core::config::RequestConfiguration;
use lmi_core::error::{AdapterError, StartError};
use lmi_core::traits::{BackendDriver, DriverEvent, SessionHost};
use lmi_core::{RequestMode, SessionState, StartupPhase};
use lmi_protocol::{Event, Request, Response};

use crate::connect::Connection;

/// Drives one session from `Normalized` to `Running`, `Acknowledged` (attach)
/// or `Terminated`
pub struct StartupSequencer<'s, D: ?Sized> {
    driver: &'s mut D,
    state: &'s mut SessionState,
    ready_delay: Duration,
}

impl<'s, D> StartupSequencer<'s, D>
where
    D: BackendDriver + ?Sized,
{
    /// Create a sequencer over a session's driver and state
    pub fn new(driver: &'s mut D, state: &'s mut SessionState, ready_delay: Duration) -> Self {
        Self {
            driver,
            state,
            ready_delay,
        }
    }

    /// Run the startup sequence for `request`.
    ///
    /// Failures are reported to the host (failed response or output event,
    /// then `terminated`) and also returned.
    pub async fn run<H>(
        mut self,
        host: &mut H,
        request: &Request,
        config: &RequestConfiguration,
    ) -> Result<(), AdapterError>
    where
        H: SessionHost + ?Sized,
    {
        let mode = self.state.mode();
        let connection = Connection::select(config, mode);

        self.state.advance(StartupPhase::Connecting)?;
        tracing::info!("Connecting to {} via {} path", config.target, connection.kind());

        if let Err(e) = connection.connect(&mut *self.driver).await {
            tracing::warn!("Connect failed: {}", e);
            let err = AdapterError::from(e);
            host.send_response(Response::error(request, err.to_string()));
            host.send_event(Event::Terminated);
            self.state.terminate();
            return Err(err);
        }
        self.state.advance(StartupPhase::PreRunComplete)?;
        tracing::info!("Driver reported pre-run complete");

        self.dispatch_autorun(&config.autorun);
        if mode == RequestMode::Launch {
            self.schedule_ready_signal();
        }

        host.send_response(Response::success(request));
        self.state.advance(StartupPhase::Acknowledged)?;

        if mode == RequestMode::Attach {
            return Ok(());
        }

        self.state.advance(StartupPhase::Starting)?;
        match self.driver.start().await {
            Ok(()) => {
                self.state.advance(StartupPhase::Running)?;
                tracing::info!("Target running");
                if self.state.crashed() {
                    tracing::info!("Crash reported before the target was running, replaying stop");
                    host.handle_pause(None);
                }
                Ok(())
            }
            Err(e) => {
                let err = StartError::Rejected(e);
                tracing::error!("{}", err);
                host.send_event(Event::stderr(format!("{}\n", err)));
                host.send_event(Event::Terminated);
                self.state.terminate();
                Err(err.into())
            }
        }
    }

    /// Send every command in order without waiting for replies.
    ///
    /// The driver's protocol layer serializes them; this only fixes the order.
    fn dispatch_autorun(&mut self, commands: &[String]) {
        for command in commands {
            tracing::debug!("autorun: {}", command);
            self.driver.send_user_input(command);
        }
    }

    /// Raise `ui-break-done` after the grace delay on a detached task.
    ///
    /// The delay gives the driver time to process the just-sent `autorun`
    /// commands; the sequence does not wait for it.
    fn schedule_ready_signal(&self) {
        let emitter = self.driver.emitter();
        let delay = self.ready_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            emitter.emit(DriverEvent::UiBreakDone);
        });
    }
}
