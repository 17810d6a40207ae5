//! The adapter session object
//!
//! [`LldbSession`] answers `initialize`, `launch` and `attach`. Each
//! launch/attach normalizes its arguments, creates a fresh backend driver
//! through the [`DriverFactory`], and hands the driver and a fresh
//! [`SessionState`] to the [`StartupSequencer`].

use lmi_core::config::{normalize, parse_arguments, AdapterSettings, Normalized, RequestConfiguration};
use lmi_core::error::{AdapterError, SessionError};
use lmi_core::traits::{BackendDriver, DriverFactory, SessionHost};
use lmi_core::{CrashLatch, RequestMode, SessionState};
use lmi_protocol::{Capabilities, Request, Response};

use crate::sequencer::StartupSequencer;

/// Session bootstrap for the lldb-mi adapter
pub struct LldbSession<F: DriverFactory> {
    /// Creates the per-request driver
    factory: F,
    /// Adapter-wide settings
    settings: AdapterSettings,
    /// Driver of the current session, owned exclusively
    driver: Option<F::Driver>,
    /// State of the current session
    state: Option<SessionState>,
    /// Normalized configuration of the current session
    config: Option<RequestConfiguration>,
}

impl<F: DriverFactory> LldbSession<F> {
    /// Create a session with no launch or attach in progress
    pub fn new(factory: F, settings: AdapterSettings) -> Self {
        Self {
            factory,
            settings,
            driver: None,
            state: None,
            config: None,
        }
    }

    /// Answer `initialize` with the adapter's capabilities
    pub fn initialize<H>(&mut self, host: &mut H, request: &Request)
    where
        H: SessionHost + ?Sized,
    {
        let response = match serde_json::to_value(Capabilities::lldb_mi()) {
            Ok(body) => Response::with_body(request, body),
            Err(e) => Response::error(request, format!("Failed to encode capabilities: {}", e)),
        };
        host.send_response(response);
    }

    /// Handle a `launch` request
    pub async fn launch<H>(&mut self, host: &mut H, request: &Request) -> Result<(), AdapterError>
    where
        H: SessionHost + ?Sized,
    {
        self.begin(host, request, RequestMode::Launch).await
    }

    /// Handle an `attach` request
    pub async fn attach<H>(&mut self, host: &mut H, request: &Request) -> Result<(), AdapterError>
    where
        H: SessionHost + ?Sized,
    {
        self.begin(host, request, RequestMode::Attach).await
    }

    async fn begin<H>(
        &mut self,
        host: &mut H,
        request: &Request,
        mode: RequestMode,
    ) -> Result<(), AdapterError>
    where
        H: SessionHost + ?Sized,
    {
        tracing::info!("Handling {} request (seq {})", mode, request.seq);
        self.driver = None;
        self.state = None;
        self.config = None;

        let normalized = parse_arguments(&request.arguments)
            .and_then(|args| normalize(args, mode, &self.settings));
        let Normalized { config, state } = match normalized {
            Ok(normalized) => normalized,
            Err(e) => {
                let err = AdapterError::from(e);
                tracing::warn!("Rejecting {} request: {}", mode, err);
                host.send_response(Response::error(request, err.to_string()));
                return Err(err);
            }
        };

        let mut driver = self.factory.create(&config.driver_path, &config.driver_args);
        driver.set_print_calls(config.print_calls);
        driver.set_debug_output(config.show_dev_debug_output);
        driver.on_crash(state.crash_latch());

        let driver = self.driver.insert(driver);
        let state = self.state.insert(state);
        let config = self.config.insert(config);

        StartupSequencer::new(driver, state, self.settings.ready_delay)
            .run(host, request, config)
            .await
    }

    /// State of the current session, if a launch or attach got past normalization
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Normalized configuration of the current session
    pub fn configuration(&self) -> Option<&RequestConfiguration> {
        self.config.as_ref()
    }

    /// Driver of the current session
    pub fn driver_mut(&mut self) -> Result<&mut F::Driver, SessionError> {
        self.driver.as_mut().ok_or(SessionError::NoDriver)
    }

    /// Crash latch of the current session, for notification wiring
    pub fn crash_latch(&self) -> Option<CrashLatch> {
        self.state.as_ref().map(SessionState::crash_latch)
    }

    /// Record that the driver is ready to accept break commands
    pub fn mark_debug_ready(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.debug_ready = true;
        }
    }

    /// Map a local source path to the path the driver sees
    pub fn to_driver_path(&self, local_path: &str) -> String {
        match self.state.as_ref().and_then(SessionState::path_rewrite) {
            Some(rewrite) => rewrite.to_remote(local_path),
            None => local_path.to_string(),
        }
    }

    /// Map a path reported by the driver back to the local source path
    pub fn to_local_path(&self, driver_path: &str) -> String {
        match self.state.as_ref().and_then(SessionState::path_rewrite) {
            Some(rewrite) => rewrite.to_local(driver_path),
            None => driver_path.to_string(),
        }
    }
}
