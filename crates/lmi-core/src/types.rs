//! Core domain types
//!
//! [`SessionState`] replaces a loose set of boolean flags with the explicit
//! phase of the startup machine plus an orthogonal [`CrashLatch`]:
//!
//! ```text
//! Idle -> Normalized -> Connecting -> PreRunComplete -> Acknowledged -> Starting -> Running
//!   \__________\_____________\______________\________________\______________\________\--> Terminated
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SessionError;

/// Which host request opened the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    /// Spawn the target under the driver
    Launch,
    /// Attach to an already running target
    Attach,
}

impl RequestMode {
    /// Whether this is an attach request
    pub fn is_attach(self) -> bool {
        matches!(self, RequestMode::Attach)
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMode::Launch => write!(f, "launch"),
            RequestMode::Attach => write!(f, "attach"),
        }
    }
}

/// Phase of the startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartupPhase {
    /// Nothing has happened yet
    Idle,
    /// Request arguments have been normalized
    Normalized,
    /// The connection path was dispatched and has not resolved
    Connecting,
    /// The driver finished its pre-run commands
    PreRunComplete,
    /// The launch/attach request was answered
    Acknowledged,
    /// The driver was told to run the target
    Starting,
    /// The driver confirmed the target is running
    Running,
    /// The session is over
    Terminated,
}

impl StartupPhase {
    /// Whether the machine may move from `self` to `next`
    pub fn can_advance_to(self, next: StartupPhase) -> bool {
        use StartupPhase::*;
        match (self, next) {
            (Terminated, _) => false,
            (_, Terminated) => true,
            (Idle, Normalized)
            | (Normalized, Connecting)
            | (Connecting, PreRunComplete)
            | (PreRunComplete, Acknowledged)
            | (Acknowledged, Starting)
            | (Starting, Running) => true,
            _ => false,
        }
    }
}

impl fmt::Display for StartupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartupPhase::Idle => "idle",
            StartupPhase::Normalized => "normalized",
            StartupPhase::Connecting => "connecting",
            StartupPhase::PreRunComplete => "pre-run-complete",
            StartupPhase::Acknowledged => "acknowledged",
            StartupPhase::Starting => "starting",
            StartupPhase::Running => "running",
            StartupPhase::Terminated => "terminated",
        };
        write!(f, "{}", name)
    }
}

/// Latched crash flag shared with the driver's notification path.
///
/// Once raised it stays raised for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct CrashLatch(Arc<AtomicBool>);

impl CrashLatch {
    /// Create a lowered latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a crash notification
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a crash has been recorded
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Translation between local editor paths and remote filesystem paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    /// Local working directory, forward-slash normalized
    pub local_root: String,
    /// Working directory on the remote host
    pub remote_root: String,
}

impl PathRewrite {
    /// Create a rewrite from a local working directory and a remote one
    pub fn new(local_cwd: &str, remote_cwd: impl Into<String>) -> Self {
        Self {
            local_root: to_forward_slashes(local_cwd),
            remote_root: remote_cwd.into(),
        }
    }

    /// Map a local path onto the remote filesystem
    pub fn to_remote(&self, local_path: &str) -> String {
        let normalized = to_forward_slashes(local_path);
        reroot(&normalized, &self.local_root, &self.remote_root)
            .unwrap_or_else(|| local_path.to_string())
    }

    /// Map a remote path back onto the local filesystem
    pub fn to_local(&self, remote_path: &str) -> String {
        reroot(remote_path, &self.remote_root, &self.local_root)
            .unwrap_or_else(|| remote_path.to_string())
    }
}

fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn reroot(path: &str, from: &str, to: &str) -> Option<String> {
    let rest = path.strip_prefix(from.trim_end_matches('/'))?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(format!("{}{}", to.trim_end_matches('/'), rest))
}

/// Mutable state of one debug session
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: StartupPhase,
    mode: RequestMode,
    crash: CrashLatch,
    path_rewrite: Option<PathRewrite>,
    /// The session is shutting down
    pub quit: bool,
    /// The target must be continued on `configurationDone`
    pub need_continue: bool,
    /// The driver reported it is ready to accept break commands
    pub debug_ready: bool,
}

impl SessionState {
    /// Session-start state for a request of the given mode
    pub fn new(mode: RequestMode) -> Self {
        Self {
            phase: StartupPhase::Idle,
            mode,
            crash: CrashLatch::new(),
            path_rewrite: None,
            quit: false,
            need_continue: mode.is_attach(),
            debug_ready: false,
        }
    }

    /// Current phase of the startup machine
    pub fn phase(&self) -> StartupPhase {
        self.phase
    }

    /// Request mode that opened the session
    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Whether the session attached to a running target
    pub fn attached(&self) -> bool {
        self.mode.is_attach()
    }

    /// Whether the driver confirmed the target is running
    pub fn started(&self) -> bool {
        self.phase == StartupPhase::Running
    }

    /// Whether a crash notification has been latched
    pub fn crashed(&self) -> bool {
        self.crash.is_raised()
    }

    /// Whether the target is reached through a tunnel
    pub fn uses_tunnel(&self) -> bool {
        self.path_rewrite.is_some()
    }

    /// Local/remote path translation, present only when tunneling
    pub fn path_rewrite(&self) -> Option<&PathRewrite> {
        self.path_rewrite.as_ref()
    }

    /// Install the path translation derived from the tunnel block
    pub fn set_path_rewrite(&mut self, rewrite: PathRewrite) {
        self.path_rewrite = Some(rewrite);
    }

    /// Handle for the asynchronous crash notification path
    pub fn crash_latch(&self) -> CrashLatch {
        self.crash.clone()
    }

    /// Move the startup machine to `next`
    pub fn advance(&mut self, next: StartupPhase) -> Result<(), SessionError> {
        if !self.phase.can_advance_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Session phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// End the session. Calling this on an already terminated session is a no-op.
    pub fn terminate(&mut self) {
        self.quit = true;
        if self.phase != StartupPhase::Terminated {
            tracing::debug!("Session phase {} -> terminated", self.phase);
            self.phase = StartupPhase::Terminated;
        }
    }
}
