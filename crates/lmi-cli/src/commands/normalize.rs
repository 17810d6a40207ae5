//! Normalize command
//!
//! Shows what a launch/attach request turns into before any driver is
//! started: the canonical configuration, the connection path the session
//! would take, and the session's initial flags.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use lmi_core::config::{self, AdapterSettings, RequestConfiguration};
use lmi_core::{PathRewrite, RequestMode, SessionState, StartupPhase};
use lmi_session::{Connection, ConnectionKind};

/// Output of the normalize command
#[derive(Debug, Serialize)]
pub struct NormalizeReport {
    /// Request mode the arguments were normalized for
    pub mode: RequestMode,
    /// Connection path the session would take
    pub connection: ConnectionKind,
    /// Normalized configuration
    pub configuration: RequestConfiguration,
    /// Session flags right after normalization
    pub session: SessionFlags,
}

/// Initial session flags after normalization
#[derive(Debug, Serialize)]
pub struct SessionFlags {
    /// Startup phase
    pub phase: StartupPhase,
    /// The session attaches to a running target
    pub attached: bool,
    /// The target must be continued on `configurationDone`
    pub need_continue: bool,
    /// The target is reached through a tunnel
    pub uses_tunnel: bool,
    /// The target is running
    pub started: bool,
    /// A crash was latched
    pub crashed: bool,
    /// Local/remote path translation when tunneling
    pub path_rewrite: Option<PathRewrite>,
}

impl From<&SessionState> for SessionFlags {
    fn from(state: &SessionState) -> Self {
        Self {
            phase: state.phase(),
            attached: state.attached(),
            need_continue: state.need_continue,
            uses_tunnel: state.uses_tunnel(),
            started: state.started(),
            crashed: state.crashed(),
            path_rewrite: state.path_rewrite().cloned(),
        }
    }
}

/// Normalize the request arguments stored in `args_path`
pub fn normalize(
    args_path: &Path,
    mode: RequestMode,
    settings: &AdapterSettings,
) -> Result<NormalizeReport> {
    let content = std::fs::read_to_string(args_path)
        .with_context(|| format!("Failed to read {}", args_path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args_path.display()))?;

    let args = config::parse_arguments(&value)?;
    let normalized = config::normalize(args, mode, settings)?;
    let connection = Connection::select(&normalized.config, mode).kind();

    Ok(NormalizeReport {
        mode,
        connection,
        session: SessionFlags::from(&normalized.state),
        configuration: normalized.config,
    })
}
