//! Connection strategy selection
//!
//! The path is chosen once from the normalized configuration; afterwards the
//! sequencer only calls [`Connection::connect`].

use serde::Serialize;
use std::fmt;

use lmi_core::config::{RequestConfiguration, TunnelConfig};
use lmi_core::error::ConnectionError;
use lmi_core::traits::BackendDriver;
use lmi_core::RequestMode;

/// Which connection path a session takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    /// Spawn the driver on this machine
    Local,
    /// Run the driver on a remote host through the tunnel
    Tunnel,
    /// Attach the driver to a running target
    Attach,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Local => write!(f, "local"),
            ConnectionKind::Tunnel => write!(f, "tunnel"),
            ConnectionKind::Attach => write!(f, "attach"),
        }
    }
}

/// A selected connection path with the arguments it needs
#[derive(Debug, Clone, Copy)]
pub enum Connection<'a> {
    /// Spawn the driver on this machine
    Local {
        /// Local working directory
        cwd: &'a str,
        /// Process image to run
        target: &'a str,
        /// Pre-run commands, already substituted
        pre_run: &'a [String],
        /// Program argument string
        program_args: &'a str,
    },
    /// Run the driver on the tunnel's remote host
    Tunnel {
        /// Normalized tunnel block, including the remote working directory
        tunnel: &'a TunnelConfig,
        /// Process image to run on the remote host
        target: &'a str,
        /// Pre-run commands, already substituted
        pre_run: &'a [String],
        /// Program argument string
        program_args: &'a str,
    },
    /// Attach the driver to a running target
    Attach {
        /// Local working directory
        cwd: &'a str,
        /// Executable whose symbols are loaded
        executable: &'a str,
        /// Endpoint or process to attach to
        target: &'a str,
        /// Pre-run commands, already substituted
        pre_run: &'a [String],
    },
}

impl<'a> Connection<'a> {
    /// Pick the connection path for a normalized request.
    ///
    /// Attach requests always use the driver's attach call; the tunnel block
    /// then only contributes the path rewrite, and the remote endpoint is
    /// reached through the `target-select` pre-run command.
    pub fn select(config: &'a RequestConfiguration, mode: RequestMode) -> Self {
        match (mode, &config.tunnel) {
            (RequestMode::Attach, _) => Connection::Attach {
                cwd: &config.cwd,
                executable: &config.executable,
                target: &config.target,
                pre_run: &config.autorun_before,
            },
            (RequestMode::Launch, Some(tunnel)) => Connection::Tunnel {
                tunnel,
                target: &config.target,
                pre_run: &config.autorun_before,
                program_args: &config.program_args,
            },
            (RequestMode::Launch, None) => Connection::Local {
                cwd: &config.cwd,
                target: &config.target,
                pre_run: &config.autorun_before,
                program_args: &config.program_args,
            },
        }
    }

    /// The selected path
    pub fn kind(&self) -> ConnectionKind {
        match self {
            Connection::Local { .. } => ConnectionKind::Local,
            Connection::Tunnel { .. } => ConnectionKind::Tunnel,
            Connection::Attach { .. } => ConnectionKind::Attach,
        }
    }

    /// Drive the backend driver through this path until pre-run completes
    pub async fn connect<D>(&self, driver: &mut D) -> Result<(), ConnectionError>
    where
        D: BackendDriver + ?Sized,
    {
        match *self {
            Connection::Local {
                cwd,
                target,
                pre_run,
                program_args,
            } => driver
                .connect_local(cwd, target, pre_run, program_args)
                .await
                .map_err(ConnectionError::Local),
            Connection::Tunnel {
                tunnel,
                target,
                pre_run,
                program_args,
            } => driver
                .connect_tunnel(tunnel, &tunnel.remote_cwd, target, pre_run, program_args)
                .await
                .map_err(ConnectionError::Tunnel),
            Connection::Attach {
                cwd,
                executable,
                target,
                pre_run,
            } => driver
                .attach(cwd, executable, target, pre_run)
                .await
                .map_err(ConnectionError::Attach),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmi_core::config::{normalize, AdapterSettings, RequestArguments, TunnelArguments};

    fn config(tunnel: bool, mode: RequestMode) -> RequestConfiguration {
        let args = RequestArguments {
            cwd: Some("/proj".into()),
            target: Some("./a.out".into()),
            tunnel: tunnel.then(|| TunnelArguments {
                host: Some("box".into()),
                cwd: Some("/srv/proj".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        normalize(args, mode, &AdapterSettings::default()).unwrap().config
    }

    #[test]
    fn test_launch_without_tunnel_is_local() {
        let config = config(false, RequestMode::Launch);
        assert_eq!(Connection::select(&config, RequestMode::Launch).kind(), ConnectionKind::Local);
    }

    #[test]
    fn test_launch_with_tunnel_is_tunnel() {
        let config = config(true, RequestMode::Launch);
        let connection = Connection::select(&config, RequestMode::Launch);
        assert_eq!(connection.kind(), ConnectionKind::Tunnel);
        match connection {
            Connection::Tunnel { tunnel, .. } => assert_eq!(tunnel.remote_cwd, "/srv/proj"),
            other => panic!("unexpected connection {:?}", other),
        }
    }

    #[test]
    fn test_attach_ignores_tunnel_for_selection() {
        for tunnel in [false, true] {
            let config = config(tunnel, RequestMode::Attach);
            assert_eq!(
                Connection::select(&config, RequestMode::Attach).kind(),
                ConnectionKind::Attach
            );
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ConnectionKind::Tunnel.to_string(), "tunnel");
    }
}
