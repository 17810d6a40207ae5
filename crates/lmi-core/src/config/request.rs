//! Launch/attach request configuration
//!
//! [`RequestArguments`] mirrors the JSON the host sends, with every field
//! optional. [`RequestConfiguration`] is the normalized form in which every
//! field has a concrete value.

use serde::{Deserialize, Serialize};

/// Raw launch/attach arguments as sent by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArguments {
    /// Local working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Process image to launch, or remote endpoint to attach to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Backend driver executable
    #[serde(rename = "lldbmipath", skip_serializing_if = "Option::is_none")]
    pub driver_path: Option<String>,

    /// Extra flags passed to the backend driver
    #[serde(rename = "debugger_args", skip_serializing_if = "Option::is_none")]
    pub driver_args: Option<Vec<String>>,

    /// Executable whose symbols are loaded on attach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Program argument string
    #[serde(rename = "arguments", skip_serializing_if = "Option::is_none")]
    pub program_args: Option<String>,

    /// Commands run once the driver is fully up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorun: Option<Vec<String>>,

    /// Commands run before the target is made runnable
    #[serde(rename = "autorunBefore", skip_serializing_if = "Option::is_none")]
    pub autorun_before: Option<Vec<String>>,

    /// Remote transport block
    #[serde(rename = "ssh", skip_serializing_if = "Option::is_none")]
    pub tunnel: Option<TunnelArguments>,

    /// Echo MI commands sent to the driver
    #[serde(rename = "printCalls", skip_serializing_if = "Option::is_none")]
    pub print_calls: Option<bool>,

    /// Echo raw driver output
    #[serde(rename = "showDevDebugOutput", skip_serializing_if = "Option::is_none")]
    pub show_dev_debug_output: Option<bool>,
}

/// Raw remote transport block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelArguments {
    /// Remote host name or address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// SSH port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Forward the X11 display
    #[serde(rename = "forwardX11", skip_serializing_if = "Option::is_none")]
    pub forward_x11: Option<bool>,

    /// Local X server host
    #[serde(rename = "x11host", skip_serializing_if = "Option::is_none")]
    pub x11_host: Option<String>,

    /// Local X server port
    #[serde(rename = "x11port", skip_serializing_if = "Option::is_none")]
    pub x11_port: Option<u16>,

    /// Display screen index on the remote side
    #[serde(rename = "remotex11screen", skip_serializing_if = "Option::is_none")]
    pub remote_x11_screen: Option<u32>,

    /// Working directory on the remote host. Defaults to the local one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Login user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Login password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Private key file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyfile: Option<String>,
}

/// Normalized launch/attach configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestConfiguration {
    /// Local working directory
    pub cwd: String,
    /// Process image or remote endpoint
    pub target: String,
    /// Backend driver executable
    pub driver_path: String,
    /// Extra flags passed to the backend driver
    pub driver_args: Vec<String>,
    /// Executable whose symbols are loaded on attach, empty when unset
    pub executable: String,
    /// Program argument string, empty when unset
    pub program_args: String,
    /// Escaped user commands sent after the driver reports pre-run complete
    pub autorun: Vec<String>,
    /// Substituted structural commands run before the target is runnable
    pub autorun_before: Vec<String>,
    /// Remote transport, present only when tunneling
    pub tunnel: Option<TunnelConfig>,
    /// Echo MI commands sent to the driver
    pub print_calls: bool,
    /// Echo raw driver output
    pub show_dev_debug_output: bool,
}

/// Normalized remote transport configuration
///
/// `user`, `password` and `keyfile` are opaque to this layer and handed to
/// the transport as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelConfig {
    /// Remote host name or address
    pub host: String,
    /// SSH port
    pub port: u16,
    /// Forward the X11 display
    pub forward_x11: bool,
    /// Local X server host
    pub x11_host: String,
    /// Local X server port
    pub x11_port: u16,
    /// Display screen index on the remote side
    pub remote_x11_screen: u32,
    /// Working directory on the remote host
    pub remote_cwd: String,
    /// Login user
    pub user: Option<String>,
    /// Login password, never serialized
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Private key file
    pub keyfile: Option<String>,
}

impl TunnelConfig {
    /// Standard SSH port
    pub const DEFAULT_PORT: u16 = 22;
    pub const DEFAULT_X11_HOST: &'static str = "localhost";
    pub const DEFAULT_X11_PORT: u16 = 6000;
    pub const DEFAULT_REMOTE_X11_SCREEN: u32 = 0;
}

impl From<TunnelConfig> for TunnelArguments {
    fn from(tunnel: TunnelConfig) -> Self {
        Self {
            host: Some(tunnel.host),
            port: Some(tunnel.port),
            forward_x11: Some(tunnel.forward_x11),
            x11_host: Some(tunnel.x11_host),
            x11_port: Some(tunnel.x11_port),
            remote_x11_screen: Some(tunnel.remote_x11_screen),
            cwd: Some(tunnel.remote_cwd),
            user: tunnel.user,
            password: tunnel.password,
            keyfile: tunnel.keyfile,
        }
    }
}

impl From<RequestConfiguration> for RequestArguments {
    fn from(config: RequestConfiguration) -> Self {
        Self {
            cwd: Some(config.cwd),
            target: Some(config.target),
            driver_path: Some(config.driver_path),
            driver_args: Some(config.driver_args),
            executable: Some(config.executable),
            program_args: Some(config.program_args),
            autorun: Some(config.autorun),
            autorun_before: Some(config.autorun_before),
            tunnel: config.tunnel.map(TunnelArguments::from),
            print_calls: Some(config.print_calls),
            show_dev_debug_output: Some(config.show_dev_debug_output),
        }
    }
}
