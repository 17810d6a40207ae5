//! Core error types for the lldb-mi adapter

use std::path::PathBuf;
use thiserror::Error;

use crate::types::StartupPhase;

/// Top-level error type for a debug session's startup
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Start error
    #[error("Start error: {0}")]
    Start(#[from] StartError),

    /// Session error
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors
///
/// A session failing with one of these never reaches `Connecting`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Request arguments did not match the expected shape
    #[error("Malformed request arguments: {0}")]
    Arguments(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failure to bring the backend driver to the pre-run-complete state
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Spawning the driver locally failed
    #[error("Local connect failed: {0}")]
    Local(#[source] DriverError),

    /// Establishing the tunnel failed
    #[error("Tunnel connect failed: {0}")]
    Tunnel(#[source] DriverError),

    /// Attaching to the target failed
    #[error("Attach failed: {0}")]
    Attach(#[source] DriverError),
}

/// Failure of the run/continue operation after the request was acknowledged
#[derive(Error, Debug)]
pub enum StartError {
    /// The driver rejected the start operation
    #[error("Target failed to start: {0}")]
    Rejected(#[source] DriverError),
}

/// Session state errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// A phase transition not permitted by the startup machine
    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition { from: StartupPhase, to: StartupPhase },

    /// An operation needed the backend driver before one was created
    #[error("No backend driver for this session")]
    NoDriver,
}

/// Errors reported by the backend driver
#[derive(Error, Debug)]
pub enum DriverError {
    /// The driver process could not be spawned
    #[error("Failed to spawn {0}")]
    Spawn(String),

    /// Remote transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The driver answered a command with an error record
    #[error("Command failed: {0}")]
    Command(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
