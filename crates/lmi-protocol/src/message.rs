//! Request, response and event types exchanged with the host
//!
//! # Message Flow
//!
//! Typical sequence for a launch:
//!
//! 1. Host sends `initialize`, adapter answers with its [`Capabilities`](crate::Capabilities)
//! 2. Host sends `launch` (or `attach`) with the debug configuration as `arguments`
//! 3. Adapter connects the backend driver and answers the request
//! 4. Adapter emits `output` and finally `terminated` events as the session runs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request received from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Sequence number assigned by the host
    pub seq: i64,
    /// Request command (`initialize`, `launch`, `attach`, ...)
    pub command: String,
    /// Command arguments, left untyped until the session parses them
    #[serde(default)]
    pub arguments: Value,
}

impl Request {
    /// Create a new request
    pub fn new(seq: i64, command: impl Into<String>, arguments: Value) -> Self {
        Self {
            seq,
            command: command.into(),
            arguments,
        }
    }
}

/// Response to a host request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Sequence number of the request being answered
    pub request_seq: i64,
    /// Command of the request being answered
    pub command: String,
    /// Whether the request succeeded
    pub success: bool,
    /// Error message for failed requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Response {
    /// Successful response without a body
    pub fn success(request: &Request) -> Self {
        Self {
            request_seq: request.seq,
            command: request.command.clone(),
            success: true,
            message: None,
            body: None,
        }
    }

    /// Successful response carrying a body
    pub fn with_body(request: &Request, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::success(request)
        }
    }

    /// Failed response carrying an error message
    pub fn error(request: &Request, message: impl Into<String>) -> Self {
        Self {
            request_seq: request.seq,
            command: request.command.clone(),
            success: false,
            message: Some(message.into()),
            body: None,
        }
    }
}

/// Output channel of an `output` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputCategory {
    Console,
    Stdout,
    Stderr,
}

/// Why the target stopped, as reported by the backend driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopInfo {
    /// Stop reason (`breakpoint-hit`, `signal-received`, ...)
    pub reason: String,
    /// Thread that caused the stop, if known
    pub thread_id: Option<i64>,
}

/// Events sent to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "body", rename_all = "lowercase")]
pub enum Event {
    /// Text to show in the debug console
    Output {
        category: OutputCategory,
        output: String,
    },
    /// The debug session ended
    Terminated,
}

impl Event {
    /// Output event on the stderr channel
    pub fn stderr(output: impl Into<String>) -> Self {
        Event::Output {
            category: OutputCategory::Stderr,
            output: output.into(),
        }
    }
}
