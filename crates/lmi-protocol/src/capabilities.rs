//! Capability negotiation for the `initialize` request

use serde::{Deserialize, Serialize};

/// Capabilities announced in the `initialize` response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Breakpoints may carry a hit-count condition
    pub supports_hit_conditional_breakpoints: bool,
    /// The host sends `configurationDone` once breakpoints are set
    pub supports_configuration_done_request: bool,
    /// Breakpoints may carry an expression condition
    pub supports_conditional_breakpoints: bool,
    /// Breakpoints may be set by function name
    pub supports_function_breakpoints: bool,
    /// `evaluate` may be issued with the `hover` context
    pub supports_evaluate_for_hovers: bool,
}

impl Capabilities {
    /// The capability set of the lldb-mi adapter
    pub fn lldb_mi() -> Self {
        Self {
            supports_hit_conditional_breakpoints: true,
            supports_configuration_done_request: true,
            supports_conditional_breakpoints: true,
            supports_function_breakpoints: true,
            supports_evaluate_for_hovers: true,
        }
    }
}
