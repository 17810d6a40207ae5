//! Capabilities command

use anyhow::{Context, Result};

use lmi_protocol::Capabilities;

/// Render the `initialize` capabilities as pretty JSON
pub fn capabilities() -> Result<String> {
    serde_json::to_string_pretty(&Capabilities::lldb_mi()).context("Failed to encode capabilities")
}
