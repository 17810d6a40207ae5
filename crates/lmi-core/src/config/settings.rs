//! Adapter-wide settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_utils::duration_millis;

/// Settings shared by every session the adapter runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    /// Backend driver executable used when a request names none
    pub driver_path: String,

    /// Grace period between sending `autorun` and signalling break readiness.
    ///
    /// A heuristic settling time for the driver, not a synchronization point.
    #[serde(with = "duration_millis")]
    pub ready_delay: Duration,

    /// Echo MI commands sent to the driver unless the request says otherwise
    pub print_calls: bool,

    /// Echo raw driver output unless the request says otherwise
    pub show_dev_debug_output: bool,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            driver_path: "lldb-mi".to_string(),
            ready_delay: Duration::from_millis(50),
            print_calls: false,
            show_dev_debug_output: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AdapterSettings::default();
        assert_eq!(settings.driver_path, "lldb-mi");
        assert_eq!(settings.ready_delay, Duration::from_millis(50));
        assert!(!settings.print_calls);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: AdapterSettings = toml::from_str("print_calls = true").unwrap();
        assert!(settings.print_calls);
        assert_eq!(settings.driver_path, "lldb-mi");
        assert_eq!(settings.ready_delay, Duration::from_millis(50));
    }
}
