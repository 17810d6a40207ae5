//! CLI command implementations

mod capabilities;
mod normalize;
mod settings;

pub use capabilities::capabilities;
pub use normalize::{normalize, NormalizeReport, SessionFlags};
pub use settings::{load_settings, settings, write_settings};
