//! Collaborator trait definitions

mod driver;
mod host;

pub use driver::{BackendDriver, DriverEmitter, DriverEvent, DriverFactory};
pub use host::SessionHost;
