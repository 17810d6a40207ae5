//! lmi-cli: Command implementations for the `lmi-adapter` binary

pub mod commands;
