//! External process execution

pub mod subprocess;

pub use subprocess::{CommandResult, OutputMode, ProcessRunner, SystemRunner};
