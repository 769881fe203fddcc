//! Shared helpers for subprocesses and files

pub mod command_utils;
pub mod file_utils;

pub use command_utils::{run_captured, CommandOutput};
pub use file_utils::write_atomic;
