//! Command-line interface components
//!
//! This module contains CLI-specific code for Cellar Dump, including argument
//! parsing, command handlers and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, DumpArgs, GlobalArgs};
pub use commands::{exit_code, handle_dump, handle_login, handle_logout};
pub use progress::DumpProgress;
