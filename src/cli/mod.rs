//! CLI module for the focus timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Argument definitions using clap derive
//! - `messages`: Output printed outside the timer screen

pub mod commands;
pub mod messages;

pub use commands::Cli;
pub use messages::Messages;
