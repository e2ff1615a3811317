//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the taleweaver binary.

mod commands;
mod generate;
mod serve;
mod themes;

pub use commands::{Cli, Commands, GenerateArgs};
pub use generate::handle_generate;
pub use serve::handle_serve;
pub use themes::handle_themes;
