//! Command-line interface: argument definitions and command handlers.

pub mod args;
mod generate;
mod init_config;
mod render;

pub use args::{Cli, Commands};
pub use generate::handle_generate_command;
pub use init_config::handle_init_config_command;
pub use render::handle_render_command;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a whole file, treating `-` as stdin.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
