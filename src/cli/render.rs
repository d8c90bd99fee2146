use super::read_input;
use crate::ui::BlockFormatter;
use anyhow::{Context, Result};
use pageforge_core::render;
use std::path::Path;

/// Render a local Markdown file through the page renderer.
pub fn handle_render_command(input: &Path, json: bool) -> Result<()> {
    let text = read_input(input)?;
    println!("{}", render_output(&text, json, BlockFormatter::for_stdout())?);
    Ok(())
}

fn render_output(text: &str, json: bool, formatter: BlockFormatter) -> Result<String> {
    let blocks = render(text);
    if json {
        serde_json::to_string_pretty(&blocks).context("Failed to serialize content blocks")
    } else {
        Ok(formatter.format_blocks(&blocks))
    }
}
