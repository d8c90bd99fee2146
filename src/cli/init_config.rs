use anyhow::Result;
use console::style;
use pageforge_core::PageforgeConfig;
use std::path::Path;

/// Write a sample configuration file.
pub fn handle_init_config_command(path: &Path, force: bool) -> Result<()> {
    PageforgeConfig::create_sample_config(path, force)?;
    println!(
        "{} Wrote {}",
        style("✓").green().bold(),
        style(path.display()).bold()
    );
    Ok(())
}
