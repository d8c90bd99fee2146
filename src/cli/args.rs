//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for pageforge
#[derive(Parser, Debug)]
#[command(
    name = "pageforge",
    version,
    about = "Stream SEO-ready real estate community pages from Gemini"
)]
pub struct Cli {
    /// Configuration file path; defaults to pageforge.toml lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging; otherwise RUST_LOG applies
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a community page with Gemini and stream it to the terminal
    Generate(GenerateArgs),

    /// Render a local Markdown file the way generated pages are rendered
    Render {
        /// Markdown file, or `-` for stdin
        input: PathBuf,

        /// Print the content blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample pageforge.toml
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "pageforge.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Community name
    #[arg(long, conflicts_with = "source_file")]
    pub community: Option<String>,

    /// City the community is in
    #[arg(long, conflicts_with = "source_file")]
    pub city: Option<String>,

    /// State the community is in
    #[arg(long, conflicts_with = "source_file")]
    pub state: Option<String>,

    /// Source material to mine for facts, or `-` for stdin
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Print the raw Markdown as it streams instead of formatted blocks
    #[arg(long)]
    pub raw: bool,

    /// Gemini model ID, e.g. gemini-2.5-flash
    #[arg(long)]
    pub model: Option<String>,

    /// Do not let the model use Google Search
    #[arg(long)]
    pub no_search: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_details_generation() {
        let cli = Cli::try_parse_from([
            "pageforge",
            "generate",
            "--community",
            "Willow Creek",
            "--city",
            "Austin",
            "--state",
            "TX",
            "--no-search",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.community.as_deref(), Some("Willow Creek"));
        assert!(args.no_search);
        assert!(!args.raw);
    }

    #[test]
    fn source_file_conflicts_with_details() {
        let result = Cli::try_parse_from([
            "pageforge",
            "generate",
            "--source-file",
            "notes.txt",
            "--city",
            "Austin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn render_defaults_to_text_output() {
        let cli = Cli::try_parse_from(["pageforge", "--verbose", "render", "-"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Render { json: false, .. }));
    }
}
