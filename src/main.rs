//! Pageforge - streamed real estate community pages from Gemini

mod cli;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use pageforge_core::RequestState;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode> {
    match args.command {
        Commands::Generate(generate) => {
            let state = cli::handle_generate_command(&generate, args.config.as_deref()).await?;
            Ok(match state {
                RequestState::Loaded => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Commands::Render { input, json } => {
            cli::handle_render_command(&input, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::InitConfig { path, force } => {
            cli::handle_init_config_command(&path, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so stdout carries only the page.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
