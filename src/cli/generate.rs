use super::args::GenerateArgs;
use super::read_input;
use crate::ui::{BlockFormatter, LivePainter, Spinner};
use anyhow::{Context, Result};
use console::style;
use pageforge_core::config::{ApiKeySources, ConfigManager, get_api_key, load_dotenv};
use pageforge_core::{
    Client, ContentAccumulator, ContentGateway, InputRecord, PageforgeConfig, PromptBuilder,
    RequestState, run_generation,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Build the input record from the command line.
pub(crate) fn input_from_args(args: &GenerateArgs) -> Result<InputRecord> {
    if let Some(path) = &args.source_file {
        return Ok(InputRecord::source_text(read_input(path)?));
    }

    Ok(InputRecord::details(
        args.community.clone().unwrap_or_default(),
        args.city.clone().unwrap_or_default(),
        args.state.clone().unwrap_or_default(),
    ))
}

/// Apply command-line overrides on top of the loaded configuration.
pub(crate) fn apply_overrides(config: &mut PageforgeConfig, args: &GenerateArgs) {
    if let Some(model) = &args.model {
        config.model.model = model.clone();
        if !config.model.is_known_model() {
            warn!(model = %model, "model is not in the supported list; sending it as-is");
        }
    }
    if args.no_search {
        config.model.enable_web_search = false;
    }
}

/// Run one generation and stream it to stdout. Returns the final state.
pub async fn handle_generate_command(
    args: &GenerateArgs,
    config_path: Option<&Path>,
) -> Result<RequestState> {
    let input = input_from_args(args)?;
    if let Err(err) = input.validate() {
        anyhow::bail!(
            "{err}. Pass --community, --city and --state, or --source-file <path>"
        );
    }

    let mut manager = match config_path {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load()?,
    };
    apply_overrides(manager.config_mut(), args);
    let config = manager.config();
    debug!(
        config = ?manager.config_path(),
        model = %config.model.model,
        web_search = config.model.enable_web_search,
        "resolved configuration"
    );

    load_dotenv()?;
    let api_key = get_api_key(&ApiKeySources::new(
        config.model.api_key_env.clone(),
        config.model.api_key.clone(),
    ))?;

    let client = Client::with_config(
        api_key,
        config.model.model.clone(),
        config.client.client_config(),
    )?
    .with_base_url(config.model.base_url.clone())
    .with_streaming_config(config.client.streaming_config())
    .with_temperature(config.model.temperature);
    let prompt = PromptBuilder::from_config(&config.prompt, config.model.enable_web_search)?;
    let gateway = ContentGateway::new(client, prompt);

    eprintln!(
        "{} {} {}",
        style("pageforge").cyan().bold(),
        style(input.summary()).bold(),
        style(format!("({})", config.model.model)).dim()
    );

    let spinner = if args.raw {
        Spinner::hidden()
    } else {
        Spinner::new("Starting…")
    };
    let mut painter = LivePainter::new(
        spinner,
        BlockFormatter::for_stdout(),
        Box::new(std::io::stdout()),
        args.raw,
    );
    let mut accumulator = ContentAccumulator::with_observer(move |view| painter.observe(view));

    let cancelled = tokio::select! {
        _ = run_generation(&gateway, &input, &mut accumulator) => false,
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            true
        }
    };
    if cancelled {
        info!("generation cancelled by user");
        accumulator.cancel();
    }

    Ok(accumulator.state().clone())
}
