use anyhow::Result;
use clap::{CommandFactory, Parser};
use lernfunk::cli::{Cli, Commands};
use lernfunk::config::{self, Config};
use lernfunk::diagnostics::check_dependencies;
use lernfunk::levels::LevelPlan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        None => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(max_stories) = cli.max_stories {
                config.fetch.max_stories = max_stories;
            }
            if let Some(model) = cli.model {
                config.llm.model = model;
            }
            if let Some(voice) = cli.voice {
                config.tts.voice = voice;
            }
            if let Some(output) = cli.output {
                config.output.dir = output;
            }

            let api_key = config::api_key_from_env()?;
            let plan = if cli.extended_levels {
                LevelPlan::extended()
            } else {
                LevelPlan::standard()
            };
            lernfunk::pipeline::run(&config, &api_key, &plan).await?;
        }
        Some(Commands::Check) => {
            if !check_dependencies() {
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "lernfunk", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration: an explicit --config path must exist, the default
/// path falls back to built-in defaults when missing.
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default(std::path::Path::new("lernfunk.toml"))?,
    };
    Ok(config.with_env_overrides()?)
}

fn init_tracing(quiet: bool, verbose: u8) {
    let default_filter = if quiet {
        "lernfunk=warn"
    } else {
        match verbose {
            0 => "lernfunk=info",
            1 => "lernfunk=debug",
            _ => "trace",
        }
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
