//! Ticker CLI
//!
//! Live-ticker commentary from the command line: single events, JSON
//! requests and catalog checks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use ticker_core::commentary::CatalogSet;
use ticker_core::{
    generate_commentary_json, generate_response, request_schema_json, CommentaryEngine,
    CommentaryRequest, EngineConfig, Language, SelectionMode, TemplateBackend,
};

#[derive(Parser)]
#[command(name = "ticker")]
#[command(about = "Generate live-ticker commentary for match events", long_about = None)]
struct Cli {
    /// Engine config JSON (defaults to $TICKER_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed selection seed, overrides the config
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Comment on a single event
    Generate {
        /// Feed event type (Goal, Card, subst, ...)
        #[arg(long = "type")]
        event_type: String,

        /// Feed event detail (Normal Goal, Yellow Card, ...)
        #[arg(long, default_value = "")]
        detail: String,

        #[arg(long)]
        minute: i64,

        #[arg(long)]
        player: Option<String>,

        /// Assisting player, or the player coming off for substitutions
        #[arg(long)]
        assist: Option<String>,

        #[arg(long)]
        team: Option<String>,

        /// neutral, euphorisch or kritisch
        #[arg(long, default_value = "neutral")]
        style: String,

        #[arg(long, default_value = "de")]
        lang: String,

        /// Print the full JSON response instead of the text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Answer a JSON request read from a file or stdin
    Json {
        /// Request file; stdin when omitted
        #[arg(long)]
        r#in: Option<PathBuf>,
    },

    /// Validate a directory of catalog overrides
    CheckCatalog {
        #[arg(long)]
        dir: PathBuf,
    },

    /// Print the JSON schema of a request
    Schema,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { event_type, detail, minute, player, assist, team, style, lang, json } => {
            let backend = build_backend(cli.config.as_deref(), cli.seed)?;
            let mut request = CommentaryRequest::new(event_type, detail, minute).style(style).language(lang);
            request.player_name = player;
            request.assist_name = assist;
            request.team_name = team;

            let response = generate_response(&backend, &request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.text);
            }
        }

        Commands::Json { r#in } => {
            let backend = build_backend(cli.config.as_deref(), cli.seed)?;
            let input = read_input(r#in.as_deref())?;
            println!("{}", generate_commentary_json(&backend, &input)?);
        }

        Commands::CheckCatalog { dir } => {
            let catalogs = CatalogSet::load_from_dir(&dir)
                .with_context(|| format!("catalog check failed for {}", dir.display()))?;
            for (language, count) in catalog_summary(&catalogs) {
                println!("{language}: {count} templates");
            }
            println!("✅ Catalogs valid");
        }

        Commands::Schema => {
            println!("{}", request_schema_json()?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::from_env()?,
    };
    if let Some(seed) = seed {
        config.selection = SelectionMode::Seeded { seed };
    }
    Ok(config)
}

fn build_backend(path: Option<&Path>, seed: Option<u64>) -> Result<TemplateBackend> {
    let config = load_config(path, seed)?;
    tracing::debug!(selection = ?config.selection, catalog_dir = ?config.catalog_dir, "engine config");
    let engine = CommentaryEngine::from_config(&config)?;
    Ok(TemplateBackend::new(engine))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn catalog_summary(catalogs: &CatalogSet) -> Vec<(Language, usize)> {
    Language::ALL
        .into_iter()
        .map(|language| (language, catalogs.get(language).template_count()))
        .collect()
}
