#![deny(unsafe_code)]
//! atkin - command-line front end for the Atkin sieve engine
//!
//! Subcommands:
//! - `primes range <LIMIT>`: all primes up to LIMIT, as a JSON array
//! - `primes count <N>`: the first N primes, as a JSON array
//! - `visualize <LIMIT> --format text|base64|binary|url`: render the sieve
//!
//! Logs go to stderr; results go to stdout or `--out`.

use anyhow::Context;
use atkin_core::{SieveEngine, Visualization};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod store;

use config::{CliConfig, LoggingConfig, StorageConfig};
use store::FsImageStore;

/// Format name handled here rather than by the engine
const URL_FORMAT: &str = "url";

#[derive(Parser)]
#[command(name = "atkin")]
#[command(about = "Sieve of Atkin prime queries and visualizations", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ATKIN_CONFIG")]
    config: Option<String>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "ATKIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prime queries
    Primes {
        #[command(subcommand)]
        command: PrimesCommands,
    },

    /// Render the sieve as text or PNG
    Visualize(VisualizeArgs),
}

#[derive(Subcommand)]
enum PrimesCommands {
    /// All primes up to and including LIMIT
    Range {
        #[arg(allow_negative_numbers = true)]
        limit: i64,
    },
    /// The first N primes
    Count {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },
}

#[derive(Args)]
struct VisualizeArgs {
    /// Inclusive sieve limit
    #[arg(allow_negative_numbers = true)]
    limit: i64,

    /// Output format: text, base64, binary or url
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// What a command produced
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Text(String),
    Bytes(Vec<u8>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        CliConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }
    init_tracing(&config.logging);

    let engine = SieveEngine::new(config.sieve.clone()).context("invalid sieve configuration")?;

    let out = match &cli.command {
        Commands::Visualize(args) => args.out.clone(),
        Commands::Primes { .. } => None,
    };
    let output = execute(&engine, &config.storage, cli.command).await?;

    match (out, output) {
        (Some(path), output) => {
            let bytes = match output {
                Output::Text(text) => text.into_bytes(),
                Output::Bytes(bytes) => bytes,
            };
            std::fs::write(&path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        (None, Output::Text(text)) => println!("{text}"),
        (None, Output::Bytes(bytes)) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn execute(
    engine: &SieveEngine,
    storage: &StorageConfig,
    command: Commands,
) -> anyhow::Result<Output> {
    match command {
        Commands::Primes {
            command: PrimesCommands::Range { limit },
        } => {
            let primes = engine.primes_up_to(limit)?;
            Ok(Output::Text(serde_json::to_string(&primes)?))
        }
        Commands::Primes {
            command: PrimesCommands::Count { n },
        } => {
            let primes = engine.first_n_primes(n)?;
            Ok(Output::Text(serde_json::to_string(&primes)?))
        }
        Commands::Visualize(args) if args.format.trim().eq_ignore_ascii_case(URL_FORMAT) => {
            let store = FsImageStore::new(&storage.images_dir);
            let reference = engine.persist(&store, args.limit).await?;
            Ok(Output::Text(FsImageStore::url_for(&storage.base_url, &reference)))
        }
        Commands::Visualize(args) => match engine.render_named(args.limit, &args.format)? {
            Visualization::Text(text) | Visualization::Base64(text) => Ok(Output::Text(text)),
            Visualization::Binary(image) => Ok(Output::Bytes(image.into_bytes())),
        },
    }
}
