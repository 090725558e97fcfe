//! Parley daemon - rephrasing chat relay

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use parley::config::Config;
use parley::conversation::InMemoryConversationStore;
use parley::error::Result;
use parley::reload;
use parley::rephrase::{OpenAiCompletionClient, Rephraser};
use parley::server::{AppState, ParleyServer};

/// Parley - rephrase chat messages through an LLM before delivery
#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "An HTTP relay that rephrases chat messages through an LLM")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the relay server (default command)
    #[command(name = "serve")]
    Serve {
        /// Override the configured listen address (e.g., 0.0.0.0:3000)
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is fine; the environment may already carry the key
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None => serve(cli.config, None).await,
        Some(Command::Serve { listen }) => serve(cli.config, listen).await,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,parley=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        tracing::info!("Loading config from: {}", path.display());
        return Config::from_file(&path);
    }

    for path in Config::default_paths() {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return Config::from_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

async fn serve(config_path: Option<PathBuf>, listen: Option<String>) -> Result<()> {
    tracing::info!("Starting Parley");

    let mut config = load_config(config_path)?;
    if let Some(listen) = listen {
        config.server.listen_addr = listen;
    }
    config.validate()?;
    tracing::debug!("Config loaded: {:?}", config);

    let client = OpenAiCompletionClient::new(&config.rephrase)?;
    let rephraser = Rephraser::new(Arc::new(client))
        .with_timeout(Duration::from_secs(config.rephrase.timeout_secs));

    let store = InMemoryConversationStore::new();
    tracing::info!("Conversation store: in-memory (cleared on restart)");

    let (reload, shutdown) = reload::from_config(&config.reload)?;

    let state = Arc::new(AppState {
        rephraser: Arc::new(rephraser),
        store: Arc::new(store),
        reload,
        allow_freeform_prompts: config.rephrase.allow_freeform_prompts,
    });

    let server = ParleyServer::new(config.server.clone(), state, shutdown);
    server.serve().await?;

    tracing::info!("Parley stopped");
    Ok(())
}
