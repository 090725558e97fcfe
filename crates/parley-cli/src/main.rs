use clap::{Parser, Subcommand};
use parley_cli::client::{DEFAULT_SERVER_URL, RelayClient};
use parley_cli::commands::{ConversationCommand, HealthCommand, RestartCommand, SendCommand};
use parley_cli::error::CliResult;
use parley_cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "parley-cli")]
#[command(about = "Parley CLI - Client for a running parley server")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(
        long,
        short = 's',
        global = true,
        default_value = DEFAULT_SERVER_URL,
        help = "Base URL of the parley server"
    )]
    pub server: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Send a message through the relay")]
    Send(SendCommand),

    #[clap(about = "Show the conversation between two users")]
    Conversation(ConversationCommand),

    #[clap(about = "Ask the server's supervisor to restart it")]
    Restart(RestartCommand),

    #[clap(about = "Check that the server is up")]
    Health(HealthCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let client = RelayClient::new(&cli.server)?;

    match &cli.command {
        Command::Send(cmd) => cmd.execute(&client, format).await,
        Command::Conversation(cmd) => cmd.execute(&client, format).await,
        Command::Restart(cmd) => cmd.execute(&client, format).await,
        Command::Health(cmd) => cmd.execute(&client, format).await,
    }
}
