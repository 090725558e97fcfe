use clap::Parser;

use crate::client::RelayClient;
use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct RestartCommand {}

impl RestartCommand {
    pub async fn execute(&self, client: &RelayClient, format: OutputFormat) -> CliResult<()> {
        let response = client.restart().await?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
            OutputFormat::Table => println!("{} at {}", response.message, response.timestamp),
        }

        Ok(())
    }
}
