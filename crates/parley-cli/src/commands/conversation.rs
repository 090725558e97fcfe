use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::client::RelayClient;
use crate::error::CliResult;
use crate::output::{OutputFormat, format_timestamp, truncate_string};

#[derive(Parser)]
pub struct ConversationCommand {
    #[clap(help = "First user ID")]
    pub user1: String,

    #[clap(help = "Second user ID")]
    pub user2: String,

    #[clap(long, help = "Show full message text instead of truncating")]
    pub full: bool,
}

impl ConversationCommand {
    pub async fn execute(&self, client: &RelayClient, format: OutputFormat) -> CliResult<()> {
        let entries = client.conversation(&self.user1, &self.user2).await?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    println!(
                        "No messages between {} and {}.",
                        self.user1, self.user2
                    );
                    return Ok(());
                }

                let width = if self.full { usize::MAX } else { 50 };

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Time", "From", "To", "Message", "Original", "Tone"]);

                for entry in &entries {
                    table.add_row([
                        format_timestamp(&entry.timestamp),
                        entry.sender.clone(),
                        entry.recipient.clone(),
                        truncate_string(&entry.message, width),
                        truncate_string(&entry.original_message, width),
                        entry
                            .category
                            .clone()
                            .unwrap_or_else(|| "custom".to_string()),
                    ]);
                }

                println!("{table}");
                println!("\nTotal: {} messages", entries.len());
            }
        }

        Ok(())
    }
}
