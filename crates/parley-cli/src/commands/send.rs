use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use parley::server::SendMessageRequest;

use crate::client::RelayClient;
use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct SendCommand {
    #[clap(long, help = "Sender user ID")]
    pub from: String,

    #[clap(long, help = "Recipient user ID")]
    pub to: String,

    #[clap(
        long,
        help = "Tone preset (positive, supportive, collaborative, problem-solving)"
    )]
    pub category: Option<String>,

    #[clap(
        long,
        help = "Free-text instruction used instead of a preset",
        conflicts_with = "category"
    )]
    pub prompt: Option<String>,

    #[clap(help = "Message text")]
    pub message: String,
}

impl SendCommand {
    pub async fn execute(&self, client: &RelayClient, format: OutputFormat) -> CliResult<()> {
        if self.message.is_empty() {
            return Err("Message text cannot be empty".into());
        }

        let request = SendMessageRequest {
            sender: Some(self.from.clone()),
            recipient: Some(self.to.clone()),
            message: Some(self.message.clone()),
            category: self.category.clone(),
            category_prompt: self.prompt.clone(),
        };

        let response = client.send(&request).await?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            OutputFormat::Table => {
                let tone = response
                    .category
                    .clone()
                    .or_else(|| response.category_prompt.as_ref().map(|_| "custom prompt".into()))
                    .unwrap_or_else(|| "-".to_string());

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Property", "Value"]);

                table.add_row(["From", &response.sender]);
                table.add_row(["To", &response.recipient]);
                table.add_row(["Tone", &tone]);
                table.add_row(["Original", &response.original_message]);
                table.add_row(["Delivered", &response.phrased_message]);

                println!("{table}");

                if response.phrased_message == response.original_message {
                    println!("\nNote: message was delivered unchanged.");
                }
            }
        }

        Ok(())
    }
}
