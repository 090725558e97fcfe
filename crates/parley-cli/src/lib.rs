pub mod client;
pub mod commands;
pub mod error;
pub mod output;

pub use client::{DEFAULT_SERVER_URL, RelayClient};
pub use commands::{ConversationCommand, HealthCommand, RestartCommand, SendCommand};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, format_timestamp, truncate_string};
