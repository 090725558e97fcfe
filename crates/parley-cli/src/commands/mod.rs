pub mod conversation;
pub mod health;
pub mod restart;
pub mod send;

pub use conversation::ConversationCommand;
pub use health::HealthCommand;
pub use restart::RestartCommand;
pub use send::SendCommand;
