pub mod commands;
pub mod events;
pub mod types;

pub use commands::MuseCommand;
pub use events::MuseEvent;
pub use types::{ChatMessage, MessageRole};
