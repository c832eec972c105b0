use async_trait::async_trait;

use crate::{
    error::BotError,
    models::{ChatId, Keyboard},
};

/// Outbound side of the chat transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), BotError>;
}
