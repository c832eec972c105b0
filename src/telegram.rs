//! Telegram transport: feeds inbound messages to the dialogue controller and
//! delivers outbound text through the bot API.

use async_trait::async_trait;
use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    respond,
    types::{KeyboardButton, KeyboardMarkup, Message},
};

use crate::{
    AppState,
    controllers::dialogue_controller,
    error::BotError,
    models::{ChatId, IncomingMessage, Keyboard},
    services::messenger::Messenger,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn reply_markup(keyboard: Keyboard) -> KeyboardMarkup {
    let rows = keyboard
        .buttons
        .into_iter()
        .map(|label| vec![KeyboardButton::new(label)]);

    KeyboardMarkup::new(rows).resize_keyboard().one_time_keyboard()
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), BotError> {
        let req = self.bot.send_message(teloxide::types::ChatId(chat.0), text);

        let res = match keyboard {
            Some(kb) => req.reply_markup(reply_markup(kb)).await,
            None => req.await,
        };

        res.map(|_| ()).map_err(|e| BotError::Delivery(e.to_string()))
    }
}

fn incoming_message(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;

    Some(IncomingMessage {
        chat: ChatId(msg.chat.id.0),
        first_name: msg.from.as_ref().map(|u| u.first_name.clone()),
        text: text.to_string(),
    })
}

/// Polls Telegram until Ctrl-C.
pub async fn run(state: AppState, bot: Bot) {
    tracing::info!("[telegram] polling for updates");

    teloxide::repl(bot, move |msg: Message| {
        let state = state.clone();
        async move {
            if let Some(incoming) = incoming_message(&msg) {
                let chat = incoming.chat;
                if let Err(e) = dialogue_controller::handle_message(&state, incoming).await {
                    tracing::warn!("[telegram] chat {} handler error: {}", chat, e);
                }
            }
            respond(())
        }
    })
    .await;

    tracing::info!("[telegram] polling stopped");
}
