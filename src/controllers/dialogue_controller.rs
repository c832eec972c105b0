use crate::{
    AppState,
    error::BotError,
    models::{ChatId, DialogueState, IncomingMessage, Keyboard, TrackedCoin},
};

const CMD_START: &str = "/start";
const CMD_CANCEL: &str = "/cancel";

const YES: &str = "Да";
const NO: &str = "Нет";

fn yes_no() -> Keyboard {
    Keyboard::new([YES, NO])
}

/// Entry point for every inbound text message.
pub async fn handle_message(state: &AppState, msg: IncomingMessage) -> Result<(), BotError> {
    let text = msg.text.as_str();

    match command_name(text.trim()) {
        Some(CMD_START) => return start(state, &msg).await,
        Some(CMD_CANCEL) => return cancel(state, msg.chat).await,
        _ => {}
    }

    match state.sessions.get(msg.chat).await {
        DialogueState::Idle => {
            tracing::debug!("chat {} sent text outside a dialogue, ignored", msg.chat);
            Ok(())
        }
        DialogueState::CurrentCoin => choose_coin(state, msg.chat, text).await,
        DialogueState::ChoiceState { coin } => confirm_tracking(state, msg.chat, coin, text).await,
        DialogueState::MinPrice { coin } => ask_max_edge(state, msg.chat, coin, text).await,
        DialogueState::MaxPrice { coin, min_price } => {
            save_tracking(state, msg.chat, coin, min_price, text).await
        }
    }
}

// "/start@SomeBot arg" -> "/start"
fn command_name(text: &str) -> Option<&str> {
    if !text.starts_with('/') {
        return None;
    }
    let first = text.split_whitespace().next()?;
    Some(first.split('@').next().unwrap_or(first))
}

async fn start(state: &AppState, msg: &IncomingMessage) -> Result<(), BotError> {
    // a fresh /start always drops whatever the chat was in the middle of
    state.sessions.clear(msg.chat).await;

    let names = match state.market.list_coin_names().await {
        Ok(names) if !names.is_empty() => names,
        Ok(_) | Err(_) => {
            return state
                .messenger
                .send_message(
                    msg.chat,
                    "Список монет сейчас недоступен. Попробуйте позже.",
                    None,
                )
                .await;
        }
    };

    let greeting = match msg.first_name.as_deref() {
        Some(name) => format!("Здравствуйте, {name}. Выберите интересующую вас монету."),
        None => "Здравствуйте. Выберите интересующую вас монету.".to_string(),
    };

    state.sessions.set(msg.chat, DialogueState::CurrentCoin).await;
    state
        .messenger
        .send_message(msg.chat, &greeting, Some(Keyboard::new(names)))
        .await
}

async fn cancel(state: &AppState, chat: ChatId) -> Result<(), BotError> {
    state.sessions.clear(chat).await;
    state
        .messenger
        .send_message(chat, "Хорошо, начнём заново по команде /start.", None)
        .await
}

async fn choose_coin(state: &AppState, chat: ChatId, coin: &str) -> Result<(), BotError> {
    if state.tracking.is_tracked(coin).await {
        state.sessions.clear(chat).await;
        return state
            .messenger
            .send_message(chat, &format!("Монета {coin} уже отслеживается."), None)
            .await;
    }

    match state.market.get_price(coin).await {
        Ok(Some(price)) => {
            state
                .sessions
                .set(chat, DialogueState::ChoiceState { coin: coin.to_string() })
                .await;
            state
                .messenger
                .send_message(
                    chat,
                    &format!("{price} USD. Отслеживать эту монету?"),
                    Some(yes_no()),
                )
                .await
        }
        // stay on the coin menu so the user can pick again
        Ok(None) => {
            state
                .messenger
                .send_message(
                    chat,
                    &format!("Монета {coin} не найдена. Выберите монету из списка."),
                    None,
                )
                .await
        }
        Err(_) => {
            state
                .messenger
                .send_message(
                    chat,
                    &format!("Не удалось получить цену монеты {coin}. Попробуйте ещё раз."),
                    None,
                )
                .await
        }
    }
}

async fn confirm_tracking(
    state: &AppState,
    chat: ChatId,
    coin: String,
    answer: &str,
) -> Result<(), BotError> {
    match answer.trim() {
        YES => {
            state.sessions.set(chat, DialogueState::MinPrice { coin }).await;
            state
                .messenger
                .send_message(chat, "Укажите минимальный порог для отслеживания в USD.", None)
                .await
        }
        NO => {
            state.sessions.clear(chat).await;
            state
                .messenger
                .send_message(chat, &format!("Хорошо, монета {coin} не отслеживается."), None)
                .await
        }
        _ => {
            state
                .messenger
                .send_message(
                    chat,
                    &format!("Отслеживать монету {coin}? Ответьте «{YES}» или «{NO}»."),
                    Some(yes_no()),
                )
                .await
        }
    }
}

async fn ask_max_edge(
    state: &AppState,
    chat: ChatId,
    coin: String,
    min_price: &str,
) -> Result<(), BotError> {
    state
        .sessions
        .set(
            chat,
            DialogueState::MaxPrice {
                coin,
                min_price: min_price.to_string(),
            },
        )
        .await;
    state
        .messenger
        .send_message(chat, "Укажите максимальный порог для отслеживания в USD.", None)
        .await
}

async fn save_tracking(
    state: &AppState,
    chat: ChatId,
    coin: String,
    min_price: String,
    max_price: &str,
) -> Result<(), BotError> {
    let record = TrackedCoin::new(coin.clone(), chat, min_price, max_price.to_string());

    if let Some(previous) = state.tracking.track(record).await {
        tracing::warn!(
            "{} was tracked for chat {} and is now replaced by chat {}",
            coin,
            previous.owner,
            chat
        );
    }
    state.sessions.clear(chat).await;

    tracing::info!("chat {} is now tracking {}", chat, coin);

    state
        .messenger
        .send_message(chat, &format!("Спасибо. Отслеживаю монету {coin} для вас."), None)
        .await
}
