#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use cointracker::{
    AppState, config,
    error::{BotError, MarketError},
    models::{ChatId, IncomingMessage, Keyboard, TrackedCoin},
    services::{
        coinmarketcap::MarketData, messenger::Messenger, session_service::SessionStore,
        tracking_service::TrackingStore,
    },
};

/// In-memory listing. Coins keep provider order; `set_down(true)` makes
/// every call fail like an unreachable provider.
#[derive(Default)]
pub struct FakeMarket {
    coins: Mutex<Vec<(String, f64)>>,
    down: AtomicBool,
    pub price_calls: AtomicUsize,
    retrack: Mutex<Option<(TrackingStore, TrackedCoin)>>,
}

impl FakeMarket {
    pub fn with_coins(coins: &[(&str, f64)]) -> Arc<Self> {
        let market = Self::default();
        *market.coins.lock().unwrap() = coins
            .iter()
            .map(|(name, price)| (name.to_string(), *price))
            .collect();
        Arc::new(market)
    }

    pub fn set_price(&self, name: &str, price: f64) {
        let mut coins = self.coins.lock().unwrap();
        match coins.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = price,
            None => coins.push((name.to_string(), price)),
        }
    }

    pub fn delist(&self, name: &str) {
        self.coins.lock().unwrap().retain(|(n, _)| n != name);
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// On the next price lookup, stores `coin` as if a dialogue had just
    /// finished for it.
    pub fn retrack_on_next_price(&self, store: TrackingStore, coin: TrackedCoin) {
        *self.retrack.lock().unwrap() = Some((store, coin));
    }

    fn unavailable(&self) -> Option<MarketError> {
        self.down.load(Ordering::SeqCst).then(|| MarketError::Status {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn list_coin_names(&self) -> Result<Vec<String>, MarketError> {
        if let Some(e) = self.unavailable() {
            return Err(e);
        }
        Ok(self.coins.lock().unwrap().iter().map(|(n, _)| n.clone()).collect())
    }

    async fn get_price(&self, coin_name: &str) -> Result<Option<f64>, MarketError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.retrack.lock().unwrap().take();
        if let Some((store, coin)) = pending {
            store.track(coin).await;
        }
        if let Some(e) = self.unavailable() {
            return Err(e);
        }
        Ok(self
            .coins
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == coin_name)
            .map(|(_, p)| *p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub chat: ChatId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn to(&self, chat: ChatId) -> Vec<Sent> {
        self.all().into_iter().filter(|s| s.chat == chat).collect()
    }

    pub fn last(&self) -> Sent {
        self.all().last().cloned().expect("no messages sent")
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent {
            chat,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }
}

pub fn test_state(market: Arc<FakeMarket>, messenger: Arc<RecordingMessenger>) -> AppState {
    let mut settings = config::load();
    settings.cmc_api_key = String::new();
    settings.bot_token = String::new();
    settings.poll_interval = Duration::from_millis(20);

    AppState {
        settings,
        market,
        messenger,
        tracking: TrackingStore::new(),
        sessions: SessionStore::new(),
    }
}

pub fn incoming(chat: ChatId, text: &str) -> IncomingMessage {
    IncomingMessage {
        chat,
        first_name: Some("Ann".to_string()),
        text: text.to_string(),
    }
}
