use std::sync::Arc;

use teloxide::Bot;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use cointracker::{
    AppState, config,
    services::{
        alert_monitor, coinmarketcap::CoinMarketCapClient, session_service::SessionStore,
        tracking_service::TrackingStore,
    },
    telegram::{self, TelegramMessenger},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load();

    let market = match CoinMarketCapClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("failed to build market data client: {}", e);
            return;
        }
    };

    let bot = Bot::new(settings.bot_token.clone());

    let state = AppState {
        settings,
        market: Arc::new(market),
        messenger: Arc::new(TelegramMessenger::new(bot.clone())),
        tracking: TrackingStore::new(),
        sessions: SessionStore::new(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher = alert_monitor::spawn_price_watcher(state.clone(), shutdown_rx);

    tracing::info!("CoinTracker started, press Ctrl+C to stop");
    telegram::run(state, bot).await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = watcher.await {
        tracing::error!("price watcher ended abnormally: {}", e);
    }

    println!("Exit");
}
