//! Library entrypoint for CoinTracker.
//!
//! The binary only wires the Telegram transport and the CoinMarketCap client
//! into [`AppState`]; everything else lives here so integration tests under
//! `tests/` can drive the dialogue and the price watcher with fakes.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;

pub mod services;
pub mod controllers;
pub mod telegram;

use services::{
    coinmarketcap::MarketData, messenger::Messenger, session_service::SessionStore,
    tracking_service::TrackingStore,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub market: Arc<dyn MarketData>,
    pub messenger: Arc<dyn Messenger>,
    pub tracking: TrackingStore,
    pub sessions: SessionStore,
}
