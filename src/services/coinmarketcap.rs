use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{config::Settings, error::MarketError};

const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const CONVERT: &str = "USD";

/// Read-only market queries used by the dialogue and the price watcher.
///
/// An `Err` means the provider could not be asked right now; it never means
/// "no coins". `get_price` returns `Ok(None)` when the provider answered but
/// the coin is not in the current listing.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn list_coin_names(&self) -> Result<Vec<String>, MarketError>;
    async fn get_price(&self, coin_name: &str) -> Result<Option<f64>, MarketError>;
}

#[derive(Clone)]
pub struct CoinMarketCapClient {
    http: Client,
    api_key: String,
    base_url: String,
    start: u32,
    limit: u32,
}

impl CoinMarketCapClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            start: 1,
            limit: 100,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, MarketError> {
        let http = Client::builder().timeout(settings.market_timeout).build()?;

        Ok(Self {
            http,
            api_key: settings.cmc_api_key.clone(),
            base_url: settings.cmc_base_url.trim_end_matches('/').to_string(),
            start: settings.listings_start,
            limit: settings.listings_limit,
        })
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn listings(&self) -> Result<ListingsResponse, MarketError> {
        let res = self.fetch_listings().await;
        if let Err(e) = &res {
            tracing::warn!("[coinmarketcap] listings request failed: {}", e);
        }
        res
    }

    async fn fetch_listings(&self) -> Result<ListingsResponse, MarketError> {
        if !self.has_key() {
            return Err(MarketError::MissingApiKey);
        }

        let url = format!("{}{}", self.base_url, LISTINGS_PATH);
        let start = self.start.to_string();
        let limit = self.limit.to_string();

        let res = self
            .http
            .get(url)
            .header("Accepts", "application/json")
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .query(&[("start", start.as_str()), ("limit", limit.as_str()), ("convert", CONVERT)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(MarketError::Status { status, body });
        }

        let body = res.text().await?;
        Ok(serde_json::from_str::<ListingsResponse>(&body)?)
    }
}

#[async_trait]
impl MarketData for CoinMarketCapClient {
    async fn list_coin_names(&self) -> Result<Vec<String>, MarketError> {
        let listings = self.listings().await?;
        Ok(listings.data.into_iter().map(|l| l.name).collect())
    }

    async fn get_price(&self, coin_name: &str) -> Result<Option<f64>, MarketError> {
        let listings = self.listings().await?;
        Ok(listings
            .data
            .iter()
            .find(|l| l.name == coin_name)
            .and_then(|l| l.usd_price()))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ListingsResponse {
    pub data: Vec<Listing>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Listing {
    pub name: String,

    // keyed by convert currency, e.g. "USD"
    #[serde(default)]
    pub quote: HashMap<String, Quote>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Quote {
    pub price: Option<f64>,
}

impl Listing {
    pub fn usd_price(&self) -> Option<f64> {
        self.quote.get(CONVERT).and_then(|q| q.price)
    }
}
