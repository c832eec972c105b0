use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub cmc_api_key: String,
    pub cmc_base_url: String,

    pub listings_start: u32,
    pub listings_limit: u32,

    pub poll_interval: Duration,
    pub market_timeout: Duration,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    // Secrets are not checked here; the first call that needs them reports it.
    let bot_token = env::var("TOKEN").unwrap_or_default();
    let cmc_api_key = env::var("API_KEY").unwrap_or_default();

    let cmc_base_url = env::var("CMC_BASE_URL")
        .unwrap_or_else(|_| "https://pro-api.coinmarketcap.com".to_string());

    let listings_start = parse_var("CMC_LISTINGS_START", 1);
    let listings_limit = parse_var("CMC_LISTINGS_LIMIT", 100);

    let poll_interval = Duration::from_secs(non_zero_secs(env::var("POLL_INTERVAL_SECS").ok(), 5));
    let market_timeout = Duration::from_secs(non_zero_secs(env::var("MARKET_TIMEOUT_SECS").ok(), 10));

    Settings {
        bot_token,
        cmc_api_key,
        cmc_base_url,
        listings_start,
        listings_limit,
        poll_interval,
        market_timeout,
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

// zero would mean "no interval" / "no timeout"; fall back to the default
fn non_zero_secs(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
