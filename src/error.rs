use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("API_KEY is missing in .env")]
    MissingApiKey,

    #[error("market data request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("market data request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("market data response could not be parsed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum BotError {
    #[error("message delivery failed: {0}")]
    Delivery(String),
}
