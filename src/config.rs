use std::env;

/// Default endpoint for the BPS foreign trade (dataexim) web API.
pub const DEFAULT_BASE_URL: &str = "https://webapi.bps.go.id/v1/api/dataexim";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            base_url: env::var("BPS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: env::var("BPS_API_KEY").ok(),
        }
    }
}
