use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::fetch_error::FetchError;
use crate::normalizer::{TradeDirection, TradeRecord};

/// Reporting period behind the API's `periode` selector (1=Monthly, 2=Annually).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    Monthly,
    Annually,
}

impl PeriodKind {
    pub fn selector(&self) -> &'static str {
        match self {
            PeriodKind::Monthly => "1",
            PeriodKind::Annually => "2",
        }
    }
}

/// HS code granularity behind the API's `jenishs` selector (1=two digit, 2=full).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsGranularity {
    TwoDigit,
    Full,
}

impl HsGranularity {
    pub fn selector(&self) -> &'static str {
        match self {
            HsGranularity::TwoDigit => "1",
            HsGranularity::Full => "2",
        }
    }
}

/// Query parameters passed through to the dataexim endpoint, unvalidated.
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub direction: TradeDirection,
    pub period: PeriodKind,
    /// One or more HS codes, semicolon-delimited (e.g. "10" or "2601;2602").
    pub hs_codes: String,
    pub granularity: HsGranularity,
    pub year: String,
    pub api_key: String,
}

/// Client for the BPS foreign trade (dataexim) web API.
#[derive(Clone)]
pub struct TradeDataFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl TradeDataFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch raw trade records for the given request parameters.
    ///
    /// Consumes only the `data` key of the response JSON. Non-2xx responses
    /// and non-JSON bodies surface with the raw body text so the caller can
    /// show it to the user.
    #[instrument(skip(self, params), fields(url = %self.base_url, sumber = params.direction.selector(), tahun = %params.year))]
    pub async fn fetch_records(&self, params: &RequestParams) -> Result<Vec<TradeRecord>, FetchError> {
        debug!("Sending HTTP request to dataexim API");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("sumber", params.direction.selector()),
                ("periode", params.period.selector()),
                ("kodehs", params.hs_codes.as_str()),
                ("jenishs", params.granularity.selector()),
                ("tahun", params.year.as_str()),
                ("key", params.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Received HTTP response with status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|_| FetchError::InvalidJson(body.clone()))?;

        let data = json.get("data").ok_or(FetchError::MissingData)?;
        let records: Vec<TradeRecord> = serde_json::from_value(data.clone())?;

        if records.is_empty() {
            warn!("API returned an empty data array");
        }
        debug!("Decoded {} trade records", records.len());

        Ok(records)
    }
}
