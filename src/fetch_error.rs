#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Error {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("No 'data' field found in response")]
    MissingData,
    #[error("Failed to decode trade records: {0}")]
    Decode(#[from] serde_json::Error),
}
