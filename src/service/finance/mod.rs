use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::EarningsSurprise;

pub mod earnings;
pub mod quote;

/// Finnhub REST API root. Every endpoint takes the symbol and the token as
/// query parameters.
pub const API_BASE: &str = "https://finnhub.io/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("earnings-site/", env!("CARGO_PKG_VERSION"));

/// Failure classes of a market-data lookup. During a run any of these makes
/// the symbol "unavailable" and the driver skips it; `Http` is also the
/// error of `FinanceService::new`, where a client build failure is fatal.
#[derive(Debug, thiserror::Error)]
pub enum FinanceServiceError {
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Parse(String),
    #[error("no earnings surprises reported for {0}")]
    NoData(String),
}

/// Read access to the market data the pipeline consumes. `FinanceService` is
/// the live implementation; tests substitute an in-memory one.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Current price for a symbol, or unavailable.
    async fn get_quote(&self, symbol: &str) -> Result<f64, FinanceServiceError>;

    /// Most recent earnings-surprise record for a symbol, or unavailable.
    async fn get_last_earnings(&self, symbol: &str)
        -> Result<EarningsSurprise, FinanceServiceError>;
}

/// Finnhub-backed market data client. Holds the one HTTP client and the API
/// token; both are read-only and safe to share across concurrent lookups.
pub struct FinanceService {
    client: reqwest::Client,
    token: String,
}

impl FinanceService {
    /// Build the client with the per-request timeout applied. Fails only if
    /// the underlying HTTP client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, FinanceServiceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FinanceServiceError::Http(format!("failed to build client: {e}")))?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Access the underlying HTTP client (also used for the one
    /// constituent-page fetch).
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl MarketData for FinanceService {
    async fn get_quote(&self, symbol: &str) -> Result<f64, FinanceServiceError> {
        quote::fetch_quote(&self.client, symbol, &self.token).await
    }

    async fn get_last_earnings(
        &self,
        symbol: &str,
    ) -> Result<EarningsSurprise, FinanceServiceError> {
        earnings::fetch_last_earnings(&self.client, symbol, &self.token).await
    }
}

/// GET a Finnhub endpoint for one symbol and decode the JSON body, mapping
/// each failure onto its recoverable class.
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    symbol: &str,
    token: &str,
) -> Result<T, FinanceServiceError> {
    let resp = client
        .get(url)
        .query(&[("symbol", symbol), ("token", token)])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                FinanceServiceError::Timeout
            } else {
                FinanceServiceError::Http(e.to_string())
            }
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FinanceServiceError::Status(status));
    }

    let raw = resp
        .bytes()
        .await
        .map_err(|e| FinanceServiceError::Http(format!("body read failed: {e}")))?;

    serde_json::from_slice(&raw).map_err(|e| {
        let preview = String::from_utf8_lossy(&raw[..raw.len().min(200)]);
        warn!("undecodable payload for {symbol}: {e}; body preview: {preview}");
        FinanceServiceError::Parse(e.to_string())
    })
}

pub use FinanceServiceError as Error;
