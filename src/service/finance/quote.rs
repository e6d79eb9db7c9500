use serde::Deserialize;

use crate::service::finance::{get_json, FinanceServiceError, API_BASE};

/// The `/quote` response. `c` is the current price; the other fields are
/// documented here but unused.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price.
    c: Option<f64>,
    /// Previous close.
    #[serde(default)]
    #[allow(dead_code)]
    pc: Option<f64>,
}

/// Fetch the latest price for a symbol.
pub(crate) async fn fetch_quote(
    client: &reqwest::Client,
    symbol: &str,
    token: &str,
) -> Result<f64, FinanceServiceError> {
    let url = format!("{API_BASE}/quote");
    let data: QuoteResponse = get_json(client, &url, symbol, token).await?;

    data.c
        .ok_or_else(|| FinanceServiceError::Parse(format!("price field absent for {symbol}")))
}
