use serde::Deserialize;

use crate::models::EarningsSurprise;
use crate::service::finance::{get_json, FinanceServiceError, API_BASE};

/// One element of the `/stock/earnings` response array. Finnhub reports each
/// figure as nullable; a record missing any of the four comparison fields is
/// unusable.
#[derive(Debug, Deserialize)]
struct SurpriseRecord {
    actual: Option<f64>,
    estimate: Option<f64>,
    #[serde(rename = "revenueActual")]
    revenue_actual: Option<f64>,
    #[serde(rename = "revenueEstimate")]
    revenue_estimate: Option<f64>,
    /// Reporting period end date, e.g. "2025-06-30". Decoded but not used
    /// for selection; see `first_surprise`.
    #[serde(default)]
    #[allow(dead_code)]
    period: Option<String>,
}

/// Fetch the most recent earnings-surprise record for a symbol.
pub(crate) async fn fetch_last_earnings(
    client: &reqwest::Client,
    symbol: &str,
    token: &str,
) -> Result<EarningsSurprise, FinanceServiceError> {
    let url = format!("{API_BASE}/stock/earnings");
    let records: Vec<SurpriseRecord> = get_json(client, &url, symbol, token).await?;
    first_surprise(records, symbol)
}

/// Finnhub lists surprises most-recent first, so the head of the array is
/// the latest reported quarter. The ordering is a contract with the upstream
/// source and is not re-checked against the `period` field.
fn first_surprise(
    records: Vec<SurpriseRecord>,
    symbol: &str,
) -> Result<EarningsSurprise, FinanceServiceError> {
    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| FinanceServiceError::NoData(symbol.to_string()))?;

    match (
        record.actual,
        record.estimate,
        record.revenue_actual,
        record.revenue_estimate,
    ) {
        (Some(eps_actual), Some(eps_estimate), Some(revenue_actual), Some(revenue_estimate)) => {
            Ok(EarningsSurprise {
                eps_actual,
                eps_estimate,
                revenue_actual,
                revenue_estimate,
            })
        }
        _ => Err(FinanceServiceError::Parse(format!(
            "incomplete surprise record for {symbol}"
        ))),
    }
}
