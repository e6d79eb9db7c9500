use serde_json::to_string_pretty;

use earnings_site::service::finance::{FinanceService, MarketData};

/// Integration test that calls the live Finnhub API.
///
/// Ignored by default to avoid CI failures. Run manually with:
/// `FINNHUB_API_KEY=... cargo test -- --ignored fetches_live_quote_and_earnings`.
#[tokio::test]
#[ignore = "requires external network access"]
async fn fetches_live_quote_and_earnings() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("FINNHUB_API_KEY")?;
    let finance = FinanceService::new(token)?;

    let price = finance.get_quote("AAPL").await?;
    println!("AAPL quote: {price:.2}");
    assert!(price.is_finite() && price > 0.0);

    let earnings = finance.get_last_earnings("AAPL").await?;
    println!("latest AAPL surprise:\n{}", to_string_pretty(&earnings)?);
    assert!(earnings.eps_estimate.is_finite());

    Ok(())
}
