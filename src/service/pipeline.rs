use std::path::Path;

use anyhow::Context;
use chrono::{Datelike, Utc};
use chrono_tz::America::New_York;
use futures_util::{stream, StreamExt};
use tracing::{info, warn};

use crate::models::{Constituent, ReportEntry};
use crate::service::constituents::fetch_constituents;
use crate::service::finance::{FinanceService, MarketData};
use crate::service::report;

/// Counts reported once a run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub constituents: usize,
    pub qualified: usize,
}

/// Screen every constituent and keep the ones whose latest report beat both
/// estimates. A failure fetching either number drops that symbol and the run
/// continues. Entries come back sorted by symbol so the rendered table is
/// stable across runs.
pub async fn collect_entries<M: MarketData>(
    market: &M,
    constituents: &[Constituent],
    concurrency: usize,
) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = stream::iter(constituents.iter().cloned())
        .map(|constituent| fetch_entry(market, constituent))
        .buffer_unordered(concurrency.max(1))
        .filter_map(|entry| async move { entry })
        .collect()
        .await;

    entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    entries
}

async fn fetch_entry<M: MarketData>(market: &M, constituent: Constituent) -> Option<ReportEntry> {
    let Constituent { symbol, name } = constituent;

    let price = match market.get_quote(&symbol).await {
        Ok(price) => price,
        Err(err) => {
            warn!("skipping {symbol}: quote unavailable ({err})");
            return None;
        }
    };

    let earnings = match market.get_last_earnings(&symbol).await {
        Ok(earnings) => earnings,
        Err(err) => {
            warn!("skipping {symbol}: earnings unavailable ({err})");
            return None;
        }
    };

    if !earnings.is_good() {
        return None;
    }

    Some(ReportEntry {
        name,
        symbol,
        price,
        good: true,
    })
}

/// Run the whole pipeline: load the constituent list, screen every symbol,
/// render the page and write it to `output`. Constituent-list failures are
/// fatal; per-symbol failures are not.
pub async fn run(
    finance: &FinanceService,
    output: &Path,
    concurrency: usize,
) -> anyhow::Result<RunSummary> {
    let constituents = fetch_constituents(finance.http())
        .await
        .context("failed to load the S&P 500 constituent list")?;

    screen_and_write(finance, &constituents, output, concurrency).await
}

/// Everything after the constituent load, so the screen/render/write path
/// can be exercised against an in-memory market.
async fn screen_and_write<M: MarketData>(
    market: &M,
    constituents: &[Constituent],
    output: &Path,
    concurrency: usize,
) -> anyhow::Result<RunSummary> {
    info!(
        "screening {} constituents ({} at a time)",
        constituents.len(),
        concurrency
    );
    let entries = collect_entries(market, constituents, concurrency).await;
    info!(
        "{} of {} constituents reported good earnings",
        entries.len(),
        constituents.len()
    );

    let year = Utc::now().with_timezone(&New_York).year();
    let html = report::render(&entries, year);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    tokio::fs::write(output, &html)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());

    Ok(RunSummary {
        constituents: constituents.len(),
        qualified: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EarningsSurprise;
    use crate::service::finance::FinanceServiceError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockMarket {
        quotes: HashMap<&'static str, f64>,
        earnings: HashMap<&'static str, EarningsSurprise>,
    }

    #[async_trait]
    impl MarketData for MockMarket {
        async fn get_quote(&self, symbol: &str) -> Result<f64, FinanceServiceError> {
            self.quotes
                .get(symbol)
                .copied()
                .ok_or_else(|| FinanceServiceError::Http("connection reset by peer".to_string()))
        }

        async fn get_last_earnings(
            &self,
            symbol: &str,
        ) -> Result<EarningsSurprise, FinanceServiceError> {
            self.earnings
                .get(symbol)
                .cloned()
                .ok_or_else(|| FinanceServiceError::NoData(symbol.to_string()))
        }
    }

    fn constituent(symbol: &str, name: &str) -> Constituent {
        Constituent {
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    fn beat() -> EarningsSurprise {
        EarningsSurprise {
            eps_actual: 2.10,
            eps_estimate: 2.00,
            revenue_actual: 500.0,
            revenue_estimate: 480.0,
        }
    }

    fn miss() -> EarningsSurprise {
        EarningsSurprise {
            eps_actual: 1.90,
            eps_estimate: 2.00,
            revenue_actual: 500.0,
            revenue_estimate: 480.0,
        }
    }

    #[tokio::test]
    async fn qualifying_constituent_becomes_an_entry() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23)]),
            earnings: HashMap::from([("AAA", beat())]),
        };

        let entries = collect_entries(&market, &[constituent("AAA", "Alpha Corp")], 4).await;
        assert_eq!(
            entries,
            vec![ReportEntry {
                name: "Alpha Corp".to_string(),
                symbol: "AAA".to_string(),
                price: 101.23,
                good: true,
            }]
        );
    }

    #[tokio::test]
    async fn missed_estimates_are_filtered_out() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23)]),
            earnings: HashMap::from([("AAA", miss())]),
        };

        let entries = collect_entries(&market, &[constituent("AAA", "Alpha Corp")], 4).await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn quote_failure_skips_only_that_symbol() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23)]),
            earnings: HashMap::from([("AAA", beat()), ("BBB", beat())]),
        };

        let roster = [constituent("AAA", "Alpha Corp"), constituent("BBB", "Beta Inc")];
        let entries = collect_entries(&market, &roster, 1).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].symbol, "AAA");
    }

    #[tokio::test]
    async fn earnings_failure_skips_only_that_symbol() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23), ("BBB", 55.5)]),
            earnings: HashMap::from([("AAA", beat())]),
        };

        let roster = [constituent("AAA", "Alpha Corp"), constituent("BBB", "Beta Inc")];
        let entries = collect_entries(&market, &roster, 4).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].symbol, "AAA");
    }

    #[tokio::test]
    async fn entries_come_back_sorted_by_symbol() {
        let market = MockMarket {
            quotes: HashMap::from([("ZZZ", 9.5), ("AAA", 101.23)]),
            earnings: HashMap::from([("ZZZ", beat()), ("AAA", beat())]),
        };

        let roster = [constituent("ZZZ", "Zeta"), constituent("AAA", "Alpha Corp")];
        let entries = collect_entries(&market, &roster, 2).await;
        let symbols: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "ZZZ"]);
    }

    #[tokio::test]
    async fn zero_concurrency_is_treated_as_one() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23)]),
            earnings: HashMap::from([("AAA", beat())]),
        };

        let entries = collect_entries(&market, &[constituent("AAA", "Alpha Corp")], 0).await;
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn summary_counts_screened_and_qualifying() {
        let market = MockMarket {
            quotes: HashMap::from([("AAA", 101.23), ("BBB", 55.5)]),
            earnings: HashMap::from([("AAA", beat()), ("BBB", miss())]),
        };
        let roster = [constituent("AAA", "Alpha Corp"), constituent("BBB", "Beta Inc")];
        let output = std::env::temp_dir().join(format!(
            "earnings-site-summary-{}.html",
            std::process::id()
        ));

        let summary = screen_and_write(&market, &roster, &output, 2).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                constituents: 2,
                qualified: 1,
            }
        );

        let html = tokio::fs::read_to_string(&output).await.unwrap();
        assert!(html.contains("<td>AAA</td>"));
        assert!(!html.contains("<td>BBB</td>"));
        let _ = tokio::fs::remove_file(&output).await;
    }

    #[tokio::test]
    async fn missing_output_directory_is_created() {
        let market = MockMarket {
            quotes: HashMap::new(),
            earnings: HashMap::new(),
        };
        let dir = std::env::temp_dir().join(format!("earnings-site-out-{}", std::process::id()));
        let output = dir.join("index.html");

        let summary = screen_and_write(&market, &[], &output, 1).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                constituents: 0,
                qualified: 0,
            }
        );

        let html = tokio::fs::read_to_string(&output).await.unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let _ = tokio::fs::remove_file(&output).await;
        let _ = tokio::fs::remove_dir(&dir).await;
    }
}
