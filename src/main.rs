use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use earnings_site::service::finance::FinanceService;
use earnings_site::service::pipeline;

const DEFAULT_OUTPUT: &str = "site/index.html";
const DEFAULT_CONCURRENCY: usize = 4;

fn read_env_var(key: &str) -> Result<String> {
    let raw = env::var(key).with_context(|| format!("{key} environment variable not set"))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("{key} is set but empty");
    }
    Ok(trimmed.to_string())
}

fn fetch_concurrency() -> usize {
    parse_concurrency(env::var("FETCH_CONCURRENCY").ok().as_deref())
}

fn parse_concurrency(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .map(|n| n.clamp(1, 16))
        .unwrap_or(DEFAULT_CONCURRENCY)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    // The credential check happens before any network activity.
    let token = read_env_var("FINNHUB_API_KEY")?;

    let output =
        PathBuf::from(env::var("SITE_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT.to_string()));
    let concurrency = fetch_concurrency();

    info!("Initializing FinanceService...");
    let finance = FinanceService::new(token)?;

    let summary = pipeline::run(&finance, &output, concurrency).await?;

    println!(
        "Generated HTML for {} companies with good earnings.",
        summary.qualified
    );
    Ok(())
}
