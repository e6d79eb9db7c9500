use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::models::Constituent;

/// Community-maintained constituent list; kept current as companies enter
/// and leave the index.
pub const CONSTITUENTS_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.wikitable").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("static selector"));
static DATA_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));

/// Failures loading the constituent list. All of them abort the run: a
/// partial list would make downstream coverage silently incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ConstituentError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("constituent table not recognised: {0}")]
    Table(&'static str),
}

/// Fetch the current S&P 500 membership as (symbol, name) pairs.
pub async fn fetch_constituents(
    http: &reqwest::Client,
) -> Result<Vec<Constituent>, ConstituentError> {
    info!("fetching the constituent list from {CONSTITUENTS_URL}");

    let resp = http
        .get(CONSTITUENTS_URL)
        .send()
        .await
        .map_err(|e| ConstituentError::Http(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ConstituentError::Status(status));
    }

    let html = resp
        .text()
        .await
        .map_err(|e| ConstituentError::Http(format!("body read failed: {e}")))?;

    let constituents = parse_constituents(&html)?;
    info!("parsed {} constituents", constituents.len());
    Ok(constituents)
}

/// Extract (symbol, name) rows from the page: the first wikitable whose
/// header row carries both a `Symbol` and a `Security` column. Rows with a
/// blank cell in either column are skipped.
pub fn parse_constituents(html: &str) -> Result<Vec<Constituent>, ConstituentError> {
    let document = Html::parse_document(html);

    for table in document.select(&TABLE) {
        let mut rows = table.select(&ROW);
        let Some(header) = rows.next() else {
            continue;
        };

        let headers: Vec<String> = header.select(&HEADER_CELL).map(|c| cell_text(&c)).collect();
        let symbol_idx = headers.iter().position(|h| h == "Symbol");
        let name_idx = headers.iter().position(|h| h == "Security");
        let (Some(symbol_idx), Some(name_idx)) = (symbol_idx, name_idx) else {
            continue;
        };

        let mut constituents = Vec::new();
        for row in rows {
            let cells: Vec<String> = row.select(&DATA_CELL).map(|c| cell_text(&c)).collect();
            let (Some(symbol), Some(name)) = (cells.get(symbol_idx), cells.get(name_idx)) else {
                continue;
            };
            if symbol.is_empty() || name.is_empty() {
                continue;
            }
            constituents.push(Constituent {
                symbol: symbol.clone(),
                name: name.clone(),
            });
        }

        if constituents.is_empty() {
            return Err(ConstituentError::Table("constituent table has no data rows"));
        }
        return Ok(constituents);
    }

    Err(ConstituentError::Table(
        "no table with Symbol and Security columns",
    ))
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
