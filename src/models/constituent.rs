use serde::{Deserialize, Serialize};

/// One current member of the index: ticker symbol and display name, scraped
/// fresh on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    pub symbol: String,
    pub name: String,
}
