/// One row of the generated table: built only for constituents with both a
/// quote and an earnings record. Entries that fail the good-earnings check
/// are dropped before rendering, so `good` is true for every entry that
/// reaches the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub good: bool,
}
