use serde::{Deserialize, Serialize};

/// Most recent earnings surprise for one company: reported figures against
/// the analyst consensus for the same period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsSurprise {
    pub eps_actual: f64,
    pub eps_estimate: f64,
    pub revenue_actual: f64,
    pub revenue_estimate: f64,
}

impl EarningsSurprise {
    /// Whether this report clears the "good earnings" bar: actual EPS and
    /// actual revenue both strictly above their estimates. Equality on either
    /// leg does not qualify. Guidance is not compared; the data source does
    /// not carry it.
    pub fn is_good(&self) -> bool {
        self.eps_actual > self.eps_estimate && self.revenue_actual > self.revenue_estimate
    }
}
