//! Summary models

/// Totals derived from a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}
