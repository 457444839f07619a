//! How a strategy moves relative to major market indices.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCorrelation {
    pub market: String,
    /// Coefficient in [-1, 1].
    pub correlation: f64,
    pub description: String,
}

impl MarketCorrelation {
    pub fn new(market: &str, correlation: f64, description: &str) -> Self {
        Self {
            market: market.to_string(),
            correlation: correlation.clamp(-1.0, 1.0),
            description: description.to_string(),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.correlation > 0.0
    }

    /// Whole-percent label with a leading `+` for positive values, e.g. `"+65%"`.
    pub fn percent_label(&self) -> String {
        let pct = (self.correlation * 100.0).round();
        if self.is_positive() {
            format!("+{pct:.0}%")
        } else {
            format!("{pct:.0}%")
        }
    }

    /// Bar fill in percent, 0..=100.
    pub fn strength(&self) -> f64 {
        self.correlation.abs() * 100.0
    }
}

/// Correlation rows keyed by strategy id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationTable {
    rows: HashMap<String, Vec<MarketCorrelation>>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, strategy_id: &str, rows: Vec<MarketCorrelation>) {
        self.rows.insert(strategy_id.to_string(), rows);
    }

    /// Empty for strategies without correlation data.
    pub fn for_strategy(&self, strategy_id: &str) -> &[MarketCorrelation] {
        self.rows
            .get(strategy_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_strength() {
        let vix = MarketCorrelation::new("VIX", 0.65, "");
        assert!(vix.is_positive());
        assert_eq!(vix.percent_label(), "+65%");
        assert!((vix.strength() - 65.0).abs() < 1e-9);

        let spx = MarketCorrelation::new("S&P 500", -0.15, "");
        assert!(!spx.is_positive());
        assert_eq!(spx.percent_label(), "-15%");
        assert!((spx.strength() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn coefficient_is_clamped() {
        assert_eq!(MarketCorrelation::new("X", 1.7, "").correlation, 1.0);
        assert_eq!(MarketCorrelation::new("X", -3.0, "").correlation, -1.0);
    }

    #[test]
    fn missing_strategy_has_no_rows() {
        let mut table = CorrelationTable::new();
        table.insert("1", vec![MarketCorrelation::new("VIX", 0.65, "")]);
        assert_eq!(table.for_strategy("1").len(), 1);
        assert!(table.for_strategy("4").is_empty());
    }
}
