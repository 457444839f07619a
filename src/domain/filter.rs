//! Strategy filtering (quick-select risk plus the advanced filter panel).
//!
//! [`apply`] is a pure function of the catalog, the quick-select value and
//! the [`FilterCriteria`]: it keeps catalog order, has no side effects and
//! never fails. Strategies whose return string cannot be parsed are
//! excluded rather than aborting the whole evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DeckError;
use crate::domain::strategy::{RiskLevel, Strategy};

/// Asset-class tags offered by the filter panel.
pub const ASSET_CLASSES: [&str; 5] = ["Stocks", "Crypto", "Options", "Bonds", "REITs"];

/// Instrument types offered by the filter panel.
pub const INSTRUMENTS: [&str; 5] = ["Options", "Spot", "Futures", "ETFs", "Direct"];

pub const EMPTY_RESULT_MESSAGE: &str = "No strategies match your current filters";
pub const EMPTY_CATALOG_MESSAGE: &str = "No strategies available";

/// Single-value risk selector shown as pill buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuickRisk {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl QuickRisk {
    pub const ALL: [QuickRisk; 4] = [
        QuickRisk::All,
        QuickRisk::Low,
        QuickRisk::Medium,
        QuickRisk::High,
    ];

    pub fn as_risk(&self) -> Option<RiskLevel> {
        match self {
            QuickRisk::All => None,
            QuickRisk::Low => Some(RiskLevel::Low),
            QuickRisk::Medium => Some(RiskLevel::Medium),
            QuickRisk::High => Some(RiskLevel::High),
        }
    }

    pub fn admits(&self, risk: RiskLevel) -> bool {
        self.as_risk().is_none_or(|wanted| wanted == risk)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickRisk::All => "All",
            QuickRisk::Low => "Low",
            QuickRisk::Medium => "Medium",
            QuickRisk::High => "High",
        }
    }
}

impl fmt::Display for QuickRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickRisk {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(QuickRisk::All);
        }
        let level: RiskLevel = s.parse()?;
        Ok(QuickRisk::from(level))
    }
}

impl From<RiskLevel> for QuickRisk {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => QuickRisk::Low,
            RiskLevel::Medium => QuickRisk::Medium,
            RiskLevel::High => QuickRisk::High,
        }
    }
}

/// Closed numeric interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub const RETURN_DEFAULT: ValueRange = ValueRange::new(0.0, 100.0);
    pub const DRAWDOWN_DEFAULT: ValueRange = ValueRange::new(0.0, 100.0);
    pub const SHARPE_DEFAULT: ValueRange = ValueRange::new(0.0, 3.0);

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }
}

/// Advanced filter panel state.
///
/// Instruments, drawdown and Sharpe ranges are part of the panel but do not
/// take part in [`passes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub risk_levels: BTreeSet<RiskLevel>,
    pub asset_classes: BTreeSet<String>,
    pub return_range: ValueRange,
    pub instruments: BTreeSet<String>,
    pub drawdown_range: ValueRange,
    pub sharpe_range: ValueRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            risk_levels: BTreeSet::new(),
            asset_classes: BTreeSet::new(),
            return_range: ValueRange::RETURN_DEFAULT,
            instruments: BTreeSet::new(),
            drawdown_range: ValueRange::DRAWDOWN_DEFAULT,
            sharpe_range: ValueRange::SHARPE_DEFAULT,
        }
    }
}

impl FilterCriteria {
    /// Default criteria with the given ranges, used for config overrides.
    pub fn with_ranges(return_range: ValueRange, drawdown_range: ValueRange, sharpe_range: ValueRange) -> Self {
        Self {
            return_range,
            drawdown_range,
            sharpe_range,
            ..Self::default()
        }
    }

    pub fn set_risk_level(&mut self, level: RiskLevel, checked: bool) {
        if checked {
            self.risk_levels.insert(level);
        } else {
            self.risk_levels.remove(&level);
        }
    }

    pub fn set_asset_class(&mut self, asset_class: &str, checked: bool) {
        if checked {
            self.asset_classes.insert(asset_class.to_string());
        } else {
            self.asset_classes.remove(asset_class);
        }
    }

    pub fn set_instrument(&mut self, instrument: &str, checked: bool) {
        if checked {
            self.instruments.insert(instrument.to_string());
        } else {
            self.instruments.remove(instrument);
        }
    }

    /// Checks that every range is finite and ordered.
    pub fn validate(&self) -> Result<(), DeckError> {
        let ranges = [
            ("return range", self.return_range),
            ("drawdown range", self.drawdown_range),
            ("sharpe ratio range", self.sharpe_range),
        ];
        for (field, range) in ranges {
            if !range.is_valid() {
                return Err(DeckError::invalid_input(
                    field,
                    format!("[{}, {}] is not an ordered finite range", range.low, range.high),
                ));
            }
        }
        Ok(())
    }

    /// True when the predicate could exclude a strategy with a return in
    /// the default range.
    pub fn is_narrowing(&self) -> bool {
        !self.risk_levels.is_empty()
            || !self.asset_classes.is_empty()
            || self.return_range != ValueRange::RETURN_DEFAULT
    }
}

/// Whether a single strategy is visible under the given selection.
pub fn passes(strategy: &Strategy, quick: QuickRisk, criteria: &FilterCriteria) -> bool {
    if !quick.admits(strategy.risk) {
        return false;
    }

    if !criteria.risk_levels.is_empty() && !criteria.risk_levels.contains(&strategy.risk) {
        return false;
    }

    if !criteria.asset_classes.is_empty()
        && !strategy
            .tags
            .iter()
            .any(|tag| criteria.asset_classes.contains(tag))
    {
        return false;
    }

    match strategy.return_value() {
        Some(value) => criteria.return_range.contains(value),
        None => {
            tracing::warn!(
                id = %strategy.id,
                raw = %strategy.return_percent,
                "excluding strategy with unparseable return"
            );
            false
        }
    }
}

/// Ordered subsequence of `strategies` that passes the filter.
pub fn filter_strategies<'a>(
    strategies: &'a [Strategy],
    quick: QuickRisk,
    criteria: &FilterCriteria,
) -> Vec<&'a Strategy> {
    strategies
        .iter()
        .filter(|s| passes(s, quick, criteria))
        .collect()
}

/// Visible strategies plus whether any filter was active.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub strategies: Vec<&'a Strategy>,
    pub constrained: bool,
}

impl<'a> FilterOutcome<'a> {
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Message for the empty state, `None` when something is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.is_empty() {
            None
        } else if self.constrained {
            Some(EMPTY_RESULT_MESSAGE)
        } else {
            Some(EMPTY_CATALOG_MESSAGE)
        }
    }
}

pub fn apply<'a>(
    strategies: &'a [Strategy],
    quick: QuickRisk,
    criteria: &FilterCriteria,
) -> FilterOutcome<'a> {
    FilterOutcome {
        strategies: filter_strategies(strategies, quick, criteria),
        constrained: quick != QuickRisk::All || criteria.is_narrowing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::Performance;

    fn strategy(id: &str, risk: RiskLevel, tags: &[&str], ret: &str) -> Strategy {
        Strategy {
            id: id.into(),
            name: format!("S{id}"),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            return_display: format!("+{ret}%"),
            return_percent: ret.into(),
            risk,
            sparkline: vec![],
            asset_class: String::new(),
            instrument: String::new(),
            trigger: String::new(),
            profit_scenario: String::new(),
            performance: Performance {
                annualized_return: String::new(),
                sharpe_ratio: String::new(),
                max_drawdown: String::new(),
            },
            risk_analysis: String::new(),
            example_trade: String::new(),
            how_it_works: String::new(),
        }
    }

    fn scenario() -> Vec<Strategy> {
        vec![
            strategy("a", RiskLevel::High, &["Crypto"], "45.2"),
            strategy("b", RiskLevel::Medium, &["Stocks"], "12.8"),
            strategy("c", RiskLevel::High, &["Stocks"], "24.5"),
        ]
    }

    fn ids(result: &[&Strategy]) -> Vec<String> {
        result.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn unconstrained_is_identity() {
        let catalog = scenario();
        let result = filter_strategies(&catalog, QuickRisk::All, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn quick_select_high_keeps_order() {
        let catalog = scenario();
        let result = filter_strategies(&catalog, QuickRisk::High, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn return_range_is_inclusive() {
        let catalog = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.return_range = ValueRange::new(0.0, 20.0);
        assert_eq!(
            ids(&filter_strategies(&catalog, QuickRisk::All, &criteria)),
            vec!["b"]
        );

        criteria.return_range = ValueRange::new(12.8, 24.5);
        assert_eq!(
            ids(&filter_strategies(&catalog, QuickRisk::All, &criteria)),
            vec!["b", "c"]
        );
    }

    #[test]
    fn asset_classes_intersect_tags() {
        let catalog = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.set_asset_class("Crypto", true);
        assert_eq!(
            ids(&filter_strategies(&catalog, QuickRisk::All, &criteria)),
            vec!["a"]
        );

        criteria.set_asset_class("Stocks", true);
        assert_eq!(
            ids(&filter_strategies(&catalog, QuickRisk::All, &criteria)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn risk_levels_and_quick_select_combine() {
        let catalog = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.set_risk_level(RiskLevel::Medium, true);
        assert_eq!(
            ids(&filter_strategies(&catalog, QuickRisk::All, &criteria)),
            vec!["b"]
        );
        assert!(filter_strategies(&catalog, QuickRisk::High, &criteria).is_empty());
    }

    #[test]
    fn unchecking_restores_membership() {
        let mut criteria = FilterCriteria::default();
        criteria.set_risk_level(RiskLevel::Low, true);
        criteria.set_instrument("Spot", true);
        criteria.set_risk_level(RiskLevel::Low, false);
        criteria.set_instrument("Spot", false);
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn unparseable_return_is_excluded() {
        let catalog = vec![
            strategy("a", RiskLevel::Low, &[], "n/a"),
            strategy("b", RiskLevel::Low, &[], "5"),
        ];
        let result = filter_strategies(&catalog, QuickRisk::All, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn instruments_and_secondary_ranges_do_not_filter() {
        let catalog = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.set_instrument("Futures", true);
        criteria.drawdown_range = ValueRange::new(0.0, 1.0);
        criteria.sharpe_range = ValueRange::new(2.9, 3.0);
        assert_eq!(filter_strategies(&catalog, QuickRisk::All, &criteria).len(), 3);
    }

    #[test]
    fn empty_outcome_distinguishes_constraint() {
        let empty: Vec<Strategy> = vec![];
        let outcome = apply(&empty, QuickRisk::All, &FilterCriteria::default());
        assert!(outcome.is_empty());
        assert!(!outcome.constrained);
        assert_eq!(outcome.empty_message(), Some(EMPTY_CATALOG_MESSAGE));

        let catalog = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.set_asset_class("Bonds", true);
        let outcome = apply(&catalog, QuickRisk::All, &criteria);
        assert!(outcome.is_empty());
        assert_eq!(outcome.empty_message(), Some(EMPTY_RESULT_MESSAGE));

        let outcome = apply(&catalog, QuickRisk::Low, &FilterCriteria::default());
        assert_eq!(outcome.empty_message(), Some(EMPTY_RESULT_MESSAGE));

        let outcome = apply(&catalog, QuickRisk::All, &FilterCriteria::default());
        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.empty_message(), None);
    }

    #[test]
    fn quick_risk_parses() {
        assert_eq!("All".parse::<QuickRisk>().unwrap(), QuickRisk::All);
        assert_eq!("medium".parse::<QuickRisk>().unwrap(), QuickRisk::Medium);
        assert!("bogus".parse::<QuickRisk>().is_err());
        assert_eq!(QuickRisk::High.as_risk(), Some(RiskLevel::High));
        assert!(QuickRisk::All.admits(RiskLevel::Low));
        assert!(!QuickRisk::Low.admits(RiskLevel::High));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.validate().is_ok());
        criteria.sharpe_range = ValueRange::new(2.0, 1.0);
        let err = criteria.validate().unwrap_err();
        assert!(err.to_string().contains("sharpe ratio range"));
        criteria.sharpe_range = ValueRange::new(0.0, f64::NAN);
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn narrowing_detection() {
        let mut criteria = FilterCriteria::default();
        assert!(!criteria.is_narrowing());
        criteria.set_instrument("Spot", true);
        assert!(!criteria.is_narrowing());
        criteria.return_range = ValueRange::new(10.0, 100.0);
        assert!(criteria.is_narrowing());
    }
}
