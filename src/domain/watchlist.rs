//! Followed strategies.

use serde::{Deserialize, Serialize};

use crate::domain::aggregate::Summary;
use crate::domain::catalog::Catalog;
use crate::domain::strategy::Strategy;

pub const EMPTY_WATCHLIST_MESSAGE: &str = "Your watchlist is empty";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub strategy_id: String,
    /// Display label such as "2 days ago".
    pub added: String,
}

/// Insertion-ordered set of followed strategy ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

/// A watchlist entry resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchedStrategy<'a> {
    pub entry: &'a WatchlistEntry,
    pub strategy: &'a Strategy,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a watchlist, keeping the first entry for repeated ids.
    pub fn from_entries(entries: impl IntoIterator<Item = WatchlistEntry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            if !list.contains(&entry.strategy_id) {
                list.entries.push(entry);
            }
        }
        list
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn contains(&self, strategy_id: &str) -> bool {
        self.entries.iter().any(|e| e.strategy_id == strategy_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds the id if absent, removes it if present. Returns the new membership.
    pub fn toggle(&mut self, strategy_id: &str) -> bool {
        if self.remove(strategy_id) {
            false
        } else {
            self.entries.push(WatchlistEntry {
                strategy_id: strategy_id.to_string(),
                added: "just now".to_string(),
            });
            true
        }
    }

    /// Returns whether the id was present.
    pub fn remove(&mut self, strategy_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.strategy_id != strategy_id);
        self.entries.len() != before
    }

    /// Entries in watchlist order; ids missing from the catalog are skipped.
    pub fn resolve<'a>(&'a self, catalog: &'a Catalog) -> Vec<WatchedStrategy<'a>> {
        self.entries
            .iter()
            .filter_map(|entry| match catalog.get(&entry.strategy_id) {
                Some(strategy) => Some(WatchedStrategy { entry, strategy }),
                None => {
                    tracing::warn!(id = %entry.strategy_id, "watchlist id not in catalog");
                    None
                }
            })
            .collect()
    }

    /// Case-insensitive match on name, description or any display tag.
    pub fn search<'a>(&'a self, catalog: &'a Catalog, query: &str) -> Vec<WatchedStrategy<'a>> {
        let needle = query.trim().to_lowercase();
        let resolved = self.resolve(catalog);
        if needle.is_empty() {
            return resolved;
        }
        resolved
            .into_iter()
            .filter(|w| matches_query(w.strategy, &needle))
            .collect()
    }

    /// Count, mean return and best return over the resolved entries.
    pub fn summary(&self, catalog: &Catalog) -> Summary {
        Summary::of(
            self.resolve(catalog)
                .iter()
                .filter_map(|w| w.strategy.return_value()),
        )
    }

    /// Empty-state message for a search that returned nothing.
    pub fn empty_message(&self, query: &str) -> String {
        if self.is_empty() || query.trim().is_empty() {
            EMPTY_WATCHLIST_MESSAGE.to_string()
        } else {
            format!("No strategies found matching \"{}\"", query.trim())
        }
    }
}

fn matches_query(strategy: &Strategy, needle: &str) -> bool {
    strategy.name.to_lowercase().contains(needle)
        || strategy.description.to_lowercase().contains(needle)
        || strategy
            .display_tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::{Performance, RiskLevel};

    fn strategy(id: &str, name: &str, tags: &[&str], risk: RiskLevel, ret: &str) -> Strategy {
        Strategy {
            id: id.into(),
            name: name.into(),
            description: format!("{name} description"),
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

    fn catalog() -> Catalog {
        Catalog::new(vec![
            strategy("4", "Bond Arbitrage Pro", &["Bonds", "Arbitrage"], RiskLevel::Low, "8.4"),
            strategy("5", "AI Sentiment Scanner", &["AI", "Sentiment"], RiskLevel::High, "28.6"),
            strategy("6", "REIT Dividend Hunter", &["REITs", "Dividends"], RiskLevel::Medium, "6.8"),
        ])
        .unwrap()
    }

    fn seeded() -> Watchlist {
        Watchlist::from_entries(["4", "5", "6"].map(|id| WatchlistEntry {
            strategy_id: id.into(),
            added: "1 week ago".into(),
        }))
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut list = Watchlist::new();
        assert!(list.toggle("4"));
        assert!(list.contains("4"));
        assert!(!list.toggle("4"));
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_appends_in_order() {
        let mut list = Watchlist::new();
        list.toggle("6");
        list.toggle("4");
        let ids: Vec<_> = list.entries().iter().map(|e| e.strategy_id.as_str()).collect();
        assert_eq!(ids, vec!["6", "4"]);
        assert_eq!(list.entries()[0].added, "just now");
    }

    #[test]
    fn from_entries_drops_duplicates() {
        let list = Watchlist::from_entries(["4", "4", "5"].map(|id| WatchlistEntry {
            strategy_id: id.into(),
            added: String::new(),
        }));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = catalog();
        let list = seeded();

        let by_name = list.search(&catalog, "bond");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].strategy.id, "4");

        let by_tag = list.search(&catalog, "DIVIDENDS");
        assert_eq!(by_tag[0].strategy.id, "6");

        let by_risk_tag = list.search(&catalog, "high risk");
        assert_eq!(by_risk_tag[0].strategy.id, "5");

        let by_description = list.search(&catalog, "scanner description");
        assert_eq!(by_description.len(), 1);

        assert_eq!(list.search(&catalog, "  ").len(), 3);
        assert!(list.search(&catalog, "futures").is_empty());
    }

    #[test]
    fn summary_over_seed() {
        let summary = seeded().summary(&catalog());
        assert_eq!(summary.count, 3);
        assert_eq!(summary.max, Some(28.6));
    }

    #[test]
    fn summary_over_empty_watchlist_has_no_data() {
        let summary = Watchlist::new().summary(&catalog());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.max, None);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let mut list = seeded();
        list.toggle("99");
        assert_eq!(list.len(), 4);
        assert_eq!(list.resolve(&catalog()).len(), 3);
    }

    #[test]
    fn empty_messages() {
        let list = seeded();
        assert_eq!(
            list.empty_message("futures"),
            "No strategies found matching \"futures\""
        );
        assert_eq!(Watchlist::new().empty_message("x"), EMPTY_WATCHLIST_MESSAGE);
    }
}
