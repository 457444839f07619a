//! The immutable strategy catalog.

use std::collections::HashSet;

use crate::domain::error::DeckError;
use crate::domain::strategy::Strategy;

/// Ordered, read-only collection of strategies with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    strategies: Vec<Strategy>,
}

impl Catalog {
    pub fn new(strategies: Vec<Strategy>) -> Result<Self, DeckError> {
        let mut seen = HashSet::new();
        for strategy in &strategies {
            if strategy.id.trim().is_empty() {
                return Err(DeckError::invalid_input(
                    "strategy id",
                    format!("strategy '{}' has an empty id", strategy.name),
                ));
            }
            if !seen.insert(strategy.id.as_str()) {
                return Err(DeckError::invalid_input(
                    "strategy id",
                    format!("duplicate id '{}'", strategy.id),
                ));
            }
        }
        Ok(Self { strategies })
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn get(&self, id: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Strategy, DeckError> {
        self.get(id)
            .ok_or_else(|| DeckError::UnknownStrategy { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
