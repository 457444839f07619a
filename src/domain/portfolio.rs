//! Portfolio holdings and derived statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::aggregate::Summary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Active,
    Paused,
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStatus::Active => f.write_str("active"),
            PositionStatus::Paused => f.write_str("paused"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub name: String,
    /// Share of the portfolio, 0..=100.
    pub allocation: u8,
    pub value: f64,
    pub return_percent: f64,
    pub pnl: f64,
    pub status: PositionStatus,
}

impl Position {
    pub fn is_positive(&self) -> bool {
        self.return_percent >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub history: Vec<MonthlyValue>,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioStats {
    pub total_value: f64,
    pub total_pnl: f64,
    pub active_count: usize,
    /// Last month's value minus the previous month's.
    pub monthly_change: Option<f64>,
    pub monthly_change_pct: Option<f64>,
    pub best_performer: Option<(String, f64)>,
}

impl Portfolio {
    pub fn stats(&self) -> PortfolioStats {
        let total_value = self.positions.iter().map(|p| p.value).sum();
        let total_pnl = self.positions.iter().map(|p| p.pnl).sum();
        let active_count = self
            .positions
            .iter()
            .filter(|p| p.status == PositionStatus::Active)
            .count();

        let (monthly_change, monthly_change_pct) = match self.history.as_slice() {
            [.., prev, last] => {
                let change = last.value - prev.value;
                let pct = if prev.value != 0.0 {
                    Some(change / prev.value * 100.0)
                } else {
                    None
                };
                (Some(change), pct)
            }
            _ => (None, None),
        };

        let best = Summary::of(self.positions.iter().map(|p| p.return_percent)).max;
        let best_performer = best.and_then(|max| {
            self.positions
                .iter()
                .find(|p| p.return_percent == max)
                .map(|p| (p.name.clone(), p.return_percent))
        });

        PortfolioStats {
            total_value,
            total_pnl,
            active_count,
            monthly_change,
            monthly_change_pct,
            best_performer,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.history.iter().map(|m| m.value).collect()
    }
}
