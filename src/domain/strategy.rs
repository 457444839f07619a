//! Strategy catalog entries.
//!
//! Risk is carried by [`RiskLevel`]; category tags never encode it. The
//! "High Risk" style tag users see is derived from the enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Derived display tag, e.g. `"High Risk"`.
    pub fn tag(&self) -> String {
        format!("{} Risk", self.as_str())
    }

    /// Number of filled bars on a three-bar gauge.
    pub fn gauge_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Parses a risk-labelled tag such as `"Medium Risk"`.
    pub fn from_tag(tag: &str) -> Option<RiskLevel> {
        tag.trim()
            .strip_suffix("Risk")
            .and_then(|level| level.trim().parse().ok())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(DeckError::invalid_input(
                "risk level",
                format!("'{other}' is not one of Low, Medium, High"),
            )),
        }
    }
}

/// Headline performance figures, kept as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub annualized_return: String,
    pub sharpe_ratio: String,
    pub max_drawdown: String,
}

impl Performance {
    pub fn sharpe(&self) -> Option<f64> {
        parse_percent(&self.sharpe_ratio)
    }

    /// Max drawdown as a positive magnitude (`"-22%"` gives `22.0`).
    pub fn drawdown_magnitude(&self) -> Option<f64> {
        parse_percent(&self.max_drawdown).map(f64::abs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free-form category tags, risk excluded.
    pub tags: Vec<String>,
    pub return_display: String,
    pub return_percent: String,
    pub risk: RiskLevel,
    pub sparkline: Vec<f64>,
    pub asset_class: String,
    pub instrument: String,
    pub trigger: String,
    pub profit_scenario: String,
    pub performance: Performance,
    pub risk_analysis: String,
    pub example_trade: String,
    pub how_it_works: String,
}

impl Strategy {
    /// Numeric realized return, `None` when the stored string is unparseable.
    pub fn return_value(&self) -> Option<f64> {
        parse_percent(&self.return_percent)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Category tags with the derived risk tag in second position.
    pub fn display_tags(&self) -> Vec<String> {
        let mut tags = self.tags.clone();
        let at = tags.len().min(1);
        tags.insert(at, self.risk.tag());
        tags
    }
}

/// Parses `"+24.5%"`, `"-22%"`, `"12.8"` and similar into a finite float.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a return with an explicit sign, e.g. `"+24.5%"`.
pub fn format_return(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}
