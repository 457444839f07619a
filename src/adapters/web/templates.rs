//! HTML templates using Askama, plus the view models they render.

use askama::Template;

use crate::adapters::chart_svg::{detail_svg, sparkline_svg};
use crate::domain::correlation::MarketCorrelation;
use crate::domain::filter::{ASSET_CLASSES, FilterCriteria, INSTRUMENTS, QuickRisk, ValueRange};
use crate::domain::notification::Notification;
use crate::domain::profile::SettingsSection;
use crate::domain::session::Tab;
use crate::domain::strategy::{RiskLevel, Strategy};

/// Page chrome around every full (non-HTMX) response.
#[derive(Template)]
#[template(path = "base.html")]
pub struct LayoutTemplate<'a> {
    pub title: &'a str,
    pub tabs: Vec<NavTab>,
    pub unread: usize,
    pub show_disclaimer: bool,
    pub disclaimer_title: &'a str,
    pub disclaimer_body: &'a str,
    pub acknowledge_label: &'a str,
    pub content: &'a str,
}

pub struct NavTab {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

impl NavTab {
    pub fn all(active: Tab) -> Vec<NavTab> {
        Tab::ALL
            .into_iter()
            .map(|tab| NavTab {
                label: tab.label(),
                path: tab.path(),
                active: tab == active,
            })
            .collect()
    }
}

pub fn risk_class(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "risk-low",
        RiskLevel::Medium => "risk-medium",
        RiskLevel::High => "risk-high",
    }
}

pub struct StrategyCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub return_display: String,
    pub risk_class: &'static str,
    pub tags: Vec<String>,
    pub sparkline: String,
    pub watched: bool,
}

impl StrategyCard {
    pub fn new(strategy: &Strategy, watched: bool) -> Self {
        Self {
            id: strategy.id.clone(),
            name: strategy.name.clone(),
            description: strategy.description.clone(),
            return_display: strategy.return_display.clone(),
            risk_class: risk_class(strategy.risk),
            tags: strategy.display_tags(),
            sparkline: sparkline_svg(&strategy.sparkline),
            watched,
        }
    }
}

pub struct RiskPill {
    pub label: &'static str,
    pub active: bool,
}

impl RiskPill {
    pub fn all(selected: QuickRisk) -> Vec<RiskPill> {
        QuickRisk::ALL
            .into_iter()
            .map(|q| RiskPill {
                label: q.as_str(),
                active: q == selected,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub greeting: String,
    pub total_value: String,
    pub monthly_change: String,
    pub initials: String,
    pub unread: usize,
    pub chart: String,
    pub pills: Vec<RiskPill>,
    pub filters_active: bool,
    pub cards: Vec<StrategyCard>,
    pub empty_message: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "watch_button.html")]
pub struct WatchButtonTemplate<'a> {
    pub id: &'a str,
    pub watched: bool,
}

pub struct CheckOption {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

pub struct RangeField {
    pub name: &'static str,
    pub label: &'static str,
    pub low: String,
    pub high: String,
    pub step: &'static str,
}

impl RangeField {
    fn new(name: &'static str, label: &'static str, range: ValueRange, step: &'static str) -> Self {
        Self {
            name,
            label,
            low: range.low.to_string(),
            high: range.high.to_string(),
            step,
        }
    }
}

#[derive(Template)]
#[template(path = "filters.html")]
pub struct FiltersTemplate {
    pub risk_levels: Vec<CheckOption>,
    pub asset_classes: Vec<CheckOption>,
    pub instruments: Vec<CheckOption>,
    pub ranges: Vec<RangeField>,
    pub error: Option<String>,
}

impl FiltersTemplate {
    pub fn new(criteria: &FilterCriteria) -> Self {
        let risk_levels = RiskLevel::ALL
            .into_iter()
            .map(|level| CheckOption {
                name: format!("risk_{level}"),
                label: level.to_string(),
                checked: criteria.risk_levels.contains(&level),
            })
            .collect();
        let asset_classes = ASSET_CLASSES
            .into_iter()
            .map(|class| CheckOption {
                name: format!("asset_{class}"),
                label: class.to_string(),
                checked: criteria.asset_classes.contains(class),
            })
            .collect();
        let instruments = INSTRUMENTS
            .into_iter()
            .map(|instrument| CheckOption {
                name: format!("instrument_{instrument}"),
                label: instrument.to_string(),
                checked: criteria.instruments.contains(instrument),
            })
            .collect();
        let ranges = vec![
            RangeField::new("return", "Return Range (%)", criteria.return_range, "1"),
            RangeField::new("drawdown", "Max Drawdown (%)", criteria.drawdown_range, "1"),
            RangeField::new("sharpe", "Sharpe Ratio", criteria.sharpe_range, "0.1"),
        ];
        Self {
            risk_levels,
            asset_classes,
            instruments,
            ranges,
            error: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

pub struct CorrelationRow {
    pub market: String,
    pub label: String,
    pub width: String,
    pub positive: bool,
    pub description: String,
}

impl From<&MarketCorrelation> for CorrelationRow {
    fn from(c: &MarketCorrelation) -> Self {
        Self {
            market: c.market.clone(),
            label: c.percent_label(),
            width: format!("{:.0}", c.strength()),
            positive: c.is_positive(),
            description: c.description.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "strategy.html")]
pub struct StrategyTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub chart: String,
    pub gauge: Vec<bool>,
    pub risk_tag: String,
    pub facts: Vec<(&'static str, String)>,
    pub performance: Vec<(&'static str, String)>,
    pub risk_analysis: String,
    pub example_trade: String,
    pub how_it_works: String,
    pub correlations: Vec<CorrelationRow>,
    pub watched: bool,
}

impl StrategyTemplate {
    pub fn new(strategy: &Strategy, correlations: &[MarketCorrelation], watched: bool) -> Self {
        let level = strategy.risk.gauge_level();
        Self {
            id: strategy.id.clone(),
            name: strategy.name.clone(),
            description: strategy.description.clone(),
            chart: detail_svg(&strategy.sparkline),
            gauge: (1..=3).map(|i| i <= level).collect(),
            risk_tag: strategy.risk.tag(),
            facts: vec![
                ("Asset Class", strategy.asset_class.clone()),
                ("Instrument", strategy.instrument.clone()),
                ("Trigger", strategy.trigger.clone()),
                ("Profit Scenario", strategy.profit_scenario.clone()),
            ],
            performance: vec![
                ("Annualized Return", strategy.performance.annualized_return.clone()),
                ("Sharpe Ratio", strategy.performance.sharpe_ratio.clone()),
                ("Max Drawdown", strategy.performance.max_drawdown.clone()),
            ],
            risk_analysis: strategy.risk_analysis.clone(),
            example_trade: strategy.example_trade.clone(),
            how_it_works: strategy.how_it_works.clone(),
            correlations: correlations.iter().map(CorrelationRow::from).collect(),
            watched,
        }
    }
}

pub struct WatchlistRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub return_display: String,
    pub risk_class: &'static str,
    pub tags: Vec<String>,
    pub sparkline: String,
    pub added: String,
}

#[derive(Template)]
#[template(path = "watchlist.html")]
pub struct WatchlistTemplate {
    pub query: String,
    pub total: usize,
    pub average_return: String,
    pub best_return: String,
    pub rows: Vec<WatchlistRow>,
    pub empty_message: Option<String>,
}

pub struct StatTile {
    pub label: &'static str,
    pub value: String,
    pub change: Option<String>,
}

pub struct PositionRow {
    pub name: String,
    pub allocation: u8,
    pub value: String,
    pub return_display: String,
    pub pnl: String,
    pub positive: bool,
    pub status: String,
}

#[derive(Template)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate {
    pub chart: String,
    pub stats: Vec<StatTile>,
    pub positions: Vec<PositionRow>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub initials: String,
    pub member_since: String,
    pub total_invested: &'a str,
    pub total_returns: &'a str,
    pub risk_tolerance: String,
    pub editing: bool,
    pub error: Option<String>,
    pub sections: &'a [SettingsSection],
}

#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate<'a> {
    pub unread: usize,
    pub items: &'a [Notification],
    pub empty_message: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
