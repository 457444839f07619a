//! Per-viewer dashboard state.
//!
//! One [`DashboardState`] holds everything a viewer can change. Each action
//! is a synchronous mutation applied before the next render; views read the
//! state through the pure functions in the other domain modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::catalog::Catalog;
use crate::domain::error::DeckError;
use crate::domain::filter::{self, FilterCriteria, FilterOutcome, QuickRisk};
use crate::domain::notification::NotificationCenter;
use crate::domain::profile::{ProfileEditor, Settings};
use crate::domain::watchlist::Watchlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Home,
    Portfolio,
    Watchlist,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Portfolio, Tab::Watchlist, Tab::Profile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Portfolio => "portfolio",
            Tab::Watchlist => "watchlist",
            Tab::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Portfolio => "Portfolio",
            Tab::Watchlist => "Watchlist",
            Tab::Profile => "Profile",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Tab::Home => "/",
            Tab::Portfolio => "/portfolio",
            Tab::Watchlist => "/watchlist",
            Tab::Profile => "/profile",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeckError::invalid_input("tab", format!("unknown tab '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub quick_risk: QuickRisk,
    pub criteria: FilterCriteria,
    /// What "reset" restores; defaults plus any configured range overrides.
    baseline: FilterCriteria,
    pub watchlist: Watchlist,
    pub notifications: NotificationCenter,
    pub profile: ProfileEditor,
    pub settings: Settings,
    pub tab: Tab,
}

impl DashboardState {
    pub fn new(
        baseline: FilterCriteria,
        watchlist: Watchlist,
        notifications: NotificationCenter,
        profile: ProfileEditor,
        settings: Settings,
    ) -> Self {
        Self {
            quick_risk: QuickRisk::All,
            criteria: baseline.clone(),
            baseline,
            watchlist,
            notifications,
            profile,
            settings,
            tab: Tab::Home,
        }
    }

    pub fn baseline(&self) -> &FilterCriteria {
        &self.baseline
    }

    pub fn select_quick_risk(&mut self, quick: QuickRisk) {
        tracing::debug!(risk = %quick, "quick-select risk");
        self.quick_risk = quick;
    }

    /// Replaces the advanced filter. Rejected criteria leave the state as is.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<(), DeckError> {
        criteria.validate()?;
        tracing::debug!(
            risk_levels = criteria.risk_levels.len(),
            asset_classes = criteria.asset_classes.len(),
            "filters applied"
        );
        self.criteria = criteria;
        Ok(())
    }

    /// Restores the advanced filter; the quick-select is left alone.
    pub fn reset_filters(&mut self) {
        tracing::debug!("filters reset");
        self.criteria = self.baseline.clone();
    }

    pub fn visible<'a>(&self, catalog: &'a Catalog) -> FilterOutcome<'a> {
        filter::apply(catalog.strategies(), self.quick_risk, &self.criteria)
    }

    /// Toggles a catalog strategy and returns whether it is now followed.
    pub fn toggle_watchlist(&mut self, catalog: &Catalog, strategy_id: &str) -> Result<bool, DeckError> {
        catalog.require(strategy_id)?;
        let followed = self.watchlist.toggle(strategy_id);
        tracing::debug!(id = strategy_id, followed, "watchlist toggled");
        Ok(followed)
    }

    pub fn mark_read(&mut self, notification_id: &str) -> bool {
        let changed = self.notifications.mark_read(notification_id);
        tracing::debug!(id = notification_id, changed, "notification marked read");
        changed
    }

    pub fn mark_all_read(&mut self) -> usize {
        let changed = self.notifications.mark_all_read();
        tracing::debug!(changed, "all notifications marked read");
        changed
    }

    pub fn clear_notifications(&mut self) {
        tracing::debug!(cleared = self.notifications.len(), "notifications cleared");
        self.notifications.clear_all();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    pub fn toggle_setting(&mut self, setting_id: &str) -> Result<bool, DeckError> {
        let enabled = self.settings.toggle(setting_id)?;
        tracing::debug!(id = setting_id, enabled, "setting toggled");
        Ok(enabled)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }
}
