//! Built-in mock data: the strategy catalog and the initial viewer state.

use chrono::NaiveDate;

use crate::domain::correlation::{CorrelationTable, MarketCorrelation};
use crate::domain::error::DeckError;
use crate::domain::filter::FilterCriteria;
use crate::domain::notification::{Notification, NotificationCenter, NotificationKind};
use crate::domain::portfolio::{MonthlyValue, Portfolio, Position, PositionStatus};
use crate::domain::profile::{
    ProfileEditor, RiskTolerance, Setting, SettingsSection, Settings, UserProfile,
};
use crate::domain::session::DashboardState;
use crate::domain::strategy::{Performance, RiskLevel, Strategy, format_return};
use crate::domain::watchlist::{Watchlist, WatchlistEntry};
use crate::ports::catalog_port::CatalogPort;

/// The six built-in strategies.
pub struct SeedCatalog;

impl CatalogPort for SeedCatalog {
    fn source_name(&self) -> String {
        "built-in".to_string()
    }

    fn load(&self) -> Result<Vec<Strategy>, DeckError> {
        Ok(seed_strategies())
    }
}

struct Seed<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    tags: &'a [&'a str],
    return_percent: f64,
    risk: RiskLevel,
    sparkline: &'a [f64],
    asset_class: &'a str,
    instrument: &'a str,
    trigger: &'a str,
    profit_scenario: &'a str,
    performance: (&'a str, &'a str, &'a str),
    risk_analysis: &'a str,
    example_trade: &'a str,
    how_it_works: &'a str,
}

impl Seed<'_> {
    fn build(&self) -> Strategy {
        let (annualized_return, sharpe_ratio, max_drawdown) = self.performance;
        Strategy {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            return_display: format_return(self.return_percent),
            return_percent: self.return_percent.to_string(),
            risk: self.risk,
            sparkline: self.sparkline.to_vec(),
            asset_class: self.asset_class.to_string(),
            instrument: self.instrument.to_string(),
            trigger: self.trigger.to_string(),
            profit_scenario: self.profit_scenario.to_string(),
            performance: Performance {
                annualized_return: annualized_return.to_string(),
                sharpe_ratio: sharpe_ratio.to_string(),
                max_drawdown: max_drawdown.to_string(),
            },
            risk_analysis: self.risk_analysis.to_string(),
            example_trade: self.example_trade.to_string(),
            how_it_works: self.how_it_works.to_string(),
        }
    }
}

pub fn seed_strategies() -> Vec<Strategy> {
    let seeds = [
        Seed {
            id: "1",
            name: "Algo-1",
            description: "Bets against extreme price moves after company earnings.",
            tags: &["Stocks", "Options"],
            return_percent: 24.5,
            risk: RiskLevel::High,
            sparkline: &[10.0, 15.0, 12.0, 18.0, 22.0, 25.0, 24.0],
            asset_class: "US FinTech & Consumer Stocks",
            instrument: "Options (Short Straddles)",
            trigger: "High implied volatility pre-earnings",
            profit_scenario: "The stock price stays within a calculated range.",
            performance: ("18.5%", "1.2", "-22%"),
            risk_analysis: "⚠️ High Risk. While this strategy has a high win rate, a single \
                unexpected, massive price swing in a stock can lead to significant, \
                theoretically unlimited losses.",
            example_trade: "Before $FIN Corp reported earnings, the market expected a 15% \
                price move. The algo initiated a trade betting it would move less than that. \
                The stock only moved 8%, and the position was closed for a profit two days later.",
            how_it_works: "Focus on capitalizing elevated volatility by shorting straddles on \
                FinTech and Consumer US Single Stocks before earnings announcements, monetizing \
                post-event gamma reversion. 4 Day Holding Period.",
        },
        Seed {
            id: "2",
            name: "Volatility Fade",
            description: "Profits from the predictable drop in volatility after earnings.",
            tags: &["Stocks", "Options"],
            return_percent: 12.8,
            risk: RiskLevel::Medium,
            sparkline: &[8.0, 10.0, 9.0, 11.0, 13.0, 12.0, 13.0],
            asset_class: "US/EU Small & Mid-Cap Stocks",
            instrument: "Options (Double Diagonals)",
            trigger: "Post-earnings implied volatility (IV) crush",
            profit_scenario: "The stock price trades within a wide range over the next month.",
            performance: ("12%", "0.9", "-15%"),
            risk_analysis: "✅ Defined Risk. Your maximum possible loss is limited to the \
                initial amount you invest in the trade, making it a more controlled strategy.",
            example_trade: "After $CSM Inc. reported earnings, its volatility dropped 50%. The \
                algo bought a spread designed to profit if the stock stayed between $40 and $55 \
                for the next 30 days.",
            how_it_works: "After earnings are released, market uncertainty (and thus option \
                prices) tends to \"crush.\" This strategy enters after that crush, using a \
                complex options spread (a double diagonal) to profit from time decay while \
                volatility stays low. It's a bet that the stock will remain relatively stable \
                in the weeks following the announcement.",
        },
        Seed {
            id: "3",
            name: "Crypto Momentum Rider",
            description: "Buys into the hottest, trending crypto tokens weekly.",
            tags: &["Crypto", "Momentum"],
            return_percent: 45.2,
            risk: RiskLevel::High,
            sparkline: &[5.0, 8.0, 12.0, 20.0, 35.0, 42.0, 45.0],
            asset_class: "High-Volume Crypto Tokens",
            instrument: "Spot Crypto (direct ownership)",
            trigger: "Sustained positive price momentum and volume",
            profit_scenario: "The purchased token continues its upward trend for the week.",
            performance: ("45%", "0.7", "-55%"),
            risk_analysis: "⚠️ High Risk. Crypto is extremely volatile. Momentum can reverse \
                instantly, leading to sharp and sudden losses. This strategy can experience \
                significant drawdowns.",
            example_trade: "When $TKN showed a 60% price increase on high volume, the algo \
                bought it. It rode the trend for another 25% gain before selling it at the end \
                of the week to buy the next emerging leader.",
            how_it_works: "This strategy constantly scans the market for crypto tokens that are \
                showing strong upward price trends. It identifies assets gaining significant \
                \"buzz\" and retail interest, buys them, and holds for one week to capture the \
                peak of the momentum before rotating into the next leading token.",
        },
        Seed {
            id: "4",
            name: "Bond Arbitrage Pro",
            description: "Exploits price differences between government bonds.",
            tags: &["Bonds", "Arbitrage"],
            return_percent: 8.4,
            risk: RiskLevel::Low,
            sparkline: &[5.0, 6.0, 7.0, 8.0, 8.2, 8.4, 8.3],
            asset_class: "G7 Government Bonds",
            instrument: "Bond Futures & ETFs",
            trigger: "Yield spread dislocation between comparable maturities",
            profit_scenario: "The spread between the paired bonds converges.",
            performance: ("8.1%", "1.8", "-4%"),
            risk_analysis: "✅ Low Risk. Positions are hedged pairs, so broad rate moves largely \
                cancel out. Losses come from spreads that keep widening before they converge.",
            example_trade: "When the 9-year note traded 6 basis points cheap to the 10-year, the \
                algo bought the cheap leg and sold the rich one, closing both when the gap \
                narrowed to 1 basis point.",
            how_it_works: "The strategy watches closely related government bonds for temporary \
                pricing gaps, buys the cheaper bond, sells the richer one and waits for the \
                prices to realign.",
        },
        Seed {
            id: "5",
            name: "AI Sentiment Scanner",
            description: "Uses AI to analyze market sentiment from social media.",
            tags: &["AI", "Sentiment"],
            return_percent: 28.6,
            risk: RiskLevel::High,
            sparkline: &[15.0, 18.0, 22.0, 26.0, 28.0, 29.0, 28.6],
            asset_class: "US Large-Cap Stocks",
            instrument: "Spot Equities",
            trigger: "Sharp shift in aggregated social media sentiment",
            profit_scenario: "Price follows the sentiment shift within a few sessions.",
            performance: ("27%", "1.1", "-31%"),
            risk_analysis: "⚠️ High Risk. Sentiment signals are noisy and can flip quickly; \
                crowded trades unwind fast when the narrative changes.",
            example_trade: "A surge of positive posts about $AIX ahead of a product launch \
                triggered a buy. The stock gained 11% over three sessions and the position was \
                sold as sentiment cooled.",
            how_it_works: "Language models score millions of posts per day. When sentiment for \
                a stock moves sharply away from its norm, the strategy trades in the direction \
                of the shift and exits once it fades.",
        },
        Seed {
            id: "6",
            name: "REIT Dividend Hunter",
            description: "Focuses on high-dividend real estate investment trusts.",
            tags: &["REITs", "Dividends"],
            return_percent: 6.8,
            risk: RiskLevel::Medium,
            sparkline: &[4.0, 5.0, 5.5, 6.0, 6.5, 6.8, 6.7],
            asset_class: "Listed US REITs",
            instrument: "Direct REIT Shares",
            trigger: "Dividend yield above its five-year average",
            profit_scenario: "Dividends are paid and the share price holds steady.",
            performance: ("7.2%", "0.8", "-18%"),
            risk_analysis: "Medium Risk. Income is steady, but REIT prices are sensitive to \
                interest rates and property market downturns.",
            example_trade: "When a warehouse REIT's yield rose to 6.4% after a selloff, the algo \
                bought shares, collected two quarterly dividends and sold after a 5% recovery.",
            how_it_works: "The strategy ranks REITs by yield relative to their own history and \
                payout coverage, holding the most attractive names and rebalancing monthly.",
        },
    ];
    seeds.iter().map(Seed::build).collect()
}

pub fn seed_correlations() -> CorrelationTable {
    let mut table = CorrelationTable::new();
    table.insert(
        "1",
        vec![
            MarketCorrelation::new("S&P 500", -0.15, "Low negative correlation during earnings seasons"),
            MarketCorrelation::new("VIX", 0.65, "High positive correlation with volatility spikes"),
            MarketCorrelation::new("NASDAQ", -0.08, "Minimal correlation with tech-heavy index"),
            MarketCorrelation::new("Bitcoin", 0.12, "Slight positive correlation during volatility events"),
        ],
    );
    table.insert(
        "2",
        vec![
            MarketCorrelation::new("S&P 500", 0.25, "Moderate positive correlation with market stability"),
            MarketCorrelation::new("VIX", -0.72, "Strong negative correlation with volatility index"),
            MarketCorrelation::new("NASDAQ", 0.18, "Low positive correlation with tech sector"),
            MarketCorrelation::new("Bitcoin", -0.05, "Near-zero correlation with crypto markets"),
        ],
    );
    table.insert(
        "3",
        vec![
            MarketCorrelation::new("S&P 500", 0.35, "Moderate positive correlation during risk-on periods"),
            MarketCorrelation::new("VIX", -0.22, "Negative correlation with fear index"),
            MarketCorrelation::new("NASDAQ", 0.48, "High correlation with tech and growth stocks"),
            MarketCorrelation::new("Bitcoin", 0.85, "Very high correlation with crypto market leader"),
        ],
    );
    table
}

pub fn seed_notifications() -> NotificationCenter {
    NotificationCenter::new(vec![
        Notification {
            id: "1".into(),
            kind: NotificationKind::Success,
            title: "Strategy Performance Update".into(),
            message: "Earnings Crush strategy has gained +2.4% this week, outperforming expectations.".into(),
            timestamp: "2 hours ago".into(),
            strategy_name: Some("Earnings Crush".into()),
            amount: Some("+$2,400".into()),
            is_read: false,
        },
        Notification {
            id: "2".into(),
            kind: NotificationKind::Warning,
            title: "Risk Alert".into(),
            message: "Crypto Momentum Rider experiencing higher than usual volatility. Consider reviewing position size.".into(),
            timestamp: "5 hours ago".into(),
            strategy_name: Some("Crypto Momentum Rider".into()),
            amount: None,
            is_read: false,
        },
        Notification {
            id: "3".into(),
            kind: NotificationKind::Info,
            title: "Market Update".into(),
            message: "Earnings season begins next week. Your strategies are positioned to capitalize on volatility.".into(),
            timestamp: "1 day ago".into(),
            strategy_name: None,
            amount: None,
            is_read: true,
        },
    ])
}

pub fn seed_portfolio() -> Portfolio {
    let history = [
        ("JAN", 85_000.0),
        ("FEB", 88_000.0),
        ("MAR", 82_000.0),
        ("APR", 91_000.0),
        ("MAY", 95_000.0),
        ("JUN", 98_081.0),
    ]
    .into_iter()
    .map(|(month, value)| MonthlyValue {
        month: month.to_string(),
        value,
    })
    .collect();

    let position = |id: &str, name: &str, allocation, value, return_percent, pnl| Position {
        id: id.to_string(),
        name: name.to_string(),
        allocation,
        value,
        return_percent,
        pnl,
        status: PositionStatus::Active,
    };

    Portfolio {
        history,
        positions: vec![
            position("1", "Earnings Crush", 45, 44_136.79, 8.2, 3_341.0),
            position("2", "Volatility Fade", 30, 29_424.53, 12.8, 3_340.0),
            position("3", "Crypto Momentum Rider", 25, 24_520.43, -2.1, -524.0),
        ],
    }
}

pub fn seed_profile() -> UserProfile {
    UserProfile {
        name: "----, ----".into(),
        email: "----@email.com".into(),
        joined: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
        total_invested: "$--,---.--".into(),
        total_returns: "+$-,---.--".into(),
        risk_tolerance: RiskTolerance::Moderate,
    }
}

pub fn seed_settings() -> Settings {
    let setting = |id: &str, label: &str, enabled| Setting {
        id: id.to_string(),
        label: label.to_string(),
        enabled,
    };
    Settings::new(vec![
        SettingsSection {
            title: "Notifications".into(),
            settings: vec![
                setting("pushNotifications", "Push Notifications", true),
                setting("emailUpdates", "Email Updates", true),
                setting("performanceAlerts", "Performance Alerts", false),
                setting("marketNews", "Market News", true),
            ],
        },
        SettingsSection {
            title: "Privacy & Security".into(),
            settings: vec![
                setting("twoFactor", "Two-Factor Authentication", true),
                setting("biometric", "Biometric Login", false),
                setting("dataSharing", "Data Sharing", false),
            ],
        },
    ])
}

pub fn seed_watchlist() -> Watchlist {
    Watchlist::from_entries(
        [("4", "2 days ago"), ("5", "1 week ago"), ("6", "3 weeks ago")].map(|(id, added)| {
            WatchlistEntry {
                strategy_id: id.to_string(),
                added: added.to_string(),
            }
        }),
    )
}

/// Fresh viewer state over the seed data.
pub fn seed_dashboard(baseline: FilterCriteria) -> DashboardState {
    DashboardState::new(
        baseline,
        seed_watchlist(),
        seed_notifications(),
        ProfileEditor::new(seed_profile()),
        seed_settings(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::filter::{QuickRisk, filter_strategies};

    fn catalog() -> Catalog {
        Catalog::new(SeedCatalog.load().unwrap()).unwrap()
    }

    #[test]
    fn seed_catalog_has_six_unique_strategies() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get("1").unwrap().name, "Algo-1");
        assert_eq!(catalog.get("6").unwrap().name, "REIT Dividend Hunter");
    }

    #[test]
    fn seed_tags_never_carry_risk() {
        for strategy in seed_strategies() {
            assert!(
                strategy.tags.iter().all(|t| RiskLevel::from_tag(t).is_none()),
                "{} has a risk tag",
                strategy.name
            );
        }
    }

    #[test]
    fn seed_display_matches_dashboard_cards() {
        let catalog = catalog();
        let algo = catalog.get("1").unwrap();
        assert_eq!(algo.return_display, "+24.5%");
        assert_eq!(algo.return_percent, "24.5");
        assert_eq!(algo.display_tags(), vec!["Stocks", "High Risk", "Options"]);
    }

    #[test]
    fn quick_select_high_over_seed() {
        let catalog = catalog();
        let high = filter_strategies(catalog.strategies(), QuickRisk::High, &FilterCriteria::default());
        let ids: Vec<_> = high.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn seed_watchlist_resolves_against_catalog() {
        let catalog = catalog();
        let list = seed_watchlist();
        assert_eq!(list.resolve(&catalog).len(), 3);
        let summary = list.summary(&catalog);
        assert_eq!(summary.max, Some(28.6));
        assert!((summary.mean.unwrap() - 14.6).abs() < 1e-9);
    }

    #[test]
    fn correlations_for_home_strategies_only() {
        let table = seed_correlations();
        assert_eq!(table.for_strategy("1").len(), 4);
        assert_eq!(table.for_strategy("3")[3].percent_label(), "+85%");
        assert!(table.for_strategy("5").is_empty());
    }

    #[test]
    fn seed_portfolio_stats() {
        let stats = seed_portfolio().stats();
        assert!((stats.total_value - 98_081.75).abs() < 1e-6);
        assert_eq!(stats.active_count, 3);
        assert_eq!(stats.monthly_change, Some(3_081.0));
        assert_eq!(stats.best_performer.map(|(name, _)| name).as_deref(), Some("Volatility Fade"));
    }

    #[test]
    fn seed_dashboard_starts_with_two_unread() {
        let state = seed_dashboard(FilterCriteria::default());
        assert_eq!(state.unread_count(), 2);
        assert_eq!(state.watchlist.len(), 3);
        assert_eq!(state.profile.current().member_since(), "March 2024");
        assert_eq!(state.settings.get("twoFactor"), Some(true));
    }
}
