//! Plain-text rendering for the command line.

use crate::domain::catalog::Catalog;
use crate::domain::correlation::MarketCorrelation;
use crate::domain::disclaimer::{DISCLAIMER_BODY, DISCLAIMER_TITLE};
use crate::domain::filter::FilterOutcome;
use crate::domain::format::{currency, signed_currency, signed_percent, whole_currency};
use crate::domain::notification::{EMPTY_NOTIFICATIONS_MESSAGE, NotificationCenter};
use crate::domain::portfolio::Portfolio;
use crate::domain::strategy::{Strategy, format_return};
use crate::domain::watchlist::Watchlist;

pub fn disclaimer_banner() -> String {
    format!("{DISCLAIMER_TITLE}\n{DISCLAIMER_BODY}\n")
}

pub fn strategy_table(outcome: &FilterOutcome<'_>) -> String {
    if let Some(message) = outcome.empty_message() {
        return format!("{message}\n");
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<24} {:>8} {:<7} TAGS\n",
        "ID", "NAME", "RETURN", "RISK"
    ));
    for s in &outcome.strategies {
        out.push_str(&format!(
            "{:<4} {:<24} {:>8} {:<7} {}\n",
            s.id,
            s.name,
            s.return_display,
            s.risk,
            s.display_tags().join(", ")
        ));
    }
    out.push_str(&format!("{} strateg{}\n", outcome.len(), plural_y(outcome.len())));
    out
}

pub fn strategy_detail(strategy: &Strategy, correlations: &[MarketCorrelation]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", strategy.name, strategy.return_display));
    out.push_str(&strategy.description);
    out.push('\n');
    out.push_str(&format!("Tags: {}\n", strategy.display_tags().join(", ")));
    let gauge: String = (1..=3)
        .map(|i| if i <= strategy.risk.gauge_level() { '#' } else { '.' })
        .collect();
    out.push_str(&format!("Risk: [{gauge}] {}\n\n", strategy.risk.tag()));

    let facts = [
        ("Asset class", &strategy.asset_class),
        ("Instrument", &strategy.instrument),
        ("Trigger", &strategy.trigger),
        ("Profits when", &strategy.profit_scenario),
        ("Annualized return", &strategy.performance.annualized_return),
        ("Sharpe ratio", &strategy.performance.sharpe_ratio),
        ("Max drawdown", &strategy.performance.max_drawdown),
    ];
    for (label, value) in facts {
        if !value.is_empty() {
            out.push_str(&format!("{label:<18} {value}\n"));
        }
    }

    for (title, body) in [
        ("Risk analysis", &strategy.risk_analysis),
        ("Example trade", &strategy.example_trade),
        ("How it works", &strategy.how_it_works),
    ] {
        if !body.is_empty() {
            out.push_str(&format!("\n{title}\n  {body}\n"));
        }
    }

    if !correlations.is_empty() {
        out.push_str("\nMarket correlation\n");
        for c in correlations {
            out.push_str(&format!(
                "  {:<8} {:>5}  {}\n",
                c.market,
                c.percent_label(),
                c.description
            ));
        }
    }
    out
}

pub fn watchlist_view(watchlist: &Watchlist, catalog: &Catalog, query: &str) -> String {
    let matches = watchlist.search(catalog, query);
    let summary = watchlist.summary(catalog);

    let mut out = format!(
        "Total items: {}  Avg return: {}  Best performer: {}\n",
        summary.count,
        format_return(summary.mean_or_zero()),
        format_return(summary.max_or_zero())
    );
    if matches.is_empty() {
        out.push_str(&format!("{}\n", watchlist.empty_message(query)));
        return out;
    }
    for w in matches {
        out.push_str(&format!(
            "{:<4} {:<24} {:>8} {:<7} added {}\n",
            w.strategy.id, w.strategy.name, w.strategy.return_display, w.strategy.risk, w.entry.added
        ));
    }
    out
}

pub fn portfolio_view(portfolio: &Portfolio) -> String {
    let stats = portfolio.stats();
    let mut out = String::new();

    out.push_str(&format!("Total value:       {}\n", currency(stats.total_value)));
    out.push_str(&format!("Active strategies: {}\n", stats.active_count));
    let monthly = match (stats.monthly_change, stats.monthly_change_pct) {
        (Some(change), Some(pct)) => {
            format!("{} ({})", signed_currency(change), signed_percent(pct))
        }
        (Some(change), None) => signed_currency(change),
        _ => "n/a".to_string(),
    };
    out.push_str(&format!("Monthly return:    {monthly}\n"));
    let best = match &stats.best_performer {
        Some((name, ret)) => format!("{name} ({})", format_return(*ret)),
        None => "n/a".to_string(),
    };
    out.push_str(&format!("Best performer:    {best}\n"));

    if !portfolio.history.is_empty() {
        out.push('\n');
        for month in &portfolio.history {
            out.push_str(&format!("{:<4} {:>10}\n", month.month, whole_currency(month.value)));
        }
    }

    if !portfolio.positions.is_empty() {
        out.push('\n');
        for p in &portfolio.positions {
            out.push_str(&format!(
                "{:<24} {:>3}% {:>12} {:>7} {:>8} {}\n",
                p.name,
                p.allocation,
                currency(p.value),
                format_return(p.return_percent),
                signed_currency(p.pnl),
                p.status
            ));
        }
    }
    out
}

pub fn notifications_view(center: &NotificationCenter) -> String {
    if center.is_empty() {
        return format!("{EMPTY_NOTIFICATIONS_MESSAGE}\n");
    }
    let mut out = format!("{} unread\n", center.unread_count());
    for n in center.items() {
        let marker = if n.is_read { ' ' } else { '*' };
        out.push_str(&format!("{marker} [{}] {} ({})\n", n.kind, n.title, n.timestamp));
        out.push_str(&format!("    {}\n", n.message));
        if let Some(amount) = &n.amount {
            out.push_str(&format!("    {amount}\n"));
        }
    }
    out
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 { "y" } else { "ies" }
}
