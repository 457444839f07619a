#![allow(dead_code)]

use std::io::Write;

use stratdeck::adapters::csv_catalog_adapter::COLUMNS;
use stratdeck::domain::strategy::{Performance, RiskLevel, Strategy, format_return};

/// Minimal strategy for filter scenarios.
pub fn make_strategy(id: &str, risk: RiskLevel, tags: &[&str], return_percent: &str) -> Strategy {
    let return_display = return_percent
        .parse::<f64>()
        .map(format_return)
        .unwrap_or_else(|_| return_percent.to_string());
    Strategy {
        id: id.to_string(),
        name: format!("Strategy {id}"),
        description: format!("Test strategy {id}"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        return_display,
        return_percent: return_percent.to_string(),
        risk,
        sparkline: vec![1.0, 2.0, 3.0],
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

/// The three-strategy catalog used by the filter scenarios.
pub fn scenario_catalog() -> Vec<Strategy> {
    vec![
        make_strategy("a", RiskLevel::High, &["Crypto"], "45.2"),
        make_strategy("b", RiskLevel::Medium, &["Stocks"], "12.8"),
        make_strategy("c", RiskLevel::High, &["Stocks"], "24.5"),
    ]
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// One CSV catalog row with placeholder prose columns.
pub fn csv_row(id: &str, name: &str, tags: &str, return_percent: &str, risk: &str) -> String {
    format!(
        "{id},{name},Desc {id},{tags},{return_percent},{risk},1;3;2,Stocks,Options,Trigger,Scenario,10%,1.1,-8%,Analysis,Example,How"
    )
}

pub fn csv_catalog(rows: &[String]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}
