//! CSV strategy catalog adapter.
//!
//! One strategy per row. `tags` and `sparkline` hold `;`-separated lists.
//! Tags ending in " Risk" are accepted only when they agree with the `risk`
//! column and are dropped on load, since the risk tag is derived.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use csv::StringRecord;

use crate::domain::error::{CatalogRowError, DeckError};
use crate::domain::strategy::{Performance, RiskLevel, Strategy, format_return, parse_percent};
use crate::ports::catalog_port::CatalogPort;

pub const COLUMNS: [&str; 17] = [
    "id",
    "name",
    "description",
    "tags",
    "return_percent",
    "risk",
    "sparkline",
    "asset_class",
    "instrument",
    "trigger",
    "profit_scenario",
    "annualized_return",
    "sharpe_ratio",
    "max_drawdown",
    "risk_analysis",
    "example_trade",
    "how_it_works",
];

pub struct CsvCatalogAdapter {
    path: PathBuf,
}

impl CsvCatalogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses catalog text; `source_name` only labels errors.
    pub fn parse(content: &str, source_name: &str) -> Result<Vec<Strategy>, DeckError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| DeckError::CatalogLoad {
            source_name: source_name.to_string(),
            reason: format!("CSV header error: {e}"),
        })?;
        let columns = ColumnIndex::new(headers, source_name)?;

        let mut strategies = Vec::new();
        let mut seen = HashSet::new();

        for (i, result) in rdr.records().enumerate() {
            // header is line 1
            let row = i + 2;
            let record = result.map_err(|e| DeckError::CatalogLoad {
                source_name: source_name.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;

            let strategy = parse_row(&record, &columns, row)?;
            if !seen.insert(strategy.id.clone()) {
                return Err(row_error(row, format!("duplicate id '{}'", strategy.id)));
            }
            strategies.push(strategy);
        }

        if strategies.is_empty() {
            return Err(DeckError::CatalogLoad {
                source_name: source_name.to_string(),
                reason: "catalog has no strategies".to_string(),
            });
        }
        Ok(strategies)
    }
}

impl CatalogPort for CsvCatalogAdapter {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Strategy>, DeckError> {
        let content = fs::read_to_string(&self.path).map_err(|e| DeckError::CatalogLoad {
            source_name: self.source_name(),
            reason: format!("failed to read file: {e}"),
        })?;
        Self::parse(&content, &self.source_name())
    }
}

struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord, source_name: &str) -> Result<Self, DeckError> {
        let mut positions = HashMap::new();
        for column in COLUMNS {
            let position = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or_else(|| DeckError::CatalogLoad {
                    source_name: source_name.to_string(),
                    reason: format!("missing column '{column}'"),
                })?;
            positions.insert(column, position);
        }
        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }
}

fn row_error(row: usize, message: impl Into<String>) -> DeckError {
    DeckError::CatalogRow(CatalogRowError {
        row,
        message: message.into(),
    })
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<Strategy, DeckError> {
    let field = |column: &str| columns.get(record, column).to_string();

    let id = field("id");
    if id.is_empty() {
        return Err(row_error(row, "empty id"));
    }

    let risk_raw = field("risk");
    let risk: RiskLevel = risk_raw
        .parse()
        .map_err(|_| row_error(row, format!("unknown risk level '{risk_raw}'")))?;

    let mut tags = Vec::new();
    for tag in split_list(&field("tags")) {
        if tag.ends_with(" Risk") {
            match RiskLevel::from_tag(&tag) {
                Some(level) if level == risk => continue,
                _ => {
                    return Err(row_error(
                        row,
                        format!("tag '{tag}' disagrees with risk level {risk}"),
                    ));
                }
            }
        }
        tags.push(tag);
    }

    let mut sparkline = Vec::new();
    for sample in split_list(&field("sparkline")) {
        let value = sample
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| row_error(row, format!("sparkline sample '{sample}' is not a number")))?;
        sparkline.push(value);
    }

    let return_percent = field("return_percent");
    let return_display = match parse_percent(&return_percent) {
        Some(value) => format_return(value),
        None => return_percent.clone(),
    };

    Ok(Strategy {
        id,
        name: field("name"),
        description: field("description"),
        tags,
        return_display,
        return_percent,
        risk,
        sparkline,
        asset_class: field("asset_class"),
        instrument: field("instrument"),
        trigger: field("trigger"),
        profit_scenario: field("profit_scenario"),
        performance: Performance {
            annualized_return: field("annualized_return"),
            sharpe_ratio: field("sharpe_ratio"),
            max_drawdown: field("max_drawdown"),
        },
        risk_analysis: field("risk_analysis"),
        example_trade: field("example_trade"),
        how_it_works: field("how_it_works"),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
