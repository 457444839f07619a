//! Configuration validation.
//!
//! Every section is optional; validation only rejects values that are
//! present and wrong.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::error::DeckError;
use crate::domain::filter::{FilterCriteria, ValueRange};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), DeckError> {
    validate_web_config(config)?;
    validate_filter_config(config)?;
    validate_log_config(config)?;
    Ok(())
}

pub fn validate_web_config(config: &dyn ConfigPort) -> Result<(), DeckError> {
    listen_addr(config)?;
    if let Some(dir) = config.get_string("web", "static_dir") {
        if dir.trim().is_empty() {
            return Err(DeckError::ConfigInvalid {
                section: "web".to_string(),
                key: "static_dir".to_string(),
                reason: "static_dir must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_filter_config(config: &dyn ConfigPort) -> Result<(), DeckError> {
    filter_baseline(config).map(|_| ())
}

pub fn validate_log_config(config: &dyn ConfigPort) -> Result<(), DeckError> {
    log_level(config).map(|_| ())
}

/// `[web] listen`, or the default address.
pub fn listen_addr(config: &dyn ConfigPort) -> Result<SocketAddr, DeckError> {
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim().parse().map_err(|_| DeckError::ConfigInvalid {
        section: "web".to_string(),
        key: "listen".to_string(),
        reason: format!("'{raw}' is not a socket address"),
    })
}

/// `[web] static_dir`, or the default directory.
pub fn static_dir(config: &dyn ConfigPort) -> PathBuf {
    config
        .get_string("web", "static_dir")
        .map(|dir| dir.trim().to_string())
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
        .into()
}

/// `[web] secure_cookie`; off unless the dashboard sits behind TLS.
pub fn secure_cookie(config: &dyn ConfigPort) -> bool {
    config.get_bool("web", "secure_cookie", false)
}

/// `[catalog] path`, when a CSV catalog replaces the built-in one.
pub fn catalog_path(config: &dyn ConfigPort) -> Option<PathBuf> {
    config
        .get_string("catalog", "path")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// `[log] level`, lowercased, or the default level.
pub fn log_level(config: &dyn ConfigPort) -> Result<String, DeckError> {
    let level = config
        .get_string("log", "level")
        .map(|l| l.trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(DeckError::ConfigInvalid {
            section: "log".to_string(),
            key: "level".to_string(),
            reason: format!("level must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
    Ok(level)
}

/// Default filter criteria with any `[filter]` range overrides applied.
pub fn filter_baseline(config: &dyn ConfigPort) -> Result<FilterCriteria, DeckError> {
    let return_range = filter_range(config, "return", ValueRange::RETURN_DEFAULT)?;
    let drawdown_range = filter_range(config, "drawdown", ValueRange::DRAWDOWN_DEFAULT)?;
    let sharpe_range = filter_range(config, "sharpe", ValueRange::SHARPE_DEFAULT)?;
    if sharpe_range.low < 0.0 {
        return Err(DeckError::ConfigInvalid {
            section: "filter".to_string(),
            key: "sharpe_min".to_string(),
            reason: "sharpe_min must be non-negative".to_string(),
        });
    }
    Ok(FilterCriteria::with_ranges(
        return_range,
        drawdown_range,
        sharpe_range,
    ))
}

fn filter_range(
    config: &dyn ConfigPort,
    name: &str,
    default: ValueRange,
) -> Result<ValueRange, DeckError> {
    let min_key = format!("{name}_min");
    let max_key = format!("{name}_max");
    let low = filter_bound(config, &min_key, default.low)?;
    let high = filter_bound(config, &max_key, default.high)?;
    if low > high {
        return Err(DeckError::ConfigInvalid {
            section: "filter".to_string(),
            key: min_key.clone(),
            reason: format!("{min_key} must not exceed {max_key}"),
        });
    }
    Ok(ValueRange::new(low, high))
}

fn filter_bound(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, DeckError> {
    let Some(raw) = config.get_string("filter", key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DeckError::ConfigInvalid {
            section: "filter".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a finite number, got '{raw}'"),
        }),
    }
}
