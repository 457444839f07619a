//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use crate::domain::error::DeckError;

/// Parses a `[log] level` / `--log-level` value.
pub fn parse_level(raw: &str) -> Result<Level, DeckError> {
    raw.trim()
        .parse::<Level>()
        .map_err(|_| DeckError::invalid_input("log level", format!("'{raw}' is not a log level")))
}

pub fn targets(level: Level) -> Targets {
    Targets::new()
        .with_target("tower_sessions", Level::WARN)
        .with_target("tower_sessions_core", Level::WARN)
        .with_default(level)
}

/// Installs a stderr fmt layer. A second call is a no-op.
pub fn init(level: Level) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(targets(level));
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), Level::WARN);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn session_noise_is_capped() {
        let filter = targets(Level::TRACE);
        assert!(filter.would_enable("stratdeck::domain", &Level::TRACE));
        assert!(!filter.would_enable("tower_sessions", &Level::DEBUG));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(Level::INFO);
        init(Level::DEBUG);
    }
}
