//! CLI integration tests.
//!
//! Tests cover:
//! - Config loading and validation with real INI files on disk
//! - Catalog selection (built-in vs `[catalog] path`)
//! - Command dispatch and the error kinds behind each exit code
//! - The compiled binary's exit statuses

mod common;

use clap::Parser;
use common::*;
use std::path::PathBuf;
use std::process::Command as Process;
use stratdeck::adapters::file_config_adapter::FileConfigAdapter;
use stratdeck::cli::{self, Cli, Command};
use stratdeck::domain::config_validation::{filter_baseline, validate_config};
use stratdeck::domain::error::DeckError;
use stratdeck::domain::filter::ValueRange;

const VALID_INI: &str = r#"
[web]
listen = 127.0.0.1:8088
static_dir = static

[filter]
return_min = 0
return_max = 60
sharpe_max = 2.5

[log]
level = warn
"#;

fn parse(args: &[&str]) -> Cli {
    let mut full = vec!["stratdeck"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap()
}

fn dispatch(args: &[&str], config: &FileConfigAdapter) -> Result<(), DeckError> {
    let cli = parse(args);
    cli::dispatch(cli.command, config, cli.config.as_ref())
}

mod config_loading {
    use super::*;

    #[test]
    fn valid_file_loads_and_validates() {
        let file = write_temp_file(VALID_INI);
        let config = cli::load_config(&file.path().to_path_buf()).unwrap();
        assert!(validate_config(&config).is_ok());
        let baseline = filter_baseline(&config).unwrap();
        assert_eq!(baseline.return_range, ValueRange::new(0.0, 60.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(cli::load_config(&PathBuf::from("/nonexistent/stratdeck.ini")).is_err());
    }

    #[test]
    fn check_config_requires_a_path() {
        let err = dispatch(&["check-config"], &FileConfigAdapter::empty()).unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput { .. }));
    }

    #[test]
    fn check_config_accepts_valid_file() {
        let file = write_temp_file(VALID_INI);
        let path = file.path().to_str().unwrap().to_string();
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        assert!(dispatch(&["check-config", "-c", &path], &config).is_ok());
    }

    #[test]
    fn check_config_rejects_bad_listen() {
        let file = write_temp_file("[web]\nlisten = not-an-address\n");
        let path = file.path().to_str().unwrap().to_string();
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        let err = dispatch(&["check-config", "-c", &path], &config).unwrap_err();
        assert_eq!(err.exit_status(), 2);
    }
}

mod catalog_selection {
    use super::*;

    #[test]
    fn built_in_catalog_by_default() {
        let catalog = cli::load_catalog(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn csv_catalog_from_config() {
        let csv = write_temp_file(&csv_catalog(&[
            csv_row("x1", "Alpha", "Stocks", "5.5", "Low"),
            csv_row("x2", "Beta", "Crypto;High Risk", "30", "High"),
        ]));
        let ini = format!("[catalog]\npath = {}\n", csv.path().display());
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let catalog = cli::load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("x2").unwrap().tags, vec!["Crypto"]);
    }

    #[test]
    fn inconsistent_csv_catalog_is_a_catalog_error() {
        let csv = write_temp_file(&csv_catalog(&[csv_row("x1", "Alpha", "Low Risk", "5", "High")]));
        let ini = format!("[catalog]\npath = {}\n", csv.path().display());
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let err = cli::load_catalog(&config).unwrap_err();
        assert_eq!(err.exit_status(), 3);
    }
}

mod commands {
    use super::*;

    #[test]
    fn list_with_filters_succeeds() {
        let config = FileConfigAdapter::empty();
        assert!(dispatch(&["list"], &config).is_ok());
        assert!(dispatch(&["list", "--risk", "high", "--asset", "Crypto"], &config).is_ok());
        assert!(dispatch(&["list", "--level", "Low", "--max-return", "20"], &config).is_ok());
    }

    #[test]
    fn list_rejects_unknown_risk() {
        let err = dispatch(&["list", "--risk", "Extreme"], &FileConfigAdapter::empty()).unwrap_err();
        assert_eq!(err.exit_status(), 5);
    }

    #[test]
    fn list_rejects_inverted_return_range() {
        let err = dispatch(
            &["list", "--min-return", "50", "--max-return", "10"],
            &FileConfigAdapter::empty(),
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput { .. }));
    }

    #[test]
    fn show_unknown_strategy_is_not_found() {
        let err = dispatch(&["show", "99"], &FileConfigAdapter::empty()).unwrap_err();
        assert!(matches!(err, DeckError::UnknownStrategy { ref id } if id == "99"));
        assert_eq!(err.exit_status(), 4);
    }

    #[test]
    fn watchlist_toggle_of_unknown_id_fails() {
        let err = dispatch(&["watchlist", "--toggle", "nope"], &FileConfigAdapter::empty()).unwrap_err();
        assert_eq!(err.exit_status(), 4);
        assert!(dispatch(&["watchlist", "--toggle", "1", "-q", "algo"], &FileConfigAdapter::empty()).is_ok());
    }

    #[test]
    fn notifications_and_portfolio_succeed() {
        let config = FileConfigAdapter::empty();
        assert!(dispatch(&["portfolio"], &config).is_ok());
        assert!(dispatch(&["notifications", "--mark-read", "1", "--clear"], &config).is_ok());
    }

    #[test]
    fn validate_catalog_reports_bad_rows() {
        let good = write_temp_file(&csv_catalog(&[csv_row("1", "Alpha", "Stocks", "5", "Low")]));
        let path = good.path().to_str().unwrap().to_string();
        assert!(dispatch(&["validate-catalog", &path], &FileConfigAdapter::empty()).is_ok());

        let bad = write_temp_file(&csv_catalog(&[csv_row("1", "Alpha", "Stocks", "5", "Extreme")]));
        let path = bad.path().to_str().unwrap().to_string();
        let err = dispatch(&["validate-catalog", &path], &FileConfigAdapter::empty()).unwrap_err();
        assert!(matches!(err, DeckError::CatalogRow(ref row) if row.row == 2));
    }

    #[test]
    fn parsed_command_variants() {
        assert!(matches!(parse(&["serve"]).command, Command::Serve));
        assert!(matches!(parse(&["show", "3"]).command, Command::Show { ref id } if id == "3"));
    }
}

mod binary {
    use super::*;

    fn stratdeck(args: &[&str]) -> std::process::Output {
        Process::new(env!("CARGO_BIN_EXE_stratdeck"))
            .args(args)
            .output()
            .unwrap()
    }

    #[test]
    fn list_prints_table() {
        let out = stratdeck(&["--no-banner", "list", "--risk", "Low"]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("Bond Arbitrage Pro"));
        assert!(stdout.contains("1 strategy"));
    }

    #[test]
    fn banner_goes_to_stderr() {
        let out = stratdeck(&["portfolio"]);
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("Welcome to the Demo"));
        assert!(!String::from_utf8_lossy(&out.stdout).contains("Welcome to the Demo"));
    }

    #[test]
    fn banner_printed_once_and_skippable() {
        let out = stratdeck(&["portfolio"]);
        assert_eq!(String::from_utf8_lossy(&out.stderr).matches("Welcome to the Demo").count(), 1);

        let quiet = stratdeck(&["--no-banner", "portfolio"]);
        assert!(!String::from_utf8_lossy(&quiet.stderr).contains("Welcome to the Demo"));
    }

    #[test]
    fn mark_all_read_clears_unread_count() {
        let out = stratdeck(&["--no-banner", "notifications", "--mark-all-read"]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.starts_with("0 unread"));
        assert!(stdout.contains("Risk Alert"));
        assert!(!stdout.contains("* ["));
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(stratdeck(&["--no-banner", "show", "99"]).status.code(), Some(4));
        assert_eq!(stratdeck(&["--no-banner", "list", "--risk", "Extreme"]).status.code(), Some(5));
        assert_eq!(stratdeck(&["-c", "/nonexistent.ini", "portfolio"]).status.code(), Some(2));
        assert_eq!(stratdeck(&["validate-catalog", "/nonexistent.csv"]).status.code(), Some(3));
    }
}
