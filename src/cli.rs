//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_catalog_adapter::CsvCatalogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_session::MemorySessionFlags;
use crate::adapters::seed_data::{SeedCatalog, seed_correlations, seed_dashboard, seed_portfolio};
use crate::adapters::text_view;
use crate::domain::catalog::Catalog;
use crate::domain::config_validation::{
    catalog_path, filter_baseline, listen_addr, log_level, static_dir, validate_config,
};
use crate::domain::disclaimer;
use crate::domain::error::DeckError;
use crate::domain::filter::{self, ASSET_CLASSES, QuickRisk, ValueRange};
use crate::domain::strategy::RiskLevel;
use crate::logging;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::session_port::SessionFlagPort;

#[derive(Parser, Debug)]
#[command(name = "stratdeck", about = "Trading strategy dashboard")]
pub struct Cli {
    /// INI config file; every section is optional
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `[log] level`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Skip the demo disclaimer banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List strategies, optionally filtered
    List {
        /// Quick-select risk: All, Low, Medium or High
        #[arg(long, default_value = "All")]
        risk: String,
        /// Advanced risk filter, repeatable
        #[arg(long = "level")]
        levels: Vec<String>,
        /// Asset class filter, repeatable
        #[arg(long = "asset")]
        assets: Vec<String>,
        #[arg(long, allow_hyphen_values = true)]
        min_return: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        max_return: Option<f64>,
    },
    /// Show one strategy in detail
    Show { id: String },
    /// Show the watchlist
    Watchlist {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Follow or unfollow a strategy before showing, repeatable
        #[arg(long)]
        toggle: Vec<String>,
    },
    /// Show portfolio holdings and statistics
    Portfolio,
    /// Show notifications
    Notifications {
        #[arg(long)]
        mark_read: Vec<String>,
        #[arg(long)]
        mark_all_read: bool,
        #[arg(long)]
        clear: bool,
    },
    /// Validate a CSV strategy catalog
    ValidateCatalog { path: PathBuf },
    /// Validate a config file and print the resolved settings
    CheckConfig,
    /// Start the web dashboard
    Serve,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match prepare(cli.config.as_ref(), cli.log_level.as_deref()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut flags = MemorySessionFlags::new();
    if !cli.no_banner && shows_banner(&cli.command) {
        if let Some(banner) = banner_once(&mut flags) {
            eprint!("{banner}");
        }
    }

    match dispatch(cli.command, &config, cli.config.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Runs one command against an already loaded config.
pub fn dispatch(
    command: Command,
    config: &FileConfigAdapter,
    config_path: Option<&PathBuf>,
) -> Result<(), DeckError> {
    match command {
        Command::List {
            risk,
            levels,
            assets,
            min_return,
            max_return,
        } => run_list(config, &risk, &levels, &assets, min_return, max_return),
        Command::Show { id } => run_show(config, &id),
        Command::Watchlist { query, toggle } => run_watchlist(config, &query, &toggle),
        Command::Portfolio => run_portfolio(),
        Command::Notifications {
            mark_read,
            mark_all_read,
            clear,
        } => run_notifications(config, &mark_read, mark_all_read, clear),
        Command::ValidateCatalog { path } => run_validate_catalog(path),
        Command::CheckConfig => run_check_config(config, config_path),
        Command::Serve => run_serve(config),
    }
}

/// Returns the banner while the disclaimer is pending and records it as shown.
fn banner_once(flags: &mut dyn SessionFlagPort) -> Option<String> {
    if !disclaimer::is_pending(flags) {
        return None;
    }
    disclaimer::acknowledge(flags);
    Some(text_view::disclaimer_banner())
}

fn shows_banner(command: &Command) -> bool {
    !matches!(
        command,
        Command::ValidateCatalog { .. } | Command::CheckConfig | Command::Serve
    )
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DeckError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Loads and validates the config, then installs logging.
fn prepare(config_path: Option<&PathBuf>, log_override: Option<&str>) -> Result<FileConfigAdapter, ExitCode> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };

    let level = validate_config(&config)
        .and_then(|()| match log_override {
            Some(raw) => logging::parse_level(raw),
            None => log_level(&config).and_then(|l| logging::parse_level(&l)),
        })
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })?;
    logging::init(level);
    Ok(config)
}

/// The `[catalog] path` CSV file when set, otherwise the built-in catalog.
pub fn load_catalog(config: &FileConfigAdapter) -> Result<Catalog, DeckError> {
    let port: Box<dyn CatalogPort> = match catalog_path(config) {
        Some(path) => Box::new(CsvCatalogAdapter::new(path)),
        None => Box::new(SeedCatalog),
    };
    let catalog = Catalog::new(port.load()?)?;
    tracing::info!(source = %port.source_name(), strategies = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn run_list(
    config: &FileConfigAdapter,
    risk: &str,
    levels: &[String],
    assets: &[String],
    min_return: Option<f64>,
    max_return: Option<f64>,
) -> Result<(), DeckError> {
    let catalog = load_catalog(config)?;
    let quick: QuickRisk = risk.parse()?;

    let mut criteria = filter_baseline(config)?;
    for level in levels {
        criteria.set_risk_level(level.parse::<RiskLevel>()?, true);
    }
    for asset in assets {
        criteria.set_asset_class(canonical_asset_class(asset)?, true);
    }
    if min_return.is_some() || max_return.is_some() {
        let current = criteria.return_range;
        criteria.return_range = ValueRange::new(
            min_return.unwrap_or(current.low),
            max_return.unwrap_or(current.high),
        );
    }
    criteria.validate()?;

    let outcome = filter::apply(catalog.strategies(), quick, &criteria);
    print!("{}", text_view::strategy_table(&outcome));
    Ok(())
}

fn canonical_asset_class(raw: &str) -> Result<&'static str, DeckError> {
    ASSET_CLASSES
        .into_iter()
        .find(|class| class.eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            DeckError::invalid_input(
                "asset class",
                format!("'{raw}' is not one of {}", ASSET_CLASSES.join(", ")),
            )
        })
}

fn run_show(config: &FileConfigAdapter, id: &str) -> Result<(), DeckError> {
    let catalog = load_catalog(config)?;
    let strategy = catalog.require(id)?;
    let correlations = seed_correlations();
    print!("{}", text_view::strategy_detail(strategy, correlations.for_strategy(id)));
    Ok(())
}

fn run_watchlist(config: &FileConfigAdapter, query: &str, toggle: &[String]) -> Result<(), DeckError> {
    let catalog = load_catalog(config)?;
    let mut dashboard = seed_dashboard(filter_baseline(config)?);
    for id in toggle {
        let followed = dashboard.toggle_watchlist(&catalog, id)?;
        eprintln!("{} {id}", if followed { "followed" } else { "unfollowed" });
    }
    print!("{}", text_view::watchlist_view(&dashboard.watchlist, &catalog, query));
    Ok(())
}

fn run_portfolio() -> Result<(), DeckError> {
    print!("{}", text_view::portfolio_view(&seed_portfolio()));
    Ok(())
}

fn run_notifications(
    config: &FileConfigAdapter,
    mark_read: &[String],
    mark_all_read: bool,
    clear: bool,
) -> Result<(), DeckError> {
    let mut dashboard = seed_dashboard(filter_baseline(config)?);
    for id in mark_read {
        if !dashboard.mark_read(id) {
            eprintln!("warning: no unread notification '{id}'");
        }
    }
    if mark_all_read {
        dashboard.mark_all_read();
    }
    if clear {
        dashboard.clear_notifications();
    }
    print!("{}", text_view::notifications_view(&dashboard.notifications));
    Ok(())
}

fn run_validate_catalog(path: PathBuf) -> Result<(), DeckError> {
    let display = path.display().to_string();
    let adapter = CsvCatalogAdapter::new(path);
    let catalog = Catalog::new(adapter.load()?)?;
    println!("{display}: {} strategies OK", catalog.len());
    Ok(())
}

fn run_check_config(config: &FileConfigAdapter, path: Option<&PathBuf>) -> Result<(), DeckError> {
    let Some(path) = path else {
        return Err(DeckError::invalid_input("config", "pass --config <file>"));
    };
    let baseline = filter_baseline(config)?;
    println!("{}: OK", path.display());
    println!("  listen:     {}", listen_addr(config)?);
    println!("  static_dir: {}", static_dir(config).display());
    match catalog_path(config) {
        Some(catalog) => println!("  catalog:    {}", catalog.display()),
        None => println!("  catalog:    built-in"),
    }
    println!("  log level:  {}", log_level(config)?);
    for (name, range) in [
        ("return", baseline.return_range),
        ("drawdown", baseline.drawdown_range),
        ("sharpe", baseline.sharpe_range),
    ] {
        println!("  {name:<10}  {} .. {}", range.low, range.high);
    }
    Ok(())
}

fn run_serve(config: &FileConfigAdapter) -> Result<(), DeckError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use crate::domain::config_validation::secure_cookie;
        use std::sync::Arc;

        let catalog = load_catalog(config)?;
        let addr = listen_addr(config)?;
        let state = AppState {
            catalog: Arc::new(catalog),
            correlations: seed_correlations(),
            portfolio: seed_portfolio(),
            baseline: filter_baseline(config)?,
            static_dir: static_dir(config),
            secure_cookie: secure_cookie(config),
        };
        let router = build_router(state);

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "web dashboard listening");
            eprintln!("Serving on http://{addr}");
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config;
        Err(DeckError::invalid_input(
            "command",
            "the web feature is required for serve",
        ))
    }
}
