//! HTTP request handlers for web adapter.
//!
//! Every handler loads the viewer's [`DashboardState`] from the session,
//! applies at most one action, stores it back and renders. HTMX requests get
//! the fragment; everything else gets the full layout.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;

use crate::adapters::chart_svg::{performance_svg, sparkline_svg};
use crate::adapters::memory_session::MemorySessionFlags;
use crate::adapters::seed_data::seed_dashboard;
use crate::domain::disclaimer::{self, ACKNOWLEDGE_LABEL, DISCLAIMER_BODY, DISCLAIMER_TITLE};
use crate::domain::error::DeckError;
use crate::domain::filter::{ASSET_CLASSES, FilterCriteria, INSTRUMENTS, ValueRange};
use crate::domain::format::{currency, signed_currency, signed_percent};
use crate::domain::notification::EMPTY_NOTIFICATIONS_MESSAGE;
use crate::domain::session::{DashboardState, Tab};
use crate::domain::strategy::{RiskLevel, format_return};

use super::templates::{
    FiltersTemplate, HomeTemplate, LayoutTemplate, NavTab, NotificationsTemplate,
    PortfolioTemplate, PositionRow, ProfileTemplate, RiskPill, StatTile, StrategyCard,
    StrategyTemplate, WatchButtonTemplate, WatchlistRow, WatchlistTemplate, risk_class,
};
use super::{AppState, WebError, is_htmx_request};

const DASHBOARD_KEY: &str = "dashboard";
const FLAGS_KEY: &str = "flags";

async fn load_dashboard(state: &AppState, session: &Session) -> Result<DashboardState, WebError> {
    let stored = session.get::<DashboardState>(DASHBOARD_KEY).await?;
    Ok(stored.unwrap_or_else(|| seed_dashboard(state.baseline.clone())))
}

async fn store_dashboard(session: &Session, dashboard: &DashboardState) -> Result<(), WebError> {
    session.insert(DASHBOARD_KEY, dashboard).await?;
    Ok(())
}

async fn load_flags(session: &Session) -> Result<MemorySessionFlags, WebError> {
    Ok(session
        .get::<MemorySessionFlags>(FLAGS_KEY)
        .await?
        .unwrap_or_default())
}

/// Wraps a rendered fragment in the layout unless HTMX asked for it.
async fn render_page(
    session: &Session,
    headers: &HeaderMap,
    dashboard: &DashboardState,
    title: &str,
    content: String,
) -> Result<Response, WebError> {
    if is_htmx_request(headers) {
        return Ok(Html(content).into_response());
    }

    let flags = load_flags(session).await?;
    let page = LayoutTemplate {
        title,
        tabs: NavTab::all(dashboard.tab),
        unread: dashboard.unread_count(),
        show_disclaimer: disclaimer::is_pending(&flags),
        disclaimer_title: DISCLAIMER_TITLE,
        disclaimer_body: DISCLAIMER_BODY,
        acknowledge_label: ACKNOWLEDGE_LABEL,
        content: &content,
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub risk: Option<String>,
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<HomeQuery>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    if let Some(risk) = query.risk.as_deref() {
        dashboard.select_quick_risk(risk.parse()?);
    }
    dashboard.select_tab(Tab::Home);
    store_dashboard(&session, &dashboard).await?;

    let content = home_fragment(&state, &dashboard)?;
    render_page(&session, &headers, &dashboard, "Home", content).await
}

fn home_fragment(state: &AppState, dashboard: &DashboardState) -> Result<String, WebError> {
    let outcome = dashboard.visible(&state.catalog);
    let stats = state.portfolio.stats();
    let profile = dashboard.profile.saved();

    let monthly_change = match (stats.monthly_change, stats.monthly_change_pct) {
        (Some(change), Some(pct)) => format!(
            "{} ({}) this month",
            signed_currency(change),
            signed_percent(pct)
        ),
        (Some(change), None) => format!("{} this month", signed_currency(change)),
        _ => String::new(),
    };

    let template = HomeTemplate {
        greeting: greeting(&profile.name),
        total_value: currency(stats.total_value),
        monthly_change,
        initials: profile.initials(),
        unread: dashboard.unread_count(),
        chart: performance_svg(&state.portfolio.history),
        pills: RiskPill::all(dashboard.quick_risk),
        filters_active: dashboard.criteria.is_narrowing(),
        cards: outcome
            .strategies
            .iter()
            .map(|s| StrategyCard::new(s, dashboard.watchlist.contains(&s.id)))
            .collect(),
        empty_message: outcome.empty_message(),
    };
    Ok(template.render()?)
}

fn greeting(name: &str) -> String {
    let first = name
        .split_whitespace()
        .next()
        .map(|word| word.trim_end_matches(','))
        .unwrap_or_default();
    if first.is_empty() {
        "Good Morning".to_string()
    } else {
        format!("Good Morning, {first}")
    }
}

pub async fn acknowledge_disclaimer(session: Session, headers: HeaderMap) -> Result<Response, WebError> {
    let mut flags = load_flags(&session).await?;
    disclaimer::acknowledge(&mut flags);
    session.insert(FLAGS_KEY, &flags).await?;
    tracing::debug!("disclaimer acknowledged");

    if is_htmx_request(&headers) {
        Ok(Html(String::new()).into_response())
    } else {
        Ok(Redirect::to("/").into_response())
    }
}

pub async fn filters_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let dashboard = load_dashboard(&state, &session).await?;
    let content = FiltersTemplate::new(&dashboard.criteria).render()?;
    render_page(&session, &headers, &dashboard, "Filters", content).await
}

pub async fn apply_filters(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    let rejected = match criteria_from_form(&form, &dashboard.criteria) {
        Ok(criteria) => match criteria.validate() {
            Ok(()) => {
                dashboard.apply_filters(criteria)?;
                None
            }
            Err(e) => Some((criteria, e)),
        },
        Err(e) => Some((dashboard.criteria.clone(), e)),
    };

    // Rejected input goes back to the form with the message.
    if let Some((criteria, err)) = rejected {
        let content = FiltersTemplate::new(&criteria).with_error(err.to_string()).render()?;
        let mut response = render_page(&session, &headers, &dashboard, "Filters", content).await?;
        *response.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
        return Ok(response);
    }

    dashboard.select_tab(Tab::Home);
    store_dashboard(&session, &dashboard).await?;

    let content = home_fragment(&state, &dashboard)?;
    render_page(&session, &headers, &dashboard, "Home", content).await
}

pub async fn reset_filters(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.reset_filters();
    store_dashboard(&session, &dashboard).await?;

    let content = FiltersTemplate::new(&dashboard.criteria).render()?;
    render_page(&session, &headers, &dashboard, "Filters", content).await
}

/// Builds criteria from checkbox presence and the six range inputs.
/// Blank range inputs keep the current bound.
pub fn criteria_from_form(
    form: &HashMap<String, String>,
    current: &FilterCriteria,
) -> Result<FilterCriteria, DeckError> {
    let mut criteria = FilterCriteria::with_ranges(
        range_from_form(form, "return", current.return_range)?,
        range_from_form(form, "drawdown", current.drawdown_range)?,
        range_from_form(form, "sharpe", current.sharpe_range)?,
    );
    for level in RiskLevel::ALL {
        criteria.set_risk_level(level, form.contains_key(&format!("risk_{level}")));
    }
    for class in ASSET_CLASSES {
        criteria.set_asset_class(class, form.contains_key(&format!("asset_{class}")));
    }
    for instrument in INSTRUMENTS {
        criteria.set_instrument(instrument, form.contains_key(&format!("instrument_{instrument}")));
    }
    Ok(criteria)
}

fn range_from_form(
    form: &HashMap<String, String>,
    name: &str,
    current: ValueRange,
) -> Result<ValueRange, DeckError> {
    let bound = |suffix: &str, fallback: f64| -> Result<f64, DeckError> {
        let field = format!("{name}_{suffix}");
        match form.get(&field).map(|raw| raw.trim()) {
            None | Some("") => Ok(fallback),
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DeckError::invalid_input(field.clone(), format!("'{raw}' is not a number"))),
        }
    };
    Ok(ValueRange::new(bound("min", current.low)?, bound("max", current.high)?))
}

pub async fn strategy_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let dashboard = load_dashboard(&state, &session).await?;
    let strategy = state.catalog.require(&id)?;
    let template = StrategyTemplate::new(
        strategy,
        state.correlations.for_strategy(&id),
        dashboard.watchlist.contains(&id),
    );
    let content = template.render()?;
    render_page(&session, &headers, &dashboard, &strategy.name, content).await
}

pub async fn toggle_watchlist(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    let watched = dashboard.toggle_watchlist(&state.catalog, &id)?;
    store_dashboard(&session, &dashboard).await?;

    if is_htmx_request(&headers) {
        let button = WatchButtonTemplate { id: &id, watched };
        Ok(Html(button.render()?).into_response())
    } else {
        let back = headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Uri>().ok())
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| "/".to_string());
        Ok(Redirect::to(&back).into_response())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WatchlistQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn watchlist(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<WatchlistQuery>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.select_tab(Tab::Watchlist);
    store_dashboard(&session, &dashboard).await?;

    let summary = dashboard.watchlist.summary(&state.catalog);
    let rows: Vec<WatchlistRow> = dashboard
        .watchlist
        .search(&state.catalog, &query.q)
        .into_iter()
        .map(|w| WatchlistRow {
            id: w.strategy.id.clone(),
            name: w.strategy.name.clone(),
            description: w.strategy.description.clone(),
            return_display: w.strategy.return_display.clone(),
            risk_class: risk_class(w.strategy.risk),
            tags: w.strategy.display_tags(),
            sparkline: sparkline_svg(&w.strategy.sparkline),
            added: w.entry.added.clone(),
        })
        .collect();
    let empty_message = rows
        .is_empty()
        .then(|| dashboard.watchlist.empty_message(&query.q));

    let template = WatchlistTemplate {
        query: query.q.trim().to_string(),
        total: summary.count,
        average_return: format_return(summary.mean_or_zero()),
        best_return: format_return(summary.max_or_zero()),
        rows,
        empty_message,
    };
    let content = template.render()?;
    render_page(&session, &headers, &dashboard, "Watchlist", content).await
}

pub async fn portfolio(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.select_tab(Tab::Portfolio);
    store_dashboard(&session, &dashboard).await?;

    let stats = state.portfolio.stats();
    let monthly = StatTile {
        label: "Monthly Return",
        value: stats
            .monthly_change
            .map(signed_currency)
            .unwrap_or_else(|| "n/a".to_string()),
        change: stats.monthly_change_pct.map(signed_percent),
    };
    let best = match &stats.best_performer {
        Some((name, ret)) => StatTile {
            label: "Best Performer",
            value: name.clone(),
            change: Some(format_return(*ret)),
        },
        None => StatTile {
            label: "Best Performer",
            value: "n/a".to_string(),
            change: None,
        },
    };
    let template = PortfolioTemplate {
        chart: performance_svg(&state.portfolio.history),
        stats: vec![
            StatTile {
                label: "Total Value",
                value: currency(stats.total_value),
                change: None,
            },
            StatTile {
                label: "Active Strategies",
                value: stats.active_count.to_string(),
                change: None,
            },
            monthly,
            best,
        ],
        positions: state
            .portfolio
            .positions
            .iter()
            .map(|p| PositionRow {
                name: p.name.clone(),
                allocation: p.allocation,
                value: currency(p.value),
                return_display: format_return(p.return_percent),
                pnl: signed_currency(p.pnl),
                positive: p.is_positive(),
                status: p.status.to_string(),
            })
            .collect(),
    };
    let content = template.render()?;
    render_page(&session, &headers, &dashboard, "Portfolio", content).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub edit: bool,
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.select_tab(Tab::Profile);
    if query.edit {
        dashboard.profile.begin_edit();
    }
    store_dashboard(&session, &dashboard).await?;

    let content = profile_fragment(&dashboard, None)?;
    render_page(&session, &headers, &dashboard, "Profile", content).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub action: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `action=save` validates and commits the draft; `action=cancel` drops it.
/// A failed save re-renders the form with the message and keeps the draft.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ProfileForm>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    let mut status = StatusCode::OK;
    let mut error = None;

    match form.action.as_str() {
        "cancel" => dashboard.profile.cancel(),
        "save" => {
            if let Some(name) = form.name.as_deref() {
                dashboard.profile.set_name(name);
            }
            if let Some(email) = form.email.as_deref() {
                dashboard.profile.set_email(email);
            }
            if let Err(e) = dashboard.profile.save() {
                status = StatusCode::UNPROCESSABLE_ENTITY;
                error = Some(e.to_string());
            }
        }
        other => {
            return Err(WebError::bad_request(format!("unknown profile action '{other}'")));
        }
    }
    store_dashboard(&session, &dashboard).await?;

    let content = profile_fragment(&dashboard, error)?;
    let mut response = render_page(&session, &headers, &dashboard, "Profile", content).await?;
    *response.status_mut() = status;
    Ok(response)
}

pub async fn toggle_setting(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.toggle_setting(&id)?;
    store_dashboard(&session, &dashboard).await?;

    let content = profile_fragment(&dashboard, None)?;
    render_page(&session, &headers, &dashboard, "Profile", content).await
}

fn profile_fragment(dashboard: &DashboardState, error: Option<String>) -> Result<String, WebError> {
    let current = dashboard.profile.current();
    let saved = dashboard.profile.saved();
    let template = ProfileTemplate {
        name: &current.name,
        email: &current.email,
        initials: saved.initials(),
        member_since: saved.member_since(),
        total_invested: &saved.total_invested,
        total_returns: &saved.total_returns,
        risk_tolerance: saved.risk_tolerance.to_string(),
        editing: dashboard.profile.is_editing(),
        error,
        sections: dashboard.settings.sections(),
    };
    Ok(template.render()?)
}

pub async fn notifications(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let dashboard = load_dashboard(&state, &session).await?;
    let content = notifications_fragment(&dashboard)?;
    render_page(&session, &headers, &dashboard, "Notifications", content).await
}

pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.mark_read(&id);
    store_dashboard(&session, &dashboard).await?;

    let content = notifications_fragment(&dashboard)?;
    render_page(&session, &headers, &dashboard, "Notifications", content).await
}

pub async fn clear_notifications(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let mut dashboard = load_dashboard(&state, &session).await?;
    dashboard.clear_notifications();
    store_dashboard(&session, &dashboard).await?;

    let content = notifications_fragment(&dashboard)?;
    render_page(&session, &headers, &dashboard, "Notifications", content).await
}

fn notifications_fragment(dashboard: &DashboardState) -> Result<String, WebError> {
    let template = NotificationsTemplate {
        unread: dashboard.unread_count(),
        items: dashboard.notifications.items(),
        empty_message: EMPTY_NOTIFICATIONS_MESSAGE,
    };
    Ok(template.render()?)
}

pub async fn not_found() -> Response {
    WebError::not_found("Page not found").into_response()
}
