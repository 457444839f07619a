//! Web dashboard adapter.
//!
//! Axum server with an HTMX front end. Per-viewer state lives in a
//! cookie-keyed tower-sessions store that expires when the browser session
//! ends; the catalog and portfolio are shared read-only.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::domain::catalog::Catalog;
use crate::domain::correlation::CorrelationTable;
use crate::domain::filter::FilterCriteria;
use crate::domain::portfolio::Portfolio;

pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub correlations: CorrelationTable,
    pub portfolio: Portfolio,
    /// Advanced-filter defaults new sessions start from and reset to.
    pub baseline: FilterCriteria,
    pub static_dir: PathBuf,
    pub secure_cookie: bool,
}

pub fn build_router(state: AppState) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.secure_cookie)
        .with_expiry(Expiry::OnSessionEnd);
    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/disclaimer", post(handlers::acknowledge_disclaimer))
        .route("/filters", get(handlers::filters_form).post(handlers::apply_filters))
        .route("/filters/reset", post(handlers::reset_filters))
        .route("/strategy/{id}", get(handlers::strategy_detail))
        .route("/watchlist", get(handlers::watchlist))
        .route("/watchlist/{id}/toggle", post(handlers::toggle_watchlist))
        .route("/portfolio", get(handlers::portfolio))
        .route("/profile", get(handlers::profile).post(handlers::update_profile))
        .route("/profile/settings/{id}", post(handlers::toggle_setting))
        .route("/notifications", get(handlers::notifications))
        .route("/notifications/clear", post(handlers::clear_notifications))
        .route("/notifications/{id}/read", post(handlers::mark_notification_read))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(sessions)
                .layer(middleware::from_fn(error::htmx_error_fragments)),
        )
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
