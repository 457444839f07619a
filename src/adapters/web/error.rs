//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::DeckError;
use crate::domain::session::Tab;

use super::is_htmx_request;
use super::templates::{ErrorTemplate, LayoutTemplate, NavTab};

/// The error body without the layout, kept on the response for HTMX callers.
#[derive(Debug, Clone)]
struct ErrorFragment(String);

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &DeckError) -> StatusCode {
    match err {
        DeckError::UnknownStrategy { .. } | DeckError::UnknownSetting { .. } => {
            StatusCode::NOT_FOUND
        }
        DeckError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        DeckError::ConfigParse { .. }
        | DeckError::ConfigMissing { .. }
        | DeckError::ConfigInvalid { .. }
        | DeckError::CatalogLoad { .. }
        | DeckError::CatalogRow(_)
        | DeckError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DeckError> for WebError {
    fn from(err: DeckError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        tracing::warn!(error = %err, "session store failure");
        Self::internal("session unavailable")
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::internal(format!("template error: {err}"))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let fragment = ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        let content = match fragment.render() {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };

        let mut response = self.page_response(&content);
        response.extensions_mut().insert(ErrorFragment(content));
        response
    }
}

impl WebError {
    fn page_response(&self, content: &str) -> Response {
        let page = LayoutTemplate {
            title: "Error",
            tabs: NavTab::all(Tab::Home),
            unread: 0,
            show_disclaimer: false,
            disclaimer_title: "",
            disclaimer_body: "",
            acknowledge_label: "",
            content,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, Html(content.to_string())).into_response(),
        }
    }
}

/// Swaps error pages for their bare fragment on HTMX requests and points
/// the swap at the content area, whatever the triggering element targeted.
pub async fn htmx_error_fragments(request: Request, next: Next) -> Response {
    let htmx = is_htmx_request(request.headers());
    let mut response = next.run(request).await;
    if !htmx {
        return response;
    }
    let Some(ErrorFragment(content)) = response.extensions_mut().remove::<ErrorFragment>() else {
        return response;
    };

    let mut fragment = (response.status(), Html(content)).into_response();
    let headers = fragment.headers_mut();
    headers.insert("hx-retarget", HeaderValue::from_static("#content"));
    headers.insert("hx-reswap", HeaderValue::from_static("innerHTML"));
    fragment
}
