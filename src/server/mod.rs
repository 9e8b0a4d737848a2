//! The HTTP surface: one axum router exposing `GET /atlas/` (the search),
//! `GET /atlas/ping` (liveness), and a 404 fallback for everything else.
//! Every search outcome is an HTTP 200; failures ride inside the result
//! document.

use crate::search::{Atlas, SearchOptions, SearchResult, DEFAULT_LIMIT};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// -----------------------------------------------------------------------------

/// Legal JSONP callback names; anything else falls back to plain JSON.
static CALLBACK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.]*$").unwrap());

// -----------------------------------------------------------------------------
//
/// Shared application state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub atlas: Arc<Atlas>,
} // struct

// -----------------------------------------------------------------------------
//
/// Builds the application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/atlas", get(atlas_handler))
        .route("/atlas/", get(atlas_handler))
        .route("/atlas/ping", get(ping_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
} // fn

// -----------------------------------------------------------------------------
//
/// Raw query parameters, all optional and parsed leniently; a value that
/// does not parse falls back to its default rather than failing the
/// request.
#[derive(Debug, Default, Deserialize)]
struct AtlasQuery {
    q: Option<String>,
    version: Option<String>,
    remote: Option<String>,
    limit: Option<String>,
    pt: Option<String>,
    callback: Option<String>,
    client: Option<String>,
    notrace: Option<String>,
} // struct

impl AtlasQuery {
    fn into_options(self) -> SearchOptions {
        let mut options = SearchOptions::default();

        if let Some(q) = self.q.filter(|q| !q.trim().is_empty()) {
            options.query = q;
        } // if

        if let Some(version) = self.version.and_then(|v| v.parse().ok()) {
            options.version = version;
        } // if

        if let Some(remote) = self.remote {
            options.remote = remote.parse().unwrap_or_default();
        } // if

        options.limit = self
            .limit
            .and_then(|limit| limit.parse().ok())
            .unwrap_or(DEFAULT_LIMIT);

        options.plain_text = self.pt.as_deref().is_some_and(truthy);
        options.no_trace = self.notrace.as_deref().is_some_and(truthy);

        options.callback = self
            .callback
            .filter(|callback| CALLBACK_NAME.is_match(callback));

        options.client = self.client.filter(|client| !client.is_empty());

        options
    } // fn
} // impl

fn truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "t" | "1" | "yes" | "y")
} // fn

// -----------------------------------------------------------------------------

async fn atlas_handler(
    State(state): State<AppState>,
    Query(query): Query<AtlasQuery>,
) -> Response {
    let options = query.into_options();
    let result = state.atlas.search(&options).await;
    respond(&options, &result)
} // fn

/// Picks the representation the client asked for. Every search outcome is a
/// 200; a serialization failure (which would be a bug in the result types)
/// is the only 500.
fn respond(options: &SearchOptions, result: &SearchResult) -> Response {
    if options.plain_text {
        return (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            result.to_plain_text(),
        )
            .into_response();
    } // if

    if let Some(callback) = &options.callback {
        return match result.to_jsonp(callback) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(error) => internal_error(&error),
        }; // match
    } // if

    match result.to_json() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => internal_error(&error),
    } // match
} // fn

async fn ping_handler(State(state): State<AppState>) -> Response {
    let db_ok = state.atlas.db().ping().await.is_ok();

    let body = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "db": if db_ok { "ok" } else { "unavailable" },
    }); // json

    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body.to_string(),
    )
        .into_response()
} // fn

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
} // fn

fn internal_error(error: &serde_json::Error) -> Response {
    tracing::error!(error = %error, "result serialization failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "serialization failure").into_response()
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::RemoteMode;

    #[test]
    fn query_defaults() {
        let options = AtlasQuery::default().into_options();
        assert_eq!(options.query, "Nashua, NH");
        assert_eq!(options.version, 9);
        assert_eq!(options.remote, RemoteMode::Skip);
        assert_eq!(options.limit, DEFAULT_LIMIT);
        assert!(!options.plain_text);
        assert!(!options.no_trace);
    }

    #[test]
    fn query_parsing_is_lenient() {
        let query = AtlasQuery {
            q: Some("Paris".to_string()),
            version: Some("2".to_string()),
            remote: Some("forced".to_string()),
            limit: Some("nonsense".to_string()),
            pt: Some("TRUE".to_string()),
            notrace: Some("1".to_string()),
            ..Default::default()
        };

        let options = query.into_options();
        assert_eq!(options.query, "Paris");
        assert_eq!(options.version, 2);
        assert_eq!(options.remote, RemoteMode::Forced);
        assert_eq!(options.limit, DEFAULT_LIMIT);
        assert!(options.plain_text);
        assert!(options.no_trace);
    }

    #[test]
    fn callback_names_are_vetted() {
        let good = AtlasQuery {
            callback: Some("handleAtlas".to_string()),
            ..Default::default()
        };
        assert_eq!(good.into_options().callback.as_deref(), Some("handleAtlas"));

        let evil = AtlasQuery {
            callback: Some("alert(1);//".to_string()),
            ..Default::default()
        };
        assert_eq!(evil.into_options().callback, None);
    }
} // mod
