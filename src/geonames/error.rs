//! GeoNames adapter error types and error messages.

use miette::Diagnostic;
use thiserror::Error;

// -----------------------------------------------------------------------------
//
/// Errors that may be produced while consulting the GeoNames web services.
/// Any of these is reported per-source and never suppresses the other
/// adapter's or the local database's results.

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(atlas::geonames::error), url(docsrs))]
pub enum Error {
    /// The hard deadline elapsed before a response arrived.
    #[error("GeoNames request timed out")]
    Timeout,

    /// The HTTP client could not complete the request.
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GeoNames HTTP status: {0}")]
    HttpUnsuccessful(String),

    /// The response body was not the JSON document we expect.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// GeoNames reported an application-level error.
    #[error("GeoNames service error {code}: {message}")]
    Service { code: i32, message: String },
} // enum Error
