//! Database error types and error messages.

use miette::Diagnostic;
use thiserror::Error;

// -----------------------------------------------------------------------------
//
/// Errors from the local place database. Search-path failures are retried
/// once on a fresh connection before being surfaced; a surfaced error is
/// recoverable in the sense that remote results are still returned.

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(atlas::db::error), url(docsrs))]
pub enum Error {
    /// Driver- or server-level failure.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// The database URL or options were unusable.
    #[error("bad database configuration: {0}")]
    Configuration(String),
} // enum Error
