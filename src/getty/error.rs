//! Getty adapter error types and error messages.

use miette::Diagnostic;
use thiserror::Error;

// -----------------------------------------------------------------------------
//
/// Errors that may be produced while scraping the Getty Thesaurus of
/// Geographic Names. As with the other remote source, any of these is
/// reported per-source and leaves the rest of the pipeline's results intact.

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(atlas::getty::error), url(docsrs))]
pub enum Error {
    /// The hard deadline elapsed before the scrape finished.
    #[error("Getty request timed out")]
    Timeout,

    /// The HTTP client could not complete a page fetch.
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// A page fetch answered with a non-success status.
    #[error("Getty HTTP status: {0}")]
    HttpUnsuccessful(String),

    /// The results page carried the server-error sentinel.
    #[error("Getty server error")]
    Server,

    /// Getty rejected the query as syntactically invalid.
    #[error("Getty rejected the search syntax")]
    FailedSyntax,
} // enum Error
