//! Gazetteer initialization error types and error messages.

use miette::Diagnostic;
use thiserror::Error;

// -----------------------------------------------------------------------------
//
/// Errors that may be produced while building the in-memory gazetteer
/// dictionaries. Fatal on first start-up; a failed periodic re-init leaves
/// the previous dictionaries in place.

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(atlas::gazetteer::error), url(docsrs))]
pub enum Error {
    /// A data file could not be read.
    #[error("could not read gazetteer data file {path}: {source}")]
    DataFile {
        path: String,
        source: std::io::Error,
    },

    /// A line of `country_codes.txt` did not follow the fixed-column layout.
    #[error("malformed country record at {path}:{line}")]
    MalformedCountry { path: String, line: usize },

    /// The flag-image directory was empty and the remote index fallback
    /// failed too.
    #[error("no flag inventory available: {0}")]
    FlagInventory(String),

    /// HTTP failure while scraping the remote flag index.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
} // enum Error
