//! Atlas error types and error messages.

// -----------------------------------------------------------------------------

use miette::Diagnostic;
use thiserror::Error;

// -----------------------------------------------------------------------------
//
/// Errors that may be produced by the root part of the atlas service.

#[derive(Debug, Diagnostic, Error)]
#[diagnostic(code(atlas::error), url(docsrs))]
pub enum Error {
    /// Errors from the `gazetteer` module in the `atlas` crate.
    #[error(transparent)]
    Gazetteer(#[from] crate::gazetteer::Error),

    /// Errors from the `db` module in the `atlas` crate.
    #[error(transparent)]
    Db(#[from] crate::db::Error),

    /// Errors from the `geonames` module in the `atlas` crate.
    #[error(transparent)]
    Geonames(#[from] crate::geonames::Error),

    /// Errors from the `getty` module in the `atlas` crate.
    #[error(transparent)]
    Getty(#[from] crate::getty::Error),
} // enum Error
