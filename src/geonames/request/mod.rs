//! Builder for a GeoNames query. A request targets either the feature
//! search (`searchJSON`) or, when the parsed search carries a postal code,
//! the postal-code search (`postalCodeSearchJSON`).

mod get;
mod new;
mod query_url;

use crate::remote::RemoteClient;

// -----------------------------------------------------------------------------

/// Feature codes admitted from the feature search: populated places and
/// capitals, lakes, atolls and islands, mountains and peaks, capes, military
/// bases, and observatories.
pub(crate) const FEATURE_CODES: [&str; 20] = [
    "PPL", "PPLA", "PPLA2", "PPLA3", "PPLC", "PPLG", "PPLL", "PPLS", "PPLX",
    "LK", "ATOL", "ISL", "ISLS", "MT", "MTS", "PK", "PKS", "CAPE", "MILB",
    "OBS",
]; // const

/// Most rows requested per call.
pub(crate) const MAX_ROWS: usize = 100;

// -----------------------------------------------------------------------------
//
/// One GeoNames request in the making.
#[derive(Debug)]
pub struct Request<'a> {
    // Required parameters:
    // --------------------

    /// Client context: HTTP handle, endpoint, account name.
    client: &'a RemoteClient,

    /// City-name prefix being searched (already preprocessed; `Mt` has been
    /// expanded to `mount`). Empty for postal requests.
    name_starts_with: String,

    // Optional parameters:
    // --------------------

    /// Postal code; its presence routes the request to the postal endpoint.
    postal_code: Option<String>,
} // struct
