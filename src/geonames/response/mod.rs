//! Resources (structs, enums) for processing the GeoNames responses: the
//! feature-search document and the postal-code document, plus the embedded
//! service-error shape.

pub mod geoname;
pub mod postal;

pub use geoname::Geoname;
pub use postal::PostalCode;

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
//
/// The feature-search response from `searchJSON`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total matches upstream, which may exceed the page returned.
    #[serde(rename = "totalResultsCount")]
    #[serde(default)]
    pub total_results_count: usize,

    #[serde(default)]
    pub geonames: Vec<Geoname>,

    /// Present only when the service rejected the request.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
} // struct

// -----------------------------------------------------------------------------
//
/// The postal-code response from `postalCodeSearchJSON`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PostalResponse {
    #[serde(rename = "postalCodes")]
    #[serde(alias = "postalcodes")]
    #[serde(default)]
    pub postal_codes: Vec<PostalCode>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
} // struct

// -----------------------------------------------------------------------------
//
/// GeoNames application-level error block.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub value: i32,
} // struct

// -----------------------------------------------------------------------------
//
/// Either kind of GeoNames document, depending on which endpoint served the
/// request.
#[derive(Clone, Debug)]
pub enum Payload {
    Search(SearchResponse),
    Postal(PostalResponse),
} // enum

impl Payload {
    /// The service-error block, when the response carried one.
    #[must_use]
    pub fn status(&self) -> Option<&ServiceStatus> {
        match self {
            Self::Search(response) => response.status.as_ref(),
            Self::Postal(response) => response.status.as_ref(),
        } // match
    } // fn

    /// Raw (pre-filter) item count.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Search(response) => response.geonames.len(),
            Self::Postal(response) => response.postal_codes.len(),
        } // match
    } // fn

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
