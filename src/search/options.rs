//! The request surface of a search: query text, protocol version, remote
//! policy, and presentation switches.

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------

/// Hard ceiling on the `limit` parameter.
pub const MAX_LIMIT: usize = 500;

/// Default for the `limit` parameter.
pub const DEFAULT_LIMIT: usize = 75;

/// Query used when the client supplies none.
pub const DEFAULT_QUERY: &str = "Nashua, NH";

/// Protocol versions below this get loose query parsing.
pub const LOOSE_PARSE_BELOW_VERSION: i32 = 3;

// -----------------------------------------------------------------------------
//
/// The remote-consultation policy requested by the client.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteMode {
    /// Local results only.
    #[default]
    Skip,

    /// Consult remote sources when the local data is stale or missing.
    Normal,

    /// Like `Normal`, but remote-sourced local rows also join the ranked
    /// database pass.
    Extend,

    /// Always consult remote sources, recency notwithstanding.
    Forced,

    /// Remote sources only; the local database is not searched.
    Only,

    /// GeoNames only, skipping the local database.
    Geonames,

    /// Getty only, skipping the local database.
    Getty,
} // enum

impl RemoteMode {
    /// True when the mode bypasses the local database entirely.
    #[must_use]
    pub const fn skips_local(self) -> bool {
        matches!(self, Self::Only | Self::Geonames | Self::Getty)
    } // fn

    /// True when remote sources are consulted regardless of the search log.
    #[must_use]
    pub const fn forces_remote(self) -> bool {
        matches!(self, Self::Forced | Self::Only | Self::Geonames | Self::Getty)
    } // fn

    /// True when the search counts as "extended" for logging and for the
    /// database's ranked pass.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        !matches!(self, Self::Skip | Self::Normal)
    } // fn
} // impl

impl std::str::FromStr for RemoteMode {
    type Err = ();

    /// Unknown values fall back to `skip`, matching the lenient query-string
    /// handling of the HTTP surface.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "extend" => Self::Extend,
            "forced" => Self::Forced,
            "only" => Self::Only,
            "geonames" => Self::Geonames,
            "getty" => Self::Getty,
            _ => Self::Skip,
        }) // Ok
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// One search request, already defaulted and clamped.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// The free-form query.
    pub query: String,

    /// Client protocol version; versions below three parse loosely.
    pub version: i32,

    pub remote: RemoteMode,

    /// Most matches to return, clamped to `[1, MAX_LIMIT]`.
    pub limit: usize,

    /// Plain-text output requested.
    pub plain_text: bool,

    /// JSONP callback name, when the client asked for one.
    pub callback: Option<String>,

    /// Client tag, echoed into metric lines.
    pub client: Option<String>,

    /// Leave no trace: no writeback, no search-log row, no message log.
    pub no_trace: bool,
} // struct

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            version: 9,
            remote: RemoteMode::Skip,
            limit: DEFAULT_LIMIT,
            plain_text: false,
            callback: None,
            client: None,
            no_trace: false,
        } // struct
    } // fn
} // impl

impl SearchOptions {
    /// A default request for the given query text.
    #[must_use]
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        } // struct
    } // fn

    /// Clamps `limit` into its legal range.
    #[must_use]
    pub const fn clamped_limit(&self) -> usize {
        if self.limit < 1 {
            1
        } else if self.limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            self.limit
        } // if
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_predicates() {
        assert!(RemoteMode::Only.skips_local());
        assert!(RemoteMode::Geonames.skips_local());
        assert!(!RemoteMode::Forced.skips_local());

        assert!(RemoteMode::Forced.forces_remote());
        assert!(!RemoteMode::Normal.forces_remote());

        assert!(RemoteMode::Extend.is_extended());
        assert!(!RemoteMode::Normal.is_extended());
        assert!(!RemoteMode::Skip.is_extended());
    }

    #[test]
    fn mode_parsing_is_lenient() {
        assert_eq!("getty".parse::<RemoteMode>().unwrap(), RemoteMode::Getty);
        assert_eq!("FORCED".parse::<RemoteMode>().unwrap(), RemoteMode::Forced);
        assert_eq!("bogus".parse::<RemoteMode>().unwrap(), RemoteMode::Skip);
    }

    #[test]
    fn limit_clamping() {
        let mut options = SearchOptions::default();
        assert_eq!(options.clamped_limit(), DEFAULT_LIMIT);

        options.limit = 0;
        assert_eq!(options.clamped_limit(), 1);

        options.limit = 100_000;
        assert_eq!(options.clamped_limit(), MAX_LIMIT);
    }
} // mod
