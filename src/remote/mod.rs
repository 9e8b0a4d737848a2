//! Shared plumbing for the remote gazetteer adapters: the HTTP client
//! context with per-source endpoints and deadlines, and the per-adapter
//! response envelope the orchestrator consumes.

use crate::location::LocationMap;
use std::time::Duration;

// -----------------------------------------------------------------------------

/// Default hard deadline for a GeoNames call.
pub const GEONAMES_DEADLINE: Duration = Duration::from_secs(20);

/// Default hard deadline for a full Getty search (both phases).
pub const GETTY_DEADLINE: Duration = Duration::from_secs(110);

/// Default soft budget for the Getty secondary (per-item) retrieval loop.
pub const GETTY_SOFT_BUDGET: Duration = Duration::from_secs(40);

// -----------------------------------------------------------------------------
//
/// Everything an adapter needs to reach its upstream: one shared `reqwest`
/// client, the service endpoints (overridable for tests and for upstream
/// moves), and the deadlines.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    pub http: reqwest::Client,

    /// Base URL of the GeoNames web services.
    pub geonames_base: String,

    /// Account name sent with every GeoNames call.
    pub geonames_username: String,

    /// Base URL of the Getty TGN servlet.
    pub getty_base: String,

    pub geonames_deadline: Duration,
    pub getty_deadline: Duration,
    pub getty_soft_budget: Duration,
} // struct

impl Default for RemoteClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            geonames_base: "http://api.geonames.org".to_string(),
            geonames_username: "skyview".to_string(),
            getty_base: "http://www.getty.edu/vow".to_string(),
            geonames_deadline: GEONAMES_DEADLINE,
            getty_deadline: GETTY_DEADLINE,
            getty_soft_budget: GETTY_SOFT_BUDGET,
        } // struct
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// What one adapter hands back: the retained candidate locations plus the
/// numbers surfaced in the result's `info` lines and the debug log.
#[derive(Clone, Debug, Default)]
pub struct AdapterResponse {
    pub matches: LocationMap,

    /// Matches the upstream reported before local filtering.
    pub raw_matches: usize,

    pub elapsed: Duration,
} // struct

impl AdapterResponse {
    /// One-line metric summary, e.g. `12 found, 7 kept, 840 ms`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} found, {} kept, {} ms",
            self.raw_matches,
            self.matches.len(),
            self.elapsed.as_millis()
        ) // format
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
