//! # `atlas`
//!
//! A place-name resolution service. Given a free-form textual query such as
//! `"Nashua, NH"`, `"90210"`, or `"Paris, France"`, it returns a ranked list
//! of matching geographic locations (cities, administrative regions, peaks,
//! islands, observatories, …) with latitude, longitude, elevation, IANA time
//! zone, country and state codes, flag code, and a place-type tag.
//!
//! The heart of the crate is the federated search pipeline:
//!
//! 1. Parse the query into a normalized search specification
//!    ([`parse`]).
//! 2. Search the local indexed place database with four progressively
//!    looser match strategies ([`db`]).
//! 3. In parallel, consult the remote gazetteer sources — the GeoNames JSON
//!    services ([`geonames`]) and the HTML-scraped Getty thesaurus
//!    ([`getty`]) — when local data is stale, missing, or explicitly
//!    requested, each under its own deadline.
//! 4. Merge, deduplicate, and rank the combined candidates under a fixed
//!    tie-break policy ([`merge`]).
//! 5. Opportunistically write newly discovered or superseding entries back
//!    into the local database so future queries are served locally.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlas::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!
//!     let atlas = Atlas::new(
//!         AtlasDb::connect(&config.db).await?,
//!         config.remote_client(),
//!         config.gazetteer_paths(),
//!     )
//!     .await?;
//!
//!     let result = atlas
//!         .search(&SearchOptions::for_query("Nashua, NH"))
//!         .await;
//!
//!     for location in &result.matches {
//!         println!("{}: {}, {}", location.display_name, location.latitude, location.longitude);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! * `server` ‧ the axum HTTP surface and the `atlasd` binary (default).
//! * `tracing-instrumentation` ‧ span-level instrumentation of the
//!   orchestrator and adapters.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// -----------------------------------------------------------------------------

pub mod config;
pub mod db;
pub mod error;
pub mod gazetteer;
pub mod geonames;
pub mod getty;
pub mod location;
pub mod merge;
pub mod names;
pub mod normalize;
pub mod parse;
pub mod prelude;
pub mod remote;
pub mod search;

#[cfg(feature = "server")]
pub mod server;

// -----------------------------------------------------------------------------

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::location::AtlasLocation;
pub use crate::search::{Atlas, RemoteMode, SearchOptions, SearchResult};
