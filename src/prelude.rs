//! Put `use atlas::prelude::*;` in your code to get convenient access to
//! everything you need for issuing searches and handling their results.

// Re-export dependencies

pub use chrono::{DateTime, Duration, NaiveDateTime, Utc};
pub use chrono_tz::Tz;

// -----------------------------------------------------------------------------

pub use crate::{
    config::Config,
    db::{AtlasDb, DbConfig},
    error::Error,
    gazetteer::{Gazetteer, GazetteerPaths},
    location::{source, AtlasLocation, LocationMap, ZIP_RANK},
    parse::{parse_search, ParseMode, ParsedSearch},
    remote::RemoteClient,
    search::{Atlas, RemoteMode, SearchOptions, SearchResult},
}; // crate
