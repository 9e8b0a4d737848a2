//! The search orchestrator: parse, consult the search log, run the local
//! ladder and the remote adapters, merge, write back, log, and answer.

pub mod options;
pub mod result;
mod suggest;

pub use options::{RemoteMode, SearchOptions, DEFAULT_LIMIT, DEFAULT_QUERY, MAX_LIMIT};
pub use result::SearchResult;

use crate::db::AtlasDb;
use crate::gazetteer::{Gazetteer, GazetteerPaths};
use crate::location::{source, LocationMap};
use crate::merge::merge_and_dedup;
use crate::parse::{parse_search, ParseMode};
use crate::remote::RemoteClient;
use crate::{geonames, getty};
use options::LOOSE_PARSE_BELOW_VERSION;
use std::sync::{Arc, RwLock};
use std::time::Instant;

// -----------------------------------------------------------------------------
//
/// The place-name resolution service: owns the database handle, the remote
/// client context, and the gazetteer dictionaries (swapped atomically on
/// re-initialization).
#[derive(Debug)]
pub struct Atlas {
    db: AtlasDb,
    remote: RemoteClient,
    paths: GazetteerPaths,
    gazetteer: RwLock<Arc<Gazetteer>>,
} // struct

impl Atlas {
    /// Builds the service, performing the first gazetteer initialization.
    ///
    /// # Errors
    ///
    /// Fails when the gazetteer data files cannot be read; a service with no
    /// dictionaries cannot answer anything.
    pub async fn new(
        db: AtlasDb,
        remote: RemoteClient,
        paths: GazetteerPaths,
    ) -> Result<Self, crate::gazetteer::Error> {
        let gazetteer = Gazetteer::init(&paths, &remote.http).await?;

        Ok(Self {
            db,
            remote,
            paths,
            gazetteer: RwLock::new(Arc::new(gazetteer)),
        }) // Ok
    } // fn

    /// The current dictionary set.
    #[must_use]
    pub fn gazetteer(&self) -> Arc<Gazetteer> {
        self.gazetteer
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    } // fn

    #[must_use]
    pub const fn db(&self) -> &AtlasDb {
        &self.db
    } // fn

    /// Rebuilds dictionaries older than a day. Best-effort: a failed rebuild
    /// keeps the previous set.
    async fn reinit_if_stale(&self) {
        if !self.gazetteer().is_stale() {
            return;
        } // if

        match Gazetteer::init(&self.paths, &self.remote.http).await {
            Ok(fresh) => {
                let mut slot = self
                    .gazetteer
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                *slot = Arc::new(fresh);
            } // Ok
            Err(error) => {
                tracing::warn!(error = %error, "gazetteer re-init failed, keeping previous data");
            } // Err
        } // match
    } // fn

    // -------------------------------------------------------------------------
    //
    /// Runs the full federated search pipeline. Never fails outright:
    /// failures are carried in the result's `error` and `warning` fields
    /// alongside whatever data survived.
    #[cfg_attr(feature = "tracing-instrumentation", tracing::instrument(
        level = "info",
        skip(self),
        fields(q = %options.query, remote = ?options.remote),
    ))]
    pub async fn search(&self, options: &SearchOptions) -> SearchResult {
        let started = Instant::now();
        let limit = options.clamped_limit();

        self.reinit_if_stale().await;
        let gazetteer = self.gazetteer();

        let mode = if options.version < LOOSE_PARSE_BELOW_VERSION {
            ParseMode::Loose
        } else {
            ParseMode::Strict
        }; // if

        let parsed = parse_search(&options.query, mode, &gazetteer);

        let mut result = SearchResult {
            original_search: options.query.clone(),
            normalized_search: parsed.normalized_search.clone(),
            ..SearchResult::default()
        }; // struct

        let extended = options.remote.is_extended();

        // The search log decides whether a non-forced remote consultation is
        // worth the wait; an unreadable log counts as "not recent":
        let recent = if options.remote == RemoteMode::Skip || options.remote.forces_remote() {
            false
        } else {
            self.db
                .has_search_been_done_recently(&parsed.normalized_search, extended)
                .await
                .unwrap_or_else(|error| {
                    tracing::warn!(error = %error, "search-log lookup failed");
                    false
                }) // unwrap_or_else
        }; // if

        let consult_remote = options.remote.forces_remote()
            || (options.remote != RemoteMode::Skip && !recent);

        // Local leg:
        let mut db_error = None;
        let mut local = LocationMap::new();

        if !options.remote.skips_local() {
            match self.db.search(&parsed, &gazetteer, extended, limit).await {
                Ok(map) => local = map,
                Err(error) => db_error = Some(error.to_string()),
            } // match
        } // if

        let local_only_by_sound =
            !local.is_empty() && local.values().all(|location| location.matched_by_sound);

        // Remote legs, launched together once the database connection has
        // been released; each failure stands on its own:
        let (use_geonames, use_getty) =
            adapters_for(options.remote, parsed.is_postal(), consult_remote);

        let geonames_leg = async {
            if use_geonames {
                Some(geonames::search(&self.remote, &gazetteer, &parsed).await)
            } else {
                None
            } // if
        }; // async

        let getty_leg = async {
            if use_getty {
                Some(getty::search(&self.remote, &gazetteer, &parsed).await)
            } else {
                None
            } // if
        }; // async

        let (geonames_outcome, getty_outcome) = futures::join!(geonames_leg, getty_leg);

        let mut maps: Vec<LocationMap> = Vec::new();
        let mut any_remote_matches = false;

        for (name, outcome) in [
            ("GeoNames", geonames_outcome.map(|r| r.map_err(|e| e.to_string()))),
            ("Getty", getty_outcome.map(|r| r.map_err(|e| e.to_string()))),
        ] {
            match outcome {
                None => {} // adapter not in play
                Some(Ok(response)) => {
                    result.add_info(&format!("{name}: {}", response.summary()));

                    if !response.matches.is_empty() {
                        any_remote_matches = true;
                        maps.push(response.matches);
                    } // if
                } // Ok
                Some(Err(message)) => {
                    tracing::warn!(adapter = name, error = %message, "remote adapter failed");
                    result.add_warning("Supplementary data temporarily unavailable.");
                    result.add_info(&format!("{name}: {message}"));
                } // Err
            } // match
        } // for

        // A sound-only local answer is weaker than anything a remote source
        // found by name:
        if any_remote_matches && local_only_by_sound {
            local.clear();
        } // if

        if !local.is_empty() {
            maps.insert(0, local);
        } // if

        for map in &mut maps {
            finalize_map(map, &gazetteer);
        } // for

        let merged = merge_and_dedup(maps, limit);

        for warning in &merged.warnings {
            result.add_warning(warning);
        } // for

        let mut matches = merged.matches;
        result.limit_reached = matches.len() > limit;
        matches.truncate(limit);

        // Remote rows can arrive zoneless; the zone table fills what it can:
        if db_error.is_none() {
            for location in &mut matches {
                if location.zone.is_empty() && source::is_external(location.source) {
                    match self
                        .db
                        .zone_for(&location.country, &location.state, &location.county)
                        .await
                    {
                        Ok(Some(zone)) => location.zone = zone,
                        Ok(None) => {}
                        Err(error) => {
                            tracing::debug!(error = %error, "zone lookup failed");
                        } // Err
                    } // match
                } // if
            } // for
        } // if

        if gazetteer.is_celestial(&parsed.target_city) {
            result.add_warning(&format!(
                "\"{}\" is the name of a celestial object, not a place in the atlas.",
                parsed.target_city
            )); // add_warning
        } // if

        for line in suggest::suggestions(&options.query, !matches.is_empty(), &gazetteer) {
            result.add_warning(&line);
        } // for

        // Writeback and logging leave no trace when asked not to, and are
        // skipped entirely when the local database is already in trouble:
        if db_error.is_none() && !options.no_trace {
            if let Err(error) = self.db.write_back(&matches).await {
                tracing::warn!(error = %error, "writeback failed");
            } // if

            if let Err(error) = self
                .db
                .log_search_results(&parsed.normalized_search, extended, matches.len() as i32)
                .await
            {
                tracing::warn!(error = %error, "search-log write failed");
            } // if

            for warning in &merged.warnings {
                if let Err(error) = self.db.log_message(true, warning).await {
                    tracing::debug!(error = %error, "atlas_log write failed");
                } // if
            } // for
        } // if

        result.error = db_error;
        result.count = matches.len();
        result.matches = matches;
        result.time = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            search = %result.normalized_search,
            count = result.count,
            time_ms = result.time,
            remote = consult_remote,
            client = options.client.as_deref().unwrap_or("-"),
            "search done"
        ); // info

        result
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// Which adapters a mode puts in play. Getty has no postal-code search, so
/// postal queries suppress it in the combined modes.
const fn adapters_for(mode: RemoteMode, postal: bool, consult_remote: bool) -> (bool, bool) {
    if !consult_remote {
        return (false, false);
    } // if

    match mode {
        RemoteMode::Geonames => (true, false),
        RemoteMode::Getty => (false, true),
        _ => (true, !postal),
    } // match
} // fn

/// Fills the presentation fields the sources leave empty: the long country
/// name and the flag code.
fn finalize_map(map: &mut LocationMap, gazetteer: &Gazetteer) {
    for location in map.values_mut() {
        if location.long_country.is_empty() {
            if let Some(long_country) = gazetteer.long_country(&location.country) {
                location.long_country = long_country.to_string();
            } // if
        } // if

        if location.flag_code.is_empty() {
            if let Some(flag_code) = gazetteer.flag_for(&location.country) {
                location.flag_code = flag_code;
            } // if
        } // if
    } // for
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_selection() {
        // Not consulting remotes at all:
        assert_eq!(adapters_for(RemoteMode::Normal, false, false), (false, false));

        // Single-source modes:
        assert_eq!(adapters_for(RemoteMode::Geonames, false, true), (true, false));
        assert_eq!(adapters_for(RemoteMode::Getty, false, true), (false, true));

        // Combined modes; Getty drops out for postal queries:
        assert_eq!(adapters_for(RemoteMode::Forced, false, true), (true, true));
        assert_eq!(adapters_for(RemoteMode::Forced, true, true), (true, false));
        assert_eq!(adapters_for(RemoteMode::Only, false, true), (true, true));
    }

    #[test]
    fn finalize_fills_presentation_fields() {
        let gazetteer = Gazetteer::for_tests();
        let mut map = LocationMap::new();

        crate::location::AtlasLocation {
            city: "Nashua".to_string(),
            state: "NH".to_string(),
            country: "USA".to_string(),
            ..Default::default()
        }
        .insert_into(&mut map);

        finalize_map(&mut map, &gazetteer);

        let location = map.values().next().unwrap();
        assert_eq!(location.long_country, "United States");
        assert_eq!(location.flag_code, "us");
    }
} // mod
