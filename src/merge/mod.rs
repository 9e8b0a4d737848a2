//! Merging and deduplication of candidate locations from the local database
//! and the remote sources: union the keyed maps, reconcile every pair inside
//! a key bucket under the tie-break policy, then flatten, truncate, and
//! order for presentation.

use crate::location::{base_of_key, source, AtlasLocation, LocationMap};
use std::collections::BTreeMap;

// -----------------------------------------------------------------------------
//
/// What the merge stage hands the orchestrator: the surviving locations
/// (already truncated to `limit + 1` so the caller can detect overflow) and
/// any data-conflict warnings worth surfacing.
#[derive(Clone, Debug, Default)]
pub struct MergeOutcome {
    pub matches: Vec<AtlasLocation>,
    pub warnings: Vec<String>,
} // struct

// -----------------------------------------------------------------------------
//
/// How one pairwise reconciliation ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Survivor {
    Both,
    First,
    Second,
} // enum

// -----------------------------------------------------------------------------
//
/// Unions the maps into key buckets (uniquifying `(n)` suffixes collapse),
/// reconciles each bucket pairwise, flattens the survivors in key-sorted
/// order, truncates to `limit + 1`, and sorts by descending rank then
/// ascending display name.
///
/// The pass is deterministic for a given input set, and idempotent: feeding
/// the output back in returns it unchanged.
#[must_use]
pub fn merge_and_dedup(maps: Vec<LocationMap>, limit: usize) -> MergeOutcome {
    let mut buckets: BTreeMap<String, Vec<Option<AtlasLocation>>> = BTreeMap::new();

    for map in maps {
        for (key, location) in map {
            buckets
                .entry(base_of_key(&key).to_string())
                .or_default()
                .push(Some(location));
        } // for
    } // for

    let mut warnings = Vec::new();

    for bucket in buckets.values_mut() {
        reconcile_bucket(bucket, &mut warnings);
    } // for

    let mut matches: Vec<AtlasLocation> = buckets
        .into_values()
        .flatten()
        .flatten()
        .collect();

    matches.truncate(limit + 1);

    for location in &mut matches {
        location.update_display_name();
    } // for

    matches.sort_by(|a, b| {
        b.rank
            .cmp(&a.rank)
            .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
    }); // sort_by

    MergeOutcome { matches, warnings }
} // fn

// -----------------------------------------------------------------------------

/// Reconciles every pair in one bucket. An eliminated slot goes empty; when
/// the first of a pair loses, the outer loop moves on and the survivor gets
/// its own turn later.
fn reconcile_bucket(bucket: &mut [Option<AtlasLocation>], warnings: &mut Vec<String>) {
    for i in 0..bucket.len() {
        if bucket[i].is_none() {
            continue;
        } // if

        'inner: for j in (i + 1)..bucket.len() {
            if bucket[j].is_none() {
                continue;
            } // if

            // Take both out to reconcile without aliasing:
            let mut first = bucket[i].take().unwrap();
            let mut second = bucket[j].take().unwrap();

            match reconcile(&mut first, &mut second, warnings) {
                Survivor::Both => {
                    bucket[i] = Some(first);
                    bucket[j] = Some(second);
                } // Both
                Survivor::First => {
                    bucket[i] = Some(first);
                } // First
                Survivor::Second => {
                    bucket[j] = Some(second);
                    break 'inner;
                } // Second
            } // match
        } // for
    } // for
} // fn

// -----------------------------------------------------------------------------

/// The pairwise tie-break policy, applied in fixed rule order.
fn reconcile(
    first: &mut AtlasLocation,
    second: &mut AtlasLocation,
    warnings: &mut Vec<String>,
) -> Survivor {
    let same_site = first.is_same_site(second);

    // Place-type fusion: a generic populated place upgrades to the specific
    // form, and administrative/populated tags at the same site collapse.
    let types_compatible = fuse_place_types(first, second, same_site);

    // An unambiguous zone is copied onto an ambiguous one at the same site:
    if same_site {
        fix_ambiguous_zone(first, second);
    } // if

    // Same remote identity: the older (lower-source) record survives but
    // adopts the better rank, a known zip, and the newer source value, and
    // is flagged for writeback when the two differ materially.
    if first.geoname_id != 0 && first.geoname_id == second.geoname_id {
        let (survivor, loser, outcome) = if first.source <= second.source {
            (&mut *first, &mut *second, Survivor::First)
        } else {
            (&mut *second, &mut *first, Survivor::Second)
        }; // if

        survivor.rank = survivor.rank.max(loser.rank);

        if survivor.zip.is_empty() && !loser.zip.is_empty() {
            survivor.zip = loser.zip.clone();
        } // if

        survivor.use_as_update = !survivor.is_close_match(loser);
        survivor.source = loser.source;

        return outcome;
    } // if

    // A peak beats the mountain it stands on:
    if same_site {
        if first.place_type == "T.PK" && second.place_type == "T.MT" {
            return Survivor::First;
        } // if

        if first.place_type == "T.MT" && second.place_type == "T.PK" {
            return Survivor::Second;
        } // if
    } // if

    if !types_compatible {
        return Survivor::Both;
    } // if

    if !first.state.eq_ignore_ascii_case(&second.state) {
        if same_site {
            warnings.push(format!(
                "Conflicting states for {}: {} vs. {}",
                first.city, first.state, second.state
            )); // format
        } // if

        return disambiguate(first, second, |location| &location.state, |location| {
            location.show_state = true;
        }); // disambiguate
    } // if

    if !first.county.eq_ignore_ascii_case(&second.county) {
        return disambiguate(first, second, |location| &location.county, |location| {
            location.show_county = true;
        }); // disambiguate
    } // if

    // Plain duplicate: rank, then zip presence, then local over remote.
    if first.rank != second.rank {
        return if first.rank > second.rank {
            Survivor::First
        } else {
            Survivor::Second
        }; // if
    } // if

    if first.zip.is_empty() != second.zip.is_empty() {
        return if second.zip.is_empty() {
            Survivor::First
        } else {
            Survivor::Second
        }; // if
    } // if

    if source::is_external(first.source) != source::is_external(second.source) {
        let (survivor, loser, outcome) = if source::is_external(second.source) {
            (&mut *first, &mut *second, Survivor::First)
        } else {
            (&mut *second, &mut *first, Survivor::Second)
        }; // if

        survivor.rank = survivor.rank.max(loser.rank);
        return outcome;
    } // if

    Survivor::First
} // fn

// -----------------------------------------------------------------------------

/// Rule for conflicting states or counties: an empty side loses to a
/// populated one, a lower rank loses to a higher one, and a genuine tie
/// keeps both with the disambiguation hint set on each.
fn disambiguate(
    first: &mut AtlasLocation,
    second: &mut AtlasLocation,
    field: impl Fn(&AtlasLocation) -> &str,
    mark: impl Fn(&mut AtlasLocation),
) -> Survivor {
    let first_empty = field(first).is_empty();
    let second_empty = field(second).is_empty();

    if first_empty != second_empty {
        return if second_empty {
            Survivor::First
        } else {
            Survivor::Second
        }; // if
    } // if

    if first.rank != second.rank {
        return if first.rank > second.rank {
            Survivor::First
        } else {
            Survivor::Second
        }; // if
    } // if

    mark(first);
    mark(second);
    Survivor::Both
} // fn

/// True when the two place types may be compared as the same type. Upgrades
/// `P.PPL` to the more specific `P.PPLx` as a side effect.
fn fuse_place_types(first: &mut AtlasLocation, second: &mut AtlasLocation, same_site: bool) -> bool {
    if first.place_type == second.place_type {
        return true;
    } // if

    let first_populated = first.place_type.starts_with("P.PPL");
    let second_populated = second.place_type.starts_with("P.PPL");

    if first_populated && second_populated {
        if first.place_type == "P.PPL" {
            first.place_type = second.place_type.clone();
        } else if second.place_type == "P.PPL" {
            second.place_type = first.place_type.clone();
        } // if

        return true;
    } // if

    let first_admin = first.place_type.starts_with("A.ADM");
    let second_admin = second.place_type.starts_with("A.ADM");

    // An administrative entity and the populated place at the same site are
    // the same thing wearing two tags:
    same_site && ((first_admin && second_populated) || (second_admin && first_populated))
} // fn

fn fix_ambiguous_zone(first: &mut AtlasLocation, second: &mut AtlasLocation) {
    let first_ambiguous = first.zone.ends_with('?');
    let second_ambiguous = second.zone.ends_with('?');

    if first_ambiguous && !second_ambiguous && !second.zone.is_empty() {
        first.zone = second.zone.clone();
    } else if second_ambiguous && !first_ambiguous && !first.zone.is_empty() {
        second.zone = first.zone.clone();
    } // if
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
