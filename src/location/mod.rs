//! The central entity of the crate: a resolved geographic location, plus the
//! keyed collections the search pipeline passes around.

mod distance;
pub mod source;

pub use distance::distance_km;

use crate::normalize::simplify;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// -----------------------------------------------------------------------------

/// Postal-code matches are pinned to this rank; everything else is clamped
/// below it.
pub const ZIP_RANK: i32 = 9;

/// Two locations closer than this are considered to be at the same site for
/// dedup and writeback purposes.
pub const CLOSE_DISTANCE_KM: f64 = 10.0;

/// Coordinate tolerance, in degrees, for [`AtlasLocation::is_close_match`].
const COORD_TOLERANCE: f64 = 1e-4;

/// Candidate locations keyed by [`make_location_key`]. A `BTreeMap` keeps the
/// key order stable, which in turn makes merging and deduplication
/// deterministic.
pub type LocationMap = BTreeMap<String, AtlasLocation>;

// -----------------------------------------------------------------------------
//
/// One resolved place: city, administrative hierarchy, coordinates, time
/// zone, and the provenance bookkeeping the merge and writeback stages rely
/// on.
///
/// Locations are created from database rows or remote documents, may be
/// adjusted during deduplication and writeback preparation, and are immutable
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasLocation {
    /// Display name; may carry a variant in parentheses.
    pub city: String,

    /// Alternate or rearranged form of the name (`"Lake Placid"` is indexed
    /// with `variant = "Placid"`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,

    /// Second-level administrative division, US-normalized.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub county: String,

    /// First-level administrative division; two-letter for US and Canada.
    pub state: String,

    /// Three-letter country code (`USA`, `GBR`, `ATA`, …).
    pub country: String,

    /// Human-readable country name.
    #[serde(rename = "longCountry")]
    #[serde(alias = "long_country")]
    pub long_country: String,

    /// Display hint: the county is needed to tell this match apart from a
    /// sibling.
    #[serde(rename = "showCounty")]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_county: bool,

    /// Display hint: the state is needed to tell this match apart from a
    /// sibling.
    #[serde(rename = "showState")]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_state: bool,

    /// Lower-case two-letter (or regional) code naming a known flag image.
    #[serde(rename = "flagCode")]
    #[serde(alias = "flag_code")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub flag_code: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Elevation in meters, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// IANA zone id; a trailing `?` marks the assignment as ambiguous.
    pub zone: String,

    /// Postal code; empty for non-postal matches.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zip: String,

    /// Match quality, 0–9. Higher is better; only postal matches carry
    /// [`ZIP_RANK`].
    pub rank: i32,

    /// Two-part place-type tag, e.g. `P.PPL`, `A.ADM1`, `T.PK`.
    #[serde(rename = "placeType")]
    #[serde(alias = "place_type")]
    pub place_type: String,

    /// Source taxonomy value; see [`source`].
    pub source: i32,

    /// Remote-source identifier; 0 when unknown.
    #[serde(rename = "geonameID")]
    #[serde(alias = "geoname_id")]
    #[serde(skip_serializing_if = "id_is_zero")]
    pub geoname_id: i64,

    /// Fully qualified name for display and for result ordering. Populated
    /// once dedup has settled the `show_county`/`show_state` hints.
    #[serde(rename = "displayName")]
    #[serde(alias = "display_name")]
    pub display_name: String,

    /// Provenance: this match came through `atlas_alt_names`.
    #[serde(skip)]
    pub matched_by_alternate_name: bool,

    /// Provenance: this match came from the soundex stage.
    #[serde(skip)]
    pub matched_by_sound: bool,

    /// Transient dedup signal: the surviving row should overwrite its
    /// database counterpart during writeback.
    #[serde(skip)]
    pub use_as_update: bool,
} // struct

fn id_is_zero(id: &i64) -> bool {
    *id == 0
} // fn

// -----------------------------------------------------------------------------

impl AtlasLocation {
    /// Distance to another location, in kilometers.
    #[must_use]
    pub fn distance_from(&self, other: &Self) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    } // fn

    /// True when the two locations are at the same site, within
    /// [`CLOSE_DISTANCE_KM`].
    #[must_use]
    pub fn is_same_site(&self, other: &Self) -> bool {
        self.distance_from(other) < CLOSE_DISTANCE_KM
    } // fn

    /// True when the two locations differ only in presentation-layer fields:
    /// equal (case-insensitively) on the naming fields, coordinates within
    /// `1e-4` degrees, and identical elevation, zone, zip, and place type.
    #[must_use]
    pub fn is_close_match(&self, other: &Self) -> bool {
        eqci(&self.city, &other.city)
            && eqci(&self.variant, &other.variant)
            && eqci(&self.county, &other.county)
            && eqci(&self.state, &other.state)
            && eqci(&self.country, &other.country)
            && (self.latitude - other.latitude).abs() < COORD_TOLERANCE
            && (self.longitude - other.longitude).abs() < COORD_TOLERANCE
            && self.elevation == other.elevation
            && self.zone == other.zone
            && self.zip == other.zip
            && self.place_type == other.place_type
    } // fn

    /// Rebuilds `display_name` from the naming fields and the current
    /// disambiguation hints.
    pub fn update_display_name(&mut self) {
        let mut name = self.city.clone();

        if self.show_county && !self.county.is_empty() {
            name.push_str(", ");
            name.push_str(&self.county);
        } // if

        if !self.state.is_empty() {
            name.push_str(", ");
            name.push_str(&self.state);
        } // if

        if !self.long_country.is_empty() && self.country != "USA" {
            name.push_str(", ");
            name.push_str(&self.long_country);
        } // if

        self.display_name = name;
    } // fn

    /// Inserts this location into `map` under a freshly built key.
    pub fn insert_into(self, map: &mut LocationMap) {
        let key = make_location_key(&self.city, &self.state, &self.country, map);
        map.insert(key, self);
    } // fn
} // impl

/// Case-insensitive string equality.
fn eqci(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
} // fn

// -----------------------------------------------------------------------------
//
/// Builds the composite key a location is filed under: the simplified city
/// name plus the state (inside the US and Canada) or the country (elsewhere).
/// When the key is already taken in `used`, a `(2)`, `(3)`, … suffix makes it
/// unique; the dedup stage collapses those suffixes back into one bucket.
#[must_use]
pub fn make_location_key(city: &str, state: &str, country: &str, used: &LocationMap) -> String {
    let mut base = simplify(city, false);

    if base.is_empty() {
        base.push('_');
    } // if

    let qualifier = if country == "USA" || country == "CAN" {
        state
    } else {
        country
    }; // if

    if !qualifier.is_empty() {
        base.push(',');
        base.push_str(qualifier);
    } // if

    let mut key = base.clone();
    let mut n = 1;

    while used.contains_key(&key) {
        n += 1;
        key = format!("{base}({n})");
    } // while

    key
} // fn

/// Strips the uniquifying `(n)` suffix off a location key, yielding the
/// bucket the key belongs to.
#[must_use]
pub fn base_of_key(key: &str) -> &str {
    if let Some(open) = key.rfind('(') {
        if key.ends_with(')') && key[open + 1..key.len() - 1].chars().all(|c| c.is_ascii_digit()) {
            return &key[..open];
        } // if
    } // if

    key
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn nashua() -> AtlasLocation {
        AtlasLocation {
            city: "Nashua".to_string(),
            state: "NH".to_string(),
            country: "USA".to_string(),
            long_country: "United States".to_string(),
            latitude: 42.7654,
            longitude: -71.4676,
            zone: "America/New_York".to_string(),
            place_type: "P.PPL".to_string(),
            rank: 3,
            ..Default::default()
        }
    }

    #[test]
    fn keys_use_state_inside_us_and_country_elsewhere() {
        let map = LocationMap::new();
        assert_eq!(make_location_key("Nashua", "NH", "USA", &map), "NASHUA,NH");
        assert_eq!(make_location_key("Paris", "", "FRA", &map), "PARIS,FRA");
    }

    #[test]
    fn duplicate_keys_get_suffixes() {
        let mut map = LocationMap::new();
        nashua().insert_into(&mut map);
        nashua().insert_into(&mut map);
        nashua().insert_into(&mut map);

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["NASHUA,NH", "NASHUA,NH(2)", "NASHUA,NH(3)"]);
    }

    #[test]
    fn key_suffixes_collapse_to_one_bucket() {
        assert_eq!(base_of_key("NASHUA,NH(2)"), "NASHUA,NH");
        assert_eq!(base_of_key("NASHUA,NH"), "NASHUA,NH");
        // A parenthesis that is not a numeric suffix stays:
        assert_eq!(base_of_key("FOO(BAR)"), "FOO(BAR)");
    }

    #[test]
    fn close_match_tolerances() {
        let a = nashua();

        let mut b = a.clone();
        b.latitude += 0.00005;
        assert!(a.is_close_match(&b));

        b.latitude = a.latitude + 0.001;
        assert!(!a.is_close_match(&b));

        let mut c = a.clone();
        c.zone = "America/New_York?".to_string();
        assert!(!a.is_close_match(&c));

        let mut d = a.clone();
        d.city = "NASHUA".to_string();
        assert!(a.is_close_match(&d));
    }

    #[test]
    fn display_name_reflects_hints() {
        let mut loc = nashua();
        loc.update_display_name();
        assert_eq!(loc.display_name, "Nashua, NH");

        loc.county = "Hillsborough County".to_string();
        loc.show_county = true;
        loc.update_display_name();
        assert_eq!(loc.display_name, "Nashua, Hillsborough County, NH");
    }

    #[test]
    fn foreign_display_name_carries_country() {
        let mut loc = AtlasLocation {
            city: "Paris".to_string(),
            country: "FRA".to_string(),
            long_country: "France".to_string(),
            ..Default::default()
        };
        loc.update_display_name();
        assert_eq!(loc.display_name, "Paris, France");
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut loc = nashua();
        loc.update_display_name();
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["placeType"], "P.PPL");
        assert_eq!(json["displayName"], "Nashua, NH");
        assert_eq!(json["longCountry"], "United States");
        // Empty and zero-valued optionals stay off the wire:
        assert!(json.get("zip").is_none());
        assert!(json.get("geonameID").is_none());
    }
} // mod
