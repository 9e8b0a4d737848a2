//! Canonicalization of place names arriving from remote sources, and the
//! close-match predicates used to filter candidates against the parsed
//! query.

mod county;
mod entities;

pub use county::{adjust_us_county_name, standardize_short_county_name};
pub use entities::decode_entities;

use crate::gazetteer::{state, Gazetteer};
use crate::location::AtlasLocation;
use crate::normalize::starts_with_icnd;
use once_cell::sync::Lazy;
use regex::Regex;

// -----------------------------------------------------------------------------

/// Marker for a country designation that could not be resolved.
pub const UNKNOWN_COUNTRY: &str = "XX?";

/// Numbered administrative suburb, e.g. "Paris 04".
static NUMBERED_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\d{1,2}$").unwrap());

/// Entries that are not free-standing populated places.
static NON_CITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(apartments?|apts\.?|trailer (?:court|park)|mobile home|census designated place|subdivision|historical)\b",
    )
    .unwrap()
}); // Lazy

/// A rearranged name: "Placid, Lake" and friends.
static COMMA_FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?),\s+(\S+)$").unwrap());

/// Leading generic words that produce a variant form.
static VARIANT_LEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Lake|Mount|Mt\.?|The|La|Las|El|Le|Los)\s+(.+)$").unwrap());

/// Prefixes stripped off second-level admin names.
static ADMIN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:County of|Provincia de|Province de|Distrito de)\s+").unwrap());

/// Suffixes stripped off first- and second-level admin names.
static ADMIN_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\s+(?:Province|Prefecture|Oblast|Kray|District|Department|Governorate|Metropolitan Area|Territory|Region|Republic)$",
    )
    .unwrap()
}); // Lazy

/// Suffixes that mark a US independent city record.
static INDEPENDENT_CITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:City of\s+)?(.*?)(?:\s+Independent City)?$").unwrap());

// -----------------------------------------------------------------------------
//
/// Normalizes the naming fields of a remote-sourced location in place.
/// Returns `false` when the entry is not a usable place name at all (a
/// numbered suburb, an apartment complex, a historical record, …) and should
/// be dropped.
///
/// `decode_html` is set by the Getty adapter, whose scraped strings carry
/// HTML entities.
pub fn process_place_names(
    location: &mut AtlasLocation,
    gazetteer: &Gazetteer,
    decode_html: bool,
) -> bool {
    if decode_html {
        location.city = decode_entities(&location.city);
        location.county = decode_entities(&location.county);
        location.state = decode_entities(&location.state);
        location.long_country = decode_entities(&location.long_country);
    } // if

    if NUMBERED_SUFFIX.is_match(&location.city) || NON_CITY.is_match(&location.city) {
        return false;
    } // if

    // "Placid, Lake" → "Lake Placid", remembering the bare name:
    let original_city = location.city.clone();

    if let Some(captures) = COMMA_FORM.captures(&original_city) {
        location.variant = captures[1].to_string();
        location.city = format!("{} {}", &captures[2], &captures[1]);
    } else if location.variant.is_empty() {
        if let Some(captures) = VARIANT_LEAD.captures(&location.city) {
            location.variant = captures[1].to_string();
        } // if
    } // if

    location.county = clean_admin_name(&location.county);
    location.state = clean_admin_name(&location.state);

    resolve_country(location, gazetteer);

    if location.country == "USA" || location.country == "CAN" {
        if let Some(abbrev) = state::ABBREV_BY_LONG.get(&location.state.to_uppercase()) {
            location.state = (*abbrev).to_string();
        } // if
    } // if

    if location.country == "USA" {
        normalize_us_county(location, gazetteer);
    } // if

    true
} // fn

// -----------------------------------------------------------------------------

fn clean_admin_name(name: &str) -> String {
    let name = ADMIN_PREFIX.replace(name, "");
    ADMIN_SUFFIX.replace(&name, "").trim().to_string()
} // fn

/// Resolves whatever country designation the source provided (name,
/// alternate form, code2, code3) to the three-letter code plus the long
/// name. Unresolvable designations keep their text as `long_country` and
/// mark `country` as [`UNKNOWN_COUNTRY`].
fn resolve_country(location: &mut AtlasLocation, gazetteer: &Gazetteer) {
    let designation = if location.country.is_empty() {
        location.long_country.clone()
    } else {
        location.country.clone()
    }; // if

    if designation.is_empty() {
        return;
    } // if

    match gazetteer.code3_for(&designation) {
        Some(code3) => {
            location.country = code3.to_string();
            location.long_country = gazetteer
                .long_country(&location.country)
                .unwrap_or(&designation)
                .to_string();
        } // Some
        None => {
            if location.long_country.is_empty() {
                location.long_country = designation;
            } // if
            location.country = UNKNOWN_COUNTRY.to_string();
        } // None
    } // match
} // fn

/// US counties: standardize the spelling; if that is not a county the
/// gazetteer knows, fall back to the raw form minus independent-city
/// suffixes. A "county" that is really the city itself is an independent
/// city and is blanked; anything else unrecognized is prefixed `City of`.
fn normalize_us_county(location: &mut AtlasLocation, gazetteer: &Gazetteer) {
    if location.county.is_empty() {
        return;
    } // if

    let standardized = standardize_short_county_name(&location.county);

    if gazetteer.is_us_county(&standardized, &location.state) {
        location.county = adjust_us_county_name(&standardized, &location.state);
        return;
    } // if

    let stripped = INDEPENDENT_CITY
        .captures(&location.county)
        .map(|captures| captures[1].trim().to_string())
        .unwrap_or_else(|| location.county.clone());

    if starts_with_icnd(&location.city, &stripped) && starts_with_icnd(&stripped, &location.city) {
        location.county = String::new();
    } else {
        location.county = format!("City of {stripped}");
    } // if
} // fn

// -----------------------------------------------------------------------------
//
/// State-side close match: does the query's state/country qualifier match
/// this location? The qualifier may be an abbreviation, a long state name, a
/// country code (current or superseded), or a country name prefix; `GBR`
/// additionally answers to "Great Britain" and "England".
#[must_use]
pub fn close_match_for_state(
    target_state: &str,
    state: &str,
    country: &str,
    gazetteer: &Gazetteer,
) -> bool {
    if target_state.is_empty() {
        return true;
    } // if

    let mut candidates: Vec<String> = vec![state.to_string(), country.to_string()];

    if let Some(long_state) = state::LONG_BY_ABBREV.get(&state.to_uppercase()) {
        candidates.push((*long_state).to_string());
    } // if

    if let Some(long_country) = gazetteer.long_country(country) {
        candidates.push(long_country.to_string());
    } // if

    if let Some(code2) = gazetteer.code2_for(country) {
        candidates.push(code2.to_string());
    } // if

    if let Some(old_code2) = gazetteer.old_code2_for(country) {
        candidates.push(old_code2);
    } // if

    if country == "GBR" {
        candidates.push("Great Britain".to_string());
        candidates.push("England".to_string());
    } // if

    candidates
        .iter()
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| starts_with_icnd(candidate, target_state))
} // fn

/// City-side close match: the query city must be a prefix of the candidate's
/// name or of its variant form.
#[must_use]
pub fn close_match_for_city(target_city: &str, location: &AtlasLocation) -> bool {
    if target_city.is_empty() {
        return true;
    } // if

    starts_with_icnd(&location.city, target_city)
        || (!location.variant.is_empty() && starts_with_icnd(&location.variant, target_city))
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;

    fn location(city: &str, county: &str, state: &str, country: &str) -> AtlasLocation {
        AtlasLocation {
            city: city.to_string(),
            county: county.to_string(),
            state: state.to_string(),
            long_country: country.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_non_places() {
        let gazetteer = Gazetteer::for_tests();
        for city in [
            "Paris 04",
            "Sunset Trailer Park",
            "Oakwood Apartments",
            "Elm Grove (historical)",
            "Pine Census Designated Place",
        ] {
            let mut loc = location(city, "", "", "France");
            assert!(!process_place_names(&mut loc, &gazetteer, false), "{city}");
        }
    }

    #[test]
    fn rearranges_comma_form() {
        let gazetteer = Gazetteer::for_tests();
        let mut loc = location("Placid, Lake", "", "NY", "United States");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.city, "Lake Placid");
        assert_eq!(loc.variant, "Placid");
    }

    #[test]
    fn leading_article_sets_variant() {
        let gazetteer = Gazetteer::for_tests();
        let mut loc = location("Mount Washington", "", "NH", "United States");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.variant, "Washington");
    }

    #[test]
    fn resolves_country_forms() {
        let gazetteer = Gazetteer::for_tests();

        let mut loc = location("Paris", "", "", "France");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.country, "FRA");
        assert_eq!(loc.long_country, "France");

        let mut loc = location("London", "", "", "Great Britain");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.country, "GBR");
        assert_eq!(loc.long_country, "United Kingdom");

        let mut loc = location("Xanadu", "", "", "Erewhon");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.country, UNKNOWN_COUNTRY);
        assert_eq!(loc.long_country, "Erewhon");
    }

    #[test]
    fn us_state_and_county_normalization() {
        let gazetteer = Gazetteer::for_tests();
        let mut loc = location("Nashua", "Hillsborough", "New Hampshire", "United States");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.state, "NH");
        assert_eq!(loc.county, "Hillsborough County");
    }

    #[test]
    fn independent_city_blanks_county() {
        let gazetteer = Gazetteer::for_tests();
        let mut loc = location("Richmond", "City of Richmond", "VA", "United States");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.county, "");
    }

    #[test]
    fn unknown_us_county_gets_city_of_prefix() {
        let gazetteer = Gazetteer::for_tests();
        let mut loc = location("Norfolk", "Chesapeake", "VA", "United States");
        assert!(process_place_names(&mut loc, &gazetteer, false));
        assert_eq!(loc.county, "City of Chesapeake");
    }

    #[test]
    fn admin_suffix_cleanup() {
        assert_eq!(clean_admin_name("Ontario Province"), "Ontario");
        assert_eq!(clean_admin_name("County of Kent"), "Kent");
        assert_eq!(clean_admin_name("Moscow Oblast"), "Moscow");
        assert_eq!(clean_admin_name("Île-de-France Region"), "Île-de-France");
    }

    #[test]
    fn state_close_match() {
        let gazetteer = Gazetteer::for_tests();
        assert!(close_match_for_state("NH", "NH", "USA", &gazetteer));
        assert!(close_match_for_state("New Hampshire", "NH", "USA", &gazetteer));
        assert!(close_match_for_state("France", "", "FRA", &gazetteer));
        assert!(close_match_for_state("FR", "", "FRA", &gazetteer));
        assert!(close_match_for_state("England", "", "GBR", &gazetteer));
        assert!(close_match_for_state("UK", "", "GBR", &gazetteer));
        assert!(!close_match_for_state("VT", "NH", "USA", &gazetteer));
        assert!(close_match_for_state("", "NH", "USA", &gazetteer));
    }

    #[test]
    fn city_close_match() {
        let loc = AtlasLocation {
            city: "Lake Placid".to_string(),
            variant: "Placid".to_string(),
            ..Default::default()
        };
        assert!(close_match_for_city("Lake Pla", &loc));
        assert!(close_match_for_city("Placid", &loc));
        assert!(!close_match_for_city("Saranac", &loc));
    }
} // mod
