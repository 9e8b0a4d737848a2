//! Free-form query parsing. A search string such as `"Nashua, NH"`,
//! `"90210"`, or `"Paris, France"` is split into a postal code, a target
//! city, and a target state or country, plus the normalized form used as the
//! search-log key.

use crate::gazetteer::Gazetteer;
use crate::normalize::plain_ascii;
use once_cell::sync::Lazy;
use regex::Regex;

// -----------------------------------------------------------------------------

/// A five-digit US ZIP code, optionally with a ZIP+4 (or longer) extension.
static US_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4,6})?$").unwrap());

/// Generic postal pattern: two to eight alphanumerics, optionally a second
/// group. Only accepted when at least one digit is present, so that plain
/// words never read as postal codes.
static OTHER_POSTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Z]{2,8}((-|\s+)[0-9A-Z]{2,6})?$").unwrap());

// -----------------------------------------------------------------------------
//
/// How strictly the parser treats a query. Loose parsing serves legacy
/// clients (protocol `version < 3`) that ran city and state together without
/// a comma.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseMode {
    Strict,
    Loose,
} // enum

// -----------------------------------------------------------------------------
//
/// The normalized decomposition of a search string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedSearch {
    /// Postal code pulled out of the query; empty when none was found.
    pub postal_code: String,

    /// City (or feature) name being searched for, folded to upper-case
    /// ASCII. Empty for postal-only queries.
    pub target_city: String,

    /// State, province, or country qualifier, folded to upper-case ASCII.
    pub target_state: String,

    /// The query as received, trimmed.
    pub actual_search: String,

    /// Canonical form of the query: the key for search-log and coherence
    /// lookups.
    pub normalized_search: String,
} // struct

impl ParsedSearch {
    /// True when the query was a postal-code search.
    #[must_use]
    pub fn is_postal(&self) -> bool {
        !self.postal_code.is_empty()
    } // fn
} // impl

// -----------------------------------------------------------------------------
//
/// Parses a free-form query.
///
/// The query is split on commas into at most three parts (city, state,
/// country; a country replaces the state). A postal code is recognized in
/// either of the first two whitespace-separated tokens, US-ZIP form taking
/// precedence over the generic pattern. In loose mode, and only when no
/// state was given explicitly, a trailing two- or three-letter token that
/// names a known state or country is pulled off the end of the city.
#[must_use]
pub fn parse_search(query: &str, mode: ParseMode, gazetteer: &Gazetteer) -> ParsedSearch {
    let actual_search = query.trim().to_string();

    // Comma parts. Slots are kept positional so that consuming one as a
    // postal code does not shift the state slot:
    let mut parts: Vec<Option<String>> = actual_search
        .split(',')
        .take(3)
        .map(|part| Some(fold(part)))
        .collect();

    while parts.len() < 3 {
        parts.push(None);
    } // while

    let postal_code = extract_postal(&mut parts);

    let mut target_city = parts[0].take().unwrap_or_default();

    // A third (country) part displaces the state:
    let mut target_state = match parts[2].take().filter(|part| !part.is_empty()) {
        Some(country) => country,
        None => parts[1].take().unwrap_or_default(),
    }; // match

    if mode == ParseMode::Loose && target_state.is_empty() {
        if let Some((city, state)) = split_trailing_state(&target_city, gazetteer) {
            target_city = city;
            target_state = state;
        } // if
    } // if

    let normalized_search = normalized_form(&postal_code, &target_city, &target_state);

    ParsedSearch {
        postal_code,
        target_city,
        target_state,
        actual_search,
        normalized_search,
    } // struct
} // fn

// -----------------------------------------------------------------------------

/// Folds one comma part to trimmed, upper-case ASCII with runs of whitespace
/// collapsed.
fn fold(part: &str) -> String {
    plain_ascii(part, false)
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
} // fn

/// Builds the canonical log key: postal or city first, the state appended
/// after a comma, and the swapped `city, postal` form when both were
/// supplied.
fn normalized_form(postal: &str, city: &str, state: &str) -> String {
    let mut normalized = if !postal.is_empty() && !city.is_empty() {
        format!("{city}, {postal}")
    } else if !postal.is_empty() {
        postal.to_string()
    } else {
        city.to_string()
    }; // if

    if !state.is_empty() {
        normalized.push_str(", ");
        normalized.push_str(state);
    } // if

    normalized
} // fn

/// Looks for a postal code in the first two whitespace tokens of the first
/// two comma slots, ZIP form first. The matched token is removed from its
/// slot; a slot left empty stays consumed.
fn extract_postal(parts: &mut [Option<String>]) -> String {
    for zip_pass in [true, false] {
        let mut token_budget = 2usize;

        for slot in 0..2 {
            let Some(part) = parts[slot].clone() else { continue };

            // The generic pattern may span a space ("SW1A 1AA"), so try the
            // whole slot first on the non-ZIP pass:
            if !zip_pass && is_other_postal(&part) {
                parts[slot] = Some(String::new());
                return part;
            } // if

            for token in part.split_whitespace() {
                if token_budget == 0 {
                    break;
                } // if
                token_budget -= 1;

                let matched = if zip_pass {
                    US_ZIP.is_match(token)
                } else {
                    is_other_postal(token)
                }; // if

                if matched {
                    let remainder = part
                        .split_whitespace()
                        .filter(|t| *t != token)
                        .collect::<Vec<_>>()
                        .join(" ");
                    parts[slot] = Some(remainder);
                    return token.to_string();
                } // if
            } // for

            if token_budget == 0 {
                break;
            } // if
        } // for
    } // for

    String::new()
} // fn

fn is_other_postal(s: &str) -> bool {
    OTHER_POSTAL.is_match(s) && s.chars().any(|ch| ch.is_ascii_digit())
} // fn

/// Tries to pull a trailing two- or three-character token off the city and
/// accept it as a state, longest suffix first. No separator is required, so
/// `NASHUANH` splits into `NASHUA` + `NH`.
fn split_trailing_state(city: &str, gazetteer: &Gazetteer) -> Option<(String, String)> {
    for suffix_len in [3usize, 2] {
        if city.chars().count() <= suffix_len {
            continue;
        } // if

        let split_at = city.len() - suffix_len;
        if !city.is_char_boundary(split_at) {
            continue;
        } // if

        let (head, token) = city.split_at(split_at);

        if !token.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            continue;
        } // if

        if gazetteer.is_state_abbreviation(token) || gazetteer.is_country_code(token) {
            let head = head.trim_end_matches([' ', ',']).to_string();
            if !head.is_empty() {
                return Some((head, token.to_string()));
            } // if
        } // if
    } // for

    None
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
