//! Query-improvement suggestions attached as warnings when a search comes
//! back thin: missing commas, periods standing in for commas, dotted
//! abbreviations, and stray punctuation.

use crate::gazetteer::Gazetteer;
use once_cell::sync::Lazy;
use regex::Regex;

// -----------------------------------------------------------------------------

/// Dotted abbreviation, e.g. `N.H.` or `U.S.A.`.
static DOTTED_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[A-Za-z]\.){2,}").unwrap());

/// Punctuation that has no business in a place-name query.
static STRAY_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;:!?#@*_=+|<>]").unwrap());

// -----------------------------------------------------------------------------
//
/// Produces the suggestion lines for a query. `had_matches` suppresses the
/// "did you mean" split suggestion, which is only helpful when strict
/// parsing came up empty.
#[must_use]
pub fn suggestions(query: &str, had_matches: bool, gazetteer: &Gazetteer) -> Vec<String> {
    let mut lines = Vec::new();
    let trimmed = query.trim();

    if !had_matches && !trimmed.contains(',') {
        if let Some((city, state)) = split_run_together(trimmed, gazetteer) {
            lines.push(format!("Did you mean \"{city}, {state}\"?"));
        } // if
    } // if

    if trimmed.matches(',').count() > 2 {
        lines.push(
            "Too much information: at most city, state, and country are needed.".to_string(),
        ); // push
    } // if

    if !trimmed.contains(',')
        && trimmed.contains(". ")
        && !DOTTED_ABBREVIATION.is_match(trimmed)
    {
        lines.push("It looks like periods were used in place of commas.".to_string());
    } // if

    if DOTTED_ABBREVIATION.is_match(trimmed) {
        lines.push("Try entering abbreviations without periods, e.g. \"NH\".".to_string());
    } // if

    if STRAY_PUNCTUATION.is_match(trimmed) {
        lines.push("Try removing stray punctuation from the search.".to_string());
    } // if

    lines
} // fn

// -----------------------------------------------------------------------------

/// Finds a trailing state/country token run together with the city,
/// preserving the query's own casing for the suggestion.
fn split_run_together(query: &str, gazetteer: &Gazetteer) -> Option<(String, String)> {
    for suffix_len in [3usize, 2] {
        if query.chars().count() <= suffix_len {
            continue;
        } // if

        let split_at = query.len().checked_sub(suffix_len)?;
        if !query.is_char_boundary(split_at) {
            continue;
        } // if

        let (head, token) = query.split_at(split_at);

        if !token.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            continue;
        } // if

        if gazetteer.is_state_abbreviation(token) || gazetteer.is_country_code(token) {
            let head = head.trim_end_matches([' ', ',']);

            if !head.is_empty() {
                return Some((head.to_string(), token.to_uppercase()));
            } // if
        } // if
    } // for

    None
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
