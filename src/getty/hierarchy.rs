//! Parsing of the Getty hierarchy string (`"New Hampshire, United States,
//! North and Central America, World"`) into continent, country, state, and
//! county.

use crate::names::decode_entities;

// -----------------------------------------------------------------------------

/// Country names that themselves contain a comma, or whose entity-encoded
/// ligatures collide with the comma-separated layout. Each is rewritten
/// before the hierarchy is split.
const PRE_SUBSTITUTIONS: [(&str, &str); 6] = [
    ("Korea, South", "South Korea"),
    ("Korea, North", "North Korea"),
    ("Congo, Democratic Republic of the", "Democratic Republic of the Congo"),
    ("Micronesia, Federated States of", "Federated States of Micronesia"),
    ("C&ocirc;te d'Ivoire", "Cote d'Ivoire"),
    ("Cura&ccedil;ao", "Curacao"),
]; // const

// -----------------------------------------------------------------------------
//
/// The administrative ancestry of a Getty item, outermost levels named
/// explicitly. Fields are empty when the hierarchy was too shallow to carry
/// them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hierarchy {
    pub continent: String,
    pub country: String,
    pub state: String,
    pub county: String,
} // struct

// -----------------------------------------------------------------------------
//
/// Splits the hierarchy string. The patterns at depths two through five are:
///
/// | Depth | Layout |
/// |---|---|
/// | 2 | continent, World |
/// | 3 | country, continent, World |
/// | 4 | state, country, continent, World |
/// | 5 | county, state, country, continent, World |
///
/// Deeper hierarchies keep the five outermost levels; anything below the
/// county is discarded.
#[must_use]
pub fn parse_hierarchy(raw: &str) -> Hierarchy {
    let mut text = decode_entities(raw);

    for (from, to) in PRE_SUBSTITUTIONS {
        if text.contains(from) {
            text = text.replace(from, to);
        } // if
    } // for

    let mut levels: Vec<&str> = text.split(',').map(str::trim).collect();

    if levels.last() == Some(&"World") {
        levels.pop();
    } // if

    let mut hierarchy = Hierarchy::default();
    let depth = levels.len();

    if depth >= 1 {
        hierarchy.continent = levels[depth - 1].to_string();
    } // if

    if depth >= 2 {
        hierarchy.country = levels[depth - 2].to_string();
    } // if

    if depth >= 3 {
        hierarchy.state = levels[depth - 3].to_string();
    } // if

    if depth >= 4 {
        hierarchy.county = levels[depth - 4].to_string();
    } // if

    hierarchy
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
