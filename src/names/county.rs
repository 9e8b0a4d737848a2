//! US county-name standardization: the fixed list of spellings that defeat
//! naive title-casing, and the state-specific display suffixes.

use phf::{phf_map, phf_set};

// -----------------------------------------------------------------------------

/// Simplified county key → canonical spelling, for the names that
/// title-casing gets wrong.
static SPECIAL_SPELLINGS: phf::Map<&'static str, &'static str> = phf_map! {
    "COOS" => "Coös",
    "DEBACA" => "De Baca",
    "DEKALB" => "DeKalb",
    "DESOTO" => "DeSoto",
    "DUPAGE" => "DuPage",
    "DUTCHESS" => "Dutchess",
    "LAMOURE" => "LaMoure",
    "LAPORTE" => "LaPorte",
    "LASALLE" => "LaSalle",
    "MCCLAIN" => "McClain",
    "MCCRACKEN" => "McCracken",
    "MCDOWELL" => "McDowell",
    "MCDUFFIE" => "McDuffie",
    "MCHENRY" => "McHenry",
    "MCINTOSH" => "McIntosh",
    "MCKEAN" => "McKean",
    "MCKENZIE" => "McKenzie",
    "MCKINLEY" => "McKinley",
    "MCLEAN" => "McLean",
    "MCLENNAN" => "McLennan",
    "MCLEOD" => "McLeod",
    "MCMINN" => "McMinn",
    "MCMULLEN" => "McMullen",
    "MCNAIRY" => "McNairy",
    "MCPHERSON" => "McPherson",
    "OBRIEN" => "O'Brien",
    "PRINCEGEORGES" => "Prince George's",
    "QUEENANNES" => "Queen Anne's",
    "STCLAIR" => "St. Clair",
    "STCROIX" => "St. Croix",
    "STFRANCIS" => "St. Francis",
    "STFRANCOIS" => "St. Francois",
    "STHELENA" => "St. Helena",
    "STJOHNS" => "St. Johns",
    "STJOSEPH" => "St. Joseph",
    "STLANDRY" => "St. Landry",
    "STLAWRENCE" => "St. Lawrence",
    "STLOUIS" => "St. Louis",
    "STLUCIE" => "St. Lucie",
    "STMARYS" => "St. Mary's",
    "STEGENEVIEVE" => "Ste. Genevieve",
    "SKAGWAYHOONAHANGOON" => "Skagway-Hoonah-Angoon",
};

/// Suffix words that mark an already-adjusted county name.
static SUFFIX_WORDS: phf::Set<&'static str> = phf_set! {
    "BOROUGH", "AREA", "DIVISION", "PARISH", "COUNTY", "MUNICIPALITY",
};

/// Alaska's county-equivalents that take "Census Area" rather than
/// "Borough".
static ALASKA_CENSUS_AREAS: phf::Set<&'static str> = phf_set! {
    "ALEUTIANSWEST", "BETHEL", "DILLINGHAM", "HOONAHANGOON", "KUSILVAK",
    "NOME", "PRINCEOFWALESHYDER", "SKAGWAYHOONAHANGOON",
    "SOUTHEASTFAIRBANKS", "VALDEZCORDOVA", "WADEHAMPTON", "YUKONKOYUKUK",
};

// -----------------------------------------------------------------------------
//
/// Reduces a US county designation to its short canonical spelling: the
/// trailing suffix word (`County`, `Parish`, `Borough`, `Census Area`,
/// `Division`) is removed, and the remainder is looked up against the fixed
/// spelling list before falling back to title case.
#[must_use]
pub fn standardize_short_county_name(county: &str) -> String {
    let mut words: Vec<&str> = county.split_whitespace().collect();

    while let Some(last) = words.last() {
        if SUFFIX_WORDS.contains(&last.to_uppercase()) {
            words.pop();
        } else if *last == "Census" {
            // "Census" only appears as part of "Census Area":
            words.pop();
        } else {
            break;
        } // if
    } // while

    let short = words.join(" ");
    let key = crate::normalize::simplify(&short, false);

    if let Some(spelling) = SPECIAL_SPELLINGS.get(key.as_str()) {
        return (*spelling).to_string();
    } // if

    title_case(&short)
} // fn

// -----------------------------------------------------------------------------
//
/// Expands a short county name to its display form with the suffix the state
/// uses: `Parish` in Louisiana, `Borough` or `Census Area` in Alaska (the
/// census-area list is fixed), `County` everywhere else. Names that already
/// carry a suffix are left alone.
#[must_use]
pub fn adjust_us_county_name(county: &str, state: &str) -> String {
    if county.is_empty() {
        return String::new();
    } // if

    if let Some(last) = county.split_whitespace().last() {
        if SUFFIX_WORDS.contains(&last.to_uppercase()) {
            return county.to_string();
        } // if
    } // if

    let suffix = match state {
        "LA" => "Parish",
        "AK" => {
            let key = crate::normalize::simplify(county, false);
            if ALASKA_CENSUS_AREAS.contains(key.as_str()) {
                "Census Area"
            } else {
                "Borough"
            } // if
        } // "AK"
        _ => "County",
    }; // match

    format!("{county} {suffix}")
} // fn

// -----------------------------------------------------------------------------

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                } // Some
                None => String::new(),
            } // match
        })
        .collect::<Vec<_>>()
        .join(" ")
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_suffix_words() {
        assert_eq!(standardize_short_county_name("Hillsborough County"), "Hillsborough");
        assert_eq!(standardize_short_county_name("Orleans Parish"), "Orleans");
        assert_eq!(standardize_short_county_name("Nome Census Area"), "Nome");
        assert_eq!(standardize_short_county_name("North Slope Borough"), "North Slope");
    }

    #[test]
    fn fixed_spellings_win() {
        assert_eq!(standardize_short_county_name("MCLEAN COUNTY"), "McLean");
        assert_eq!(standardize_short_county_name("obrien"), "O'Brien");
        assert_eq!(standardize_short_county_name("DeKalb County"), "DeKalb");
        assert_eq!(standardize_short_county_name("DUPAGE"), "DuPage");
        assert_eq!(
            standardize_short_county_name("Skagway-Hoonah-Angoon Census Area"),
            "Skagway-Hoonah-Angoon"
        );
    }

    #[test]
    fn title_case_fallback() {
        assert_eq!(standardize_short_county_name("WINSTON COUNTY"), "Winston");
        assert_eq!(standardize_short_county_name("los angeles"), "Los Angeles");
    }

    #[test]
    fn display_suffix_by_state() {
        assert_eq!(adjust_us_county_name("Hillsborough", "NH"), "Hillsborough County");
        assert_eq!(adjust_us_county_name("Orleans", "LA"), "Orleans Parish");
        assert_eq!(adjust_us_county_name("North Slope", "AK"), "North Slope Borough");
        assert_eq!(adjust_us_county_name("Nome", "AK"), "Nome Census Area");
        assert_eq!(
            adjust_us_county_name("Skagway-Hoonah-Angoon", "AK"),
            "Skagway-Hoonah-Angoon Census Area"
        );
        // Already adjusted names pass through:
        assert_eq!(adjust_us_county_name("Orleans Parish", "LA"), "Orleans Parish");
        assert_eq!(adjust_us_county_name("", "TX"), "");
    }
} // mod
