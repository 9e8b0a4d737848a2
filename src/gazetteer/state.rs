//! Static first-level administrative division tables for the United States
//! and Canada: long name to abbreviation and back.

use phf::phf_map;

// -----------------------------------------------------------------------------

/// Upper-cased long state/province name → postal abbreviation.
pub static ABBREV_BY_LONG: phf::Map<&'static str, &'static str> = phf_map! {
    // US states:
    "ALABAMA" => "AL", "ALASKA" => "AK", "ARIZONA" => "AZ", "ARKANSAS" => "AR",
    "CALIFORNIA" => "CA", "COLORADO" => "CO", "CONNECTICUT" => "CT",
    "DELAWARE" => "DE", "FLORIDA" => "FL", "GEORGIA" => "GA", "HAWAII" => "HI",
    "IDAHO" => "ID", "ILLINOIS" => "IL", "INDIANA" => "IN", "IOWA" => "IA",
    "KANSAS" => "KS", "KENTUCKY" => "KY", "LOUISIANA" => "LA", "MAINE" => "ME",
    "MARYLAND" => "MD", "MASSACHUSETTS" => "MA", "MICHIGAN" => "MI",
    "MINNESOTA" => "MN", "MISSISSIPPI" => "MS", "MISSOURI" => "MO",
    "MONTANA" => "MT", "NEBRASKA" => "NE", "NEVADA" => "NV",
    "NEW HAMPSHIRE" => "NH", "NEW JERSEY" => "NJ", "NEW MEXICO" => "NM",
    "NEW YORK" => "NY", "NORTH CAROLINA" => "NC", "NORTH DAKOTA" => "ND",
    "OHIO" => "OH", "OKLAHOMA" => "OK", "OREGON" => "OR",
    "PENNSYLVANIA" => "PA", "RHODE ISLAND" => "RI", "SOUTH CAROLINA" => "SC",
    "SOUTH DAKOTA" => "SD", "TENNESSEE" => "TN", "TEXAS" => "TX",
    "UTAH" => "UT", "VERMONT" => "VT", "VIRGINIA" => "VA",
    "WASHINGTON" => "WA", "WEST VIRGINIA" => "WV", "WISCONSIN" => "WI",
    "WYOMING" => "WY",

    // US federal district and territories:
    "DISTRICT OF COLUMBIA" => "DC", "PUERTO RICO" => "PR", "GUAM" => "GU",
    "AMERICAN SAMOA" => "AS", "NORTHERN MARIANA ISLANDS" => "MP",
    "US VIRGIN ISLANDS" => "VI", "VIRGIN ISLANDS" => "VI",

    // Canadian provinces and territories:
    "ALBERTA" => "AB", "BRITISH COLUMBIA" => "BC", "MANITOBA" => "MB",
    "NEW BRUNSWICK" => "NB", "NEWFOUNDLAND AND LABRADOR" => "NL",
    "NEWFOUNDLAND" => "NL", "NORTHWEST TERRITORIES" => "NT",
    "NOVA SCOTIA" => "NS", "NUNAVUT" => "NU", "ONTARIO" => "ON",
    "PRINCE EDWARD ISLAND" => "PE", "QUEBEC" => "QC", "SASKATCHEWAN" => "SK",
    "YUKON" => "YT", "YUKON TERRITORY" => "YT",
};

/// Postal abbreviation → long name. Abbreviations that fold several long
/// forms (`VI`, `NL`, `YT`) map to the canonical one.
pub static LONG_BY_ABBREV: phf::Map<&'static str, &'static str> = phf_map! {
    "AL" => "Alabama", "AK" => "Alaska", "AZ" => "Arizona", "AR" => "Arkansas",
    "CA" => "California", "CO" => "Colorado", "CT" => "Connecticut",
    "DE" => "Delaware", "FL" => "Florida", "GA" => "Georgia", "HI" => "Hawaii",
    "ID" => "Idaho", "IL" => "Illinois", "IN" => "Indiana", "IA" => "Iowa",
    "KS" => "Kansas", "KY" => "Kentucky", "LA" => "Louisiana", "ME" => "Maine",
    "MD" => "Maryland", "MA" => "Massachusetts", "MI" => "Michigan",
    "MN" => "Minnesota", "MS" => "Mississippi", "MO" => "Missouri",
    "MT" => "Montana", "NE" => "Nebraska", "NV" => "Nevada",
    "NH" => "New Hampshire", "NJ" => "New Jersey", "NM" => "New Mexico",
    "NY" => "New York", "NC" => "North Carolina", "ND" => "North Dakota",
    "OH" => "Ohio", "OK" => "Oklahoma", "OR" => "Oregon",
    "PA" => "Pennsylvania", "RI" => "Rhode Island", "SC" => "South Carolina",
    "SD" => "South Dakota", "TN" => "Tennessee", "TX" => "Texas",
    "UT" => "Utah", "VT" => "Vermont", "VA" => "Virginia",
    "WA" => "Washington", "WV" => "West Virginia", "WI" => "Wisconsin",
    "WY" => "Wyoming",

    "DC" => "District of Columbia", "PR" => "Puerto Rico", "GU" => "Guam",
    "AS" => "American Samoa", "MP" => "Northern Mariana Islands",
    "VI" => "Virgin Islands",

    "AB" => "Alberta", "BC" => "British Columbia", "MB" => "Manitoba",
    "NB" => "New Brunswick", "NL" => "Newfoundland and Labrador",
    "NT" => "Northwest Territories", "NS" => "Nova Scotia", "NU" => "Nunavut",
    "ON" => "Ontario", "PE" => "Prince Edward Island", "QC" => "Quebec",
    "SK" => "Saskatchewan", "YT" => "Yukon",
};

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_directions_agree() {
        for (long, abbrev) in &ABBREV_BY_LONG {
            let back = LONG_BY_ABBREV.get(abbrev).unwrap();
            // Alternate long forms (Newfoundland, Yukon Territory, …) fold
            // into the canonical entry:
            assert_eq!(
                *ABBREV_BY_LONG.get(&back.to_uppercase()).unwrap(),
                *abbrev,
                "mismatch for {long}"
            );
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(ABBREV_BY_LONG.get("NEW HAMPSHIRE"), Some(&"NH"));
        assert_eq!(LONG_BY_ABBREV.get("QC"), Some(&"Quebec"));
        assert!(ABBREV_BY_LONG.get("BAVARIA").is_none());
    }
} // mod
