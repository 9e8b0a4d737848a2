//! The in-memory gazetteer dictionaries: country-name and country-code maps,
//! state tables, the US county set, celestial-object names to reject, and
//! the flag-image inventory. Built once at start-up from the data files and
//! re-built (with an atomic swap at the holder) when the data is more than a
//! day old.

pub mod country;
pub mod error;
mod flags;
pub mod state;

pub use error::Error;

use crate::normalize::simplify;
use chrono::{DateTime, Duration, Utc};
use country::CountryRecord;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// -----------------------------------------------------------------------------

/// Re-initialization interval: dictionaries older than this are rebuilt on
/// the next search, best-effort.
pub const MAX_AGE_HOURS: i64 = 24;

// -----------------------------------------------------------------------------
//
/// Where the gazetteer's inputs live.
#[derive(Clone, Debug)]
pub struct GazetteerPaths {
    /// Directory holding `country_codes.txt`, `us_counties.txt`, and
    /// `celestial.txt`.
    pub data_dir: PathBuf,

    /// Directory of flag images (`us.png`, `gb-sct.gif`, …).
    pub flag_dir: PathBuf,

    /// Remote index page to scrape when the flag directory is empty.
    pub flag_index_url: Option<String>,
} // struct

// -----------------------------------------------------------------------------
//
/// The read-only dictionary set. All lookups are O(1); every key is a
/// [`simplify`]-folded form or an upper-cased code.
#[derive(Clone, Debug, Default)]
pub struct Gazetteer {
    /// code3 → human-readable country name.
    long_country_by_code3: HashMap<String, String>,

    /// Simplified country name (including alternate forms) → code3.
    code3_by_name: HashMap<String, String>,

    /// code2 and superseded code2 → code3.
    code3_by_code2: HashMap<String, String>,

    /// code3 → current code2.
    code2_by_code3: HashMap<String, String>,

    /// Countries for which no flag image exists regardless of inventory.
    flagless: HashSet<String>,

    /// Codes with a known flag image.
    flag_codes: HashSet<String>,

    /// `SIMPLIFIEDCOUNTY,ST` pairs for every US county.
    us_counties: HashSet<String>,

    /// Simplified names of celestial objects, which are never place names.
    celestial: HashSet<String>,

    built_at: DateTime<Utc>,
} // struct

// -----------------------------------------------------------------------------

impl Gazetteer {
    /// Reads the data files and flag inventory and builds the dictionaries.
    ///
    /// # Errors
    ///
    /// Fails when a data file is unreadable or a country record is
    /// malformed. A missing flag inventory is logged and tolerated; flags
    /// are presentation only.
    pub async fn init(paths: &GazetteerPaths, http: &reqwest::Client) -> Result<Self, Error> {
        let mut gazetteer = Self {
            built_at: Utc::now(),
            ..Self::default()
        }; // struct

        let country_path = paths.data_dir.join("country_codes.txt");
        for (index, line) in read_lines(&country_path)?.iter().enumerate() {
            if let Some(record) = country::parse_country_line(line) {
                if record.code3.len() != 3 {
                    return Err(Error::MalformedCountry {
                        path: country_path.display().to_string(),
                        line: index + 1,
                    }); // struct
                } // if

                gazetteer.add_country(record);
            } // if
        } // for

        for line in read_lines(&paths.data_dir.join("us_counties.txt"))? {
            gazetteer.add_us_county(&line);
        } // for

        // The data file predates DC's home-rule quirks:
        gazetteer.add_us_county("Washington, DC");

        for line in read_lines(&paths.data_dir.join("celestial.txt"))? {
            let name = simplify(&line, false);
            if !name.is_empty() {
                gazetteer.celestial.insert(name);
            } // if
        } // for

        gazetteer.flag_codes = flags::scan_flag_directory(&paths.flag_dir);

        if gazetteer.flag_codes.is_empty() {
            if let Some(url) = &paths.flag_index_url {
                match flags::scrape_flag_index(http, url).await {
                    Ok(codes) => gazetteer.flag_codes = codes,
                    Err(error) => {
                        tracing::warn!(error = %error, "flag inventory unavailable");
                    } // Err
                } // match
            } else {
                tracing::warn!("flag directory empty and no index URL configured");
            } // if
        } // if

        tracing::info!(
            countries = gazetteer.long_country_by_code3.len(),
            counties = gazetteer.us_counties.len(),
            celestial = gazetteer.celestial.len(),
            flags = gazetteer.flag_codes.len(),
            "gazetteer initialized"
        ); // info

        Ok(gazetteer)
    } // fn

    fn add_country(&mut self, record: CountryRecord) {
        let code3 = record.code3.to_uppercase();
        let code2 = record.code2.to_uppercase();

        self.long_country_by_code3.insert(code3.clone(), record.name.clone());
        self.code3_by_name.insert(simplify(&record.name, false), code3.clone());
        self.code3_by_name.insert(code3.clone(), code3.clone());

        for form in &record.alt_forms {
            self.code3_by_name.insert(simplify(form, false), code3.clone());
        } // for

        if !code2.is_empty() {
            self.code3_by_code2.insert(code2.clone(), code3.clone());
            self.code2_by_code3.insert(code3.clone(), code2);
        } // if

        if !record.old_code2.is_empty() {
            self.code3_by_code2
                .insert(record.old_code2.to_uppercase(), code3.clone());
        } // if

        if !record.has_flag {
            self.flagless.insert(code3);
        } // if
    } // fn

    fn add_us_county(&mut self, line: &str) {
        let Some((county, state)) = line.rsplit_once(',') else {
            return;
        }; // let

        let key = format!("{},{}", simplify(county, false), state.trim().to_uppercase());
        self.us_counties.insert(key);
    } // fn

    // -------------------------------------------------------------------------
    //
    // Lookups

    /// True for a known US or Canadian state/province abbreviation.
    #[must_use]
    pub fn is_state_abbreviation(&self, token: &str) -> bool {
        state::LONG_BY_ABBREV.contains_key(&token.to_uppercase())
    } // fn

    /// True for any known country code: code2, superseded code2, or code3.
    #[must_use]
    pub fn is_country_code(&self, token: &str) -> bool {
        let token = token.to_uppercase();
        self.code3_by_code2.contains_key(&token)
            || self.long_country_by_code3.contains_key(&token)
    } // fn

    /// Resolves any country designation (code2, old code2, code3, full or
    /// alternate name) to a code3.
    #[must_use]
    pub fn code3_for(&self, designation: &str) -> Option<&str> {
        let upper = designation.to_uppercase();

        if let Some(code3) = self.code3_by_code2.get(&upper) {
            return Some(code3);
        } // if

        if self.long_country_by_code3.contains_key(&upper) {
            return self.long_country_by_code3.get_key_value(&upper).map(|(k, _)| k.as_str());
        } // if

        self.code3_by_name.get(&simplify(designation, false)).map(String::as_str)
    } // fn

    /// Human-readable country name for a code3.
    #[must_use]
    pub fn long_country(&self, code3: &str) -> Option<&str> {
        self.long_country_by_code3.get(code3).map(String::as_str)
    } // fn

    /// Current code2 for a code3.
    #[must_use]
    pub fn code2_for(&self, code3: &str) -> Option<&str> {
        self.code2_by_code3.get(code3).map(String::as_str)
    } // fn

    /// Superseded code2 (if any) that also names this country.
    #[must_use]
    pub fn old_code2_for(&self, code3: &str) -> Option<String> {
        self.code3_by_code2
            .iter()
            .find(|(code2, mapped)| {
                mapped.as_str() == code3 && self.code2_for(code3) != Some(code2.as_str())
            })
            .map(|(code2, _)| code2.clone())
    } // fn

    /// Flag-image code for a country, when one exists in the inventory.
    #[must_use]
    pub fn flag_for(&self, code3: &str) -> Option<String> {
        if self.flagless.contains(code3) {
            return None;
        } // if

        let code = self.code2_for(code3)?.to_lowercase();
        self.flag_codes.contains(&code).then_some(code)
    } // fn

    /// True when `county` (any spelling) is a known county of the given US
    /// state.
    #[must_use]
    pub fn is_us_county(&self, county: &str, state: &str) -> bool {
        let key = format!("{},{}", simplify(county, false), state.to_uppercase());
        self.us_counties.contains(&key)
    } // fn

    /// True when the name belongs to a celestial object rather than a place.
    #[must_use]
    pub fn is_celestial(&self, name: &str) -> bool {
        self.celestial.contains(&simplify(name, false))
    } // fn

    /// Age of the dictionaries.
    #[must_use]
    pub fn age(&self) -> Duration {
        Utc::now() - self.built_at
    } // fn

    /// True when the dictionaries are due for a rebuild.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.age() > Duration::hours(MAX_AGE_HOURS)
    } // fn

    // -------------------------------------------------------------------------
    //
    // Test fixture

    /// A small, fully populated gazetteer for unit tests.
    #[cfg(test)]
    #[must_use]
    pub fn for_tests() -> Self {
        let mut gazetteer = Self {
            built_at: Utc::now(),
            ..Self::default()
        };

        let countries = [
            ("United States", "US", "", "USA", true, vec!["America"]),
            ("Canada", "CA", "", "CAN", true, vec![]),
            ("France", "FR", "", "FRA", true, vec![]),
            ("United Kingdom", "GB", "UK", "GBR", true, vec!["Great Britain", "England"]),
            ("Germany", "DE", "", "DEU", true, vec!["Deutschland"]),
            ("Mexico", "MX", "", "MEX", true, vec![]),
            ("Antarctica", "AQ", "", "ATA", false, vec![]),
            ("Italy", "IT", "", "ITA", true, vec![]),
        ];

        for (name, code2, old2, code3, has_flag, alts) in countries {
            gazetteer.add_country(CountryRecord {
                name: name.to_string(),
                code2: code2.to_string(),
                old_code2: old2.to_string(),
                code3: code3.to_string(),
                has_flag,
                alt_forms: alts.into_iter().map(str::to_string).collect(),
            });
        }

        for county in [
            "Hillsborough, NH",
            "Los Angeles, CA",
            "Coös, NH",
            "DeKalb, GA",
            "Lamar, TX",
            "Washington, DC",
        ] {
            gazetteer.add_us_county(county);
        }

        for body in ["Mars", "Io", "Europa", "Ganymede"] {
            gazetteer.celestial.insert(simplify(body, false));
        }

        gazetteer.flag_codes =
            ["us", "ca", "fr", "gb", "de", "mx", "it"].iter().map(|s| s.to_string()).collect();

        gazetteer
    } // fn
} // impl

// -----------------------------------------------------------------------------

fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::DataFile {
        path: path.display().to_string(),
        source,
    })?; // map_err

    Ok(text.lines().map(str::to_string).collect())
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

// mod
