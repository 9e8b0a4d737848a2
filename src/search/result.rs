//! The search result envelope returned to clients, with its three
//! serializations: JSON, JSONP, and tab-separated plain text for the desktop
//! application.

use crate::location::AtlasLocation;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
//
/// The outcome of one search. Matches are ordered by descending rank, ties
/// broken by ascending display name. `error` halts display on the client;
/// `warning` is rendered line by line; `info` carries adapter metrics.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(rename = "originalSearch")]
    pub original_search: String,

    #[serde(rename = "normalizedSearch")]
    pub normalized_search: String,

    /// Wall-clock time spent on the search, milliseconds.
    pub time: u64,

    pub count: usize,

    #[serde(rename = "limitReached")]
    pub limit_reached: bool,

    pub matches: Vec<AtlasLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
} // struct

// -----------------------------------------------------------------------------

impl SearchResult {
    /// JSON document.
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails, which would indicate a bug
    /// in the result types.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    } // fn

    /// JSONP document for script-tag consumers.
    ///
    /// # Errors
    ///
    /// As [`Self::to_json`].
    pub fn to_jsonp(&self, callback: &str) -> Result<String, serde_json::Error> {
        Ok(format!("/**/ {callback}({});", self.to_json()?))
    } // fn

    /// Tab-separated plain text, one match per line, preceded by a header
    /// line with the counts and followed by any error or warning lines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut text = format!(
            "{}: {} match{} in {} ms{}\n",
            self.normalized_search,
            self.count,
            if self.count == 1 { "" } else { "es" },
            self.time,
            if self.limit_reached { " (limit reached)" } else { "" },
        ); // format

        for location in &self.matches {
            text.push_str(&format!(
                "{}\t{}\t{}\t{:.5}\t{:.5}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                location.display_name,
                location.state,
                location.country,
                location.latitude,
                location.longitude,
                location
                    .elevation
                    .map(|elevation| format!("{elevation:.0}"))
                    .unwrap_or_default(),
                location.zone,
                location.zip,
                location.rank,
                location.place_type,
                location.flag_code,
            )); // push_str
        } // for

        if let Some(error) = &self.error {
            text.push_str("error: ");
            text.push_str(error);
            text.push('\n');
        } // if

        if let Some(warning) = &self.warning {
            for line in warning.lines() {
                text.push_str("warning: ");
                text.push_str(line);
                text.push('\n');
            } // for
        } // if

        text
    } // fn

    /// Appends a warning line.
    pub fn add_warning(&mut self, line: &str) {
        append_line(&mut self.warning, line);
    } // fn

    /// Appends an info line.
    pub fn add_info(&mut self, line: &str) {
        append_line(&mut self.info, line);
    } // fn
} // impl

fn append_line(slot: &mut Option<String>, line: &str) {
    match slot {
        Some(text) => {
            text.push('\n');
            text.push_str(line);
        } // Some
        None => *slot = Some(line.to_string()),
    } // match
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_one_match() -> SearchResult {
        let mut location = AtlasLocation {
            city: "Nashua".to_string(),
            state: "NH".to_string(),
            country: "USA".to_string(),
            latitude: 42.7654,
            longitude: -71.4676,
            zone: "America/New_York".to_string(),
            place_type: "P.PPL".to_string(),
            rank: 4,
            ..Default::default()
        };
        location.update_display_name();

        SearchResult {
            original_search: "Nashua, NH".to_string(),
            normalized_search: "NASHUA, NH".to_string(),
            time: 12,
            count: 1,
            matches: vec![location],
            ..Default::default()
        }
    }

    #[test]
    fn json_has_wire_names() {
        let json = result_with_one_match().to_json().unwrap();
        assert!(json.contains("\"originalSearch\""));
        assert!(json.contains("\"limitReached\""));
        assert!(json.contains("\"displayName\":\"Nashua, NH\""));
        // Absent optionals stay off the wire:
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn jsonp_wraps_the_document() {
        let jsonp = result_with_one_match().to_jsonp("handleAtlas").unwrap();
        assert!(jsonp.starts_with("/**/ handleAtlas({"));
        assert!(jsonp.ends_with("});"));
    }

    #[test]
    fn plain_text_lines() {
        let text = result_with_one_match().to_plain_text();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "NASHUA, NH: 1 match in 12 ms");
        let row = lines.next().unwrap();
        assert!(row.starts_with("Nashua, NH\tNH\tUSA\t42.76540\t-71.46760"));
        assert!(row.contains("America/New_York"));
    }

    #[test]
    fn warnings_accumulate() {
        let mut result = SearchResult::default();
        result.add_warning("first");
        result.add_warning("second");
        assert_eq!(result.warning.as_deref(), Some("first\nsecond"));

        let text = result.to_plain_text();
        assert!(text.contains("warning: first\n"));
        assert!(text.contains("warning: second\n"));
    }
} // mod
