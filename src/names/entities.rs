//! Minimal HTML entity decoding for scraped text. Covers the named entities
//! that actually occur in gazetteer pages plus numeric references.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// -----------------------------------------------------------------------------

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x?[0-9A-Fa-f]+|[A-Za-z]+);").unwrap());

// -----------------------------------------------------------------------------
//
/// Replaces HTML character references with the characters they stand for.
/// Unknown named entities are left as-is.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    } // if

    ENTITY
        .replace_all(s, |captures: &Captures| {
            let body = &captures[1];

            if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                return decode_numeric(hex, 16, &captures[0]);
            } // if

            if let Some(dec) = body.strip_prefix('#') {
                return decode_numeric(dec, 10, &captures[0]);
            } // if

            match body {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "nbsp" => " ".to_string(),
                "eacute" => "é".to_string(),
                "egrave" => "è".to_string(),
                "agrave" => "à".to_string(),
                "ccedil" => "ç".to_string(),
                "ntilde" => "ñ".to_string(),
                "ouml" => "ö".to_string(),
                "uuml" => "ü".to_string(),
                "auml" => "ä".to_string(),
                "aring" => "å".to_string(),
                "oslash" => "ø".to_string(),
                "szlig" => "ß".to_string(),
                _ => captures[0].to_string(),
            } // match
        })
        .into_owned()
} // fn

fn decode_numeric(digits: &str, radix: u32, original: &str) -> String {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .map_or_else(|| original.to_string(), |ch| ch.to_string())
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_entities() {
        assert_eq!(decode_entities("Tyne &amp; Wear"), "Tyne & Wear");
        assert_eq!(decode_entities("C&ocirc;te"), "C&ocirc;te"); // unknown stays
        assert_eq!(decode_entities("M&uuml;nchen"), "München");
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(decode_entities("O&#39;Brien"), "O'Brien");
        assert_eq!(decode_entities("&#xE9;tienne"), "étienne");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(decode_entities("Nashua"), "Nashua");
    }
} // mod
