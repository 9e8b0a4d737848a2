//! Text canonicalization for gazetteer keys. Every name that enters an index
//! (the local place tables, the in-memory dictionaries, or a remote result
//! being matched against a query) passes through [`simplify`], which in turn
//! rests on the [`plain_ascii`] transliteration. The simplified form is the
//! sole key format used anywhere in this crate.

mod table;

use table::{DECORATIVE, LATIN_EXTENDED_A, TRANSLITERATIONS};

// -----------------------------------------------------------------------------

/// Longest key [`simplify`] will produce. Longer names are truncated; the
/// database `key_name` column has the same width.
pub const MAX_KEY_LENGTH: usize = 40;

/// Leading words stripped from a name when building its variant key, so that
/// `"Lake Placid"` can be found under `PLACID`.
const VARIANT_PREFIXES: [&str; 19] = [
    "CANON DE", "CERRO", "FORT", "FT", "ILE D", "ILE DE", "ILE DU", "ILES",
    "ILSA", "LA", "LAKE", "LAS", "LE", "LOS", "MOUNT", "MT", "POINT", "PT",
    "THE",
];

// -----------------------------------------------------------------------------
//
/// Folds a string down to printable ASCII.
///
/// Code points inside `[0x20, 0x7E]` pass through unchanged. Everything else
/// is transliterated: the ligatures and special letters in the fixed table
/// (`Æ` → `Ae`, `ß` → `ss`, `Þ` → `Th`, `Œ` → `Oe`, …), the Latin Extended-A
/// block stripped of its diacritics, em/horizontal-bar dashes to `--`, the
/// ellipsis to `...`. Combining marks (U+0300–U+036F) are dropped outright,
/// and anything not covered becomes `_`.
///
/// With `for_file_name` set, characters that are hostile to shells or paths
/// (`"[]*/:;<>?\|` and a leading `.`) are additionally mapped to safe
/// substitutes, and multi-character renderings of decorative symbols are
/// suppressed so the result stays close to the original length.
#[must_use]
pub fn plain_ascii(s: &str, for_file_name: bool) -> String {
    let mut result = String::with_capacity(s.len());

    for (index, ch) in s.chars().enumerate() {
        let cc = ch as u32;

        if (0x20..=0x7E).contains(&cc) {
            if for_file_name {
                result.push_str(file_name_safe(ch, index == 0));
            } else {
                result.push(ch);
            } // if

            continue;
        } // if

        // Combining diacritical marks simply disappear. They mostly arrive
        // via NFD-decomposed input, where the base letter has already been
        // kept.
        if (0x0300..=0x036F).contains(&cc) {
            continue;
        } // if

        // Both the em dash and the horizontal bar render as `--`:
        if cc == 0x2014 || cc == 0x2015 {
            result.push_str(if for_file_name { "-" } else { "--" });
            continue;
        } // if

        if ch == '\u{2026}' {
            result.push_str(if for_file_name { "." } else { "..." });
            continue;
        } // if

        if let Some(replacement) = TRANSLITERATIONS.get(&ch) {
            result.push_str(replacement);
            continue;
        } // if

        if let Some(replacement) = DECORATIVE.get(&ch) {
            result.push_str(if for_file_name { "_" } else { replacement });
            continue;
        } // if

        if (0x0100..=0x017F).contains(&cc) {
            result.push_str(LATIN_EXTENDED_A[(cc - 0x0100) as usize]);
            continue;
        } // if

        result.push('_');
    } // for

    result
} // fn

// -----------------------------------------------------------------------------
//
/// Reduces a place name to its canonical search key: parenthetical tail
/// stripped, transliterated to upper-case ASCII, hyphens and periods treated
/// as spaces, anything outside `[A-Z0-9 ]` dropped, the common long-form
/// prefixes compressed (`FORT` → `FT`, `MOUNT` → `MT`, `POINT` → `PT`,
/// `SAINT` → `ST`, `SAINTE` → `STE`), spaces deleted, and the result
/// truncated to [`MAX_KEY_LENGTH`] characters.
///
/// When `as_variant` is set, a leading prefix from the variant list (`LAKE`,
/// `MT`, `THE`, …) is also removed, producing the key under which the
/// rearranged form of the name is indexed.
///
/// `simplify` is idempotent: feeding its output back in returns the output
/// unchanged.
#[must_use]
pub fn simplify(s: &str, as_variant: bool) -> String {
    let s = match s.find('(') {
        Some(index) => &s[..index],
        None => s,
    }; // match

    let upper = plain_ascii(s, false).to_uppercase();

    let mut spaced = String::with_capacity(upper.len());

    for ch in upper.chars() {
        match ch {
            'A'..='Z' | '0'..='9' | ' ' => spaced.push(ch),
            '-' | '.' => spaced.push(' '),
            _ => (),
        } // match
    } // for

    let mut words: Vec<&str> = spaced.split_whitespace().collect();

    for word in &mut words {
        *word = match *word {
            "FORT" => "FT",
            "MOUNT" => "MT",
            "POINT" => "PT",
            "SAINT" => "ST",
            "SAINTE" => "STE",
            other => other,
        }; // match
    } // for

    let mut joined = words.join(" ");

    if as_variant {
        for prefix in VARIANT_PREFIXES {
            if let Some(rest) = joined.strip_prefix(prefix) {
                // Prefixes only count when they end at a word break:
                if rest.is_empty() || rest.starts_with(' ') {
                    joined = rest.trim_start().to_string();
                    break;
                } // if
            } // if
        } // for
    } // if

    let mut key: String = joined.chars().filter(|ch| *ch != ' ').collect();
    key.truncate(MAX_KEY_LENGTH);
    key
} // fn

// -----------------------------------------------------------------------------
//
/// Case- and diacritic-insensitive prefix test: does `s` start with `prefix`
/// once both sides have been simplified?
#[must_use]
pub fn starts_with_icnd(s: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    } // if

    simplify(s, false).starts_with(&simplify(prefix, false))
} // fn

// -----------------------------------------------------------------------------

/// Substitutions applied in file-name mode to the printable-ASCII range.
fn file_name_safe(ch: char, leading: bool) -> &'static str {
    match ch {
        '"' => "'",
        '[' | '<' => "(",
        ']' | '>' => ")",
        '*' | '?' => "_",
        '/' | '\\' | ':' | '|' => "-",
        ';' => ",",
        '.' if leading => "_",
        '.' => ".",
        ' ' => " ",
        _ => {
            // Everything else in the printable range is already safe. The
            // borrow checker wants a `&'static str`, so the single-character
            // cases above are spelled out and this arm covers the rest via
            // a lookup into a static table of one-character strings.
            table::ascii_str(ch)
        } // _
    } // match
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_identity() {
        let s = "The quick brown fox, 0123456789 ~!@#$%^&*()";
        assert_eq!(plain_ascii(s, false), s);
    }

    #[test]
    fn ligatures_and_special_letters() {
        assert_eq!(plain_ascii("Æsir", false), "Aesir");
        assert_eq!(plain_ascii("Straße", false), "Strasse");
        assert_eq!(plain_ascii("Þingvellir", false), "Thingvellir");
        assert_eq!(plain_ascii("Œuvre", false), "Oeuvre");
        assert_eq!(plain_ascii("IJssel", false), "IJssel");
        assert_eq!(plain_ascii("\u{132}ssel", false), "Ijssel");
    }

    #[test]
    fn latin_extended_a_loses_diacritics() {
        assert_eq!(plain_ascii("Łódź", false), "Lodz");
        assert_eq!(plain_ascii("Chişinău", false), "Chisinau");
        assert_eq!(plain_ascii("Ūlu", false), "Ulu");
    }

    #[test]
    fn combining_marks_are_dropped() {
        // "é" written as "e" + U+0301:
        assert_eq!(plain_ascii("Saint-E\u{301}tienne", false), "Saint-Etienne");
    }

    #[test]
    fn dashes_and_ellipsis() {
        assert_eq!(plain_ascii("a\u{2014}b", false), "a--b");
        assert_eq!(plain_ascii("a\u{2015}b", false), "a--b");
        assert_eq!(plain_ascii("wait\u{2026}", false), "wait...");
    }

    #[test]
    fn unknown_code_points_become_underscores() {
        assert_eq!(plain_ascii("東京", false), "__");
    }

    #[test]
    fn file_name_mode() {
        assert_eq!(plain_ascii(".hidden", true), "_hidden");
        assert_eq!(plain_ascii("a/b:c|d", true), "a-b-c-d");
        assert_eq!(plain_ascii("what?*", true), "what__");
        assert_eq!(plain_ascii("<tag>", true), "(tag)");
        assert_eq!(plain_ascii("a\u{2014}b", true), "a-b");
    }

    #[test]
    fn simplify_basics() {
        assert_eq!(simplify("Nashua", false), "NASHUA");
        assert_eq!(simplify("Saint-Étienne", false), "STETIENNE");
        assert_eq!(simplify("Mt. Washington", false), "MTWASHINGTON");
        assert_eq!(simplify("Mount Washington", false), "MTWASHINGTON");
        assert_eq!(simplify("Fort Wayne (historical)", false), "FTWAYNE");
    }

    #[test]
    fn simplify_variant_prefix() {
        assert_eq!(simplify("Lake Placid", true), "PLACID");
        assert_eq!(simplify("The Dalles", true), "DALLES");
        assert_eq!(simplify("Mount Washington", true), "WASHINGTON");
        // A prefix that is not at a word break is left alone:
        assert_eq!(simplify("Lakewood", true), "LAKEWOOD");
    }

    #[test]
    fn simplify_is_idempotent() {
        for s in ["Saint-Étienne", "Mt. Washington", "Lake Placid", "90210"] {
            let once = simplify(s, false);
            assert_eq!(simplify(&once, false), once);
        }
    }

    #[test]
    fn simplify_truncates() {
        let long = "a".repeat(60);
        assert_eq!(simplify(&long, false).len(), MAX_KEY_LENGTH);
    }

    #[test]
    fn prefix_check_ignores_case_and_diacritics() {
        assert!(starts_with_icnd("Saint-Étienne", "st etienne"));
        assert!(starts_with_icnd("Nashua", "NASH"));
        assert!(!starts_with_icnd("Nashua", "Concord"));
        assert!(starts_with_icnd("anything", ""));
    }
} // mod
