//! Parser for the fixed-column `country_codes.txt` table.

// -----------------------------------------------------------------------------

/// One parsed country record.
///
/// The file layout is fixed-column: the country name occupies columns
/// `[0, 47)`, the ISO code2 `[48, 50)`, a superseded code2 `[51, 53)`, the
/// code3 `[56, 59)`, a one-character flag marker at column 59 (`-` when no
/// flag image exists for the country), and optional alternate name forms
/// from column 76 onward, separated by `;`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub code2: String,
    pub old_code2: String,
    pub code3: String,
    pub has_flag: bool,
    pub alt_forms: Vec<String>,
} // struct

// -----------------------------------------------------------------------------
//
/// Parses one line of `country_codes.txt`. Returns `None` for blank lines
/// and comments; malformed lines (too short to carry a code3) are reported
/// to the caller as `Some(Err(..))`-style via `Option` of a record with an
/// empty `code3`, which the caller rejects.
pub fn parse_country_line(line: &str) -> Option<CountryRecord> {
    let trimmed = line.trim_end();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    } // if

    let chars: Vec<char> = trimmed.chars().collect();

    let column = |from: usize, to: usize| -> String {
        chars
            .get(from..to.min(chars.len()))
            .unwrap_or(&[])
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }; // closure

    let record = CountryRecord {
        name: column(0, 47),
        code2: column(48, 50),
        old_code2: column(51, 53),
        code3: column(56, 59),
        has_flag: chars.get(59).copied().unwrap_or(' ') != '-',
        alt_forms: if chars.len() > 76 {
            column(76, chars.len())
                .split(';')
                .map(|form| form.trim().to_string())
                .filter(|form| !form.is_empty())
                .collect()
        } else {
            Vec::new()
        }, // if
    }; // struct

    Some(record)
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(name: &str, code2: &str, old2: &str, code3: &str, flag: char, alts: &str) -> String {
        let mut line = format!("{name:<48}{code2:<3}{old2:<5}{code3}{flag}");
        if !alts.is_empty() {
            while line.chars().count() < 76 {
                line.push(' ');
            }
            line.push_str(alts);
        }
        line
    }

    #[test]
    fn full_record() {
        let line = pad(
            "United Kingdom",
            "GB",
            "UK",
            "GBR",
            ' ',
            "Great Britain;England",
        );
        let record = parse_country_line(&line).unwrap();
        assert_eq!(record.name, "United Kingdom");
        assert_eq!(record.code2, "GB");
        assert_eq!(record.old_code2, "UK");
        assert_eq!(record.code3, "GBR");
        assert!(record.has_flag);
        assert_eq!(record.alt_forms, ["Great Britain", "England"]);
    }

    #[test]
    fn flagless_record() {
        let line = pad("Antarctica", "AQ", "", "ATA", '-', "");
        let record = parse_country_line(&line).unwrap();
        assert_eq!(record.code3, "ATA");
        assert!(!record.has_flag);
        assert!(record.alt_forms.is_empty());
    }

    #[test]
    fn blanks_and_comments_are_skipped() {
        assert!(parse_country_line("").is_none());
        assert!(parse_country_line("# header").is_none());
    }
} // mod
