//! The preliminary-page parser: a four-state machine over the lines of a
//! Getty TGN result page. The scrape is tightly coupled to the upstream
//! layout, so everything that knows about that layout lives here; an HTML
//! change upstream means changing this file and nothing else.
//!
//! An item block looks like:
//!
//! ```text
//! <SPAN CLASS=page><A HREF="TGNFullDisplay?...&subjectid=2080913">
//! <B>Nashua</B></A></SPAN> (inhabited place)
//! <SPAN CLASS=page>(New Hampshire, United States, North and Central America, World)</SPAN>
//! ```
//!
//! Alternate-name hits render the matched form in italics inside the
//! anchor.

use once_cell::sync::Lazy;
use regex::Regex;

// -----------------------------------------------------------------------------

static SUBJECT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"subjectid=(\d+)").unwrap());
static PLACE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"<B>([^<]+)</B>").unwrap());
static ALT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"<I>([^<]+)</I>").unwrap());
static PLACE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([a-z][a-z /,-]*)\)").unwrap());
static HIERARCHY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]+, World)\)").unwrap());

const NO_RESULTS: &str = "Your search has produced no results.";
const TOO_MANY: &str = "Your search has produced too many results";
const BAD_SYNTAX: &str = "syntactically invalid";
const SERVER_ERROR: &str = "Server Error";

// -----------------------------------------------------------------------------
//
/// One place block scraped off a preliminary page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GettyItem {
    /// The TGN subject id, used to fetch the full record.
    pub id: i64,

    pub name: String,

    /// True when the hit was on an alternate name rather than the place's
    /// primary name.
    pub alternate: bool,

    /// Lower-case place-type keyword(s) as printed, e.g. `inhabited place`.
    pub type_keyword: String,

    /// The comma-separated hierarchy, innermost first, ending in `World`.
    pub hierarchy: String,
} // struct

// -----------------------------------------------------------------------------
//
/// What one preliminary page amounted to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageOutcome {
    /// A normal page; `has_more` reflects the presence of a next-page link.
    Parsed {
        items: Vec<GettyItem>,
        has_more: bool,
    },

    NoResults,
    TooManyResults,
    FailedSyntax,
    ServerError,
} // enum

// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    LookingForIdCode,
    LookingForPlaceName,
    LookingForHierarchy,
    LookingForExtrasOrEnd,
    PlaceHasBeenParsed,
} // enum

// -----------------------------------------------------------------------------
//
/// Runs the state machine over one page. `page` is the 1-based page number
/// that was requested, used to recognize the next-page link.
#[must_use]
pub fn parse_page(body: &str, page: usize) -> PageOutcome {
    if body.contains(SERVER_ERROR) {
        return PageOutcome::ServerError;
    } // if

    if body.contains(BAD_SYNTAX) {
        return PageOutcome::FailedSyntax;
    } // if

    if body.contains(NO_RESULTS) {
        return PageOutcome::NoResults;
    } // if

    if body.contains(TOO_MANY) {
        return PageOutcome::TooManyResults;
    } // if

    let mut items = Vec::new();
    let mut state = State::LookingForIdCode;
    let mut current = GettyItem::default();

    for line in body.lines() {
        // End-of-block handling runs before the state arms so the line that
        // terminates one block can also begin the next:
        if state == State::LookingForExtrasOrEnd {
            if current.type_keyword.is_empty() && subject_id_of(line).is_none() {
                if let Some(captures) = PLACE_TYPE.captures(line) {
                    current.type_keyword = captures[1].trim().to_string();
                    continue;
                } // if
            } // if

            state = State::PlaceHasBeenParsed;
        } // if

        if state == State::PlaceHasBeenParsed {
            items.push(std::mem::take(&mut current));
            state = State::LookingForIdCode;
        } // if

        // A fresh subject id abandons a half-parsed block:
        if state != State::LookingForIdCode {
            if let Some(id) = subject_id_of(line) {
                if id != current.id {
                    state = State::LookingForIdCode;
                } // if
            } // if
        } // if

        match state {
            State::LookingForIdCode => {
                let Some(id) = subject_id_of(line) else { continue };

                current = GettyItem {
                    id,
                    ..GettyItem::default()
                }; // struct

                state = State::LookingForPlaceName;
                // The name frequently sits on the same line as the anchor:
                take_name(line, &mut current, &mut state);
            } // LookingForIdCode

            State::LookingForPlaceName => {
                take_name(line, &mut current, &mut state);
            } // LookingForPlaceName

            State::LookingForHierarchy => {
                // The place-type note precedes the hierarchy line:
                if current.type_keyword.is_empty() {
                    if let Some(captures) = PLACE_TYPE.captures(line) {
                        current.type_keyword = captures[1].trim().to_string();
                    } // if
                } // if

                if let Some(captures) = HIERARCHY.captures(line) {
                    current.hierarchy = captures[1].to_string();
                    state = State::LookingForExtrasOrEnd;
                } // if
            } // LookingForHierarchy

            State::LookingForExtrasOrEnd | State::PlaceHasBeenParsed => {} // handled above
        } // match
    } // for

    // A block that reached the extras state by the end of the page is
    // complete:
    if state == State::LookingForExtrasOrEnd {
        items.push(current);
    } // if

    let has_more = body.contains(&format!("page={}", page + 1));

    PageOutcome::Parsed { items, has_more }
} // fn

// -----------------------------------------------------------------------------

fn subject_id_of(line: &str) -> Option<i64> {
    SUBJECT_ID
        .captures(line)
        .and_then(|captures| captures[1].parse().ok())
} // fn

/// Extracts the bold place name (and the italic alternate-name marker) from
/// a line, advancing the state when found.
fn take_name(line: &str, current: &mut GettyItem, state: &mut State) {
    let Some(captures) = PLACE_NAME.captures(line) else {
        return;
    }; // let

    current.name = captures[1].trim().to_string();
    current.alternate = ALT_NAME.is_match(line);
    *state = State::LookingForHierarchy;

    // The type note often trails the name on the same line:
    if let Some(rest) = line.split("</B>").nth(1) {
        if let Some(captures) = PLACE_TYPE.captures(rest) {
            current.type_keyword = captures[1].trim().to_string();
        } // if
    } // if
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<HTML><BODY>
<SPAN CLASS=page><A HREF="TGNFullDisplay?english=Y&subjectid=2080913"><B>Nashua</B></A></SPAN> (inhabited place)
<SPAN CLASS=page>(New Hampshire, United States, North and Central America, World)</SPAN>
<SPAN CLASS=page><A HREF="TGNFullDisplay?english=Y&subjectid=7013572"><I><B>Nashua River</B></I></A></SPAN> (river)
<SPAN CLASS=page>(Massachusetts, United States, North and Central America, World)</SPAN>
</BODY></HTML>"#;

    #[test]
    fn parses_two_items() {
        let PageOutcome::Parsed { items, has_more } = parse_page(PAGE, 1) else {
            panic!("expected a parsed page");
        };

        assert!(!has_more);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].id, 2_080_913);
        assert_eq!(items[0].name, "Nashua");
        assert!(!items[0].alternate);
        assert_eq!(items[0].type_keyword, "inhabited place");
        assert_eq!(
            items[0].hierarchy,
            "New Hampshire, United States, North and Central America, World"
        );

        assert_eq!(items[1].id, 7_013_572);
        assert!(items[1].alternate);
        assert_eq!(items[1].type_keyword, "river");
    }

    #[test]
    fn next_page_link_is_detected() {
        let body = format!("{PAGE}<A HREF=\"TGNServlet?find=nashua&page=2\">Next</A>");
        let PageOutcome::Parsed { has_more, .. } = parse_page(&body, 1) else {
            panic!("expected a parsed page");
        };
        assert!(has_more);
    }

    #[test]
    fn sentinels() {
        assert_eq!(
            parse_page("<BODY>Your search has produced no results.</BODY>", 1),
            PageOutcome::NoResults
        );
        assert_eq!(
            parse_page("<BODY>Your search has produced too many results to display.</BODY>", 1),
            PageOutcome::TooManyResults
        );
        assert_eq!(
            parse_page("<BODY>The query was syntactically invalid.</BODY>", 1),
            PageOutcome::FailedSyntax
        );
        assert_eq!(
            parse_page("<H1>Server Error</H1>", 1),
            PageOutcome::ServerError
        );
    }

    #[test]
    fn truncated_block_is_dropped() {
        let body = r#"<A HREF="TGNFullDisplay?subjectid=123"><B>Lonely</B></A>"#;
        let PageOutcome::Parsed { items, .. } = parse_page(body, 1) else {
            panic!("expected a parsed page");
        };
        // Name but no hierarchy: not a usable item.
        assert!(items.is_empty());
    }
} // mod
