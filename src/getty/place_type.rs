//! Mapping from Getty's prose place-type keywords to the two-part place-type
//! tags the rest of the pipeline speaks.

// -----------------------------------------------------------------------------

/// Keyword fragments in match-priority order. Earlier entries win, so
/// "dependent state" is tested before "state".
const KEYWORD_TAGS: [(&str, &str); 12] = [
    ("cape", "T.CAPE"),
    ("park", "L.PRK"),
    ("peak", "T.PK"),
    ("county", "A.ADM2"),
    ("atoll", "T.ISL"),
    ("island", "T.ISL"),
    ("mountain", "T.MT"),
    ("dependent state", "A.ADM0"),
    ("nation", "A.ADM0"),
    ("province", "A.ADM1"),
    ("state", "A.ADM1"),
    ("lake", "L.LK"),
]; // const

// -----------------------------------------------------------------------------
//
/// Maps a Getty keyword phrase (e.g. `inhabited place`, `island group`) to a
/// place-type tag. Anything unrecognized is a populated place.
#[must_use]
pub fn tag_for_keyword(keyword: &str) -> &'static str {
    let keyword = keyword.to_lowercase();

    for (fragment, tag) in KEYWORD_TAGS {
        if keyword.contains(fragment) {
            return tag;
        } // if
    } // for

    "P.PPL"
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_mapping() {
        assert_eq!(tag_for_keyword("inhabited place"), "P.PPL");
        assert_eq!(tag_for_keyword("cape"), "T.CAPE");
        assert_eq!(tag_for_keyword("national park"), "L.PRK");
        assert_eq!(tag_for_keyword("peak"), "T.PK");
        assert_eq!(tag_for_keyword("county"), "A.ADM2");
        assert_eq!(tag_for_keyword("atoll"), "T.ISL");
        assert_eq!(tag_for_keyword("island group"), "T.ISL");
        assert_eq!(tag_for_keyword("mountain"), "T.MT");
        assert_eq!(tag_for_keyword("dependent state"), "A.ADM0");
        assert_eq!(tag_for_keyword("nation"), "A.ADM0");
        assert_eq!(tag_for_keyword("province"), "A.ADM1");
        assert_eq!(tag_for_keyword("state"), "A.ADM1");
        assert_eq!(tag_for_keyword("river"), "P.PPL");
    }
} // mod
