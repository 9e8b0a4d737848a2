use crate::geonames::request::Request;
use crate::parse::ParsedSearch;
use crate::remote::RemoteClient;
use once_cell::sync::Lazy;
use regex::Regex;

// -----------------------------------------------------------------------------

/// GeoNames stores "Mount X" long-form, so a leading `Mt`/`Mt.` in the query
/// is expanded before it is used as a name prefix.
static LEADING_MT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^mt\.?\s+").unwrap());

// -----------------------------------------------------------------------------

impl<'a> Request<'a> {
    /// Initializes a request from the parsed search. A postal code routes
    /// the request to the postal-code endpoint; otherwise the target city
    /// becomes the name prefix.
    #[must_use]
    pub fn new(client: &'a RemoteClient, parsed: &ParsedSearch) -> Self {
        let name_starts_with = LEADING_MT
            .replace(&parsed.target_city, "mount ")
            .into_owned();

        Self {
            client,
            name_starts_with,
            postal_code: (!parsed.postal_code.is_empty()).then(|| parsed.postal_code.clone()),
        } // struct
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_mt_expands() {
        assert_eq!(LEADING_MT.replace("Mt Washington", "mount "), "mount Washington");
        assert_eq!(LEADING_MT.replace("MT. HOOD", "mount "), "mount HOOD");
        // Only a leading token counts:
        assert_eq!(LEADING_MT.replace("Belmont", "mount "), "Belmont");
    }
} // mod
