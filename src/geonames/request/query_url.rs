use crate::geonames::request::{Request, FEATURE_CODES, MAX_ROWS};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

// =============================================================================

impl Request<'_> {
    /// Returns the URL that will be sent to GeoNames: the postal-code
    /// endpoint when a postal code was supplied, the feature search with the
    /// feature-code allow list otherwise.
    #[must_use]
    pub fn query_url(&self) -> String {
        let base = &self.client.geonames_base;
        let username = utf8_percent_encode(&self.client.geonames_username, NON_ALPHANUMERIC);

        match &self.postal_code {
            Some(postal_code) => format!(
                "{base}/postalCodeSearchJSON?postalcode={}&maxRows={MAX_ROWS}&username={username}",
                utf8_percent_encode(postal_code, NON_ALPHANUMERIC),
            ), // Some

            None => {
                let mut url = format!(
                    "{base}/searchJSON?name_startsWith={}&style=FULL&maxRows={MAX_ROWS}&username={username}",
                    utf8_percent_encode(&self.name_starts_with, NON_ALPHANUMERIC),
                ); // format

                for code in FEATURE_CODES {
                    url.push_str("&featureCode=");
                    url.push_str(code);
                } // for

                url
            } // None
        } // match
    } // fn

    pub(crate) fn is_postal(&self) -> bool {
        self.postal_code.is_some()
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use crate::geonames::request::Request;
    use crate::parse::{parse_search, ParseMode};
    use crate::remote::RemoteClient;

    #[test]
    fn feature_search_url() {
        let client = RemoteClient::default();
        let gazetteer = crate::gazetteer::Gazetteer::for_tests();
        let parsed = parse_search("Mt Washington, NH", ParseMode::Strict, &gazetteer);
        let request = Request::new(&client, &parsed);
        let url = request.query_url();

        assert!(url.starts_with("http://api.geonames.org/searchJSON?"));
        assert!(url.contains("name_startsWith=mount%20WASHINGTON"));
        assert!(url.contains("username=skyview"));
        assert!(url.contains("&featureCode=PPL"));
        assert!(url.contains("&featureCode=OBS"));
    }

    #[test]
    fn postal_search_url() {
        let client = RemoteClient::default();
        let gazetteer = crate::gazetteer::Gazetteer::for_tests();
        let parsed = parse_search("90210", ParseMode::Strict, &gazetteer);
        let request = Request::new(&client, &parsed);
        let url = request.query_url();

        assert!(url.starts_with("http://api.geonames.org/postalCodeSearchJSON?"));
        assert!(url.contains("postalcode=90210"));
    }
} // mod
