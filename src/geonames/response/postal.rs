//! One postal-code record from `postalCodeSearchJSON`, and its conversion
//! into an [`AtlasLocation`]. Coordinates arrive as numbers on this
//! endpoint, unlike the feature search.

use crate::gazetteer::Gazetteer;
use crate::location::{source, AtlasLocation, ZIP_RANK};
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
//
/// One item of the `postalCodes` array.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PostalCode {
    #[serde(rename = "postalCode")]
    #[serde(default)]
    pub postal_code: String,

    #[serde(rename = "placeName")]
    #[serde(default)]
    pub place_name: String,

    #[serde(rename = "countryCode")]
    #[serde(default)]
    pub country_code: String,

    /// First-level admin code; the two-letter state for the US.
    #[serde(rename = "adminCode1")]
    #[serde(default)]
    pub admin_code1: String,

    #[serde(rename = "adminName1")]
    #[serde(default)]
    pub admin_name1: String,

    #[serde(rename = "adminName2")]
    #[serde(default)]
    pub admin_name2: String,

    #[serde(default)]
    pub lat: f64,

    #[serde(default)]
    pub lng: f64,
} // struct

// -----------------------------------------------------------------------------

impl PostalCode {
    /// Builds the location for this record. Postal matches are pinned to
    /// [`ZIP_RANK`]. Returns `None` when the country cannot be resolved.
    #[must_use]
    pub fn to_location(&self, gazetteer: &Gazetteer) -> Option<AtlasLocation> {
        let country = gazetteer.code3_for(&self.country_code)?.to_string();

        let state = if self.admin_code1.is_empty() {
            self.admin_name1.clone()
        } else {
            self.admin_code1.clone()
        }; // if

        Some(AtlasLocation {
            city: self.place_name.clone(),
            county: self.admin_name2.clone(),
            state,
            country: country.clone(),
            long_country: gazetteer.long_country(&country).unwrap_or_default().to_string(),
            latitude: self.lat,
            longitude: self.lng,
            zip: self.postal_code.clone(),
            rank: ZIP_RANK,
            place_type: "P.PPL".to_string(),
            source: source::GEONAMES_POSTAL,
            ..AtlasLocation::default()
        }) // Some
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;

    #[test]
    fn beverly_hills() {
        let gazetteer = Gazetteer::for_tests();
        let record: PostalCode = serde_json::from_str(
            r#"{
                "postalCode": "90210",
                "placeName": "Beverly Hills",
                "countryCode": "US",
                "adminCode1": "CA",
                "adminName1": "California",
                "adminName2": "Los Angeles",
                "lat": 34.0901,
                "lng": -118.4065
            }"#,
        )
        .unwrap();

        let location = record.to_location(&gazetteer).unwrap();
        assert_eq!(location.zip, "90210");
        assert_eq!(location.rank, ZIP_RANK);
        assert_eq!(location.state, "CA");
        assert_eq!(location.country, "USA");
        assert_eq!(location.source, source::GEONAMES_POSTAL);
    }
} // mod
