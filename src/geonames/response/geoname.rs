//! One feature record from `searchJSON`, and its conversion into an
//! [`AtlasLocation`].

use crate::gazetteer::Gazetteer;
use crate::location::{source, AtlasLocation};
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
//
/// One item of the `geonames` array, as returned with `style=FULL`. The
/// coordinates arrive as strings on this endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Geoname {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "countryCode")]
    #[serde(default)]
    pub country_code: String,

    #[serde(rename = "countryName")]
    #[serde(default)]
    pub country_name: String,

    #[serde(rename = "continentCode")]
    #[serde(default)]
    pub continent_code: String,

    /// First-level admin code; for the US this is the two-letter state.
    #[serde(rename = "adminCode1")]
    #[serde(default)]
    pub admin_code1: String,

    #[serde(rename = "adminName1")]
    #[serde(default)]
    pub admin_name1: String,

    #[serde(rename = "adminName2")]
    #[serde(default)]
    pub admin_name2: String,

    /// Feature class, e.g. `P` or `T`.
    #[serde(default)]
    pub fcl: String,

    /// Feature code, e.g. `PPL` or `PK`.
    #[serde(default)]
    pub fcode: String,

    #[serde(default)]
    pub lat: String,

    #[serde(default)]
    pub lng: String,

    #[serde(default)]
    pub population: i64,

    /// Surveyed elevation, meters.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// Digital-elevation-model fallback, meters.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srtm3: Option<f64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Timezone>,

    #[serde(rename = "geonameId")]
    #[serde(default)]
    pub geoname_id: i64,
} // struct

/// The nested time-zone block.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Timezone {
    #[serde(rename = "timeZoneId")]
    #[serde(default)]
    pub time_zone_id: String,
} // struct

// -----------------------------------------------------------------------------

impl Geoname {
    /// Builds the location skeleton for this record: country code2 mapped to
    /// code3 (Antarctic stations have no country and map by continent),
    /// coordinates parsed, elevation falling back to the DEM value. Returns
    /// `None` when the coordinates are unusable or the country cannot be
    /// resolved at all.
    #[must_use]
    pub fn to_location(&self, gazetteer: &Gazetteer) -> Option<AtlasLocation> {
        let latitude: f64 = self.lat.parse().ok()?;
        let longitude: f64 = self.lng.parse().ok()?;

        let country = if self.country_code.is_empty() && self.continent_code == "AN" {
            "ATA".to_string()
        } else {
            gazetteer.code3_for(&self.country_code)?.to_string()
        }; // if

        let state = if country == "USA" && !self.admin_code1.is_empty() {
            self.admin_code1.clone()
        } else {
            self.admin_name1.clone()
        }; // if

        Some(AtlasLocation {
            city: self.name.clone(),
            county: self.admin_name2.clone(),
            state,
            country,
            long_country: self.country_name.clone(),
            latitude,
            longitude,
            elevation: self.elevation.or(self.srtm3),
            zone: self
                .timezone
                .as_ref()
                .map(|timezone| timezone.time_zone_id.clone())
                .unwrap_or_default(),
            rank: self.rank(),
            place_type: format!("{}.{}", self.fcl, self.fcode),
            source: source::GEONAMES_GENERAL,
            geoname_id: self.geoname_id,
            ..AtlasLocation::default()
        }) // Some
    } // fn

    /// Rank 0–4: populated places and administrative entities start at one,
    /// terrain features at zero; a national capital gains a point, as does
    /// any recorded population, and a million inhabitants gain another.
    #[must_use]
    pub fn rank(&self) -> i32 {
        let mut rank = i32::from(self.fcl == "P" || self.fcl == "A");

        if self.fcode == "PPLC" {
            rank += 1;
        } // if

        if self.population >= 1 {
            rank += 1;
        } // if

        if self.population >= 1_000_000 {
            rank += 1;
        } // if

        rank
    } // fn
} // impl

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;

    const NASHUA: &str = r#"{
        "name": "Nashua",
        "countryCode": "US",
        "countryName": "United States",
        "adminCode1": "NH",
        "adminName1": "New Hampshire",
        "adminName2": "Hillsborough County",
        "fcl": "P",
        "fcode": "PPL",
        "lat": "42.76537",
        "lng": "-71.46757",
        "population": 91322,
        "elevation": 41,
        "timezone": { "timeZoneId": "America/New_York" },
        "geonameId": 5088905
    }"#;

    #[test]
    fn deserializes_and_converts() {
        let gazetteer = Gazetteer::for_tests();
        let geoname: Geoname = serde_json::from_str(NASHUA).unwrap();
        let location = geoname.to_location(&gazetteer).unwrap();

        assert_eq!(location.city, "Nashua");
        assert_eq!(location.state, "NH");
        assert_eq!(location.country, "USA");
        assert_eq!(location.zone, "America/New_York");
        assert_eq!(location.place_type, "P.PPL");
        assert_eq!(location.geoname_id, 5_088_905);
        assert_eq!(location.source, source::GEONAMES_GENERAL);
        assert!((location.latitude - 42.76537).abs() < 1e-9);
        assert_eq!(location.elevation, Some(41.0));
        // Populated place with population: 1 + 1.
        assert_eq!(location.rank, 2);
    }

    #[test]
    fn capital_with_a_million_ranks_four() {
        let geoname = Geoname {
            fcl: "P".to_string(),
            fcode: "PPLC".to_string(),
            population: 2_100_000,
            ..Default::default()
        };
        assert_eq!(geoname.rank(), 4);
    }

    #[test]
    fn unpopulated_peak_ranks_zero() {
        let geoname = Geoname {
            fcl: "T".to_string(),
            fcode: "PK".to_string(),
            ..Default::default()
        };
        assert_eq!(geoname.rank(), 0);
    }

    #[test]
    fn antarctic_station_maps_by_continent() {
        let gazetteer = Gazetteer::for_tests();
        let geoname = Geoname {
            name: "McMurdo Station".to_string(),
            continent_code: "AN".to_string(),
            lat: "-77.846".to_string(),
            lng: "166.676".to_string(),
            fcl: "S".to_string(),
            fcode: "STNB".to_string(),
            ..Default::default()
        };
        let location = geoname.to_location(&gazetteer).unwrap();
        assert_eq!(location.country, "ATA");
    }

    #[test]
    fn unresolvable_country_is_dropped() {
        let gazetteer = Gazetteer::for_tests();
        let geoname = Geoname {
            name: "Nowhere".to_string(),
            country_code: "ZZ".to_string(),
            lat: "1.0".to_string(),
            lng: "1.0".to_string(),
            ..Default::default()
        };
        assert!(geoname.to_location(&gazetteer).is_none());
    }
} // mod
