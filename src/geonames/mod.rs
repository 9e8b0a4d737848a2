//! The **GeoNames** adapter: consults the GeoNames JSON web services (the
//! feature search with a feature-code allow list, or the postal-code search)
//! under a hard deadline, filters the returned records against the parsed
//! query, and yields candidate locations keyed for merging.

pub mod error;
pub mod request;
pub mod response;

pub use error::Error;
pub use request::Request;

use crate::gazetteer::Gazetteer;
use crate::location::LocationMap;
use crate::names::{close_match_for_city, close_match_for_state, process_place_names};
use crate::parse::ParsedSearch;
use crate::remote::{AdapterResponse, RemoteClient};
use response::Payload;
use std::time::Instant;

// -----------------------------------------------------------------------------
//
/// Runs one GeoNames search under the client's deadline.
///
/// # Errors
///
/// * [`Error::Timeout`] when the deadline elapses first.
/// * HTTP, JSON, and GeoNames service errors, each reported per-source; the
///   caller still returns the other source's results.
#[cfg_attr(feature = "tracing-instrumentation", tracing::instrument(
    level = "debug",
    skip(client, gazetteer),
    fields(search = %parsed.normalized_search),
    err
))]
pub async fn search(
    client: &RemoteClient,
    gazetteer: &Gazetteer,
    parsed: &ParsedSearch,
) -> Result<AdapterResponse, Error> {
    let started = Instant::now();
    let request = Request::new(client, parsed);

    let payload = tokio::time::timeout(client.geonames_deadline, request.get())
        .await
        .map_err(|_elapsed| Error::Timeout)??;

    let raw_matches = payload.len();
    let matches = retain_matches(payload, gazetteer, parsed);

    let response = AdapterResponse {
        matches,
        raw_matches,
        elapsed: started.elapsed(),
    }; // struct

    tracing::debug!(metrics = %response.summary(), "GeoNames search done");

    Ok(response)
} // fn

// -----------------------------------------------------------------------------

/// Converts, canonicalizes, and filters the returned records. Postal records
/// skip the city filter (the query had no city).
fn retain_matches(payload: Payload, gazetteer: &Gazetteer, parsed: &ParsedSearch) -> LocationMap {
    let mut matches = LocationMap::new();

    match payload {
        Payload::Search(document) => {
            for geoname in document.geonames {
                let Some(mut location) = geoname.to_location(gazetteer) else {
                    continue;
                }; // let

                if !process_place_names(&mut location, gazetteer, false) {
                    continue;
                } // if

                if !close_match_for_city(&parsed.target_city, &location) {
                    continue;
                } // if

                if !close_match_for_state(
                    &parsed.target_state,
                    &location.state,
                    &location.country,
                    gazetteer,
                ) {
                    continue;
                } // if

                location.insert_into(&mut matches);
            } // for
        } // Search

        Payload::Postal(document) => {
            for record in document.postal_codes {
                let Some(mut location) = record.to_location(gazetteer) else {
                    continue;
                }; // let

                if !process_place_names(&mut location, gazetteer, false) {
                    continue;
                } // if

                if !close_match_for_state(
                    &parsed.target_state,
                    &location.state,
                    &location.country,
                    gazetteer,
                ) {
                    continue;
                } // if

                location.insert_into(&mut matches);
            } // for
        } // Postal
    } // match

    matches
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_search, ParseMode};

    fn client_for(server: &mockito::ServerGuard) -> RemoteClient {
        RemoteClient {
            geonames_base: server.url(),
            ..RemoteClient::default()
        }
    }

    #[tokio::test]
    async fn empty_result_is_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/searchJSON")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"totalResultsCount":0,"geonames":[]}"#)
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nowhereville", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();
        assert!(response.matches.is_empty());
        assert_eq!(response.raw_matches, 0);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/searchJSON")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let error = search(&client, &gazetteer, &parsed).await.unwrap_err();
        assert!(matches!(error, Error::HttpUnsuccessful(_)));
    }

    #[tokio::test]
    async fn service_error_block_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/searchJSON")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":{"message":"hourly limit exceeded","value":19}}"#)
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let error = search(&client, &gazetteer, &parsed).await.unwrap_err();
        assert!(matches!(error, Error::Service { code: 19, .. }));
    }

    #[tokio::test]
    async fn matching_results_are_filtered_and_keyed() {
        let body = r#"{
            "totalResultsCount": 3,
            "geonames": [
                {
                    "name": "Nashua", "countryCode": "US", "countryName": "United States",
                    "adminCode1": "NH", "adminName1": "New Hampshire",
                    "adminName2": "Hillsborough County",
                    "fcl": "P", "fcode": "PPL",
                    "lat": "42.76537", "lng": "-71.46757",
                    "population": 91322, "geonameId": 5088905,
                    "timezone": { "timeZoneId": "America/New_York" }
                },
                {
                    "name": "Nashua", "countryCode": "US", "countryName": "United States",
                    "adminCode1": "MT", "adminName1": "Montana",
                    "fcl": "P", "fcode": "PPL",
                    "lat": "48.13", "lng": "-106.36",
                    "population": 300, "geonameId": 5666639
                },
                {
                    "name": "Concord", "countryCode": "US", "countryName": "United States",
                    "adminCode1": "NH", "adminName1": "New Hampshire",
                    "fcl": "P", "fcode": "PPLA",
                    "lat": "43.2", "lng": "-71.5",
                    "population": 43000, "geonameId": 5084868
                }
            ]
        }"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/searchJSON")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua, NH", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();

        // Montana fails the state filter, Concord fails the city filter:
        assert_eq!(response.raw_matches, 3);
        assert_eq!(response.matches.len(), 1);

        let location = response.matches.values().next().unwrap();
        assert_eq!(location.state, "NH");
        assert_eq!(location.county, "Hillsborough County");
    }

    #[tokio::test]
    async fn postal_lookup_uses_postal_endpoint() {
        let body = r#"{
            "postalCodes": [
                {
                    "postalCode": "90210", "placeName": "Beverly Hills",
                    "countryCode": "US", "adminCode1": "CA",
                    "adminName1": "California", "adminName2": "Los Angeles",
                    "lat": 34.0901, "lng": -118.4065
                }
            ]
        }"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/postalCodeSearchJSON")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("90210", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();
        assert_eq!(response.matches.len(), 1);

        let location = response.matches.values().next().unwrap();
        assert_eq!(location.zip, "90210");
        assert_eq!(location.rank, crate::location::ZIP_RANK);
    }
} // mod
