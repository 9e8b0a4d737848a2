//! The **Getty** adapter: scrapes the Getty Thesaurus of Geographic Names
//! HTML UI in two phases. The preliminary phase pages through the result
//! list (a four-state line parser per item block); the secondary phase
//! fetches each item's full record for its decimal coordinates, under a
//! soft time budget. The whole search runs under the client's hard
//! deadline.

pub mod error;
pub mod hierarchy;
pub mod parser;
pub mod place_type;

pub use error::Error;

use crate::gazetteer::Gazetteer;
use crate::location::{source, AtlasLocation, LocationMap};
use crate::names::{close_match_for_city, close_match_for_state, process_place_names};
use crate::parse::ParsedSearch;
use crate::remote::{AdapterResponse, RemoteClient};
use hierarchy::parse_hierarchy;
use once_cell::sync::Lazy;
use parser::{GettyItem, PageOutcome};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use std::time::Instant;

// -----------------------------------------------------------------------------

/// Preliminary paging stops after this many pages...
const MAX_PAGES: usize = 6;

/// ...or once this many matches are in hand...
const MAX_MATCHES: usize = 50;

/// ...or when page *n* yields fewer than `PAGE_YIELD_FLOOR * n` items,
/// a sign the result list has degenerated into noise.
const PAGE_YIELD_FLOOR: usize = 12;

/// Alternate-name hits are merged into the primary map only while the
/// primary map holds fewer entries than this.
const ALT_MERGE_LIMIT: usize = 25;

static LATITUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Lat:\s*(-?\d+\.\d+)").unwrap());
static LONGITUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Long:\s*(-?\d+\.\d+)").unwrap());

// -----------------------------------------------------------------------------
//
/// Runs one Getty search under the client's hard deadline.
///
/// # Errors
///
/// * [`Error::Timeout`] when the hard deadline elapses first.
/// * [`Error::Server`] when a results page carries the server-error
///   sentinel.
/// * [`Error::FailedSyntax`] when Getty rejects the query text.
/// * HTTP errors from either phase.
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
    tokio::time::timeout(client.getty_deadline, search_inner(client, gazetteer, parsed))
        .await
        .map_err(|_elapsed| Error::Timeout)?
} // fn

async fn search_inner(
    client: &RemoteClient,
    gazetteer: &Gazetteer,
    parsed: &ParsedSearch,
) -> Result<AdapterResponse, Error> {
    let started = Instant::now();

    let items = preliminary_search(client, &parsed.target_city).await?;
    let raw_matches = items.len();

    let located = secondary_retrieval(client, items).await;

    let mut primary = LocationMap::new();
    let mut alternates = LocationMap::new();

    for (item, coordinates) in located {
        let Some(mut location) = to_location(&item, coordinates, gazetteer) else {
            continue;
        }; // let

        if !close_match_for_city(&parsed.target_city, &location)
            || !close_match_for_state(
                &parsed.target_state,
                &location.state,
                &location.country,
                gazetteer,
            )
        {
            continue;
        } // if

        location.matched_by_alternate_name = item.alternate;

        if item.alternate {
            location.insert_into(&mut alternates);
        } else {
            location.insert_into(&mut primary);
        } // if
    } // for

    // Alternate-name hits only pad out a thin primary list:
    if primary.len() < ALT_MERGE_LIMIT {
        for location in alternates.into_values() {
            location.insert_into(&mut primary);
        } // for
    } // if

    let response = AdapterResponse {
        matches: primary,
        raw_matches,
        elapsed: started.elapsed(),
    }; // struct

    tracing::debug!(metrics = %response.summary(), "Getty search done");

    Ok(response)
} // fn

// -----------------------------------------------------------------------------
//
/// Pages through the preliminary result list until one of the stop rules
/// fires.
async fn preliminary_search(
    client: &RemoteClient,
    target_city: &str,
) -> Result<Vec<GettyItem>, Error> {
    let mut items: Vec<GettyItem> = Vec::new();

    for page in 1..=MAX_PAGES {
        let url = format!(
            "{}/TGNServlet?english=Y&find={}&place=&page={page}&nation=",
            client.getty_base,
            utf8_percent_encode(target_city, NON_ALPHANUMERIC),
        ); // format

        tracing::debug!(url = %url, "Getty preliminary GET");

        let response = client.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::HttpUnsuccessful(response.status().to_string()));
        } // if

        let body = response.text().await?;

        match parser::parse_page(&body, page) {
            PageOutcome::ServerError => return Err(Error::Server),
            PageOutcome::FailedSyntax => return Err(Error::FailedSyntax),
            PageOutcome::NoResults => break,
            PageOutcome::TooManyResults => {
                tracing::debug!("Getty reported too many results");
                break;
            } // TooManyResults
            PageOutcome::Parsed { items: page_items, has_more } => {
                let yield_this_page = page_items.len();
                items.extend(page_items);

                if !has_more
                    || items.len() >= MAX_MATCHES
                    || yield_this_page < PAGE_YIELD_FLOOR * page
                {
                    break;
                } // if
            } // Parsed
        } // match
    } // for

    items.truncate(MAX_MATCHES);

    Ok(items)
} // fn

// -----------------------------------------------------------------------------
//
/// Fetches each item's full record for its decimal coordinates, stopping
/// early once the soft budget is spent. Items left without coordinates are
/// still passed along; the preliminary data stands on its own.
async fn secondary_retrieval(
    client: &RemoteClient,
    items: Vec<GettyItem>,
) -> Vec<(GettyItem, Option<(f64, f64)>)> {
    let budget_started = Instant::now();
    let mut located = Vec::with_capacity(items.len());
    let mut budget_spent = false;

    for item in items {
        if budget_spent || budget_started.elapsed() >= client.getty_soft_budget {
            budget_spent = true;
            located.push((item, None));
            continue;
        } // if

        let coordinates = match fetch_record(client, item.id).await {
            Ok(coordinates) => coordinates,
            Err(error) => {
                tracing::debug!(id = item.id, error = %error, "Getty record fetch failed");
                None
            } // Err
        }; // match

        located.push((item, coordinates));
    } // for

    located
} // fn

async fn fetch_record(client: &RemoteClient, id: i64) -> Result<Option<(f64, f64)>, Error> {
    let url = format!("{}/TGNFullDisplay?english=Y&subjectid={id}", client.getty_base);

    let response = client.http.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::HttpUnsuccessful(response.status().to_string()));
    } // if

    let body = response.text().await?;

    let latitude = LATITUDE
        .captures(&body)
        .and_then(|captures| captures[1].parse::<f64>().ok());
    let longitude = LONGITUDE
        .captures(&body)
        .and_then(|captures| captures[1].parse::<f64>().ok());

    Ok(latitude.zip(longitude))
} // fn

// -----------------------------------------------------------------------------
//
/// Builds the location for a scraped item: hierarchy levels into the admin
/// fields, keyword into the place-type tag, and the usual canonicalization
/// (with HTML entity decoding, since everything here came off a web page).
fn to_location(
    item: &GettyItem,
    coordinates: Option<(f64, f64)>,
    gazetteer: &Gazetteer,
) -> Option<AtlasLocation> {
    let ancestry = parse_hierarchy(&item.hierarchy);
    let place_type = place_type::tag_for_keyword(&item.type_keyword);
    let (latitude, longitude) = coordinates.unwrap_or_default();

    let mut location = AtlasLocation {
        city: item.name.clone(),
        county: ancestry.county,
        state: ancestry.state,
        long_country: ancestry.country,
        latitude,
        longitude,
        rank: i32::from(place_type.starts_with("P.") || place_type.starts_with("A.")),
        place_type: place_type.to_string(),
        source: source::GETTY,
        ..AtlasLocation::default()
    }; // struct

    process_place_names(&mut location, gazetteer, true).then_some(location)
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
            getty_base: server.url(),
            ..RemoteClient::default()
        }
    }

    const RESULTS_PAGE: &str = r#"<HTML><BODY>
<SPAN CLASS=page><A HREF="TGNFullDisplay?english=Y&subjectid=2080913"><B>Nashua</B></A></SPAN> (inhabited place)
<SPAN CLASS=page>(New Hampshire, United States, North and Central America, World)</SPAN>
<SPAN CLASS=page><A HREF="TGNFullDisplay?english=Y&subjectid=1002222"><B>Nashua</B></A></SPAN> (inhabited place)
<SPAN CLASS=page>(Montana, United States, North and Central America, World)</SPAN>
</BODY></HTML>"#;

    #[tokio::test]
    async fn no_results_sentinel_is_ok() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/TGNServlet")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<BODY>Your search has produced no results.</BODY>")
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Brigadoon", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();
        assert!(response.matches.is_empty());
        assert_eq!(response.raw_matches, 0);
    }

    #[tokio::test]
    async fn server_error_sentinel_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/TGNServlet")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("<H1>Server Error</H1>")
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let error = search(&client, &gazetteer, &parsed).await.unwrap_err();
        assert!(matches!(error, Error::Server));
        assert_eq!(error.to_string(), "Getty server error");
    }

    #[tokio::test]
    async fn two_phase_scrape_builds_locations() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/TGNServlet")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(RESULTS_PAGE)
            .create_async()
            .await;

        server
            .mock("GET", "/TGNFullDisplay")
            .match_query(mockito::Matcher::Regex("subjectid=2080913".to_string()))
            .with_status(200)
            .with_body("Lat: 42.7654 decimal degrees<BR>Long: -71.4676 decimal degrees")
            .create_async()
            .await;

        server
            .mock("GET", "/TGNFullDisplay")
            .match_query(mockito::Matcher::Regex("subjectid=1002222".to_string()))
            .with_status(200)
            .with_body("Lat: 48.1336 decimal degrees<BR>Long: -106.3558 decimal degrees")
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();

        assert_eq!(response.raw_matches, 2);
        assert_eq!(response.matches.len(), 2);

        let nashua_nh = response.matches.get("NASHUA,NH").unwrap();
        assert_eq!(nashua_nh.country, "USA");
        assert_eq!(nashua_nh.place_type, "P.PPL");
        assert_eq!(nashua_nh.source, source::GETTY);
        assert!((nashua_nh.latitude - 42.7654).abs() < 1e-9);
    }

    #[tokio::test]
    async fn record_without_decimals_keeps_preliminary_item() {
        let mut server = mockito::Server::new_async().await;

        let single = r#"<SPAN CLASS=page><A HREF="TGNFullDisplay?english=Y&subjectid=42"><B>Nashua</B></A></SPAN> (inhabited place)
<SPAN CLASS=page>(New Hampshire, United States, North and Central America, World)</SPAN>"#;

        server
            .mock("GET", "/TGNServlet")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(single)
            .create_async()
            .await;

        server
            .mock("GET", "/TGNFullDisplay")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("No coordinates on file.")
            .create_async()
            .await;

        let gazetteer = Gazetteer::for_tests();
        let parsed = parse_search("Nashua", ParseMode::Strict, &gazetteer);
        let client = client_for(&server);

        let response = search(&client, &gazetteer, &parsed).await.unwrap();
        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches.values().next().unwrap().latitude, 0.0);
    }
} // mod
