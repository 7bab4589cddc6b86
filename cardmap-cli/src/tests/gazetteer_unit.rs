//! Unit tests for gazetteer loading and matching.

use super::helpers::GazetteerFile;
use super::*;
use cardmap_core::test_support::{sample_places, sample_region};
use cardmap_core::{PlaceSearch, SearchError, SearchRequest};
use rstest::{fixture, rstest};

#[fixture]
fn gazetteer() -> Gazetteer {
    Gazetteer::from_places(sample_places())
}

fn names(places: &[cardmap_core::Place]) -> Vec<&str> {
    places.iter().map(|place| place.name.as_str()).collect()
}

#[rstest]
#[case::name_ignores_case("KWIK", vec!["Kwik-E-Mart"])]
#[case::address_matches("walnut", vec!["Moe's Tavern"])]
#[case::locality_matches_all("springfield", vec![
    "Krusty Burger",
    "Moe's Tavern",
    "Kwik-E-Mart",
    "Springfield Library",
])]
#[case::blank_query_matches_all("  ", vec![
    "Krusty Burger",
    "Moe's Tavern",
    "Kwik-E-Mart",
    "Springfield Library",
])]
#[tokio::test]
async fn matches_names_and_addresses(
    gazetteer: Gazetteer,
    #[case] query: &str,
    #[case] expected: Vec<&str>,
) {
    let request = SearchRequest::new(query, sample_region());
    let found = gazetteer.search(&request).await.expect("search succeeds");
    assert_eq!(names(&found), expected);
}

#[rstest]
#[tokio::test]
async fn places_outside_the_region_are_excluded(gazetteer: Gazetteer) {
    let west_half = Rect::new(Coord { x: -90.0, y: 39.5 }, Coord { x: -89.645, y: 40.0 });
    let request = SearchRequest::new("", west_half);
    let found = gazetteer.search(&request).await.expect("search succeeds");
    assert_eq!(names(&found), vec!["Krusty Burger", "Kwik-E-Mart"]);
}

#[rstest]
#[tokio::test]
async fn unmatched_query_reports_no_results(gazetteer: Gazetteer) {
    let request = SearchRequest::new("planetarium", sample_region());
    let err = gazetteer.search(&request).await.expect_err("nothing matches");
    assert_eq!(
        err,
        SearchError::NoResults {
            query: "planetarium".to_owned()
        }
    );
}

#[rstest]
fn loads_places_from_json() {
    let file = GazetteerFile::sample();
    let gazetteer = Gazetteer::load(file.path()).expect("gazetteer loads");
    assert_eq!(gazetteer.places(), sample_places().as_slice());
}

#[rstest]
fn missing_address_fields_default_to_absent() {
    let file = GazetteerFile::with_contents(
        br#"[{ "name": "Shelbyville Park", "location": { "x": -88.79, "y": 39.41 } }]"#,
    );
    let gazetteer = Gazetteer::load(file.path()).expect("gazetteer loads");
    let place = gazetteer.places().first().expect("one place");
    assert_eq!(place.formatted_address(), "");
}

#[rstest]
fn missing_file_reports_open_error() {
    let file = GazetteerFile::sample();
    let missing = file.path().with_file_name("absent.json");
    let err = Gazetteer::load(&missing).expect_err("file is missing");
    match err {
        CliError::OpenGazetteer { path, .. } => assert_eq!(path, missing),
        other => panic!("expected OpenGazetteer, found {other:?}"),
    }
}

#[rstest]
fn malformed_json_reports_parse_error() {
    let file = GazetteerFile::with_contents(b"{ not json");
    let err = Gazetteer::load(file.path()).expect_err("json is malformed");
    assert!(matches!(err, CliError::ParseGazetteer { .. }), "found {err:?}");
}
