#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the search screen.

use std::cell::RefCell;
use std::time::Duration;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::time::Instant;

use cardmap_core::test_support::{RecordingCarousel, RecordingMap, sample_places};
use cardmap_core::{
    KeyboardEvent, MapSurface, PendingSearch, Place, Screen, ScreenConfig, SearchError,
};

type TestScreen = Screen<RecordingMap, RecordingCarousel>;

/// Shared state for one scenario run.
pub struct ScreenContext {
    screen: RefCell<TestScreen>,
    clock: RefCell<Instant>,
    issued: RefCell<Vec<PendingSearch>>,
}

#[fixture]
/// Build a fresh screen for each scenario run.
pub fn context() -> ScreenContext {
    ScreenContext {
        screen: RefCell::new(Screen::new(
            RecordingMap::default(),
            RecordingCarousel::default(),
            ScreenConfig::default().with_search_on_load(false),
        )),
        clock: RefCell::new(Instant::now()),
        issued: RefCell::new(Vec::new()),
    }
}

fn bakery() -> Vec<Place> {
    vec![Place::new("Lard Lad Donuts", Coord { x: -89.63, y: 39.77 })]
}

fn type_and_pause(context: &ScreenContext, text: &str) {
    let mut clock = context.clock.borrow_mut();
    *clock += Duration::from_secs(1);
    let mut screen = context.screen.borrow_mut();
    screen.text_changed(text, *clock);
    let due = *clock + screen.config().debounce;
    let pending = screen.poll_debounce(due).expect("debounce elapsed");
    context.issued.borrow_mut().push(pending);
}

fn complete(context: &ScreenContext, pending: PendingSearch, result: Result<Vec<Place>, SearchError>) {
    context
        .screen
        .borrow_mut()
        .complete_search(pending.token, result)
        .expect("results render");
}

fn latest(context: &ScreenContext) -> PendingSearch {
    context
        .issued
        .borrow()
        .last()
        .cloned()
        .expect("a search was issued")
}

fn shown_names(context: &ScreenContext) -> (Vec<String>, Vec<String>) {
    let screen = context.screen.borrow();
    let on_map = screen
        .map()
        .annotations()
        .iter()
        .map(|annotation| annotation.title.clone())
        .collect();
    let on_cards = screen
        .carousel()
        .surface()
        .cards()
        .iter()
        .map(|card| card.title().to_owned())
        .collect();
    (on_map, on_cards)
}

fn names(places: &[Place]) -> Vec<String> {
    places.iter().map(|place| place.name.clone()).collect()
}

fn assert_offset(context: &ScreenContext, expected: f64) {
    let screen = context.screen.borrow();
    assert!((screen.bottom_offset() - expected).abs() < f64::EPSILON);
    let (applied, _) = screen
        .carousel()
        .surface()
        .bottom_offset()
        .expect("offset applied");
    assert!((applied - expected).abs() < f64::EPSILON);
}

#[given("an empty search screen")]
fn empty_screen(context: &ScreenContext) {
    assert!(context.screen.borrow().results().is_empty());
}

#[given("a search screen showing the Springfield places")]
fn populated_screen(context: &ScreenContext) {
    type_and_pause(context, "springfield");
    complete(context, latest(context), Ok(sample_places()));
}

#[when("the user types a query and pauses")]
fn type_query(context: &ScreenContext) {
    type_and_pause(context, "food");
}

#[when("the user types a second query and pauses")]
fn type_second_query(context: &ScreenContext) {
    type_and_pause(context, "donuts");
}

#[when("the search returns the Springfield places")]
fn search_returns_places(context: &ScreenContext) {
    complete(context, latest(context), Ok(sample_places()));
}

#[when("the latest search returns a single bakery")]
fn latest_returns_bakery(context: &ScreenContext) {
    complete(context, latest(context), Ok(bakery()));
}

#[when("the earlier search returns the Springfield places")]
fn earlier_returns_places(context: &ScreenContext) {
    let earlier = context
        .issued
        .borrow()
        .first()
        .cloned()
        .expect("a search was issued");
    complete(context, earlier, Ok(sample_places()));
}

#[when("the search fails")]
fn search_fails(context: &ScreenContext) {
    let pending = latest(context);
    let error = SearchError::Failed {
        query: pending.request.query.clone(),
        message: "network unreachable".to_owned(),
    };
    complete(context, pending, Err(error));
}

#[when("the user taps the third card")]
fn tap_third_card(context: &ScreenContext) {
    assert!(context.screen.borrow_mut().card_selected(2));
}

#[when("the keyboard appears with a height of 300 points")]
fn keyboard_appears(context: &ScreenContext) {
    context
        .screen
        .borrow_mut()
        .keyboard(KeyboardEvent::WillShow { height: 300.0 });
}

#[when("the keyboard hides")]
fn keyboard_hides(context: &ScreenContext) {
    context.screen.borrow_mut().keyboard(KeyboardEvent::WillHide);
}

#[then("the map and the carousel show the same places in the same order")]
fn map_and_carousel_agree(context: &ScreenContext) {
    let (on_map, on_cards) = shown_names(context);
    assert_eq!(on_map, names(&sample_places()));
    assert_eq!(on_cards, on_map);
}

#[then("the carousel scrolls to the first card")]
fn scrolled_to_first(context: &ScreenContext) {
    let screen = context.screen.borrow();
    assert_eq!(screen.carousel().surface().scrolls(), &[(0, true)]);
}

#[then("only the bakery is shown")]
fn only_bakery(context: &ScreenContext) {
    let (on_map, on_cards) = shown_names(context);
    assert_eq!(on_map, names(&bakery()));
    assert_eq!(on_cards, on_map);
}

#[then("the Springfield places are still shown")]
fn places_still_shown(context: &ScreenContext) {
    let (on_map, on_cards) = shown_names(context);
    assert_eq!(on_map, names(&sample_places()));
    assert_eq!(on_cards, on_map);
    assert_eq!(context.screen.borrow().text(), "food");
}

#[then("the third place's annotation is selected")]
fn third_annotation_selected(context: &ScreenContext) {
    let screen = context.screen.borrow();
    let selected = screen.map().selected().expect("annotation selected");
    let third = sample_places().into_iter().nth(2).expect("sample has four places");
    assert_eq!(selected.title, third.name);
    assert_eq!(selected.location, third.location);
}

#[then("the carousel sits 300 points above the bottom edge")]
fn carousel_raised(context: &ScreenContext) {
    assert_offset(context, -300.0);
}

#[then("the carousel returns to the bottom edge")]
fn carousel_lowered(context: &ScreenContext) {
    assert_offset(context, 0.0);
}

#[scenario(path = "tests/features/search_screen.feature", index = 0)]
fn typing_shows_matching_places(context: ScreenContext) {
    let _ = context;
}

#[scenario(path = "tests/features/search_screen.feature", index = 1)]
fn superseded_search_is_discarded(context: ScreenContext) {
    let _ = context;
}

#[scenario(path = "tests/features/search_screen.feature", index = 2)]
fn failed_search_keeps_places(context: ScreenContext) {
    let _ = context;
}

#[scenario(path = "tests/features/search_screen.feature", index = 3)]
fn tapping_card_selects_annotation(context: ScreenContext) {
    let _ = context;
}

#[scenario(path = "tests/features/search_screen.feature", index = 4)]
fn carousel_follows_keyboard(context: ScreenContext) {
    let _ = context;
}
