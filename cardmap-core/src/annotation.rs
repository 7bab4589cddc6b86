//! Map annotations derived from search results.
//!
//! The map renderer is external. [`MapSurface`] is the slice of it the screen
//! needs: reading the visible region, replacing pins, fitting the viewport
//! and selecting a pin to show its callout.

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};

use crate::{Place, PlaceKey, ResultSet, SelectAnnotation};

/// Reuse identifier for pin annotation views.
pub const PIN_REUSE_IDENTIFIER: &str = "pin";

/// A map marker for one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Identifier shared with the carousel item for the same place.
    pub key: PlaceKey,
    /// Callout title; the place's name.
    pub title: String,
    /// Marker position.
    pub location: Coord<f64>,
}

impl Annotation {
    /// Derive the annotation for `place`.
    #[must_use]
    pub fn for_place(key: &PlaceKey, place: &Place) -> Self {
        Self {
            key: key.clone(),
            title: place.name.clone(),
            location: place.location,
        }
    }
}

/// Marker style used for annotation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Classic drop pin.
    Pin,
}

/// Description of the view a map should render for an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationView {
    /// Identifier used by the renderer to recycle views.
    pub reuse_identifier: &'static str,
    /// Marker shape.
    pub style: MarkerStyle,
    /// Whether tapping the marker shows a callout with the title.
    pub can_show_callout: bool,
}

/// View for `annotation`: a pin with its callout enabled.
#[must_use]
pub fn annotation_view(_annotation: &Annotation) -> AnnotationView {
    AnnotationView {
        reuse_identifier: PIN_REUSE_IDENTIFIER,
        style: MarkerStyle::Pin,
        can_show_callout: true,
    }
}

/// Rendering capability of the map.
///
/// Coordinates use WGS84 with `x = longitude` and `y = latitude`.
pub trait MapSurface {
    /// Region currently visible on the map.
    fn region(&self) -> Rect<f64>;

    /// Annotations currently on the map, in insertion order.
    fn annotations(&self) -> &[Annotation];

    /// Place a marker.
    fn add_annotation(&mut self, annotation: Annotation);

    /// Remove every marker.
    fn remove_all_annotations(&mut self);

    /// Move the viewport so every current marker is visible.
    fn show_annotations(&mut self, animated: bool);

    /// Select `annotation`, showing its callout.
    fn select_annotation(&mut self, annotation: &Annotation, animated: bool);
}

/// Replace the map's markers with one per place in `results`, then fit them.
///
/// Runs on every successful search, including empty ones: existing markers
/// are always removed first.
pub fn sync_annotations<M: MapSurface + ?Sized>(map: &mut M, results: &ResultSet) {
    map.remove_all_annotations();
    for (key, place) in results.iter() {
        map.add_annotation(Annotation::for_place(key, place));
    }
    map.show_annotations(true);
}

/// Select the first annotation matching `request`.
///
/// Returns `false` without touching the map when nothing matches.
pub fn select_matching<M: MapSurface + ?Sized>(map: &mut M, request: &SelectAnnotation) -> bool {
    let Some(annotation) = map
        .annotations()
        .iter()
        .find(|annotation| annotation.key == request.key)
        .cloned()
    else {
        log::debug!("no annotation matches selection {:?}", request.title);
        return false;
    };
    map.select_annotation(&annotation, true);
    true
}

/// Smallest region containing every annotation, or `None` when empty.
#[must_use]
pub fn fitting_region(annotations: &[Annotation]) -> Option<Rect<f64>> {
    let points: Vec<Point<f64>> = annotations
        .iter()
        .map(|annotation| Point::from(annotation.location))
        .collect();
    MultiPoint::from(points).bounding_rect()
}
