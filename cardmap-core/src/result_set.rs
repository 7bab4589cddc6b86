//! The ordered list of places currently backing the map and the carousel.

use std::collections::HashMap;

use crate::Place;

/// Stable identifier for a place within a [`ResultSet`].
///
/// Keys compare the name and the exact coordinate bits. Places sharing both
/// are told apart by the order in which they appear, so keys are unique
/// within a result set while equal places in successive result sets keep the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceKey {
    name: String,
    x_bits: u64,
    y_bits: u64,
    occurrence: u32,
}

impl PlaceKey {
    fn new(place: &Place, occurrence: u32) -> Self {
        Self {
            name: place.name.clone(),
            x_bits: normalised_bits(place.location.x),
            y_bits: normalised_bits(place.location.y),
            occurrence,
        }
    }

    /// Display name the key was derived from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based count of earlier places sharing this name and coordinate.
    #[must_use]
    pub const fn occurrence(&self) -> u32 {
        self.occurrence
    }
}

// `-0.0` and `0.0` denote the same coordinate.
fn normalised_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

/// Assign keys to `places` in order.
pub(crate) fn assign_keys(places: &[Place]) -> Vec<PlaceKey> {
    let mut seen: HashMap<(&str, u64, u64), u32> = HashMap::new();
    places
        .iter()
        .map(|place| {
            let slot = seen
                .entry((
                    place.name.as_str(),
                    normalised_bits(place.location.x),
                    normalised_bits(place.location.y),
                ))
                .or_insert(0);
            let key = PlaceKey::new(place, *slot);
            *slot += 1;
            key
        })
        .collect()
}

/// Ordered search results, replaced wholesale on every successful search.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use cardmap_core::{Place, ResultSet};
///
/// let set = ResultSet::new(vec![
///     Place::new("Cafe", Coord { x: 0.0, y: 0.0 }),
///     Place::new("Cafe", Coord { x: 0.0, y: 0.0 }),
/// ]);
/// assert_eq!(set.len(), 2);
/// assert_ne!(set.keys()[0], set.keys()[1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    places: Vec<Place>,
    keys: Vec<PlaceKey>,
}

impl ResultSet {
    /// Build a result set, assigning a key to every place.
    #[must_use]
    pub fn new(places: Vec<Place>) -> Self {
        let keys = assign_keys(&places);
        Self { places, keys }
    }

    /// Places in response order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Keys parallel to [`ResultSet::places`].
    #[must_use]
    pub fn keys(&self) -> &[PlaceKey] {
        &self.keys
    }

    /// Iterate `(key, place)` pairs in order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&PlaceKey, &Place)> {
        self.keys.iter().zip(&self.places)
    }

    /// Place at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&PlaceKey, &Place)> {
        self.keys.get(index).zip(self.places.get(index))
    }

    /// Number of places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Return `true` when the set holds no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
