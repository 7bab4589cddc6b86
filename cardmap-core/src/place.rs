//! Search results and their postal addresses.

use geo::Coord;

/// Separator placed between address lines.
const LINE_SEPARATOR: &str = ", ";

/// Structured postal address attached to a [`Place`].
///
/// Every component is optional. Blank components are treated as absent when
/// formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AddressComponents {
    /// House number, e.g. `"12"`.
    pub sub_thoroughfare: Option<String>,
    /// Street name, e.g. `"Main St"`.
    pub thoroughfare: Option<String>,
    /// City or town.
    pub locality: Option<String>,
    /// State, province or region.
    pub administrative_area: Option<String>,
}

impl AddressComponents {
    /// Render the address as a single line.
    ///
    /// House number and street share the first line, separated by a space.
    /// The street line, locality and administrative area are then joined with
    /// `", "`. Absent or blank components are skipped together with their
    /// separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardmap_core::AddressComponents;
    ///
    /// let address = AddressComponents {
    ///     sub_thoroughfare: Some("12".into()),
    ///     thoroughfare: Some("Main St".into()),
    ///     locality: Some("Springfield".into()),
    ///     administrative_area: None,
    /// };
    /// assert_eq!(address.formatted(), "12 Main St, Springfield");
    /// ```
    #[must_use]
    pub fn formatted(&self) -> String {
        let street_line = [&self.sub_thoroughfare, &self.thoroughfare]
            .into_iter()
            .filter_map(|component| present(component.as_deref()))
            .collect::<Vec<_>>()
            .join(" ");

        [
            (!street_line.is_empty()).then_some(street_line),
            present(self.locality.as_deref()).map(str::to_owned),
            present(self.administrative_area.as_deref()).map(str::to_owned),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
    }

    /// Return `true` when no component would be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatted().is_empty()
    }
}

fn present(component: Option<&str>) -> Option<&str> {
    component.map(str::trim).filter(|value| !value.is_empty())
}

/// A point of interest returned by a search.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use cardmap_core::{AddressComponents, Place};
///
/// let place = Place::new("Blue Bottle", Coord { x: -122.4, y: 37.8 })
///     .with_address(AddressComponents {
///         locality: Some("San Francisco".into()),
///         ..AddressComponents::default()
///     });
/// assert_eq!(place.formatted_address(), "San Francisco");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Postal address components.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: AddressComponents,
}

impl Place {
    /// Construct a place without address components.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
            address: AddressComponents::default(),
        }
    }

    /// Attach address components.
    #[must_use]
    pub fn with_address(mut self, address: AddressComponents) -> Self {
        self.address = address;
        self
    }

    /// Single-line address shown under the name on a card.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        self.address.formatted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn address(parts: [Option<&str>; 4]) -> AddressComponents {
        let [sub_thoroughfare, thoroughfare, locality, administrative_area] =
            parts.map(|part| part.map(str::to_owned));
        AddressComponents {
            sub_thoroughfare,
            thoroughfare,
            locality,
            administrative_area,
        }
    }

    #[rstest]
    #[case([None, None, None, None], "")]
    #[case([Some("12"), None, None, None], "12")]
    #[case([None, Some("Main St"), None, None], "Main St")]
    #[case([Some("12"), Some("Main St"), None, None], "12 Main St")]
    #[case([None, None, Some("Springfield"), None], "Springfield")]
    #[case([Some("12"), None, Some("Springfield"), None], "12, Springfield")]
    #[case([None, Some("Main St"), Some("Springfield"), None], "Main St, Springfield")]
    #[case([Some("12"), Some("Main St"), Some("Springfield"), None], "12 Main St, Springfield")]
    #[case([None, None, None, Some("IL")], "IL")]
    #[case([Some("12"), None, None, Some("IL")], "12, IL")]
    #[case([None, Some("Main St"), None, Some("IL")], "Main St, IL")]
    #[case([Some("12"), Some("Main St"), None, Some("IL")], "12 Main St, IL")]
    #[case([None, None, Some("Springfield"), Some("IL")], "Springfield, IL")]
    #[case([Some("12"), None, Some("Springfield"), Some("IL")], "12, Springfield, IL")]
    #[case([None, Some("Main St"), Some("Springfield"), Some("IL")], "Main St, Springfield, IL")]
    #[case(
        [Some("12"), Some("Main St"), Some("Springfield"), Some("IL")],
        "12 Main St, Springfield, IL"
    )]
    fn formats_every_component_subset(#[case] parts: [Option<&str>; 4], #[case] expected: &str) {
        assert_eq!(address(parts).formatted(), expected);
    }

    #[rstest]
    #[case([Some(""), Some("Main St"), Some("  "), Some("IL")], "Main St, IL")]
    #[case([Some(" 12 "), Some(" Main St"), None, None], "12 Main St")]
    fn blank_components_are_absent(#[case] parts: [Option<&str>; 4], #[case] expected: &str) {
        assert_eq!(address(parts).formatted(), expected);
    }

    #[rstest]
    fn empty_address_reports_empty() {
        assert!(AddressComponents::default().is_empty());
        assert!(address([Some(" "), None, None, None]).is_empty());
    }

    #[rstest]
    fn place_formats_its_address() {
        let place = Place::new("Cafe", Coord { x: 0.0, y: 0.0 })
            .with_address(address([Some("1"), Some("High St"), None, None]));
        assert_eq!(place.formatted_address(), "1 High St");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn missing_address_decodes_as_empty() {
        let place: Place = serde_json::from_str(r#"{"name": "Cafe", "location": {"x": 1.5, "y": -2.0}}"#)
            .expect("valid place");
        assert_eq!(place, Place::new("Cafe", Coord { x: 1.5, y: -2.0 }));
        assert_eq!(place.formatted_address(), "");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn partial_address_decodes_present_components() {
        let place: Place = serde_json::from_str(
            r#"{
                "name": "Library",
                "location": {"x": 0.0, "y": 0.0},
                "address": {"thoroughfare": "Elm St", "locality": "Springfield"}
            }"#,
        )
        .expect("valid place");
        assert_eq!(place.address.sub_thoroughfare, None);
        assert_eq!(place.formatted_address(), "Elm St, Springfield");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn encoded_place_decodes_unchanged() {
        let place = Place::new("Deli", Coord { x: -0.25, y: 51.5 })
            .with_address(address([Some("7"), Some("Fleet St"), Some("London"), None]));
        let json = serde_json::to_string(&place).expect("encodes");
        let decoded: Place = serde_json::from_str(&json).expect("decodes");
        assert_eq!(decoded, place);
    }
}
