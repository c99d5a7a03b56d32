//! Destinations, waypoints and the location catalogue.

use std::collections::HashMap;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Category;

/// A destination worth visiting.
///
/// Field names follow the `locations.json` catalogue format. Coordinates are
/// WGS84 degrees.
///
/// # Examples
/// ```
/// use itinera_core::{Category, Location};
///
/// let church = Location::new("Paoay Church", 18.0614, 120.5217, Category::Churches);
/// assert_eq!(church.coord().x, 120.5217);
/// assert_eq!(church.coord().y, 18.0614);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique display name; the key used by every derived table.
    pub title: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Interest category.
    #[serde(rename = "type")]
    pub category: Category,
    /// Visitor rating, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Opening hours as written in the catalogue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Location {
    /// Construct a location with no rating, hours or description.
    pub fn new(title: impl Into<String>, latitude: f64, longitude: f64, category: Category) -> Self {
        Self {
            title: title.into(),
            latitude,
            longitude,
            category,
            rating: None,
            time_range: None,
            description: None,
        }
    }

    /// Attach an opening-hours string.
    #[must_use]
    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Waypoint for routing requests.
    #[must_use]
    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.title.clone(), self.coord())
    }
}

/// A named point a route can start or end at.
///
/// Both catalogue locations and the fixed user origin convert into a
/// waypoint, so legs can mix the two.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::Waypoint;
///
/// let origin = Waypoint::new("Your Location (CCIS)", Coord { x: 120.545021, y: 18.059779 });
/// assert_eq!(origin.lon_lat(), "120.545021,18.059779");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Display name.
    pub title: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Waypoint {
    /// Construct a waypoint from a title and `geo` coordinate.
    pub fn new(title: impl Into<String>, coord: Coord<f64>) -> Self {
        Self {
            title: title.into(),
            latitude: coord.y,
            longitude: coord.x,
        }
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// `lon,lat` pair in the order routing APIs expect.
    #[must_use]
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl From<&Location> for Waypoint {
    fn from(location: &Location) -> Self {
        location.waypoint()
    }
}

/// Errors returned by [`Catalogue::from_locations`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// Two entries share a title, which would make derived tables ambiguous.
    #[error("duplicate location title '{title}'")]
    DuplicateTitle {
        /// The repeated title.
        title: String,
    },
}

/// The known locations of the region, in catalogue order.
///
/// # Examples
/// ```
/// use itinera_core::{Catalogue, Category, Location};
///
/// let catalogue = Catalogue::from_locations(vec![
///     Location::new("Paoay Church", 18.0614, 120.5217, Category::Churches),
///     Location::new("Saud Beach", 18.6355, 120.8450, Category::Beaches),
/// ])?;
/// assert_eq!(catalogue.len(), 2);
/// assert!(catalogue.get("Saud Beach").is_some());
/// # Ok::<(), itinera_core::CatalogueError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    locations: Vec<Location>,
    by_title: HashMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue, rejecting duplicate titles.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::DuplicateTitle`] when two locations share a
    /// title.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, CatalogueError> {
        let mut by_title = HashMap::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            if by_title.insert(location.title.clone(), index).is_some() {
                return Err(CatalogueError::DuplicateTitle {
                    title: location.title.clone(),
                });
            }
        }
        Ok(Self {
            locations,
            by_title,
        })
    }

    /// Look up a location by title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Location> {
        self.by_title
            .get(title)
            .and_then(|&index| self.locations.get(index))
    }

    /// Iterate locations in catalogue order.
    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    /// Borrow the locations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the catalogue holds no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
