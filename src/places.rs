//! Places

use serde::{Deserialize, Serialize};

use crate::ids::numeric_id;

numeric_id! {
    /// Identifier of a capital city in the catalog's capital list.
    pub struct DestinationId;
}

/// Where the trip starts and ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// City name shown to the traveller.
    pub city: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl Origin {
    /// Creates a new origin.
    pub fn new(city: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            city: city.into(),
            lat,
            lng,
        }
    }

    /// Origin used when the traveller's position is unknown.
    pub fn fallback() -> Self {
        Self::new("Tel Aviv", 32.08, 34.78)
    }
}

/// A capital city that can be added to the route.
///
/// Destinations are identified by their id alone: two records with the same
/// id are the same stop, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Catalog identifier.
    pub id: DestinationId,

    /// Country the capital belongs to.
    pub country: String,

    /// City name.
    pub city: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl Destination {
    /// Creates a new destination.
    pub fn new(
        id: impl Into<DestinationId>,
        country: impl Into<String>,
        city: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            country: country.into(),
            city: city.into(),
            lat,
            lng,
        }
    }
}

impl PartialEq for Destination {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Destination {}

impl std::hash::Hash for Destination {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Filters the capital list for the destination picker.
///
/// Matches the query case-insensitively against the city name and leaves out
/// capitals that are already on the route. An empty query matches nothing.
pub fn search_capitals<'a>(
    capitals: &'a [Destination],
    query: &str,
    selected: &[Destination],
) -> Vec<&'a Destination> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return Vec::new();
    }

    capitals
        .iter()
        .filter(|capital| capital.city.to_lowercase().contains(&query))
        .filter(|capital| !selected.iter().any(|picked| picked.id == capital.id))
        .collect()
}
