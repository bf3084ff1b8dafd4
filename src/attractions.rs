//! Attractions

use serde::{Deserialize, Serialize};

use crate::{ids::numeric_id, places::DestinationId, prices::Price};

numeric_id! {
    /// Attraction identifier.
    pub struct AttractionId;
}

/// Something to see or do in a destination city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    /// Catalog identifier.
    pub id: AttractionId,

    /// City the attraction is in.
    pub city_id: DestinationId,

    /// Attraction name.
    pub name: String,

    /// Free-form category, e.g. "Museum".
    pub category: String,

    /// Ticket price.
    pub price: Price,
}

/// Attractions picked for one city, in the order they were picked.
///
/// Membership is by attraction id; the list never holds the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttractionList {
    attractions: Vec<Attraction>,
}

impl AttractionList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the attraction if it isn't picked yet, removes it if it is.
    ///
    /// Returns `true` when the attraction is picked after the call.
    pub fn toggle(&mut self, attraction: Attraction) -> bool {
        if self.contains(attraction.id) {
            self.attractions.retain(|picked| picked.id != attraction.id);
            false
        } else {
            self.attractions.push(attraction);
            true
        }
    }

    /// Check whether an attraction is picked.
    pub fn contains(&self, id: AttractionId) -> bool {
        self.attractions.iter().any(|picked| picked.id == id)
    }

    /// Iterate over the picked attractions in pick order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attraction> {
        self.attractions.iter()
    }

    /// Ids of the picked attractions in pick order.
    pub fn ids(&self) -> Vec<AttractionId> {
        self.attractions.iter().map(|picked| picked.id).collect()
    }

    /// Total ticket price of the list.
    pub fn subtotal(&self) -> Price {
        self.attractions.iter().map(|picked| picked.price).sum()
    }

    /// Number of picked attractions.
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// Check whether nothing is picked.
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl FromIterator<Attraction> for AttractionList {
    fn from_iter<I: IntoIterator<Item = Attraction>>(iter: I) -> Self {
        let mut list = Self::new();

        for attraction in iter {
            if !list.contains(attraction.id) {
                list.attractions.push(attraction);
            }
        }

        list
    }
}

impl<'a> IntoIterator for &'a AttractionList {
    type Item = &'a Attraction;
    type IntoIter = std::slice::Iter<'a, Attraction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
