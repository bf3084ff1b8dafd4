//! Trip plan
//!
//! The per-destination choices that hang off a route: start date, stay
//! lengths, flights, hotels and attractions. Both the trip state and the
//! suggested itineraries carry one.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::{
    attractions::{Attraction, AttractionList},
    flights::{FlightOption, SegmentKey},
    hotels::Hotel,
    places::DestinationId,
    pricing::{PriceBreakdown, price_breakdown},
};

/// Days spent in each destination.
pub type Durations = FxHashMap<DestinationId, u32>;

/// Chosen flight for each segment, ordered by segment position.
pub type SelectedFlights = BTreeMap<SegmentKey, FlightOption>;

/// Chosen hotel for each destination.
pub type SelectedHotels = FxHashMap<DestinationId, Hotel>;

/// Chosen attractions for each destination.
pub type SelectedAttractions = FxHashMap<DestinationId, AttractionList>;

/// Choices made for a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPlan {
    /// First day of the trip, as entered (ISO `YYYY-MM-DD` when valid).
    pub start_date: Option<String>,

    /// Days spent in each destination.
    pub durations: Durations,

    /// Chosen flight per segment.
    pub flights: SelectedFlights,

    /// Chosen hotel per destination.
    pub hotels: SelectedHotels,

    /// Chosen attractions per destination.
    pub attractions: SelectedAttractions,
}

impl TripPlan {
    /// Toggle an attraction for a city, creating the city's list on first use.
    ///
    /// Returns `true` when the attraction is picked after the call.
    pub fn toggle_attraction(&mut self, city: DestinationId, attraction: Attraction) -> bool {
        self.attractions.entry(city).or_default().toggle(attraction)
    }

    /// Drop every choice tied to a destination.
    pub fn forget_destination(&mut self, city: DestinationId) {
        self.durations.remove(&city);
        self.hotels.remove(&city);
        self.attractions.remove(&city);
    }

    /// Subtotals for flights, hotels and attractions.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        price_breakdown(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{attractions::AttractionId, prices::Price};

    use super::*;

    fn museum() -> Attraction {
        Attraction {
            id: AttractionId::new(20),
            city_id: DestinationId::new(1),
            name: "Museum".to_string(),
            category: "Museum".to_string(),
            price: Price::from_major(15),
        }
    }

    #[test]
    fn toggle_attraction_creates_list() {
        let mut plan = TripPlan::default();

        assert!(plan.toggle_attraction(DestinationId::new(1), museum()));

        assert_eq!(
            plan.attractions
                .get(&DestinationId::new(1))
                .map(AttractionList::len),
            Some(1)
        );
    }

    #[test]
    fn forget_destination_leaves_other_cities() {
        let mut plan = TripPlan::default();
        plan.durations.insert(DestinationId::new(1), 2);
        plan.durations.insert(DestinationId::new(2), 3);
        plan.toggle_attraction(DestinationId::new(1), museum());

        plan.forget_destination(DestinationId::new(1));

        assert!(!plan.durations.contains_key(&DestinationId::new(1)));
        assert!(!plan.attractions.contains_key(&DestinationId::new(1)));
        assert_eq!(plan.durations.get(&DestinationId::new(2)), Some(&3));
    }
}
