//! Catalog
//!
//! The services the planner leans on for data it cannot compute itself:
//! the capital list, flights along a route, hotels and attractions per city,
//! and trip confirmation.

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    attractions::Attraction,
    flights::{Segment, segment_count},
    hotels::Hotel,
    places::{Destination, DestinationId, Origin},
    prices::Price,
};

pub mod cache;

pub use cache::{DestinationSetKey, FetchTicket, OfferCache};

/// Errors returned by a [`TripCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The route service returned the wrong number of segments.
    #[error("route has {found} segments, expected {expected}")]
    RouteMismatch {
        /// Segments a round trip over the destinations has
        expected: usize,
        /// Segments returned
        found: usize,
    },

    /// The catalog could not answer.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog does not know the destination.
    #[error("unknown destination: {0}")]
    UnknownDestination(DestinationId),

    /// A newer fetch for the offer cache replaced this one.
    #[error("offers were superseded by a newer fetch")]
    Superseded,
}

/// A confirmed trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Booking reference issued by the catalog.
    pub id: u64,

    /// Total the trip was confirmed at.
    pub total: Price,
}

/// Data sources for planning a trip.
#[automock]
pub trait TripCatalog {
    /// Every capital that can be added to a route.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the list cannot be produced.
    fn capitals(&self) -> Result<Vec<Destination>, CatalogError>;

    /// Flights for each leg of the round trip from `origin` through
    /// `destinations` and back, in leg order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the route cannot be computed.
    fn compute_route(
        &self,
        origin: &Origin,
        destinations: &[Destination],
    ) -> Result<Vec<Segment>, CatalogError>;

    /// Hotels in a city.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the city is unknown or the lookup fails.
    fn hotels(&self, city: DestinationId) -> Result<Vec<Hotel>, CatalogError>;

    /// Attractions in a city.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the city is unknown or the lookup fails.
    fn attractions(&self, city: DestinationId) -> Result<Vec<Attraction>, CatalogError>;

    /// Books a trip at the given total.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the booking is refused.
    fn confirm_trip(&self, total: Price) -> Result<Confirmation, CatalogError>;
}

/// Everything on offer for one set of destinations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripOffers {
    /// Flights per leg, in leg order.
    pub segments: Vec<Segment>,

    /// Hotels per destination.
    pub hotels: FxHashMap<DestinationId, Vec<Hotel>>,

    /// Attractions per destination.
    pub attractions: FxHashMap<DestinationId, Vec<Attraction>>,
}

impl TripOffers {
    /// Fetches flights, hotels and attractions for a route.
    ///
    /// A route without destinations has nothing on offer and makes no calls.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] the catalog reports, or
    /// [`CatalogError::RouteMismatch`] if the route does not have one segment
    /// per leg.
    pub fn fetch<C: TripCatalog + ?Sized>(
        catalog: &C,
        origin: &Origin,
        destinations: &[Destination],
    ) -> Result<Self, CatalogError> {
        if destinations.is_empty() {
            return Ok(Self::default());
        }

        let segments = catalog.compute_route(origin, destinations)?;
        let expected = segment_count(destinations.len());

        if segments.len() != expected {
            return Err(CatalogError::RouteMismatch {
                expected,
                found: segments.len(),
            });
        }

        let mut hotels = FxHashMap::default();
        let mut attractions = FxHashMap::default();

        for destination in destinations {
            hotels.insert(destination.id, catalog.hotels(destination.id)?);
            attractions.insert(destination.id, catalog.attractions(destination.id)?);
        }

        debug!(
            destinations = destinations.len(),
            segments = segments.len(),
            "fetched trip offers"
        );

        Ok(Self {
            segments,
            hotels,
            attractions,
        })
    }

    /// Hotels offered in a city; empty if none.
    pub fn hotels_in(&self, city: DestinationId) -> &[Hotel] {
        self.hotels.get(&city).map_or(&[], Vec::as_slice)
    }

    /// Attractions offered in a city; empty if none.
    pub fn attractions_in(&self, city: DestinationId) -> &[Attraction] {
        self.attractions.get(&city).map_or(&[], Vec::as_slice)
    }
}
