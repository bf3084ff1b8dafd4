//! Trip state
//!
//! [`TripState`] is the trip in progress: where it starts, which capitals it
//! visits in which order, and every choice attached to those stops. Its
//! mutations keep the dependent choices consistent with the route:
//!
//! - removing a destination forgets its stay length, hotel and attractions;
//! - removing or reordering destinations forgets every flight, because
//!   flights are addressed by segment position and every position may now
//!   mean a different leg;
//! - adding a destination only appends, so it leaves flights alone.
//!
//! [`Trip`] wraps the state with a snapshot store and persists after every
//! mutation.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::{
    attractions::Attraction,
    flights::{FlightOption, SegmentKey},
    hotels::Hotel,
    places::{Destination, DestinationId, Origin},
    plan::{Durations, SelectedAttractions, SelectedFlights, SelectedHotels, TripPlan},
    prices::Price,
    pricing::PriceBreakdown,
    suggestions::Suggestion,
};

mod container;
pub mod readiness;
pub mod schedule;
pub mod snapshot;

pub use container::Trip;

/// The trip in progress.
///
/// The default value is the empty trip: no origin, no destinations, no
/// choices, preview mode off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripState {
    origin: Option<Origin>,
    destinations: Vec<Destination>,
    plan: TripPlan,
    preview_mode: bool,
}

impl TripState {
    /// Creates an empty trip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the trip starts and ends.
    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// Destinations in visit order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Check whether a destination is on the route.
    pub fn contains(&self, id: DestinationId) -> bool {
        self.destinations.iter().any(|d| d.id == id)
    }

    /// First day of the trip, as entered.
    pub fn start_date(&self) -> Option<&str> {
        self.plan.start_date.as_deref()
    }

    /// Days spent in each destination.
    pub fn durations(&self) -> &Durations {
        &self.plan.durations
    }

    /// Chosen flight per segment.
    pub fn selected_flights(&self) -> &SelectedFlights {
        &self.plan.flights
    }

    /// Chosen hotel per destination.
    pub fn selected_hotels(&self) -> &SelectedHotels {
        &self.plan.hotels
    }

    /// Chosen attractions per destination.
    pub fn selected_attractions(&self) -> &SelectedAttractions {
        &self.plan.attractions
    }

    /// All choices attached to the route.
    pub fn plan(&self) -> &TripPlan {
        &self.plan
    }

    /// Whether the traveller is reviewing a finished trip.
    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// Replace the origin.
    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = Some(origin);
    }

    /// Append a destination to the route.
    ///
    /// Adding a destination that is already on the route does nothing.
    /// Returns `true` if the route grew.
    pub fn add_destination(&mut self, city: Destination) -> bool {
        if self.contains(city.id) {
            return false;
        }

        debug!(city = %city.city, id = %city.id, "adding destination");
        self.destinations.push(city);

        true
    }

    /// Remove a destination along with every choice that depends on it.
    ///
    /// Clears all selected flights, not just the legs touching the removed
    /// city. Removing a destination that isn't on the route does nothing.
    /// Returns `true` if the route shrank.
    pub fn remove_destination(&mut self, id: DestinationId) -> bool {
        if !self.contains(id) {
            return false;
        }

        debug!(%id, "removing destination");
        self.destinations.retain(|d| d.id != id);
        self.plan.forget_destination(id);
        self.plan.flights.clear();

        true
    }

    /// Replace the route with a new visit order and clear all selected flights.
    ///
    /// The new order is taken as given. Repeated ids keep their first
    /// occurrence only.
    pub fn reorder_destinations(&mut self, order: impl IntoIterator<Item = Destination>) {
        let mut seen = FxHashSet::default();
        let reordered: Vec<Destination> = order
            .into_iter()
            .filter(|d| seen.insert(d.id))
            .collect();

        let is_permutation = reordered.len() == self.destinations.len()
            && self.destinations.iter().all(|d| seen.contains(&d.id));

        if !is_permutation {
            warn!(
                before = self.destinations.len(),
                after = reordered.len(),
                "reorder is not a permutation of the current route"
            );
        }

        self.destinations = reordered;
        self.plan.flights.clear();
    }

    /// Replace the start date. Any text is accepted.
    pub fn set_start_date(&mut self, date: impl Into<String>) {
        self.plan.start_date = Some(date.into());
    }

    /// Set how many days are spent in a destination.
    pub fn set_duration(&mut self, id: DestinationId, days: u32) {
        self.plan.durations.insert(id, days);
    }

    /// Choose the flight for a segment.
    pub fn select_flight(&mut self, key: SegmentKey, option: FlightOption) {
        self.plan.flights.insert(key, option);
    }

    /// Choose the hotel for a destination, replacing any earlier choice.
    pub fn select_hotel(&mut self, id: DestinationId, hotel: Hotel) {
        self.plan.hotels.insert(id, hotel);
    }

    /// Pick an attraction for a destination, or unpick it if already picked.
    ///
    /// Returns `true` when the attraction is picked after the call.
    pub fn select_attraction(&mut self, id: DestinationId, attraction: Attraction) -> bool {
        self.plan.toggle_attraction(id, attraction)
    }

    /// Take over the start date, stay lengths, flights, hotels and
    /// attractions of a suggestion in one step.
    ///
    /// The origin and the route stay as they are.
    pub fn apply_suggestion(&mut self, suggestion: Suggestion) {
        debug!(tier = ?suggestion.tier(), "applying suggestion");
        self.plan = suggestion.into_plan();
    }

    /// Return to the empty trip.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Turn preview mode on or off.
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview_mode = enabled;
    }

    /// Empty the route and every choice attached to it, keeping the origin.
    pub fn clear_destinations(&mut self) {
        self.destinations.clear();
        self.plan.durations.clear();
        self.plan.flights.clear();
        self.plan.hotels.clear();
        self.plan.attractions.clear();
    }

    /// Subtotals for flights, hotels and attractions.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        self.plan.price_breakdown()
    }

    /// Total price of everything chosen so far.
    pub fn total_price(&self) -> Price {
        self.price_breakdown().total()
    }
}
