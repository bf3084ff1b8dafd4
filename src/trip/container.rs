//! Persisted trip

use rusty_money::{Money, iso::Currency};
use tracing::{info, warn};

use crate::{
    attractions::Attraction,
    flights::{FlightOption, SegmentKey},
    hotels::Hotel,
    places::{Destination, DestinationId, Origin},
    pricing::PriceBreakdown,
    storage::SnapshotStore,
    suggestions::Suggestion,
};

use super::{
    TripState,
    snapshot::{self, SNAPSHOT_KEY},
};

/// The trip in progress, written through to a snapshot store.
///
/// Every mutation updates the in-memory [`TripState`] and then persists the
/// full snapshot. Storage failures are logged and otherwise ignored; the
/// in-memory state stays authoritative.
#[derive(Debug)]
pub struct Trip<S: SnapshotStore> {
    state: TripState,
    store: S,
    key: String,
    currency: &'static Currency,
}

impl<S: SnapshotStore> Trip<S> {
    /// Creates an empty trip without reading the store.
    pub fn new(store: S, currency: &'static Currency) -> Self {
        Self {
            state: TripState::new(),
            store,
            key: SNAPSHOT_KEY.to_string(),
            currency,
        }
    }

    /// Restores the trip saved under the default snapshot key.
    ///
    /// A missing, unreadable or corrupt snapshot yields the empty trip.
    pub fn restore(store: S, currency: &'static Currency) -> Self {
        Self::restore_from(store, SNAPSHOT_KEY, currency)
    }

    /// Restores the trip saved under `key`.
    ///
    /// A missing, unreadable or corrupt snapshot yields the empty trip.
    pub fn restore_from(store: S, key: impl Into<String>, currency: &'static Currency) -> Self {
        let key = key.into();

        let state = match store.load(&key) {
            Ok(Some(document)) => snapshot::decode(&document).unwrap_or_else(|err| {
                warn!(%key, error = %err, "discarding unreadable trip snapshot");
                TripState::new()
            }),
            Ok(None) => {
                info!(%key, "no saved trip, starting empty");
                TripState::new()
            }
            Err(err) => {
                warn!(%key, error = %err, "failed to load trip snapshot, starting empty");
                TripState::new()
            }
        };

        Self {
            state,
            store,
            key,
            currency,
        }
    }

    /// Read access to the trip.
    pub fn state(&self) -> &TripState {
        &self.state
    }

    /// The snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Currency totals are reported in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Replace the origin.
    pub fn set_origin(&mut self, origin: Origin) {
        self.state.set_origin(origin);
        self.persist();
    }

    /// Set the origin to `fallback` if none is known yet.
    pub fn ensure_origin(&mut self, fallback: Origin) {
        if self.state.origin().is_none() {
            self.set_origin(fallback);
        }
    }

    /// Append a destination to the route; see [`TripState::add_destination`].
    pub fn add_destination(&mut self, city: Destination) -> bool {
        let added = self.state.add_destination(city);
        self.persist();
        added
    }

    /// Remove a destination and its choices; see [`TripState::remove_destination`].
    pub fn remove_destination(&mut self, id: DestinationId) -> bool {
        let removed = self.state.remove_destination(id);
        self.persist();
        removed
    }

    /// Replace the visit order; see [`TripState::reorder_destinations`].
    pub fn reorder_destinations(&mut self, order: impl IntoIterator<Item = Destination>) {
        self.state.reorder_destinations(order);
        self.persist();
    }

    /// Replace the start date.
    pub fn set_start_date(&mut self, date: impl Into<String>) {
        self.state.set_start_date(date);
        self.persist();
    }

    /// Set how many days are spent in a destination.
    pub fn set_duration(&mut self, id: DestinationId, days: u32) {
        self.state.set_duration(id, days);
        self.persist();
    }

    /// Choose the flight for a segment.
    pub fn select_flight(&mut self, key: SegmentKey, option: FlightOption) {
        self.state.select_flight(key, option);
        self.persist();
    }

    /// Choose the hotel for a destination.
    pub fn select_hotel(&mut self, id: DestinationId, hotel: Hotel) {
        self.state.select_hotel(id, hotel);
        self.persist();
    }

    /// Toggle an attraction for a destination; see [`TripState::select_attraction`].
    pub fn select_attraction(&mut self, id: DestinationId, attraction: Attraction) -> bool {
        let selected = self.state.select_attraction(id, attraction);
        self.persist();
        selected
    }

    /// Take over a suggestion's choices; see [`TripState::apply_suggestion`].
    pub fn apply_suggestion(&mut self, suggestion: Suggestion) {
        self.state.apply_suggestion(suggestion);
        self.persist();
    }

    /// Return to the empty trip.
    pub fn reset_trip(&mut self) {
        self.state.reset();
        self.persist();
    }

    /// Turn preview mode on or off.
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.state.set_preview_mode(enabled);
        self.persist();
    }

    /// Empty the route and every choice attached to it, keeping the origin.
    pub fn clear_destinations(&mut self) {
        self.state.clear_destinations();
        self.persist();
    }

    /// Subtotals for flights, hotels and attractions.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        self.state.price_breakdown()
    }

    /// Total price of everything chosen so far.
    pub fn total_price(&self) -> Money<'static, Currency> {
        self.state.total_price().to_money(self.currency)
    }

    fn persist(&mut self) {
        let document = match snapshot::encode(&self.state) {
            Ok(document) => document,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to encode trip snapshot");
                return;
            }
        };

        if let Err(err) = self.store.save(&self.key, &document) {
            warn!(key = %self.key, error = %err, "failed to persist trip snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rusty_money::iso::EUR;
    use crate::{
        prices::Price,
        storage::{MemoryStore, MockSnapshotStore, StorageError},
    };

    use super::*;

    fn lisbon() -> Destination {
        Destination::new(1, "Portugal", "Lisbon", 38.72, -9.14)
    }

    #[test]
    fn every_mutation_writes_a_snapshot() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_save()
            .withf(|key, _| key.to_string() == SNAPSHOT_KEY)
            .times(3)
            .returning(|_, _| Ok(()));

        let mut trip = Trip::new(store, EUR);
        trip.set_origin(Origin::fallback());
        trip.add_destination(lisbon());
        trip.set_duration(DestinationId::new(1), 2);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(StorageError::Io(io::Error::other("disk full"))));

        let mut trip = Trip::new(store, EUR);
        trip.add_destination(lisbon());

        assert_eq!(trip.state().destinations().len(), 1);
    }

    #[test]
    fn restore_reads_saved_trip() {
        let mut trip = Trip::new(MemoryStore::new(), EUR);
        trip.set_origin(Origin::fallback());
        trip.add_destination(lisbon());
        trip.set_start_date("2026-11-01");

        let store = trip.store().clone();
        let restored = Trip::restore(store, EUR);

        assert_eq!(restored.state(), trip.state());
    }

    #[test]
    fn restore_from_corrupt_snapshot_is_empty() {
        let store = MemoryStore::with_entry(SNAPSHOT_KEY, "{ not json");

        let trip = Trip::restore(store, EUR);

        assert_eq!(trip.state(), &TripState::new());
    }

    #[test]
    fn restore_from_unreadable_store_is_empty() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_load()
            .returning(|_| Err(StorageError::Io(io::Error::other("permission denied"))));

        let trip = Trip::restore(store, EUR);

        assert_eq!(trip.state(), &TripState::new());
    }

    #[test]
    fn ensure_origin_keeps_existing_origin() {
        let mut trip = Trip::new(MemoryStore::new(), EUR);
        let home = Origin::new("Your Location", 52.52, 13.40);
        trip.set_origin(home.clone());

        trip.ensure_origin(Origin::fallback());

        assert_eq!(trip.state().origin(), Some(&home));
    }

    #[test]
    fn total_price_is_money_in_trip_currency() {
        let mut trip = Trip::new(MemoryStore::new(), EUR);
        trip.select_flight(
            SegmentKey::new(0),
            FlightOption::new("06:00", Price::from_major(120)),
        );

        assert_eq!(trip.total_price(), Money::from_minor(12_000, EUR));
    }
}
