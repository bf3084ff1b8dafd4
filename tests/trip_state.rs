//! Integration tests for trip state consistency and pricing

use rusty_money::{Money, iso::EUR};

use voyage::{
    attractions::{Attraction, AttractionId},
    flights::{FlightOption, SegmentKey},
    hotels::{Hotel, HotelId},
    places::{Destination, DestinationId, Origin},
    plan::TripPlan,
    prices::Price,
    storage::MemoryStore,
    suggestions::{Suggestion, SuggestionTier},
    trip::{Trip, TripState},
};

fn lisbon() -> Destination {
    Destination::new(1, "Portugal", "Lisbon", 38.72, -9.14)
}

fn vienna() -> Destination {
    Destination::new(2, "Austria", "Vienna", 48.21, 16.37)
}

fn paris() -> Destination {
    Destination::new(3, "France", "Paris", 48.86, 2.35)
}

fn hotel(id: u32, city: u32, nightly: i64) -> Hotel {
    Hotel {
        id: HotelId::new(id),
        city_id: DestinationId::new(city),
        name: format!("Hotel {id}"),
        price_per_night: Price::from_major(nightly),
        rating: 4.0,
    }
}

fn attraction(id: u32, city: u32, price: i64) -> Attraction {
    Attraction {
        id: AttractionId::new(id),
        city_id: DestinationId::new(city),
        name: format!("Attraction {id}"),
        category: "Museum".to_string(),
        price: Price::from_major(price),
    }
}

fn flight(departure: &str, price: i64) -> FlightOption {
    FlightOption::new(departure, Price::from_major(price))
}

fn empty_trip() -> Trip<MemoryStore> {
    Trip::new(MemoryStore::new(), EUR)
}

#[test]
fn adding_the_same_capital_twice_keeps_one() {
    let mut trip = empty_trip();

    trip.add_destination(lisbon());
    trip.add_destination(lisbon());

    assert_eq!(trip.state().destinations(), [lisbon()]);
}

#[test]
fn removing_a_capital_cascades() {
    let mut trip = empty_trip();
    trip.add_destination(lisbon());
    trip.add_destination(vienna());
    trip.set_duration(DestinationId::new(1), 3);
    trip.select_hotel(DestinationId::new(1), hotel(10, 1, 100));
    trip.select_attraction(DestinationId::new(1), attraction(20, 1, 15));
    trip.select_flight(SegmentKey::new(0), flight("06:00", 200));
    trip.select_flight(SegmentKey::new(2), flight("21:00", 300));

    trip.remove_destination(DestinationId::new(1));

    let state = trip.state();
    assert_eq!(state.destinations(), [vienna()]);
    assert!(!state.durations().contains_key(&DestinationId::new(1)));
    assert!(!state.selected_hotels().contains_key(&DestinationId::new(1)));
    assert!(!state.selected_attractions().contains_key(&DestinationId::new(1)));
    assert!(state.selected_flights().is_empty());
}

#[test]
fn reordering_clears_flights_only() {
    let mut trip = empty_trip();
    trip.add_destination(lisbon());
    trip.add_destination(vienna());
    trip.set_duration(DestinationId::new(2), 2);
    trip.select_flight(SegmentKey::new(1), flight("12:00", 150));

    trip.reorder_destinations([vienna(), lisbon()]);

    assert_eq!(trip.state().destinations(), [vienna(), lisbon()]);
    assert!(trip.state().selected_flights().is_empty());
    assert_eq!(trip.state().durations().get(&DestinationId::new(2)), Some(&2));
}

#[test]
fn total_adds_flights_stays_and_attractions() {
    let mut trip = empty_trip();
    trip.add_destination(lisbon());
    trip.set_duration(DestinationId::new(1), 3);
    trip.select_flight(SegmentKey::new(0), flight("06:00", 200));
    trip.select_flight(SegmentKey::new(1), flight("21:00", 300));
    trip.select_hotel(DestinationId::new(1), hotel(10, 1, 100));
    trip.select_attraction(DestinationId::new(1), attraction(20, 1, 15));

    assert_eq!(trip.total_price(), Money::from_minor(81_500, EUR));
}

#[test]
fn attractions_accumulate_and_toggle() {
    let mut trip = empty_trip();
    trip.add_destination(lisbon());

    trip.select_attraction(DestinationId::new(1), attraction(20, 1, 15));
    trip.select_attraction(DestinationId::new(1), attraction(21, 1, 5));

    let ids = |trip: &Trip<MemoryStore>| {
        trip.state()
            .selected_attractions()
            .get(&DestinationId::new(1))
            .map(|list| list.ids())
            .unwrap_or_default()
    };

    assert_eq!(ids(&trip), [AttractionId::new(20), AttractionId::new(21)]);
    assert_eq!(trip.total_price(), Money::from_minor(2_000, EUR));

    trip.select_attraction(DestinationId::new(1), attraction(20, 1, 15));

    assert_eq!(ids(&trip), [AttractionId::new(21)]);
    assert_eq!(trip.total_price(), Money::from_minor(500, EUR));
}

#[test]
fn total_spans_every_city() {
    let mut trip = empty_trip();
    for city in [lisbon(), vienna(), paris()] {
        trip.add_destination(city);
    }
    trip.set_duration(DestinationId::new(1), 2);
    trip.set_duration(DestinationId::new(2), 1);
    trip.select_hotel(DestinationId::new(1), hotel(10, 1, 80));
    trip.select_hotel(DestinationId::new(2), hotel(11, 2, 120));
    trip.select_hotel(DestinationId::new(3), hotel(12, 3, 500));
    trip.select_attraction(DestinationId::new(2), attraction(20, 2, 12));
    trip.select_attraction(DestinationId::new(3), attraction(21, 3, 8));
    for ordinal in 0..4 {
        trip.select_flight(SegmentKey::new(ordinal), flight("12:00", 100));
    }

    let breakdown = trip.price_breakdown();

    assert_eq!(breakdown.flights, Price::from_major(400));
    assert_eq!(breakdown.hotels, Price::from_major(280));
    assert_eq!(breakdown.attractions, Price::from_major(20));
    assert_eq!(trip.total_price(), Money::from_minor(70_000, EUR));
}

#[test]
fn applying_a_suggestion_replaces_choices_but_not_the_route() {
    let mut trip = empty_trip();
    trip.set_origin(Origin::fallback());
    trip.add_destination(lisbon());
    trip.set_start_date("2026-01-01");
    trip.set_duration(DestinationId::new(1), 9);
    trip.select_hotel(DestinationId::new(1), hotel(10, 1, 100));

    let mut plan = TripPlan {
        start_date: Some("2026-11-20".to_string()),
        ..TripPlan::default()
    };
    plan.durations.insert(DestinationId::new(1), 2);
    plan.flights.insert(SegmentKey::new(0), flight("06:00", 120));
    plan.hotels.insert(DestinationId::new(1), hotel(11, 1, 60));
    let suggestion = Suggestion::new(SuggestionTier::Budget, plan.clone());

    trip.apply_suggestion(suggestion);

    assert_eq!(trip.state().plan(), &plan);
    assert_eq!(trip.state().origin(), Some(&Origin::fallback()));
    assert_eq!(trip.state().destinations(), [lisbon()]);
    assert!(trip.state().selected_attractions().is_empty());
}

#[test]
fn reset_restores_the_empty_trip() {
    let mut trip = empty_trip();
    trip.set_origin(Origin::fallback());
    trip.add_destination(lisbon());
    trip.set_start_date("2026-11-01");
    trip.set_preview_mode(true);

    trip.reset_trip();

    assert_eq!(trip.state(), &TripState::new());
    assert_eq!(trip.total_price(), Money::from_minor(0, EUR));
}

#[test]
fn clearing_destinations_keeps_origin_and_start_date() {
    let mut trip = empty_trip();
    trip.set_origin(Origin::fallback());
    trip.add_destination(lisbon());
    trip.set_start_date("2026-11-01");
    trip.select_hotel(DestinationId::new(1), hotel(10, 1, 100));

    trip.clear_destinations();

    assert!(trip.state().destinations().is_empty());
    assert!(trip.state().selected_hotels().is_empty());
    assert_eq!(trip.state().origin(), Some(&Origin::fallback()));
    assert_eq!(trip.state().start_date(), Some("2026-11-01"));
}
