//! Trip summary
//!
//! Renders a trip, or a set of suggestions, as tables for the terminal.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    flights::plan_legs,
    prices::Price,
    pricing::PriceBreakdown,
    suggestions::Suggestion,
    trip::TripState,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write summary: {0}")]
    Io(#[from] io::Error),
}

/// Everything chosen for a trip, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct TripSummary<'a> {
    state: &'a TripState,
    currency: &'static Currency,
}

impl<'a> TripSummary<'a> {
    /// Summarises a trip, quoting prices in `currency`.
    pub fn new(state: &'a TripState, currency: &'static Currency) -> Self {
        Self { state, currency }
    }

    /// Subtotals of the trip.
    pub fn breakdown(&self) -> PriceBreakdown {
        self.state.price_breakdown()
    }

    /// Total of the trip.
    pub fn total(&self) -> Money<'static, Currency> {
        self.state.total_price().to_money(self.currency)
    }

    /// Writes the summary table followed by the subtotals.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();
        let mut section_rows = Vec::new();

        builder.push_record(["", "Item", "Details", "Price"]);

        section_rows.push(builder.count_records());
        self.push_flight_rows(&mut builder);

        section_rows.push(builder.count_records());
        self.push_hotel_rows(&mut builder);

        section_rows.push(builder.count_records());
        self.push_attraction_rows(&mut builder);

        write_table(&mut out, builder, &section_rows)?;

        let breakdown = self.breakdown();
        let lines = [
            ("Flights:", breakdown.flights),
            ("Hotels:", breakdown.hotels),
            ("Attractions:", breakdown.attractions),
            ("Total:", breakdown.total()),
        ];

        for (label, price) in lines {
            writeln!(out, " {label:<13}{:>14}", self.money(price).to_string())?;
        }

        writeln!(out)?;

        Ok(())
    }

    fn push_flight_rows(&self, builder: &mut Builder) {
        let legs = self
            .state
            .origin()
            .map(|origin| plan_legs(origin, self.state.destinations()))
            .unwrap_or_default();

        for (key, option) in self.state.selected_flights() {
            let route = legs
                .get(key.ordinal())
                .map_or_else(|| key.to_string(), |leg| format!("{} → {}", leg.from, leg.to));

            builder.push_record([
                "Flight".to_string(),
                route,
                format!("departs {}", option.departure),
                self.money(option.price).to_string(),
            ]);
        }
    }

    fn push_hotel_rows(&self, builder: &mut Builder) {
        for destination in self.state.destinations() {
            let Some(hotel) = self.state.selected_hotels().get(&destination.id) else {
                continue;
            };

            let (details, price) = match self.state.durations().get(&destination.id) {
                Some(&nights) => (
                    format!(
                        "{}, {nights} × {}",
                        destination.city,
                        self.money(hotel.price_per_night)
                    ),
                    self.money(hotel.stay_price(nights)).to_string(),
                ),
                None => (destination.city.clone(), String::from("-")),
            };

            builder.push_record(["Hotel".to_string(), hotel.name.clone(), details, price]);
        }
    }

    fn push_attraction_rows(&self, builder: &mut Builder) {
        for destination in self.state.destinations() {
            let Some(attractions) = self.state.selected_attractions().get(&destination.id) else {
                continue;
            };

            for attraction in attractions {
                builder.push_record([
                    "Attraction".to_string(),
                    attraction.name.clone(),
                    format!("{}, {}", destination.city, attraction.category),
                    self.money(attraction.price).to_string(),
                ]);
            }
        }
    }

    fn money(&self, price: Price) -> Money<'static, Currency> {
        price.to_money(self.currency)
    }
}

/// Writes the three suggestions side by side with their prices.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_suggestions(
    mut out: impl io::Write,
    suggestions: &[Suggestion],
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Tier",
        "Description",
        "Flights",
        "Hotels",
        "Attractions",
        "Total",
    ]);

    for suggestion in suggestions {
        let breakdown = suggestion.breakdown();

        builder.push_record([
            suggestion.label().to_string(),
            suggestion.description().to_string(),
            breakdown.flights.to_money(currency).to_string(),
            breakdown.hotels.to_money(currency).to_string(),
            breakdown.attractions.to_money(currency).to_string(),
            breakdown.total().to_money(currency).to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator());

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    section_rows: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    for &row in section_rows {
        theme.insert_horizontal_line(row, separator());
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn separator() -> HorizontalLine<char> {
    HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use crate::{
        attractions::{Attraction, AttractionId},
        flights::{FlightOption, SegmentKey},
        hotels::{Hotel, HotelId},
        places::{Destination, DestinationId, Origin},
    };

    use super::*;

    fn planned_trip() -> TripState {
        let mut state = TripState::new();
        state.set_origin(Origin::fallback());
        state.add_destination(Destination::new(1, "Portugal", "Lisbon", 38.72, -9.14));
        state.set_duration(DestinationId::new(1), 3);
        state.select_flight(
            SegmentKey::new(0),
            FlightOption::new("06:00", Price::from_major(200)),
        );
        state.select_flight(
            SegmentKey::new(1),
            FlightOption::new("21:00", Price::from_major(300)),
        );
        state.select_hotel(
            DestinationId::new(1),
            Hotel {
                id: HotelId::new(10),
                city_id: DestinationId::new(1),
                name: "Budget Stay Lisbon".to_string(),
                price_per_night: Price::from_major(100),
                rating: 3.2,
            },
        );
        state.select_attraction(
            DestinationId::new(1),
            Attraction {
                id: AttractionId::new(20),
                city_id: DestinationId::new(1),
                name: "National Museum of Lisbon".to_string(),
                category: "Museum".to_string(),
                price: Price::from_major(15),
            },
        );
        state
    }

    #[test]
    fn summary_lists_every_choice_and_total() -> TestResult {
        let state = planned_trip();
        let summary = TripSummary::new(&state, EUR);
        let mut out = Vec::new();

        summary.write_to(&mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Tel Aviv → Lisbon"));
        assert!(text.contains("Lisbon → Tel Aviv"));
        assert!(text.contains("Budget Stay Lisbon"));
        assert!(text.contains("National Museum of Lisbon"));
        assert!(text.contains(&Money::from_minor(81_500, EUR).to_string()));
        assert_eq!(summary.total(), Money::from_minor(81_500, EUR));

        Ok(())
    }

    #[test]
    fn flights_without_origin_show_segment_keys() -> TestResult {
        let mut state = TripState::new();
        state.select_flight(
            SegmentKey::new(2),
            FlightOption::new("12:00", Price::from_major(150)),
        );
        let mut out = Vec::new();

        TripSummary::new(&state, EUR).write_to(&mut out)?;

        assert!(String::from_utf8(out)?.contains("segment-2"));

        Ok(())
    }
}
