//! Itinerary dates
//!
//! Lays the route out on the calendar: the first stop starts on the trip's
//! start date and every stop begins the day the previous one ends.

use jiff::{Span, civil::Date};
use thiserror::Error;

use crate::places::Destination;

use super::TripState;

/// Stay length assumed for a destination without one, or with zero days.
pub const DEFAULT_STAY_DAYS: u32 = 1;

/// Errors laying out an itinerary.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The trip has no start date yet.
    #[error("trip has no start date")]
    MissingStartDate,

    /// The start date is not an ISO calendar date.
    #[error("invalid start date {date:?}: {source}")]
    InvalidStartDate {
        /// Start date as entered
        date: String,
        /// Parse failure
        #[source]
        source: jiff::Error,
    },

    /// A stop would end outside the supported calendar range.
    #[error("itinerary runs past the supported calendar range: {0}")]
    OutOfRange(#[source] jiff::Error),
}

/// One destination on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop<'a> {
    /// The destination visited.
    pub destination: &'a Destination,

    /// Day the stop begins.
    pub arrival: Date,

    /// Day the stop ends and the next leg departs.
    pub departure: Date,

    /// Days spent at the stop.
    pub days: u32,
}

/// The route laid out on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary<'a> {
    stops: Vec<Stop<'a>>,
}

impl<'a> Itinerary<'a> {
    /// Lays out the trip's destinations from its start date.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the start date is missing or invalid,
    /// or if the stays run off the calendar.
    pub fn from_state(state: &'a TripState) -> Result<Self, ScheduleError> {
        let text = state.start_date().ok_or(ScheduleError::MissingStartDate)?;
        let start: Date = text
            .trim()
            .parse()
            .map_err(|source| ScheduleError::InvalidStartDate {
                date: text.to_string(),
                source,
            })?;

        let mut arrival = start;
        let mut stops = Vec::with_capacity(state.destinations().len());

        for destination in state.destinations() {
            let days = state
                .durations()
                .get(&destination.id)
                .copied()
                .filter(|&days| days > 0)
                .unwrap_or(DEFAULT_STAY_DAYS);

            let departure = Span::new()
                .try_days(i64::from(days))
                .and_then(|span| arrival.checked_add(span))
                .map_err(ScheduleError::OutOfRange)?;

            stops.push(Stop {
                destination,
                arrival,
                departure,
                days,
            });

            arrival = departure;
        }

        Ok(Self { stops })
    }

    /// Stops in visit order.
    pub fn stops(&self) -> &[Stop<'a>] {
        &self.stops
    }

    /// Day the trip starts, if it visits anything.
    pub fn first_day(&self) -> Option<Date> {
        self.stops.first().map(|stop| stop.arrival)
    }

    /// Day the return flight leaves, if the trip visits anything.
    pub fn return_day(&self) -> Option<Date> {
        self.stops.last().map(|stop| stop.departure)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::places::DestinationId;

    use super::*;

    fn trip() -> TripState {
        let mut state = TripState::new();
        state.add_destination(Destination::new(1, "Portugal", "Lisbon", 38.72, -9.14));
        state.add_destination(Destination::new(2, "Austria", "Vienna", 48.21, 16.37));
        state
    }

    #[test]
    fn stops_follow_each_other() -> TestResult {
        let mut state = trip();
        state.set_start_date("2026-12-30");
        state.set_duration(DestinationId::new(1), 3);
        state.set_duration(DestinationId::new(2), 2);

        let itinerary = Itinerary::from_state(&state)?;
        let dates: Vec<(Date, Date)> = itinerary
            .stops()
            .iter()
            .map(|stop| (stop.arrival, stop.departure))
            .collect();

        assert_eq!(
            dates,
            [
                (date(2026, 12, 30), date(2027, 1, 2)),
                (date(2027, 1, 2), date(2027, 1, 4)),
            ]
        );
        assert_eq!(itinerary.return_day(), Some(date(2027, 1, 4)));

        Ok(())
    }

    #[test]
    fn missing_or_zero_duration_counts_as_one_day() -> TestResult {
        let mut state = trip();
        state.set_start_date("2026-11-01");
        state.set_duration(DestinationId::new(2), 0);

        let itinerary = Itinerary::from_state(&state)?;

        assert_eq!(
            itinerary.stops().iter().map(|s| s.days).collect::<Vec<_>>(),
            [1, 1]
        );
        assert_eq!(itinerary.return_day(), Some(date(2026, 11, 3)));

        Ok(())
    }

    #[test]
    fn missing_start_date_is_an_error() {
        assert!(matches!(
            Itinerary::from_state(&trip()),
            Err(ScheduleError::MissingStartDate)
        ));
    }

    #[test]
    fn unparseable_start_date_is_an_error() {
        let mut state = trip();
        state.set_start_date("next tuesday");

        assert!(matches!(
            Itinerary::from_state(&state),
            Err(ScheduleError::InvalidStartDate { date, .. }) if date == "next tuesday"
        ));
    }

    #[test]
    fn empty_route_has_no_days() -> TestResult {
        let mut state = TripState::new();
        state.set_start_date("2026-11-01");

        let itinerary = Itinerary::from_state(&state)?;

        assert!(itinerary.stops().is_empty());
        assert_eq!(itinerary.first_day(), None);

        Ok(())
    }
}
