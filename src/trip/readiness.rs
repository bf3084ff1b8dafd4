//! Readiness
//!
//! What the wizard still needs before the traveller may move past each step.

use std::fmt;

use crate::{
    flights::{SegmentKey, segment_count},
    places::DestinationId,
};

use super::TripState;

/// A step of the planning wizard that gates the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanningStep {
    /// Picking capitals.
    Destinations,

    /// Start date, stay lengths and flights.
    Schedule,

    /// One hotel per destination.
    Hotels,

    /// At least one attraction per destination.
    Attractions,
}

impl PlanningStep {
    /// Steps in wizard order.
    pub const ALL: [Self; 4] = [
        Self::Destinations,
        Self::Schedule,
        Self::Hotels,
        Self::Attractions,
    ];
}

/// Something a step is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// The route has no destinations.
    NoDestinations,

    /// No start date was entered.
    NoStartDate,

    /// A destination has no stay length, or a zero one.
    NoDuration(DestinationId),

    /// A segment has no flight chosen.
    NoFlight(SegmentKey),

    /// A destination has no hotel.
    NoHotel(DestinationId),

    /// A destination has no attraction picked.
    NoAttractions(DestinationId),
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDestinations => f.write_str("no destinations chosen"),
            Self::NoStartDate => f.write_str("no start date"),
            Self::NoDuration(id) => write!(f, "no stay length for destination {id}"),
            Self::NoFlight(key) => write!(f, "no flight chosen for {key}"),
            Self::NoHotel(id) => write!(f, "no hotel for destination {id}"),
            Self::NoAttractions(id) => write!(f, "no attractions for destination {id}"),
        }
    }
}

/// What is still missing for a step.
pub fn gaps(state: &TripState, step: PlanningStep) -> Vec<Gap> {
    let ids = state.destinations().iter().map(|d| d.id);

    match step {
        PlanningStep::Destinations => {
            if state.destinations().is_empty() {
                vec![Gap::NoDestinations]
            } else {
                Vec::new()
            }
        }
        PlanningStep::Schedule => {
            let mut gaps = Vec::new();

            if state.start_date().is_none_or(|date| date.trim().is_empty()) {
                gaps.push(Gap::NoStartDate);
            }

            gaps.extend(
                ids.filter(|id| state.durations().get(id).is_none_or(|&days| days == 0))
                    .map(Gap::NoDuration),
            );

            gaps.extend(
                (0..segment_count(state.destinations().len()))
                    .map(SegmentKey::new)
                    .filter(|key| !state.selected_flights().contains_key(key))
                    .map(Gap::NoFlight),
            );

            gaps
        }
        PlanningStep::Hotels => ids
            .filter(|id| !state.selected_hotels().contains_key(id))
            .map(Gap::NoHotel)
            .collect(),
        PlanningStep::Attractions => ids
            .filter(|id| {
                state
                    .selected_attractions()
                    .get(id)
                    .is_none_or(|list| list.is_empty())
            })
            .map(Gap::NoAttractions)
            .collect(),
    }
}

/// Check whether a step has everything it needs.
pub fn is_ready(state: &TripState, step: PlanningStep) -> bool {
    gaps(state, step).is_empty()
}

/// Everything still missing across all steps, in wizard order.
pub fn all_gaps(state: &TripState) -> Vec<Gap> {
    PlanningStep::ALL
        .iter()
        .flat_map(|&step| gaps(state, step))
        .collect()
}

/// Check whether every step is complete, so the trip can be confirmed.
pub fn is_complete(state: &TripState) -> bool {
    PlanningStep::ALL.iter().all(|&step| is_ready(state, step))
}
