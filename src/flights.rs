//! Flights

use std::{fmt, str::FromStr};

use jiff::civil::Time;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::{
    places::{Destination, Origin},
    prices::Price,
};

/// Minutes from midnight to noon.
pub const MIDDAY_MINUTES: u32 = 12 * 60;

/// Departure time of day as published by the route service (`HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Departure(String);

impl Departure {
    /// Creates a new departure time.
    pub fn new(time: impl Into<String>) -> Self {
        Self(time.into())
    }

    /// Returns the departure as published.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Minutes after midnight; departures that don't parse count as midnight.
    pub fn minutes_after_midnight(&self) -> u32 {
        Time::strptime("%H:%M", self.0.trim())
            .map(|time| {
                u32::from(time.hour().unsigned_abs()) * 60 + u32::from(time.minute().unsigned_abs())
            })
            .unwrap_or(0)
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bookable flight on a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    /// Time of day the flight leaves.
    pub departure: Departure,

    /// Fare for the flight.
    pub price: Price,
}

impl FlightOption {
    /// Creates a new flight option.
    pub fn new(departure: impl Into<String>, price: Price) -> Self {
        Self {
            departure: Departure::new(departure),
            price,
        }
    }
}

/// A leg of the route together with the flights that serve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Departure city name.
    pub from: String,

    /// Arrival city name.
    pub to: String,

    /// Flights offered on this leg.
    pub options: Vec<FlightOption>,
}

/// A leg of the route, before any flights are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Departure city name.
    pub from: String,

    /// Arrival city name.
    pub to: String,
}

/// Lays out the legs of a round trip: origin, every destination in order, origin.
///
/// A route with `n` destinations has `n + 1` legs. A route with no
/// destinations has no legs at all.
pub fn plan_legs(origin: &Origin, destinations: &[Destination]) -> Vec<Leg> {
    if destinations.is_empty() {
        return Vec::new();
    }

    let stops: Vec<&str> = std::iter::once(origin.city.as_str())
        .chain(destinations.iter().map(|d| d.city.as_str()))
        .chain(std::iter::once(origin.city.as_str()))
        .collect();

    stops
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(Leg {
                from: (*from).to_string(),
                to: (*to).to_string(),
            }),
            _ => None,
        })
        .collect()
}

/// Number of segments a route over `destinations` stops has.
pub fn segment_count(destinations: usize) -> usize {
    if destinations == 0 {
        0
    } else {
        destinations + 1
    }
}

/// Error parsing a segment key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentKeyError {
    /// Text did not have the `segment-<n>` form.
    #[error("invalid segment key: {0}")]
    Invalid(String),
}

/// Addresses a segment by its position in the route.
///
/// Keys carry no city identity. Any structural change to the route shifts
/// what each ordinal refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey(usize);

impl SegmentKey {
    const PREFIX: &'static str = "segment-";

    /// Key for the segment at the given 0-based position.
    pub const fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    /// Position of the segment in the route.
    pub const fn ordinal(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for SegmentKey {
    type Err = SegmentKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|ordinal| ordinal.parse().ok())
            .map(Self)
            .ok_or_else(|| SegmentKeyError::Invalid(s.to_string()))
    }
}

impl Serialize for SegmentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SegmentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(de::Error::custom)
    }
}
