//! Trip snapshots
//!
//! The whole trip is serialised as one JSON document:
//!
//! ```json
//! { "version": 1, "state": { "origin": ..., "destinations": [...], "startDate": ...,
//!   "durations": {...}, "selectedFlights": {...}, "selectedHotels": {...},
//!   "selectedAttractions": {...} } }
//! ```
//!
//! Preview mode is not part of the snapshot; a restored trip starts with it off.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    places::{Destination, Origin},
    plan::{Durations, SelectedAttractions, SelectedFlights, SelectedHotels, TripPlan},
};

use super::TripState;

/// Storage key the trip snapshot lives under.
pub const SNAPSHOT_KEY: &str = "voyage-trip";

/// Version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid snapshot JSON.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was written by an incompatible version.
    #[error("unsupported snapshot version {found}, expected {expected}", expected = SNAPSHOT_VERSION)]
    UnsupportedVersion {
        /// Version found in the document
        found: u32,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    state: SnapshotState,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotState {
    origin: Option<Origin>,
    destinations: Vec<Destination>,
    start_date: Option<String>,
    #[serde(default)]
    durations: Durations,
    #[serde(default)]
    selected_flights: SelectedFlights,
    #[serde(default)]
    selected_hotels: SelectedHotels,
    #[serde(default)]
    selected_attractions: SelectedAttractions,
}

impl From<&TripState> for SnapshotState {
    fn from(state: &TripState) -> Self {
        let plan = state.plan.clone();

        Self {
            origin: state.origin.clone(),
            destinations: state.destinations.clone(),
            start_date: plan.start_date,
            durations: plan.durations,
            selected_flights: plan.flights,
            selected_hotels: plan.hotels,
            selected_attractions: plan.attractions,
        }
    }
}

impl From<SnapshotState> for TripState {
    fn from(snapshot: SnapshotState) -> Self {
        TripState {
            origin: snapshot.origin,
            destinations: snapshot.destinations,
            plan: TripPlan {
                start_date: snapshot.start_date,
                durations: snapshot.durations,
                flights: snapshot.selected_flights,
                hotels: snapshot.selected_hotels,
                attractions: snapshot.selected_attractions,
            },
            preview_mode: false,
        }
    }
}

/// Serialise a trip into a snapshot document.
///
/// # Errors
///
/// Returns a [`SnapshotError::Json`] if serialisation fails.
pub fn encode(state: &TripState) -> Result<String, SnapshotError> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        state: SnapshotState::from(state),
    };

    Ok(serde_json::to_string(&envelope)?)
}

/// Restore a trip from a snapshot document.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the document is malformed or was written by
/// another snapshot version.
pub fn decode(document: &str) -> Result<TripState, SnapshotError> {
    let envelope: Envelope = serde_json::from_str(document)?;

    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: envelope.version,
        });
    }

    Ok(envelope.state.into())
}
