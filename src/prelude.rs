//! Voyage prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    attractions::{Attraction, AttractionId, AttractionList},
    catalog::{
        CatalogError, Confirmation, DestinationSetKey, OfferCache, TripCatalog, TripOffers,
    },
    config::{ConfigError, LogFormat, LoggingConfig, PlannerConfig},
    fixtures::{FixtureCatalog, FixtureError},
    flights::{FlightOption, Segment, SegmentKey, plan_legs, segment_count},
    hotels::{Hotel, HotelId},
    places::{Destination, DestinationId, Origin, search_capitals},
    plan::TripPlan,
    prices::Price,
    pricing::PriceBreakdown,
    storage::{FileStore, MemoryStore, SnapshotStore, StorageError},
    suggestions::{Suggestion, SuggestionBuilder, SuggestionTier},
    summary::{SummaryError, TripSummary, write_suggestions},
    trip::{
        Trip, TripState,
        readiness::{self, Gap, PlanningStep},
        schedule::{Itinerary, ScheduleError},
        snapshot::SnapshotError,
    },
};
