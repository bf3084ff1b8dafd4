//! Suggestions
//!
//! Ready-made itineraries built from what is on offer for a route. Each
//! [`SuggestionTier`] combines one flight, hotel and attraction strategy:
//!
//! | Tier    | Flight                | Hotel          | Attractions            |
//! |---------|-----------------------|----------------|------------------------|
//! | Budget  | cheapest              | cheapest       | single cheapest        |
//! | Comfort | departure nearest noon| best rated     | cheapest and median    |
//! | Premium | most expensive        | most expensive | all, cheapest first    |
//!
//! A [`Suggestion`] is a draft: it owns its choices and can be tweaked before
//! it is applied to a trip.

use std::fmt;

use clap::ValueEnum;
use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    attractions::{Attraction, AttractionList},
    catalog::TripOffers,
    flights::SegmentKey,
    places::{Destination, DestinationId},
    plan::TripPlan,
    prices::Price,
    pricing::{PriceBreakdown, attractions_subtotal},
};

mod strategies;

pub use strategies::{AttractionStrategy, FlightStrategy, HotelStrategy};

/// Days a suggestion spends in every destination.
pub const SUGGESTED_STAY_DAYS: u32 = 2;

/// Days from today a suggestion starts when the trip has no start date.
pub const SUGGESTED_LEAD_DAYS: i64 = 7;

/// The three kinds of suggested itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionTier {
    /// Lowest prices.
    Budget,

    /// Balance of quality and price.
    Comfort,

    /// The best of everything.
    Premium,
}

impl SuggestionTier {
    /// Every tier, in presentation order.
    pub const ALL: [Self; 3] = [Self::Budget, Self::Comfort, Self::Premium];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Comfort => "Comfort",
            Self::Premium => "Premium",
        }
    }

    /// One-line pitch.
    pub fn description(self) -> &'static str {
        match self {
            Self::Budget => "Best prices, no compromises on fun",
            Self::Comfort => "Great balance of quality and value",
            Self::Premium => "Top-tier everything for the best experience",
        }
    }

    /// Flight, hotel and attraction strategies for the tier.
    pub fn strategies(self) -> (FlightStrategy, HotelStrategy, AttractionStrategy) {
        match self {
            Self::Budget => (
                FlightStrategy::Cheapest,
                HotelStrategy::Cheapest,
                AttractionStrategy::Cheapest,
            ),
            Self::Comfort => (
                FlightStrategy::Midday,
                HotelStrategy::BestRated,
                AttractionStrategy::CheapestAndMedian,
            ),
            Self::Premium => (
                FlightStrategy::MostExpensive,
                HotelStrategy::MostExpensive,
                AttractionStrategy::All,
            ),
        }
    }
}

impl fmt::Display for SuggestionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A suggested itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    tier: SuggestionTier,
    plan: TripPlan,
    breakdown: PriceBreakdown,
}

impl Suggestion {
    /// Creates a suggestion from a plan, pricing it.
    pub fn new(tier: SuggestionTier, plan: TripPlan) -> Self {
        let breakdown = plan.price_breakdown();

        Self {
            tier,
            plan,
            breakdown,
        }
    }

    /// Which kind of suggestion this is.
    pub fn tier(&self) -> SuggestionTier {
        self.tier
    }

    /// Display name.
    pub fn label(&self) -> &'static str {
        self.tier.label()
    }

    /// One-line pitch.
    pub fn description(&self) -> &'static str {
        self.tier.description()
    }

    /// The suggested choices.
    pub fn plan(&self) -> &TripPlan {
        &self.plan
    }

    /// Suggested first day, ISO `YYYY-MM-DD`.
    pub fn start_date(&self) -> Option<&str> {
        self.plan.start_date.as_deref()
    }

    /// Subtotals for flights, hotels and attractions.
    pub fn breakdown(&self) -> PriceBreakdown {
        self.breakdown
    }

    /// Total price of the suggestion.
    pub fn total_price(&self) -> Price {
        self.breakdown.total()
    }

    /// Adds an attraction to the draft, or takes it out if already in.
    ///
    /// Only the attraction subtotal is recalculated. Returns `true` when the
    /// attraction is in the draft after the call.
    pub fn toggle_attraction(&mut self, city: DestinationId, attraction: Attraction) -> bool {
        let picked = self.plan.toggle_attraction(city, attraction);
        self.breakdown.attractions = attractions_subtotal(&self.plan.attractions);
        picked
    }

    /// Gives up the draft's choices.
    pub fn into_plan(self) -> TripPlan {
        self.plan
    }
}

/// Builds the three suggestions for a route.
#[derive(Debug, Clone)]
pub struct SuggestionBuilder<'a> {
    destinations: &'a [Destination],
    offers: &'a TripOffers,
    start_date: Option<String>,
}

impl<'a> SuggestionBuilder<'a> {
    /// Creates a builder over the route and what is on offer for it.
    pub fn new(destinations: &'a [Destination], offers: &'a TripOffers) -> Self {
        Self {
            destinations,
            offers,
            start_date: None,
        }
    }

    /// Keeps the trip's own start date instead of proposing one.
    ///
    /// `None` and blank dates are ignored.
    #[must_use]
    pub fn start_date(mut self, date: Option<&str>) -> Self {
        self.start_date = date
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_string);
        self
    }

    /// Builds Budget, Comfort and Premium suggestions, in that order.
    ///
    /// Without a start date the suggestions start a week after `today`.
    pub fn build(&self, today: Date) -> [Suggestion; 3] {
        let start_date = self.start_date.clone().unwrap_or_else(|| {
            today
                .saturating_add(SUGGESTED_LEAD_DAYS.days())
                .to_string()
        });

        debug!(
            destinations = self.destinations.len(),
            segments = self.offers.segments.len(),
            %start_date,
            "building suggestions"
        );

        SuggestionTier::ALL.map(|tier| self.build_tier(tier, &start_date))
    }

    /// Builds the suggestions relative to the current UTC date.
    pub fn build_for_today(&self) -> [Suggestion; 3] {
        self.build(Timestamp::now().to_zoned(TimeZone::UTC).date())
    }

    fn build_tier(&self, tier: SuggestionTier, start_date: &str) -> Suggestion {
        let (flight_strategy, hotel_strategy, attraction_strategy) = tier.strategies();
        let mut plan = TripPlan {
            start_date: Some(start_date.to_string()),
            ..TripPlan::default()
        };

        for (ordinal, segment) in self.offers.segments.iter().enumerate() {
            if let Some(option) = flight_strategy.pick(&segment.options) {
                plan.flights.insert(SegmentKey::new(ordinal), option.clone());
            }
        }

        for destination in self.destinations {
            let city = destination.id;
            plan.durations.insert(city, SUGGESTED_STAY_DAYS);

            if let Some(hotel) = hotel_strategy.pick(self.offers.hotels_in(city)) {
                plan.hotels.insert(city, hotel.clone());
            }

            let attractions: AttractionList = attraction_strategy
                .pick(self.offers.attractions_in(city))
                .into_iter()
                .collect();

            if !attractions.is_empty() {
                plan.attractions.insert(city, attractions);
            }
        }

        Suggestion::new(tier, plan)
    }
}
