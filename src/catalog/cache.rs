//! Offer cache
//!
//! Holds the offers fetched for the current destination set so revisiting the
//! suggestions step does not fetch again. Each fetch is issued a ticket; a
//! result only lands if its ticket is still the latest one.

use std::fmt;

use tracing::debug;

use crate::places::{Destination, Origin};

use super::{CatalogError, TripCatalog, TripOffers};

/// Identifies a destination set by its ids in visit order, comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DestinationSetKey(String);

impl DestinationSetKey {
    /// Key for the given route.
    pub fn of(destinations: &[Destination]) -> Self {
        Self(
            destinations
                .iter()
                .map(|d| d.id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetch in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: DestinationSetKey,
    generation: u64,
}

impl FetchTicket {
    /// Destination set being fetched.
    pub fn key(&self) -> &DestinationSetKey {
        &self.key
    }
}

/// Offers for the most recently fetched destination set.
#[derive(Debug, Default)]
pub struct OfferCache {
    generation: u64,
    entry: Option<(DestinationSetKey, TripOffers)>,
}

impl OfferCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached offers for `key`, if that is the set last fetched.
    pub fn get(&self, key: &DestinationSetKey) -> Option<&TripOffers> {
        self.entry
            .as_ref()
            .filter(|(cached, _)| cached == key)
            .map(|(_, offers)| offers)
    }

    /// Starts a fetch for `key`, making every earlier ticket stale.
    pub fn begin(&mut self, key: DestinationSetKey) -> FetchTicket {
        self.generation += 1;

        debug!(key = %key, generation = self.generation, "fetching offers");

        FetchTicket {
            key,
            generation: self.generation,
        }
    }

    /// Stores the result of a fetch.
    ///
    /// Returns `false` and drops `offers` if a newer fetch was begun since
    /// `ticket` was issued.
    pub fn complete(&mut self, ticket: FetchTicket, offers: TripOffers) -> bool {
        if ticket.generation != self.generation {
            debug!(
                key = %ticket.key,
                generation = ticket.generation,
                current = self.generation,
                "dropping stale offers"
            );
            return false;
        }

        self.entry = Some((ticket.key, offers));

        true
    }

    /// Forgets the cached offers and makes outstanding tickets stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.entry = None;
    }

    /// Returns offers for the route, fetching them only if the destination
    /// set differs from the one cached.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] of a failed fetch. Nothing is cached or
    /// retried on failure.
    pub fn load<C: TripCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        origin: &Origin,
        destinations: &[Destination],
    ) -> Result<&TripOffers, CatalogError> {
        let key = DestinationSetKey::of(destinations);

        if self.get(&key).is_none() {
            let ticket = self.begin(key.clone());
            let offers = TripOffers::fetch(catalog, origin, destinations)?;

            if !self.complete(ticket, offers) {
                return Err(CatalogError::Superseded);
            }
        }

        self.get(&key).ok_or(CatalogError::Superseded)
    }
}
