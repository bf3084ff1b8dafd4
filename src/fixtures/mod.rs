//! Fixtures
//!
//! A [`TripCatalog`] backed by a YAML file, for the CLI and for tests.

use std::{cell::Cell, fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    attractions::Attraction,
    catalog::{CatalogError, Confirmation, TripCatalog},
    flights::{FlightOption, Segment, plan_legs},
    hotels::Hotel,
    places::{Destination, DestinationId, Origin},
    prices::Price,
};

pub mod records;

pub use records::parse_price;

use records::CatalogFixture;

/// Catalog bundled with the crate.
pub const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog/europe.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Prices quoted in more than one currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A hotel or attraction refers to a capital the fixture doesn't list
    #[error("{record} refers to unknown capital {city}")]
    UnknownCity {
        /// Name of the offending record
        record: String,
        /// Capital id it refers to
        city: DestinationId,
    },

    /// Two capitals share an id
    #[error("Duplicate capital id: {0}")]
    DuplicateCapital(DestinationId),
}

/// Trip catalog loaded from a fixture file.
#[derive(Debug)]
pub struct FixtureCatalog {
    capitals: Vec<Destination>,
    hotels: FxHashMap<DestinationId, Vec<Hotel>>,
    attractions: FxHashMap<DestinationId, Vec<Attraction>>,
    default_fares: Vec<FlightOption>,
    route_fares: FxHashMap<String, Vec<FlightOption>>,
    currency: Option<&'static Currency>,
    confirmations: Cell<u64>,
}

impl FixtureCatalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// contents are inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        info!(path = %path.display(), "loading catalog fixture");

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price can't be parsed,
    /// prices use different currencies, capital ids repeat, or a hotel or
    /// attraction refers to an unknown capital.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut catalog = Self {
            capitals: Vec::with_capacity(fixture.capitals.len()),
            hotels: FxHashMap::default(),
            attractions: FxHashMap::default(),
            default_fares: Vec::new(),
            route_fares: FxHashMap::default(),
            currency: None,
            confirmations: Cell::new(0),
        };

        for record in fixture.capitals {
            let capital = Destination::from(record);

            if catalog.is_capital(capital.id) {
                return Err(FixtureError::DuplicateCapital(capital.id));
            }

            catalog.capitals.push(capital);
        }

        for record in fixture.hotels {
            let (hotel, currency) = record.into_hotel()?;
            catalog.check_currency(currency)?;
            catalog.check_city(&hotel.name, hotel.city_id)?;
            catalog.hotels.entry(hotel.city_id).or_default().push(hotel);
        }

        for record in fixture.attractions {
            let (attraction, currency) = record.into_attraction()?;
            catalog.check_currency(currency)?;
            catalog.check_city(&attraction.name, attraction.city_id)?;
            catalog
                .attractions
                .entry(attraction.city_id)
                .or_default()
                .push(attraction);
        }

        for record in fixture.fares.default {
            let (option, currency) = record.into_option()?;
            catalog.check_currency(currency)?;
            catalog.default_fares.push(option);
        }

        for (route, records) in fixture.fares.routes {
            let mut options = Vec::with_capacity(records.len());

            for record in records {
                let (option, currency) = record.into_option()?;
                catalog.check_currency(currency)?;
                options.push(option);
            }

            catalog.route_fares.insert(route, options);
        }

        debug!(
            capitals = catalog.capitals.len(),
            hotels = catalog.hotels.values().map(Vec::len).sum::<usize>(),
            attractions = catalog.attractions.values().map(Vec::len).sum::<usize>(),
            "catalog fixture loaded"
        );

        Ok(catalog)
    }

    /// Currency the fixture's prices are quoted in, if it has any prices.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn is_capital(&self, id: DestinationId) -> bool {
        self.capitals.iter().any(|capital| capital.id == id)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }

    fn check_city(&self, record: &str, city: DestinationId) -> Result<(), FixtureError> {
        if self.is_capital(city) {
            Ok(())
        } else {
            Err(FixtureError::UnknownCity {
                record: record.to_string(),
                city,
            })
        }
    }

    fn fares_for(&self, from: &str, to: &str) -> &[FlightOption] {
        self.route_fares
            .get(&format!("{from}->{to}"))
            .unwrap_or(&self.default_fares)
    }

    fn known(&self, city: DestinationId) -> Result<(), CatalogError> {
        if self.is_capital(city) {
            Ok(())
        } else {
            Err(CatalogError::UnknownDestination(city))
        }
    }
}

impl TripCatalog for FixtureCatalog {
    fn capitals(&self) -> Result<Vec<Destination>, CatalogError> {
        Ok(self.capitals.clone())
    }

    fn compute_route(
        &self,
        origin: &Origin,
        destinations: &[Destination],
    ) -> Result<Vec<Segment>, CatalogError> {
        Ok(plan_legs(origin, destinations)
            .into_iter()
            .map(|leg| {
                let options = self.fares_for(&leg.from, &leg.to).to_vec();

                Segment {
                    from: leg.from,
                    to: leg.to,
                    options,
                }
            })
            .collect())
    }

    fn hotels(&self, city: DestinationId) -> Result<Vec<Hotel>, CatalogError> {
        self.known(city)?;

        Ok(self.hotels.get(&city).cloned().unwrap_or_default())
    }

    fn attractions(&self, city: DestinationId) -> Result<Vec<Attraction>, CatalogError> {
        self.known(city)?;

        Ok(self.attractions.get(&city).cloned().unwrap_or_default())
    }

    fn confirm_trip(&self, total: Price) -> Result<Confirmation, CatalogError> {
        let id = self.confirmations.get() + 1;
        self.confirmations.set(id);

        info!(id, total = *total, "trip confirmed");

        Ok(Confirmation { id, total })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    const SMALL: &str = r#"
capitals:
  - { id: 1, country: Portugal, city: Lisbon, lat: 38.72, lng: -9.14 }
  - { id: 2, country: Austria, city: Vienna, lat: 48.21, lng: 16.37 }
hotels:
  - { id: 10, city: 1, name: Budget Stay Lisbon, price_per_night: "85 EUR", rating: 3.2 }
attractions:
  - { id: 20, city: 2, name: Vienna Central Park, category: Park, price: "5 EUR" }
fares:
  default:
    - { departure: "06:00", price: "180 EUR" }
    - { departure: "12:00", price: "240 EUR" }
  routes:
    "Lisbon->Vienna":
      - { departure: "21:00", price: "99.50 EUR" }
"#;

    #[test]
    fn loads_capitals_and_offers() -> TestResult {
        let catalog = FixtureCatalog::from_yaml_str(SMALL)?;

        assert_eq!(catalog.capitals()?.len(), 2);
        assert_eq!(catalog.currency(), Some(EUR));
        assert_eq!(catalog.hotels(DestinationId::new(1))?.len(), 1);
        assert!(catalog.hotels(DestinationId::new(2))?.is_empty());
        assert_eq!(catalog.attractions(DestinationId::new(2))?.len(), 1);

        Ok(())
    }

    #[test]
    fn route_uses_overrides_where_given() -> TestResult {
        let catalog = FixtureCatalog::from_yaml_str(SMALL)?;
        let capitals = catalog.capitals()?;

        let segments = catalog.compute_route(&Origin::fallback(), &capitals)?;

        let fares: Vec<usize> = segments.iter().map(|s| s.options.len()).collect();
        assert_eq!(fares, [2, 1, 2]);
        assert_eq!(
            segments.get(1).and_then(|s| s.options.first()).map(|o| o.price),
            Some(Price::new(9_950))
        );

        Ok(())
    }

    #[test]
    fn unknown_city_lookups_fail() -> TestResult {
        let catalog = FixtureCatalog::from_yaml_str(SMALL)?;

        assert!(matches!(
            catalog.hotels(DestinationId::new(99)),
            Err(CatalogError::UnknownDestination(_))
        ));

        Ok(())
    }

    #[test]
    fn confirmations_are_numbered() -> TestResult {
        let catalog = FixtureCatalog::from_yaml_str(SMALL)?;

        let first = catalog.confirm_trip(Price::from_major(500))?;
        let second = catalog.confirm_trip(Price::from_major(700))?;

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.total, Price::from_major(700));

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = r#"
capitals:
  - { id: 1, country: Portugal, city: Lisbon, lat: 38.72, lng: -9.14 }
hotels:
  - { id: 10, city: 1, name: A, price_per_night: "85 EUR", rating: 3.2 }
  - { id: 11, city: 1, name: B, price_per_night: "85 GBP", rating: 3.2 }
"#;

        assert!(matches!(
            FixtureCatalog::from_yaml_str(yaml),
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "EUR" && found == "GBP"
        ));
    }

    #[test]
    fn offers_must_belong_to_a_capital() {
        let yaml = r#"
capitals:
  - { id: 1, country: Portugal, city: Lisbon, lat: 38.72, lng: -9.14 }
attractions:
  - { id: 20, city: 7, name: Lost Museum, category: Museum, price: "5 EUR" }
"#;

        assert!(matches!(
            FixtureCatalog::from_yaml_str(yaml),
            Err(FixtureError::UnknownCity { city, .. }) if city == DestinationId::new(7)
        ));
    }

    #[test]
    fn bundled_catalog_loads() -> TestResult {
        let catalog = FixtureCatalog::bundled()?;

        assert!(!catalog.capitals()?.is_empty());
        assert_eq!(catalog.currency(), Some(EUR));

        Ok(())
    }
}
