//! Catalog fixture records

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    attractions::{Attraction, AttractionId},
    flights::FlightOption,
    hotels::{Hotel, HotelId},
    places::{Destination, DestinationId},
    prices::{Price, currency_from_code},
};

use super::FixtureError;

/// A catalog fixture file.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Capitals that can be visited
    pub capitals: Vec<CapitalRecord>,

    /// Hotels across all capitals
    #[serde(default)]
    pub hotels: Vec<HotelRecord>,

    /// Attractions across all capitals
    #[serde(default)]
    pub attractions: Vec<AttractionRecord>,

    /// Flight fares
    #[serde(default)]
    pub fares: FaresRecord,
}

/// Capital record
#[derive(Debug, Deserialize)]
pub struct CapitalRecord {
    /// Capital id
    pub id: u32,

    /// Country name
    pub country: String,

    /// City name
    pub city: String,

    /// Latitude
    pub lat: f64,

    /// Longitude
    pub lng: f64,
}

impl From<CapitalRecord> for Destination {
    fn from(record: CapitalRecord) -> Self {
        Destination::new(record.id, record.country, record.city, record.lat, record.lng)
    }
}

/// Hotel record
#[derive(Debug, Deserialize)]
pub struct HotelRecord {
    /// Hotel id
    pub id: u32,

    /// Id of the capital the hotel is in
    pub city: u32,

    /// Hotel name
    pub name: String,

    /// Nightly rate (e.g., "120 EUR")
    pub price_per_night: String,

    /// Guest rating out of 5
    pub rating: f64,
}

impl HotelRecord {
    /// Converts the record, returning the currency its rate is quoted in.
    ///
    /// # Errors
    ///
    /// Returns an error if the nightly rate cannot be parsed.
    pub fn into_hotel(self) -> Result<(Hotel, &'static Currency), FixtureError> {
        let (price_per_night, currency) = parse_price(&self.price_per_night)?;

        Ok((
            Hotel {
                id: HotelId::new(self.id),
                city_id: DestinationId::new(self.city),
                name: self.name,
                price_per_night,
                rating: self.rating,
            },
            currency,
        ))
    }
}

/// Attraction record
#[derive(Debug, Deserialize)]
pub struct AttractionRecord {
    /// Attraction id
    pub id: u32,

    /// Id of the capital the attraction is in
    pub city: u32,

    /// Attraction name
    pub name: String,

    /// Category, e.g. "Museum"
    pub category: String,

    /// Ticket price (e.g., "15 EUR")
    pub price: String,
}

impl AttractionRecord {
    /// Converts the record, returning the currency its price is quoted in.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn into_attraction(self) -> Result<(Attraction, &'static Currency), FixtureError> {
        let (price, currency) = parse_price(&self.price)?;

        Ok((
            Attraction {
                id: AttractionId::new(self.id),
                city_id: DestinationId::new(self.city),
                name: self.name,
                category: self.category,
                price,
            },
            currency,
        ))
    }
}

/// Fares for every leg, with per-leg overrides.
#[derive(Debug, Default, Deserialize)]
pub struct FaresRecord {
    /// Options offered on any leg without an override
    #[serde(default)]
    pub default: Vec<FareRecord>,

    /// Overrides keyed `"From->To"` by city name
    #[serde(default)]
    pub routes: FxHashMap<String, Vec<FareRecord>>,
}

/// Fare record
#[derive(Debug, Deserialize)]
pub struct FareRecord {
    /// Departure time, `HH:MM`
    pub departure: String,

    /// Fare (e.g., "180 EUR")
    pub price: String,
}

impl FareRecord {
    /// Converts the record, returning the currency its fare is quoted in.
    ///
    /// # Errors
    ///
    /// Returns an error if the fare cannot be parsed.
    pub fn into_option(self) -> Result<(FlightOption, &'static Currency), FixtureError> {
        let (price, currency) = parse_price(&self.price)?;

        Ok((FlightOption::new(self.departure, price), currency))
    }
}

/// Parse price string (e.g., "2.99 EUR") into a price and its currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency =
        currency_from_code(code).ok_or_else(|| FixtureError::UnknownCurrency((*code).to_string()))?;

    Ok((Price::new(minor_units), currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, GBP};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_major_units() -> TestResult {
        assert_eq!(parse_price("150 EUR")?, (Price::from_major(150), EUR));
        assert_eq!(parse_price("2.99 GBP")?, (Price::new(299), GBP));
        assert_eq!(parse_price("0 EUR")?, (Price::ZERO, EUR));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_malformed_input() {
        assert!(matches!(parse_price("150"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(
            parse_price("cheap EUR"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("150 JPY"),
            Err(FixtureError::UnknownCurrency(code)) if code == "JPY"
        ));
    }
}
