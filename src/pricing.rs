//! Pricing

use rusty_money::{Money, iso::Currency};

use crate::{
    attractions::AttractionList,
    plan::{Durations, SelectedAttractions, SelectedFlights, SelectedHotels, TripPlan},
    prices::Price,
};

/// Subtotals of the three priced parts of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Sum of every chosen flight.
    pub flights: Price,

    /// Sum of nightly rate times nights for every city with a hotel and a stay length.
    pub hotels: Price,

    /// Sum of every chosen attraction across all cities.
    pub attractions: Price,
}

impl PriceBreakdown {
    /// Total of all three subtotals.
    pub fn total(&self) -> Price {
        self.flights + self.hotels + self.attractions
    }

    /// Total as [`Money`] in the given currency.
    pub fn total_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        self.total().to_money(currency)
    }
}

/// Calculates the subtotals of a plan.
///
/// Incomplete data never fails: a hotel without a stay length, or a stay
/// length without a hotel, contributes nothing.
pub fn price_breakdown(plan: &TripPlan) -> PriceBreakdown {
    PriceBreakdown {
        flights: flights_subtotal(&plan.flights),
        hotels: hotels_subtotal(&plan.hotels, &plan.durations),
        attractions: attractions_subtotal(&plan.attractions),
    }
}

/// Sum of every chosen flight.
pub fn flights_subtotal(flights: &SelectedFlights) -> Price {
    flights.values().map(|option| option.price).sum()
}

/// Sum of nightly rate times nights for each city with both a hotel and a stay length.
pub fn hotels_subtotal(hotels: &SelectedHotels, durations: &Durations) -> Price {
    hotels
        .iter()
        .filter_map(|(city, hotel)| durations.get(city).map(|&days| hotel.stay_price(days)))
        .sum()
}

/// Sum of every chosen attraction across all cities.
pub fn attractions_subtotal(attractions: &SelectedAttractions) -> Price {
    attractions.values().map(AttractionList::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use crate::{
        attractions::{Attraction, AttractionId},
        flights::{FlightOption, SegmentKey},
        hotels::{Hotel, HotelId},
        places::DestinationId,
    };

    use super::*;

    fn hotel(city: u32, nightly: i64) -> Hotel {
        Hotel {
            id: HotelId::new(city * 10),
            city_id: DestinationId::new(city),
            name: format!("Hotel {city}"),
            price_per_night: Price::from_major(nightly),
            rating: 4.0,
        }
    }

    fn attraction(id: u32, city: u32, price: i64) -> Attraction {
        Attraction {
            id: AttractionId::new(id),
            city_id: DestinationId::new(city),
            name: format!("Attraction {id}"),
            category: "Museum".to_string(),
            price: Price::from_major(price),
        }
    }

    #[test]
    fn breakdown_sums_each_category() {
        let mut plan = TripPlan::default();
        plan.durations.insert(DestinationId::new(1), 3);
        plan.flights.insert(
            SegmentKey::new(0),
            FlightOption::new("06:00", Price::from_major(200)),
        );
        plan.flights.insert(
            SegmentKey::new(1),
            FlightOption::new("12:00", Price::from_major(300)),
        );
        plan.hotels.insert(DestinationId::new(1), hotel(1, 100));
        plan.toggle_attraction(DestinationId::new(1), attraction(20, 1, 15));

        let breakdown = price_breakdown(&plan);

        assert_eq!(breakdown.flights, Price::from_major(500));
        assert_eq!(breakdown.hotels, Price::from_major(300));
        assert_eq!(breakdown.attractions, Price::from_major(15));
        assert_eq!(breakdown.total(), Price::from_major(815));
        assert_eq!(
            breakdown.total_money(EUR),
            Money::from_minor(81_500, EUR)
        );
    }

    #[test]
    fn hotel_without_duration_costs_nothing() {
        let mut plan = TripPlan::default();
        plan.hotels.insert(DestinationId::new(1), hotel(1, 100));
        plan.durations.insert(DestinationId::new(2), 4);

        assert_eq!(price_breakdown(&plan).hotels, Price::ZERO);
    }

    #[test]
    fn empty_plan_costs_nothing() {
        assert_eq!(price_breakdown(&TripPlan::default()), PriceBreakdown::default());
    }
}
