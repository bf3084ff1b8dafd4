//! Pick strategies
//!
//! Single picks keep the first candidate in offer order when several are
//! equally good.

use std::cmp::Reverse;

use crate::{
    attractions::Attraction,
    flights::{FlightOption, MIDDAY_MINUTES},
    hotels::Hotel,
};

/// How a suggestion picks the flight for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStrategy {
    /// Lowest fare.
    Cheapest,

    /// Departure closest to noon.
    Midday,

    /// Highest fare.
    MostExpensive,
}

impl FlightStrategy {
    /// Picks a flight, or nothing if the segment has no options.
    pub fn pick(self, options: &[FlightOption]) -> Option<&FlightOption> {
        match self {
            Self::Cheapest => options.iter().min_by_key(|option| option.price),
            Self::Midday => options.iter().min_by_key(|option| {
                option
                    .departure
                    .minutes_after_midnight()
                    .abs_diff(MIDDAY_MINUTES)
            }),
            Self::MostExpensive => options.iter().min_by_key(|option| Reverse(option.price)),
        }
    }
}

/// How a suggestion picks the hotel for a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelStrategy {
    /// Lowest nightly rate.
    Cheapest,

    /// Highest rating.
    BestRated,

    /// Highest nightly rate.
    MostExpensive,
}

impl HotelStrategy {
    /// Picks a hotel, or nothing if the city has none.
    pub fn pick(self, hotels: &[Hotel]) -> Option<&Hotel> {
        match self {
            Self::Cheapest => hotels.iter().min_by_key(|hotel| hotel.price_per_night),
            Self::BestRated => hotels
                .iter()
                .min_by(|a, b| b.rating.total_cmp(&a.rating)),
            Self::MostExpensive => hotels
                .iter()
                .min_by_key(|hotel| Reverse(hotel.price_per_night)),
        }
    }
}

/// How a suggestion picks attractions for a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractionStrategy {
    /// The single cheapest attraction.
    Cheapest,

    /// The cheapest attraction plus the median-priced one.
    CheapestAndMedian,

    /// Every attraction, cheapest first.
    All,
}

impl AttractionStrategy {
    /// Picks attractions in ascending price order; nothing if the city has none.
    pub fn pick(self, attractions: &[Attraction]) -> Vec<Attraction> {
        let mut sorted = attractions.to_vec();
        sorted.sort_by_key(|attraction| attraction.price);

        match self {
            Self::Cheapest => sorted.into_iter().take(1).collect(),
            Self::CheapestAndMedian => {
                let median = sorted.get(sorted.len() / 2).cloned();
                let mut picks: Vec<Attraction> = sorted.into_iter().take(1).collect();

                if let Some(median) = median
                    && picks.first().is_some_and(|cheapest| cheapest.id != median.id)
                {
                    picks.push(median);
                }

                picks
            }
            Self::All => sorted,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        attractions::AttractionId,
        hotels::HotelId,
        places::DestinationId,
        prices::Price,
    };

    use super::*;

    fn flight(departure: &str, price: i64) -> FlightOption {
        FlightOption::new(departure, Price::from_major(price))
    }

    fn hotel(id: u32, nightly: i64, rating: f64) -> Hotel {
        Hotel {
            id: HotelId::new(id),
            city_id: DestinationId::new(1),
            name: format!("Hotel {id}"),
            price_per_night: Price::from_major(nightly),
            rating,
        }
    }

    fn attraction(id: u32, price: i64) -> Attraction {
        Attraction {
            id: AttractionId::new(id),
            city_id: DestinationId::new(1),
            name: format!("Attraction {id}"),
            category: "Museum".to_string(),
            price: Price::from_major(price),
        }
    }

    #[test]
    fn flight_picks_by_strategy() {
        let options = [
            flight("06:00", 120),
            flight("12:00", 150),
            flight("21:00", 90),
        ];

        assert_eq!(FlightStrategy::Cheapest.pick(&options), options.get(2));
        assert_eq!(FlightStrategy::Midday.pick(&options), options.get(1));
        assert_eq!(FlightStrategy::MostExpensive.pick(&options), options.get(1));
    }

    #[test]
    fn flight_ties_keep_first_option() {
        let options = [flight("10:00", 150), flight("14:00", 150)];

        assert_eq!(FlightStrategy::Cheapest.pick(&options), options.first());
        assert_eq!(FlightStrategy::Midday.pick(&options), options.first());
        assert_eq!(FlightStrategy::MostExpensive.pick(&options), options.first());
    }

    #[test]
    fn unparseable_departure_counts_as_midnight() {
        let options = [flight("soon", 100), flight("01:00", 100)];

        assert_eq!(FlightStrategy::Midday.pick(&options), options.get(1));
    }

    #[test]
    fn hotel_picks_by_strategy() {
        let hotels = [hotel(1, 50, 3.0), hotel(2, 100, 5.0), hotel(3, 200, 4.0)];

        assert_eq!(HotelStrategy::Cheapest.pick(&hotels).map(|h| h.id.get()), Some(1));
        assert_eq!(HotelStrategy::BestRated.pick(&hotels).map(|h| h.id.get()), Some(2));
        assert_eq!(
            HotelStrategy::MostExpensive.pick(&hotels).map(|h| h.id.get()),
            Some(3)
        );
    }

    #[test]
    fn hotel_rating_ties_keep_first() {
        let hotels = [hotel(1, 80, 4.5), hotel(2, 60, 4.5)];

        assert_eq!(HotelStrategy::BestRated.pick(&hotels).map(|h| h.id.get()), Some(1));
        assert_eq!(HotelStrategy::Cheapest.pick(&[]), None);
    }

    #[test]
    fn cheapest_and_median_attractions() {
        let attractions = [
            attraction(1, 30),
            attraction(2, 10),
            attraction(3, 20),
            attraction(4, 40),
        ];

        let picks: Vec<u32> = AttractionStrategy::CheapestAndMedian
            .pick(&attractions)
            .iter()
            .map(|a| a.id.get())
            .collect();

        assert_eq!(picks, [2, 1]);
    }

    #[test]
    fn single_attraction_is_not_picked_twice() {
        let attractions = [attraction(1, 30)];

        assert_eq!(AttractionStrategy::CheapestAndMedian.pick(&attractions).len(), 1);
    }

    #[test]
    fn all_attractions_sorted_by_price() {
        let attractions = [attraction(1, 30), attraction(2, 10), attraction(3, 10)];

        let picks: Vec<u32> = AttractionStrategy::All
            .pick(&attractions)
            .iter()
            .map(|a| a.id.get())
            .collect();

        assert_eq!(picks, [2, 3, 1]);
        assert!(AttractionStrategy::Cheapest.pick(&[]).is_empty());
    }
}
