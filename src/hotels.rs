//! Hotels

use serde::{Deserialize, Serialize};

use crate::{ids::numeric_id, places::DestinationId, prices::Price};

numeric_id! {
    /// Hotel identifier.
    pub struct HotelId;
}

/// A hotel in one of the destination cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Catalog identifier.
    pub id: HotelId,

    /// City the hotel is in.
    pub city_id: DestinationId,

    /// Hotel name.
    pub name: String,

    /// Price of one night.
    pub price_per_night: Price,

    /// Guest rating, higher is better.
    pub rating: f64,
}

impl Hotel {
    /// Cost of staying the given number of nights.
    pub fn stay_price(&self, nights: u32) -> Price {
        self.price_per_night.times(nights)
    }
}
