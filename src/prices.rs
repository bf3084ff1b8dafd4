//! Prices

use std::{
    iter::Sum,
    ops::{Add, Deref},
};

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::{Deserialize, Serialize};

/// Represents a price in minor currency units (pence/cents).
///
/// Every price in a trip shares the planner's currency, so arithmetic stays
/// on plain integers and only totals are lifted into [`Money`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: i64,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new price from minor units.
    pub const fn new(value: i64) -> Self {
        Price { value }
    }

    /// Creates a new price from whole major units (e.g. euros).
    pub const fn from_major(units: i64) -> Self {
        Price {
            value: units.saturating_mul(100),
        }
    }

    /// Multiplies the price by a count, e.g. a nightly rate by a number of nights.
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        Price {
            value: self.value.saturating_mul(i64::from(count)),
        }
    }

    /// Converts the price into [`Money`] in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.value, currency)
    }
}

impl Deref for Price {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price {
            value: self.value.saturating_add(rhs.value),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Looks up one of the supported ISO currencies by its alpha code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}
