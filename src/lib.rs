//! Voyage
//!
//! Voyage is the state core of a multi-city trip planner: an ordered route of
//! capitals with stay lengths, flights, hotels and attractions attached, kept
//! consistent as the route changes, priced, persisted, and seeded from
//! ready-made Budget, Comfort and Premium suggestions.

pub mod attractions;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod flights;
pub mod hotels;
mod ids;
pub mod places;
pub mod plan;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod storage;
pub mod suggestions;
pub mod summary;
pub mod trip;
