//! Canonical extracted-field names.
//!
//! Every strategy, the cascade, the merger, and the feature assembler refer
//! to fields by these keys so that values extracted from different sources
//! land in the same slot.

pub const AFFECTED_POPULATION: &str = "affected_population";
pub const DEATHS: &str = "deaths";
pub const INJURED: &str = "injured";
pub const DISPLACED: &str = "displaced";
pub const PRECIPITATION_MM: &str = "precipitation_mm";
pub const TEMPERATURE_C: &str = "temperature_c";
pub const WIND_SPEED_KMH: &str = "wind_speed_kmh";
pub const HUMIDITY_PERCENT: &str = "humidity_percent";
pub const ECONOMIC_LOSS_USD: &str = "economic_loss_usd";
pub const WATER_LEVEL_M: &str = "water_level_m";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const REGION: &str = "region";
pub const LOCATION_DETAILS: &str = "location_details";
pub const EVENT_DATE_EXTRACTED: &str = "event_date_extracted";
pub const PAGE_TITLE: &str = "page_title";
pub const DESCRIPTION: &str = "description";

/// Fields whose values may legitimately be negative.
#[must_use]
pub fn allows_negative(field: &str) -> bool {
    matches!(field, LATITUDE | LONGITUDE)
}
