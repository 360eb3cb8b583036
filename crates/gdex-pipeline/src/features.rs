//! Projection of merged fields onto the fixed feature schema.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use gdex_core::{fields, EventRecord, FieldValue};

use crate::merge::MergedFields;

/// The 20 schema attributes counted toward completeness, in CSV column
/// order. `data_quality_score` and `extraction_timestamp` are bookkeeping
/// and excluded.
pub const FEATURE_NAMES: [&str; 20] = [
    "event_id",
    "disaster_type",
    "event_date",
    "season",
    "month",
    "year",
    "location",
    "latitude",
    "longitude",
    "region",
    "precipitation_mm",
    "temperature_c",
    "humidity_percent",
    "wind_speed_kmh",
    "water_level_m",
    "affected_population",
    "deaths",
    "injured",
    "displaced",
    "economic_loss_usd",
];

/// One row of the trainable feature matrix.
///
/// The first seven attributes are always derived from the event record;
/// the rest are filled from merged fields when present.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    pub event_id: String,
    pub disaster_type: String,
    pub event_date: String,
    pub season: String,
    pub month: u32,
    pub year: i32,
    pub location: String,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<String>,
    pub precipitation_mm: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub water_level_m: Option<f64>,
    pub affected_population: Option<i64>,
    pub deaths: Option<i64>,
    pub injured: Option<i64>,
    pub displaced: Option<i64>,
    pub economic_loss_usd: Option<f64>,

    pub data_quality_score: f64,
    pub extraction_timestamp: DateTime<Utc>,
}

impl FeatureRecord {
    /// Populated non-bookkeeping attributes. The seven event-derived
    /// attributes always count; the optional thirteen count when present.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        let optional = [
            self.latitude.is_some(),
            self.longitude.is_some(),
            self.region.is_some(),
            self.precipitation_mm.is_some(),
            self.temperature_c.is_some(),
            self.humidity_percent.is_some(),
            self.wind_speed_kmh.is_some(),
            self.water_level_m.is_some(),
            self.affected_population.is_some(),
            self.deaths.is_some(),
            self.injured.is_some(),
            self.displaced.is_some(),
            self.economic_loss_usd.is_some(),
        ];
        7 + optional.iter().filter(|p| **p).count()
    }

    /// Completeness ratio over the 20 schema attributes.
    #[must_use]
    pub fn completeness(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let total = FEATURE_NAMES.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let populated = self.populated_count() as f64;
        populated / total
    }
}

/// Builds [`FeatureRecord`]s from merged fields.
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Assembles the feature record for one event.
    ///
    /// An unparsable event date falls back to the current time; the fallback
    /// is reported in the returned warning so the caller can record it on
    /// the event.
    #[must_use]
    pub fn assemble(
        event: &EventRecord,
        merged: &MergedFields,
    ) -> (FeatureRecord, Option<String>) {
        let (date, date_warning) = event_date(event);
        let month = date.month();
        let year = date.year();

        let float = |name: &str| merged.values.get(name).and_then(FieldValue::as_f64);
        let int = |name: &str| merged.values.get(name).and_then(FieldValue::as_i64);
        let text = |name: &str| {
            merged
                .values
                .get(name)
                .and_then(FieldValue::as_text)
                .map(str::to_owned)
        };

        let record = FeatureRecord {
            event_id: event.event_id.clone(),
            disaster_type: event.event_type.clone(),
            event_date: event.date.clone(),
            season: season_for_month(month).to_owned(),
            month,
            year,
            location: location_of(event),
            latitude: float(fields::LATITUDE),
            longitude: float(fields::LONGITUDE),
            region: text(fields::REGION),
            precipitation_mm: float(fields::PRECIPITATION_MM),
            temperature_c: float(fields::TEMPERATURE_C),
            humidity_percent: float(fields::HUMIDITY_PERCENT),
            wind_speed_kmh: float(fields::WIND_SPEED_KMH),
            water_level_m: float(fields::WATER_LEVEL_M),
            affected_population: int(fields::AFFECTED_POPULATION),
            deaths: int(fields::DEATHS),
            injured: int(fields::INJURED),
            displaced: int(fields::DISPLACED),
            economic_loss_usd: float(fields::ECONOMIC_LOSS_USD),
            data_quality_score: merged.quality_score(),
            extraction_timestamp: Utc::now(),
        };

        (record, date_warning)
    }
}

/// Meteorological season for the southern hemisphere.
fn season_for_month(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "summer",
        3..=5 => "autumn",
        6..=8 => "winter",
        _ => "spring",
    }
}

/// Event location: the text after the last `:` in the event name, else the
/// event's country.
fn location_of(event: &EventRecord) -> String {
    event
        .name
        .rsplit_once(':')
        .map(|(_, tail)| tail.trim().to_owned())
        .filter(|tail| !tail.is_empty())
        .unwrap_or_else(|| event.country.clone())
}

fn event_date(event: &EventRecord) -> (DateTime<Utc>, Option<String>) {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&event.date) {
        return (parsed.with_timezone(&Utc), None);
    }
    if let Some(prefix) = event.date.get(..10) {
        if let Ok(parsed) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            if let Some(dt) = parsed.and_hms_opt(0, 0, 0) {
                return (dt.and_utc(), None);
            }
        }
    }
    let warning = format!(
        "unparsable event date '{}', falling back to current time",
        event.date
    );
    (Utc::now(), Some(warning))
}
