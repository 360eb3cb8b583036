//! Plausibility-based confidence scoring.
//!
//! Scoring here is advisory: an implausible value keeps its place in the
//! report with a low confidence, unlike the hard sanity rejection applied
//! inside the generic strategy.

use gdex_core::{fields, FieldValue};

const CONFIDENCE_PLAUSIBLE: f64 = 0.8;
const CONFIDENCE_BOUNDARY: f64 = 0.6;
const CONFIDENCE_IMPLAUSIBLE: f64 = 0.3;
const CONFIDENCE_TEXT_ODD_LENGTH: f64 = 0.5;
const CONFIDENCE_UNKNOWN_FIELD: f64 = 0.5;

const TEXT_LENGTH_MIN: usize = 10;
const TEXT_LENGTH_MAX: usize = 1000;

/// Plausible range for a numeric field, if one is known.
fn plausible_range(field: &str) -> Option<(f64, f64)> {
    let range = match field {
        fields::AFFECTED_POPULATION => (0.0, 10_000_000.0),
        fields::DEATHS => (0.0, 10_000.0),
        fields::INJURED => (0.0, 50_000.0),
        fields::DISPLACED => (0.0, 5_000_000.0),
        fields::PRECIPITATION_MM => (0.0, 2_000.0),
        fields::TEMPERATURE_C => (-50.0, 60.0),
        fields::WIND_SPEED_KMH => (0.0, 400.0),
        fields::HUMIDITY_PERCENT => (0.0, 100.0),
        fields::ECONOMIC_LOSS_USD => (0.0, 1e12),
        fields::WATER_LEVEL_M => (0.0, 30.0),
        fields::LATITUDE => (-90.0, 90.0),
        fields::LONGITUDE => (-180.0, 180.0),
        _ => return None,
    };
    Some(range)
}

/// Scores one field value.
///
/// Numeric fields: strictly inside the plausible range → 0.8, exactly on a
/// boundary → 0.6, outside → 0.3, no known range → 0.5. Text fields: 0.8
/// when the length sits in a sane window, 0.5 otherwise.
pub(crate) fn score(field: &str, value: &FieldValue) -> f64 {
    match value {
        FieldValue::Text(text) => {
            if (TEXT_LENGTH_MIN..=TEXT_LENGTH_MAX).contains(&text.chars().count()) {
                CONFIDENCE_PLAUSIBLE
            } else {
                CONFIDENCE_TEXT_ODD_LENGTH
            }
        }
        FieldValue::Int(_) | FieldValue::Float(_) => {
            let Some(v) = value.as_f64() else {
                return CONFIDENCE_UNKNOWN_FIELD;
            };
            match plausible_range(field) {
                Some((lo, hi)) if v > lo && v < hi => CONFIDENCE_PLAUSIBLE,
                Some((lo, hi)) if v == lo || v == hi => CONFIDENCE_BOUNDARY,
                Some(_) => CONFIDENCE_IMPLAUSIBLE,
                None => CONFIDENCE_UNKNOWN_FIELD,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_inside_range_scores_high() {
        assert!(
            (score(fields::DEATHS, &FieldValue::Int(3)) - 0.8).abs() < f64::EPSILON
        );
    }

    #[test]
    fn boundary_value_scores_medium() {
        assert!(
            (score(fields::DEATHS, &FieldValue::Int(10_000)) - 0.6).abs() < f64::EPSILON
        );
        assert!(
            (score(fields::DEATHS, &FieldValue::Int(0)) - 0.6).abs() < f64::EPSILON
        );
    }

    #[test]
    fn out_of_range_scores_low_but_is_kept() {
        assert!(
            (score(fields::DEATHS, &FieldValue::Int(50_000)) - 0.3).abs() < f64::EPSILON
        );
    }

    #[test]
    fn negative_coordinates_are_plausible() {
        assert!(
            (score(fields::LATITUDE, &FieldValue::Float(-23.55)) - 0.8).abs() < f64::EPSILON
        );
    }

    #[test]
    fn text_in_sane_window_scores_high() {
        let value = FieldValue::Text("Floods in Rio Grande do Sul".to_owned());
        assert!((score(fields::PAGE_TITLE, &value) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn short_text_scores_medium() {
        let value = FieldValue::Text("Floods".to_owned());
        assert!((score(fields::PAGE_TITLE, &value) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_numeric_field_scores_medium() {
        assert!((score("mystery_metric", &FieldValue::Int(7)) - 0.5).abs() < f64::EPSILON);
    }
}
