//! Cross-source field merging.

use std::collections::BTreeMap;

use gdex_core::FieldValue;
use gdex_extract::{ExtractionReport, FieldOrigin};

/// Confidence assigned to auxiliary-sourced fields; curated datasets are
/// treated as plausible but unverified.
const AUXILIARY_CONFIDENCE: f64 = 0.8;

/// The merged field map for one event, with the winning value's confidence
/// carried along for quality scoring.
#[derive(Debug, Default, Clone)]
pub struct MergedFields {
    pub values: BTreeMap<String, FieldValue>,
    pub confidence: BTreeMap<String, f64>,
}

impl MergedFields {
    /// Mean confidence across merged fields; 0.0 when nothing was merged.
    #[must_use]
    pub fn quality_score(&self) -> f64 {
        if self.confidence.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.confidence.len() as f64;
        self.confidence.values().sum::<f64>() / n
    }

    fn fill(&mut self, name: &str, value: &FieldValue, confidence: f64) {
        if self.values.contains_key(name) {
            return;
        }
        self.values.insert(name.to_owned(), value.clone());
        self.confidence.insert(name.to_owned(), confidence);
    }
}

/// Merges per-source reports (in source-rank order) with optional auxiliary
/// data.
///
/// Three passes, first writer wins throughout:
/// 1. structured-origin fields across reports, in rank order;
/// 2. auxiliary fields, filling remaining gaps only;
/// 3. generic-origin fields across reports, in rank order.
///
/// Structured, source-attributed facts are therefore never displaced by
/// lower-confidence generic matches, regardless of which source fetched
/// faster.
#[must_use]
pub fn merge(
    reports: &[ExtractionReport],
    auxiliary: Option<&BTreeMap<String, FieldValue>>,
) -> MergedFields {
    let mut merged = MergedFields::default();

    for origin_pass in [FieldOrigin::Structured, FieldOrigin::Generic] {
        if origin_pass == FieldOrigin::Generic {
            if let Some(auxiliary) = auxiliary {
                for (name, value) in auxiliary {
                    merged.fill(name, value, AUXILIARY_CONFIDENCE);
                }
            }
        }
        for report in reports {
            for (name, value) in &report.fields {
                if report.origin_by_field.get(name) != Some(&origin_pass) {
                    continue;
                }
                let confidence = report
                    .confidence_by_field
                    .get(name)
                    .copied()
                    .unwrap_or(0.0);
                merged.fill(name, value, confidence);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdex_core::fields;

    fn report(url: &str, entries: &[(&str, FieldValue, FieldOrigin, f64)]) -> ExtractionReport {
        let mut r = test_report(url);
        for (name, value, origin, confidence) in entries {
            r.fields.insert((*name).to_owned(), value.clone());
            r.origin_by_field.insert((*name).to_owned(), *origin);
            r.confidence_by_field.insert((*name).to_owned(), *confidence);
        }
        r
    }

    fn test_report(url: &str) -> ExtractionReport {
        ExtractionReport {
            source_url: url.to_owned(),
            source_host: "example.com".to_owned(),
            success: true,
            fields: BTreeMap::new(),
            origin_by_field: BTreeMap::new(),
            confidence_by_field: BTreeMap::new(),
            warnings: Vec::new(),
            elapsed_seconds: 0.0,
            extracted_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn higher_ranked_source_wins_within_a_pass() {
        let reports = vec![
            report(
                "https://a.example.com",
                &[(fields::DEATHS, FieldValue::Int(5), FieldOrigin::Structured, 0.8)],
            ),
            report(
                "https://b.example.com",
                &[(fields::DEATHS, FieldValue::Int(10), FieldOrigin::Structured, 0.8)],
            ),
        ];
        let merged = merge(&reports, None);
        assert_eq!(merged.values.get(fields::DEATHS), Some(&FieldValue::Int(5)));
    }

    #[test]
    fn structured_beats_generic_even_from_a_lower_ranked_source() {
        let reports = vec![
            report(
                "https://a.example.com",
                &[(fields::DEATHS, FieldValue::Int(10), FieldOrigin::Generic, 0.8)],
            ),
            report(
                "https://b.example.com",
                &[(fields::DEATHS, FieldValue::Int(5), FieldOrigin::Structured, 0.8)],
            ),
        ];
        let merged = merge(&reports, None);
        assert_eq!(merged.values.get(fields::DEATHS), Some(&FieldValue::Int(5)));
    }

    #[test]
    fn auxiliary_fills_gaps_but_never_overwrites_structured() {
        let reports = vec![report(
            "https://a.example.com",
            &[(fields::DEATHS, FieldValue::Int(5), FieldOrigin::Structured, 0.8)],
        )];
        let auxiliary: BTreeMap<String, FieldValue> = [
            (fields::DEATHS.to_owned(), FieldValue::Int(99)),
            (fields::PRECIPITATION_MM.to_owned(), FieldValue::Float(120.0)),
        ]
        .into();

        let merged = merge(&reports, Some(&auxiliary));
        assert_eq!(merged.values.get(fields::DEATHS), Some(&FieldValue::Int(5)));
        assert_eq!(
            merged.values.get(fields::PRECIPITATION_MM),
            Some(&FieldValue::Float(120.0))
        );
    }

    #[test]
    fn auxiliary_beats_generic() {
        let reports = vec![report(
            "https://a.example.com",
            &[(fields::DEATHS, FieldValue::Int(10), FieldOrigin::Generic, 0.8)],
        )];
        let auxiliary: BTreeMap<String, FieldValue> =
            [(fields::DEATHS.to_owned(), FieldValue::Int(7))].into();

        let merged = merge(&reports, Some(&auxiliary));
        assert_eq!(merged.values.get(fields::DEATHS), Some(&FieldValue::Int(7)));
    }

    #[test]
    fn quality_score_is_mean_confidence() {
        let reports = vec![report(
            "https://a.example.com",
            &[
                (fields::DEATHS, FieldValue::Int(5), FieldOrigin::Structured, 0.8),
                (fields::AFFECTED_POPULATION, FieldValue::Int(100), FieldOrigin::Generic, 0.6),
            ],
        )];
        let merged = merge(&reports, None);
        assert!((merged.quality_score() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn empty_merge_scores_zero() {
        assert!((merge(&[], None).quality_score() - 0.0).abs() < f64::EPSILON);
    }
}
