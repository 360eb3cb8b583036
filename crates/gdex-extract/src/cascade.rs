//! Cross-cutting regex cascade over the cleaned page text.
//!
//! Each target field carries an ordered list of patterns (English first,
//! then Brazilian Portuguese). The first pattern that matches wins for that
//! field; later patterns are not consulted even if they would match earlier
//! in the text. Only fields the host strategy left unset are attempted.

use std::sync::LazyLock;

use regex::Regex;

use gdex_core::{fields, FieldValue};

use crate::report::{ExtractionReport, FieldOrigin};

enum NumberKind {
    /// Whole count; separators (`,` and `.`) are stripped before parsing.
    Count,
    /// Decimal value; a comma is read as a decimal point.
    Decimal,
}

struct FieldCascade {
    field: &'static str,
    kind: NumberKind,
    patterns: &'static [&'static str],
}

static CASCADES: LazyLock<Vec<(FieldCascade, Vec<Regex>)>> = LazyLock::new(|| {
    let defs = [
        FieldCascade {
            field: fields::AFFECTED_POPULATION,
            kind: NumberKind::Count,
            patterns: &[
                r"(?i)(\d[\d,.]*)\s*(?:people|persons?|families)\s+affected",
                r"(?i)affected\D{0,20}?(\d[\d,.]*)\s*(?:people|persons?)",
                r"(?i)(\d[\d,.]*)\s*pessoas\s+(?:afetadas|atingidas)",
            ],
        },
        FieldCascade {
            field: fields::DEATHS,
            kind: NumberKind::Count,
            patterns: &[
                r"(?i)(\d[\d,.]*)\s*(?:deaths?|dead|killed|died|fatalities)",
                r"(?i)(\d[\d,.]*)\s*(?:mortes|mortos|óbitos)",
            ],
        },
        FieldCascade {
            field: fields::DISPLACED,
            kind: NumberKind::Count,
            patterns: &[
                r"(?i)(\d[\d,.]*)\s*(?:displaced|evacuated|homeless)",
                r"(?i)(\d[\d,.]*)\s*(?:desabrigad[ao]s|desalojad[ao]s|evacuad[ao]s)",
            ],
        },
        FieldCascade {
            field: fields::PRECIPITATION_MM,
            kind: NumberKind::Decimal,
            patterns: &[
                r"(?i)(\d+(?:[.,]\d+)?)\s*(?:mm|millimet(?:er|re)s?)\s*(?:of\s+)?(?:rain|precipitation)",
                r"(?i)(\d+(?:[.,]\d+)?)\s*(?:mm|milímetros)\s+de\s+chuva",
            ],
        },
        FieldCascade {
            field: fields::ECONOMIC_LOSS_USD,
            kind: NumberKind::Decimal,
            patterns: &[
                r"(?i)(?:US\$|USD|\$)\s*(\d+(?:[.,]\d+)?)\s*(billion|million|bilh(?:ão|ões)|milh(?:ão|ões))?",
                r"(?i)(\d+(?:[.,]\d+)?)\s*(billion|million|bilh(?:ão|ões)|milh(?:ão|ões))\s+(?:in\s+)?(?:damages?|losses|em\s+(?:prejuízos|perdas))",
            ],
        },
        FieldCascade {
            field: fields::WATER_LEVEL_M,
            kind: NumberKind::Decimal,
            patterns: &[
                r"(?i)(?:river|water)\s+level\D{0,15}?(\d+(?:[.,]\d+)?)\s*m(?:eters?|etres?)?\b",
                r"(?i)nível\s+(?:do\s+rio|da\s+água)\D{0,15}?(\d+(?:[.,]\d+)?)\s*m(?:etros)?\b",
            ],
        },
    ];

    defs.into_iter()
        .map(|def| {
            let compiled = def
                .patterns
                .iter()
                .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad cascade pattern {p}: {e}")))
                .collect();
            (def, compiled)
        })
        .collect()
});

/// Runs the cascade over `text`, writing any field the report does not
/// already have. Cascade values carry generic origin.
pub(crate) fn apply(text: &str, report: &mut ExtractionReport) {
    for (def, patterns) in CASCADES.iter() {
        if report.fields.contains_key(def.field) {
            continue;
        }
        for pattern in patterns {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let Some(raw) = captures.get(1) else {
                continue;
            };
            let multiplier = captures.get(2).and_then(|unit| multiplier_for(unit.as_str()));

            let value = match (&def.kind, multiplier) {
                (NumberKind::Count, None) => parse_count(raw.as_str()).map(FieldValue::Int),
                (_, m) => parse_decimal(raw.as_str())
                    .map(|v| FieldValue::Float(v * m.unwrap_or(1.0))),
            };

            if let Some(value) = value {
                report.set_field(def.field, value, FieldOrigin::Generic);
            }
            // First matching pattern decides the field either way.
            break;
        }
    }
}

fn multiplier_for(unit: &str) -> Option<f64> {
    let unit = unit.to_lowercase();
    if unit.starts_with("billion") || unit.starts_with("bilh") {
        Some(1e9)
    } else if unit.starts_with("million") || unit.starts_with("milh") {
        Some(1e6)
    } else {
        None
    }
}

/// Parses a whole count, tolerating both `12,500` and `12.500` grouping.
fn parse_count(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Parses a decimal, reading a comma as the decimal separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> ExtractionReport {
        let mut report = ExtractionReport::empty("https://example.com/x", "example.com");
        apply(text, &mut report);
        report
    }

    #[test]
    fn extracts_affected_with_thousands_separator() {
        let report = run("At least 12,500 people affected by the floods.");
        assert_eq!(
            report.fields.get(fields::AFFECTED_POPULATION),
            Some(&FieldValue::Int(12_500))
        );
        assert_eq!(
            report.origin_by_field.get(fields::AFFECTED_POPULATION),
            Some(&FieldOrigin::Generic)
        );
    }

    #[test]
    fn extracts_portuguese_variants() {
        let report = run("Cerca de 3.200 pessoas afetadas e 14 mortos na região.");
        assert_eq!(
            report.fields.get(fields::AFFECTED_POPULATION),
            Some(&FieldValue::Int(3_200))
        );
        assert_eq!(report.fields.get(fields::DEATHS), Some(&FieldValue::Int(14)));
    }

    #[test]
    fn first_pattern_wins_regardless_of_position() {
        // The Portuguese match appears first in the text, but the English
        // pattern is earlier in priority order.
        let report = run("500 pessoas afetadas. Later reports said 800 people affected.");
        assert_eq!(
            report.fields.get(fields::AFFECTED_POPULATION),
            Some(&FieldValue::Int(800))
        );
    }

    #[test]
    fn preset_fields_are_not_overwritten() {
        let mut report = ExtractionReport::empty("https://example.com/x", "example.com");
        report.set_field(fields::DEATHS, FieldValue::Int(5), FieldOrigin::Structured);
        apply("10 deaths were reported.", &mut report);
        assert_eq!(report.fields.get(fields::DEATHS), Some(&FieldValue::Int(5)));
        assert_eq!(
            report.origin_by_field.get(fields::DEATHS),
            Some(&FieldOrigin::Structured)
        );
    }

    #[test]
    fn economic_loss_applies_million_multiplier() {
        let report = run("Damages were estimated at US$ 1.5 billion overall.");
        assert_eq!(
            report.fields.get(fields::ECONOMIC_LOSS_USD),
            Some(&FieldValue::Float(1.5e9))
        );
    }

    #[test]
    fn water_level_reads_decimal_meters() {
        let report = run("The river level reached 5,3 m above normal.");
        assert_eq!(
            report.fields.get(fields::WATER_LEVEL_M),
            Some(&FieldValue::Float(5.3))
        );
    }

    #[test]
    fn precipitation_with_rain_context() {
        let report = run("Over 120.5 mm of rain fell in 24 hours.");
        assert_eq!(
            report.fields.get(fields::PRECIPITATION_MM),
            Some(&FieldValue::Float(120.5))
        );
    }

    #[test]
    fn no_match_leaves_fields_unset() {
        let report = run("A quiet day with no notable numbers.");
        assert!(report.fields.is_empty());
    }
}
