//! Fallback strategy for unknown hosts.
//!
//! Reads page metadata (title, description, social-preview tags) and a few
//! free-text environmental patterns. Numeric matches are checked against
//! hard sanity ranges here — an implausible match on an arbitrary site is
//! far more likely to be noise than news, so it is discarded outright
//! rather than stored with low confidence.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use gdex_core::{fields, FieldValue};

use crate::report::{ExtractionReport, FieldOrigin};
use crate::strategy::HostStrategy;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static OG_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[property=\"og:description\"]").expect("valid selector")
});
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[name=\"description\"]").expect("valid selector"));

static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(-?\d+(?:\.\d+)?)\s*°\s*([CF])\b").unwrap());
static WIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:km/h|kmh|kilometers?\s+per\s+hour)").unwrap()
});
static HUMIDITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:humidity|umidade)\D{0,10}?(\d+(?:\.\d+)?)\s*%|(\d+(?:\.\d+)?)\s*%\s*(?:humidity|umidade)")
        .unwrap()
});

const TEMPERATURE_RANGE_C: (f64, f64) = (-50.0, 60.0);
const WIND_RANGE_KMH: (f64, f64) = (0.0, 400.0);
const HUMIDITY_RANGE_PERCENT: (f64, f64) = (0.0, 100.0);

pub(crate) struct GenericStrategy;

impl HostStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _host: &str) -> bool {
        true
    }

    fn extract(&self, doc: &Html, text: &str, report: &mut ExtractionReport) {
        if let Some(title) = doc.select(&TITLE).next() {
            let title = title.text().collect::<String>().trim().to_owned();
            if !title.is_empty() {
                report.set_field(fields::PAGE_TITLE, FieldValue::Text(title), FieldOrigin::Generic);
            }
        }

        let description = meta_content(doc, &OG_DESCRIPTION)
            .or_else(|| meta_content(doc, &META_DESCRIPTION));
        if let Some(description) = description {
            report.set_field(
                fields::DESCRIPTION,
                FieldValue::Text(description),
                FieldOrigin::Generic,
            );
        }

        if let Some(celsius) = temperature_celsius(text) {
            store_in_range(report, fields::TEMPERATURE_C, celsius, TEMPERATURE_RANGE_C);
        }
        if let Some(kmh) = WIND.captures(text).and_then(|c| c[1].parse::<f64>().ok()) {
            store_in_range(report, fields::WIND_SPEED_KMH, kmh, WIND_RANGE_KMH);
        }
        if let Some(percent) = humidity_percent(text) {
            store_in_range(report, fields::HUMIDITY_PERCENT, percent, HUMIDITY_RANGE_PERCENT);
        }
    }
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
}

/// First temperature match in the text, converted to Celsius.
fn temperature_celsius(text: &str) -> Option<f64> {
    let captures = TEMPERATURE.captures(text)?;
    let value: f64 = captures[1].parse().ok()?;
    if captures[2].eq_ignore_ascii_case("F") {
        Some((value - 32.0) * 5.0 / 9.0)
    } else {
        Some(value)
    }
}

fn humidity_percent(text: &str) -> Option<f64> {
    let captures = HUMIDITY.captures(text)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

/// Stores the value only when it passes the hard sanity range.
fn store_in_range(report: &mut ExtractionReport, field: &str, value: f64, (lo, hi): (f64, f64)) {
    if (lo..=hi).contains(&value) {
        report.set_field(field, FieldValue::Float(value), FieldOrigin::Generic);
    } else {
        report
            .warnings
            .push(format!("{field} value {value} outside sanity range, discarded"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> ExtractionReport {
        let doc = Html::parse_document(html);
        let text = crate::clean::clean_text(&doc);
        let mut report = ExtractionReport::empty("https://news.example.com/x", "news.example.com");
        GenericStrategy.extract(&doc, &text, &mut report);
        report
    }

    #[test]
    fn reads_title_and_description() {
        let report = run(
            "<html><head><title>Floods hit the south</title>\
             <meta property=\"og:description\" content=\"Rivers overflowed after record rain.\">\
             </head><body></body></html>",
        );
        assert_eq!(
            report.fields.get(fields::PAGE_TITLE),
            Some(&FieldValue::Text("Floods hit the south".to_owned()))
        );
        assert_eq!(
            report.fields.get(fields::DESCRIPTION),
            Some(&FieldValue::Text("Rivers overflowed after record rain.".to_owned()))
        );
    }

    #[test]
    fn meta_description_is_a_fallback() {
        let report = run(
            "<head><meta name=\"description\" content=\"Storm damage report.\"></head>",
        );
        assert_eq!(
            report.fields.get(fields::DESCRIPTION),
            Some(&FieldValue::Text("Storm damage report.".to_owned()))
        );
    }

    #[test]
    fn plausible_temperature_is_stored() {
        let report = run("<p>Temperatures reached 35°C during the heat wave.</p>");
        assert_eq!(
            report.fields.get(fields::TEMPERATURE_C),
            Some(&FieldValue::Float(35.0))
        );
    }

    #[test]
    fn implausible_temperature_is_discarded() {
        let report = run("<p>The oven hit 150°C while the storm raged.</p>");
        assert!(!report.fields.contains_key(fields::TEMPERATURE_C));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn fahrenheit_is_converted() {
        let report = run("<p>It was 95°F with winds of 80 km/h.</p>");
        let Some(FieldValue::Float(c)) = report.fields.get(fields::TEMPERATURE_C) else {
            panic!("temperature missing");
        };
        assert!((c - 35.0).abs() < 0.01);
        assert_eq!(
            report.fields.get(fields::WIND_SPEED_KMH),
            Some(&FieldValue::Float(80.0))
        );
    }

    #[test]
    fn humidity_requires_context() {
        let report = run("<p>Humidity of 85% was recorded; 40% of roads closed.</p>");
        assert_eq!(
            report.fields.get(fields::HUMIDITY_PERCENT),
            Some(&FieldValue::Float(85.0))
        );
    }
}
