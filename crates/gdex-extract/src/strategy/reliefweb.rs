//! Strategy for ReliefWeb report pages.
//!
//! ReliefWeb prose is editorially consistent, so a small set of free-text
//! patterns plus the location heading is reliable enough to count as
//! structured extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use gdex_core::{fields, FieldValue};

use crate::report::{ExtractionReport, FieldOrigin};
use crate::strategy::HostStrategy;

static AFFECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s*(?:people|persons?|families)\s+affected").unwrap()
});
static DEATHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*(?:deaths?|killed|died)").unwrap());
static DISPLACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*(?:displaced|evacuated)").unwrap());
static RAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:mm|millimeters?)\s*(?:of\s+)?(?:rain|precipitation)")
        .unwrap()
});
static EVENT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d{1,2})\s*(January|February|March|April|May|June|July|August|September|October|November|December)\s*(\d{4})",
    )
    .unwrap()
});
static LOCATION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)location|where").unwrap());

pub(crate) struct ReliefwebStrategy;

impl HostStrategy for ReliefwebStrategy {
    fn name(&self) -> &'static str {
        "reliefweb"
    }

    fn matches(&self, host: &str) -> bool {
        host == "reliefweb.int" || host.ends_with(".reliefweb.int")
    }

    fn extract(&self, doc: &Html, text: &str, report: &mut ExtractionReport) {
        let count = |re: &Regex| {
            re.captures(text)
                .and_then(|c| c[1].replace(',', "").parse::<i64>().ok())
        };

        if let Some(n) = count(&AFFECTED) {
            report.set_field(fields::AFFECTED_POPULATION, FieldValue::Int(n), FieldOrigin::Structured);
        }
        if let Some(n) = count(&DEATHS) {
            report.set_field(fields::DEATHS, FieldValue::Int(n), FieldOrigin::Structured);
        }
        if let Some(n) = count(&DISPLACED) {
            report.set_field(fields::DISPLACED, FieldValue::Int(n), FieldOrigin::Structured);
        }
        if let Some(mm) = RAIN
            .captures(text)
            .and_then(|c| c[1].parse::<f64>().ok())
        {
            report.set_field(fields::PRECIPITATION_MM, FieldValue::Float(mm), FieldOrigin::Structured);
        }

        if let Some(date) = EVENT_DATE.captures(text).and_then(|c| iso_date(&c)) {
            report.set_field(
                fields::EVENT_DATE_EXTRACTED,
                FieldValue::Text(date),
                FieldOrigin::Structured,
            );
        }

        if let Some(location) = location_after_heading(doc) {
            report.set_field(
                fields::LOCATION_DETAILS,
                FieldValue::Text(location),
                FieldOrigin::Structured,
            );
        }
    }
}

/// `12 May 2024` → `2024-05-12`.
fn iso_date(captures: &regex::Captures<'_>) -> Option<String> {
    let day: u32 = captures[1].parse().ok()?;
    let month = month_number(&captures[2])?;
    let year = &captures[3];
    Some(format!("{year}-{month:02}-{day:02}"))
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(n)
}

/// Text of the element following an `h2`/`h3` heading that mentions a
/// location.
fn location_after_heading(doc: &Html) -> Option<String> {
    static HEADINGS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h2, h3").expect("valid selector"));

    for heading in doc.select(&HEADINGS) {
        let title: String = heading.text().collect();
        if !LOCATION_HEADING.is_match(&title) {
            continue;
        }
        let Some(following) = heading.next_siblings().find_map(scraper::ElementRef::wrap)
        else {
            continue;
        };
        let text = following
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> ExtractionReport {
        let doc = Html::parse_document(html);
        let text = crate::clean::clean_text(&doc);
        let mut report =
            ExtractionReport::empty("https://reliefweb.int/report/brazil/x", "reliefweb.int");
        ReliefwebStrategy.extract(&doc, &text, &mut report);
        report
    }

    #[test]
    fn reads_impact_counts_from_prose() {
        let report = run(
            "<p>Heavy rain left 12,500 people affected, 3 deaths and \
             1,200 displaced across the state.</p>",
        );
        assert_eq!(
            report.fields.get(fields::AFFECTED_POPULATION),
            Some(&FieldValue::Int(12_500))
        );
        assert_eq!(report.fields.get(fields::DEATHS), Some(&FieldValue::Int(3)));
        assert_eq!(report.fields.get(fields::DISPLACED), Some(&FieldValue::Int(1_200)));
        assert_eq!(
            report.origin_by_field.get(fields::DEATHS),
            Some(&FieldOrigin::Structured)
        );
    }

    #[test]
    fn converts_event_date_to_iso() {
        let report = run("<p>The floods started on 2 May 2024 in the south.</p>");
        assert_eq!(
            report.fields.get(fields::EVENT_DATE_EXTRACTED),
            Some(&FieldValue::Text("2024-05-02".to_owned()))
        );
    }

    #[test]
    fn reads_location_after_heading() {
        let report = run(
            "<h2>Location</h2><p>Rio Grande do Sul, Brazil</p>\
             <h2>Response</h2><p>Teams deployed.</p>",
        );
        assert_eq!(
            report.fields.get(fields::LOCATION_DETAILS),
            Some(&FieldValue::Text("Rio Grande do Sul, Brazil".to_owned()))
        );
    }

    #[test]
    fn missing_sections_leave_fields_unset() {
        let report = run("<p>No numbers here.</p>");
        assert!(report.fields.is_empty());
    }
}
