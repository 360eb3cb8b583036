//! Strategy for IFRC appeal pages.
//!
//! IFRC publishes impact figures in two-column tables; rows are mapped
//! through a fixed set of label synonyms and the value cell is reduced to
//! its digits.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use gdex_core::{fields, FieldValue};

use crate::report::{ExtractionReport, FieldOrigin};
use crate::strategy::HostStrategy;

static ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tr").expect("valid selector"));
static CELLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("valid selector"));

pub(crate) struct IfrcStrategy;

impl HostStrategy for IfrcStrategy {
    fn name(&self) -> &'static str {
        "ifrc"
    }

    fn matches(&self, host: &str) -> bool {
        host == "ifrc.org" || host.ends_with(".ifrc.org")
    }

    fn extract(&self, doc: &Html, _text: &str, report: &mut ExtractionReport) {
        for row in doc.select(&ROWS) {
            let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
            if cells.len() < 2 {
                continue;
            }
            let label = cell_text(cells[0]).to_lowercase();
            let Some(field) = field_for_label(&label) else {
                continue;
            };
            if let Some(n) = digits(&cell_text(cells[1])) {
                report.set_field(field, FieldValue::Int(n), FieldOrigin::Structured);
            }
        }
    }
}

fn field_for_label(label: &str) -> Option<&'static str> {
    if label.contains("affected") {
        Some(fields::AFFECTED_POPULATION)
    } else if label.contains("deaths") || label.contains("killed") {
        Some(fields::DEATHS)
    } else if label.contains("displaced") || label.contains("homeless") {
        Some(fields::DISPLACED)
    } else if label.contains("injured") {
        Some(fields::INJURED)
    } else {
        None
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

fn digits(value: &str) -> Option<i64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
