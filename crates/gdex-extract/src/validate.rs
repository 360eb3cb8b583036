//! Final cleanup of an extracted field map.
//!
//! Applied after confidence scoring; running it on an already-clean map
//! changes nothing, so the engine can apply it unconditionally.

use std::collections::BTreeMap;

use gdex_core::{fields, FieldValue};

const TEXT_TRUNCATE_AT: usize = 1000;
const TRUNCATION_MARKER: char = '…';

/// Cleans `fields` in place and returns the names that were dropped so the
/// caller can prune the confidence and origin maps.
pub(crate) fn clean_fields(map: &mut BTreeMap<String, FieldValue>) -> Vec<String> {
    let mut dropped = Vec::new();

    map.retain(|name, value| {
        let keep = match value {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Int(n) => *n >= 0 || fields::allows_negative(name),
            FieldValue::Float(f) => f.is_finite() && (*f >= 0.0 || fields::allows_negative(name)),
        };
        if !keep {
            dropped.push(name.clone());
        }
        keep
    });

    for (name, value) in map.iter_mut() {
        match value {
            FieldValue::Float(f) if !fields::allows_negative(name) => {
                *f = (*f * 100.0).round() / 100.0;
            }
            FieldValue::Text(text) => {
                if text.chars().count() > TEXT_TRUNCATE_AT {
                    let mut truncated: String = text.chars().take(TEXT_TRUNCATE_AT).collect();
                    truncated.push(TRUNCATION_MARKER);
                    *text = truncated;
                }
            }
            _ => {}
        }
    }

    dropped
}
