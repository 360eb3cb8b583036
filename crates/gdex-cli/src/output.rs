//! Output files for a pipeline run: full JSON dataset, flattened CSV
//! feature matrix, and a human-readable quality report.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;

use anyhow::Context;

use gdex_pipeline::{Dataset, FeatureRecord, FEATURE_NAMES};

pub(crate) fn write_all(dataset: &Dataset, prefix: &str) -> anyhow::Result<()> {
    let json_path = format!("{prefix}_complete.json");
    let json = serde_json::to_string_pretty(dataset).context("serializing dataset")?;
    fs::write(&json_path, json).with_context(|| format!("writing {json_path}"))?;

    let csv_path = format!("{prefix}_features.csv");
    fs::write(&csv_path, features_csv(dataset)).with_context(|| format!("writing {csv_path}"))?;

    let report_path = format!("{prefix}_quality_report.txt");
    fs::write(&report_path, quality_report(dataset))
        .with_context(|| format!("writing {report_path}"))?;

    tracing::info!(json_path, csv_path, report_path, "outputs written");
    Ok(())
}

fn features_csv(dataset: &Dataset) -> String {
    let mut out = String::new();
    let header: Vec<&str> = FEATURE_NAMES
        .iter()
        .copied()
        .chain(["data_quality_score", "extraction_timestamp"])
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for record in &dataset.feature_matrix {
        out.push_str(&csv_row(record));
        out.push('\n');
    }
    out
}

fn csv_row(r: &FeatureRecord) -> String {
    let opt_f = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let opt_i = |v: Option<i64>| v.map(|x| x.to_string()).unwrap_or_default();
    let opt_s = |v: &Option<String>| v.as_deref().map(csv_escape).unwrap_or_default();

    [
        csv_escape(&r.event_id),
        csv_escape(&r.disaster_type),
        csv_escape(&r.event_date),
        r.season.clone(),
        r.month.to_string(),
        r.year.to_string(),
        csv_escape(&r.location),
        opt_f(r.latitude),
        opt_f(r.longitude),
        opt_s(&r.region),
        opt_f(r.precipitation_mm),
        opt_f(r.temperature_c),
        opt_f(r.humidity_percent),
        opt_f(r.wind_speed_kmh),
        opt_f(r.water_level_m),
        opt_i(r.affected_population),
        opt_i(r.deaths),
        opt_i(r.injured),
        opt_i(r.displaced),
        opt_f(r.economic_loss_usd),
        format!("{:.3}", r.data_quality_score),
        r.extraction_timestamp.to_rfc3339(),
    ]
    .join(",")
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

fn quality_report(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Data quality report");
    let _ = writeln!(out, "===================");
    let _ = writeln!(out, "Events processed:  {}", dataset.records.len());
    let _ = writeln!(out, "Usable samples:    {}", dataset.metadata.sample_count);
    let _ = writeln!(
        out,
        "Threshold used:    {:.2}",
        dataset.metadata.threshold_used
    );

    if !dataset.records.is_empty() {
        let completeness: Vec<f64> = dataset.records.iter().map(|r| r.completeness).collect();
        #[allow(clippy::cast_precision_loss)]
        let mean = completeness.iter().sum::<f64>() / completeness.len() as f64;
        let min = completeness.iter().copied().fold(f64::INFINITY, f64::min);
        let max = completeness
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let _ = writeln!(out, "Completeness mean: {mean:.3}");
        let _ = writeln!(out, "Completeness min:  {min:.3}");
        let _ = writeln!(out, "Completeness max:  {max:.3}");
    }

    let mut error_counts: HashMap<&str, usize> = HashMap::new();
    for record in &dataset.records {
        for error in &record.errors {
            *error_counts.entry(error.as_str()).or_default() += 1;
        }
    }
    if !error_counts.is_empty() {
        let _ = writeln!(out, "\nMost common errors:");
        let mut ranked: Vec<_> = error_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (error, count) in ranked.into_iter().take(10) {
            let _ = writeln!(out, "  {count:>4}  {error}");
        }
    }
    out
}
