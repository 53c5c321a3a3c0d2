use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::aggregate;
use crate::chart;
use crate::normalize;
use crate::report::Report;

pub const REPORT_FILE: &str = "crawl_report.txt";

/// Bars on each chart; the textual word section goes deeper than the chart.
const CHART_TOP_N: usize = 10;

/// Run the full analysis pipeline: load, normalize, aggregate, report.
///
/// Only a missing or corrupt input file is an error. The three structural
/// early exits print their message and end the run cleanly with no report
/// or chart artifacts.
pub fn analyze_crawl_data(input: &Path) -> Result<()> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analyzer", input = ?input, "Starting crawl data analysis");

    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read crawl artifact {:?}", input))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Crawl artifact {:?} is not valid JSON", input))?;

    let records = match normalize::normalize(&value) {
        Ok(records) => records,
        Err(stop) => {
            warn!(action = "stop", component = "normalizer", reason = %stop, "Normalization stopped early");
            println!("{stop}");
            return Ok(());
        }
    };

    let analysis = aggregate::analyze_records(&records);
    let report = Report::from_analysis(&analysis);

    let text = report.render();
    print!("{text}");
    fs::write(REPORT_FILE, &text)
        .with_context(|| format!("Failed to write report to {REPORT_FILE}"))?;

    let mut charts_written = Vec::new();
    if chart::render_bar_chart(
        Path::new(chart::DOMAIN_CHART_FILE),
        "Top 10 Domains",
        &analysis.domain_counts.ranked(CHART_TOP_N),
    )? {
        charts_written.push(chart::DOMAIN_CHART_FILE);
    }
    if chart::render_bar_chart(
        Path::new(chart::WORD_CHART_FILE),
        "Top 10 Words",
        &analysis.word_counts.ranked(CHART_TOP_N),
    )? {
        charts_written.push(chart::WORD_CHART_FILE);
    }

    if charts_written.is_empty() {
        println!("\nAnalysis complete!");
    } else {
        let listing = charts_written
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(" and ");
        println!("\nAnalysis complete! Visualizations saved as {listing}");
    }

    info!(
        action = "complete",
        component = "analyzer",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(())
}
