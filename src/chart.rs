use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::info;

pub const DOMAIN_CHART_FILE: &str = "top_domains.png";
pub const WORD_CHART_FILE: &str = "top_words.png";

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Render a vertical bar chart for a ranked table.
///
/// An empty table writes nothing and returns `false` so the caller can skip
/// the artifact without treating it as a failure.
pub fn render_bar_chart(path: &Path, title: &str, entries: &[(String, u32)]) -> Result<bool> {
    if entries.is_empty() {
        info!(component = "chart", chart = title, "Table is empty, skipping chart");
        return Ok(false);
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_count = entries.iter().map(|(_, count)| *count).max().unwrap_or(1);
    let y_top = max_count + max_count / 10 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d((0..entries.len()).into_segmented(), 0u32..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(entries.len())
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => entries
                .get(*i)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0u32),
                (SegmentValue::Exact(i + 1), *count),
            ],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart {:?}", path))?;
    info!(
        component = "chart",
        chart = title,
        path = ?path,
        bars = entries.len(),
        "Chart written"
    );
    Ok(true)
}
