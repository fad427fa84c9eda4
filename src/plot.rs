//! Length chart rendering
//!
//! Draws the filtered records as a single line-with-markers series,
//! longest record first, and rasterizes the chart to a PNG. The SVG
//! document is composed with the `svg` crate and rendered with `resvg`.
//!
//! Chart shape: 1000x500 surface, x axis labeled with accession ids
//! rotated 90 degrees, y axis is sequence length, fixed title
//! "GenBank Record Lengths".

use crate::error::{GbfetchError, Result};
use crate::summary::{sort_for_plot, SequenceSummary};
use std::path::Path;
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};
use svg::Document;

/// Default plot output filename
pub const DEFAULT_PLOT_PATH: &str = "plot.png";

/// Output raster size (the 10x5 figure at 100 px per unit)
pub const FIG_WIDTH: u32 = 1000;
/// Output raster height
pub const FIG_HEIGHT: u32 = 500;

const PLOT_LEFT: f32 = 80.0;
const PLOT_RIGHT: f32 = FIG_WIDTH as f32 - 20.0;
const PLOT_TOP: f32 = 50.0;
const PLOT_BOTTOM: f32 = FIG_HEIGHT as f32 - 140.0;

const SERIES_COLOR: &str = "#1f77b4";
const AXIS_COLOR: &str = "#333333";
const Y_TICK_COUNT: usize = 5;

/// Render the length chart for a non-empty row set
///
/// Rows are re-sorted by length descending (stable on ties) before
/// drawing; the caller's slice is left untouched. The file at `path` is
/// overwritten silently.
pub fn render_length_plot<P: AsRef<Path>>(rows: &[SequenceSummary], path: P) -> Result<()> {
    if rows.is_empty() {
        return Err(GbfetchError::Render(
            "cannot render a chart with no records".to_string(),
        ));
    }

    let sorted = sort_for_plot(rows);
    let svg_text = length_plot_svg(&sorted);
    rasterize_to_png(&svg_text, path.as_ref())
}

/// Compose the chart as an SVG document
///
/// Expects rows already in plot order (length descending).
fn length_plot_svg(sorted: &[SequenceSummary]) -> String {
    let n = sorted.len();
    let plot_width = PLOT_RIGHT - PLOT_LEFT;
    let plot_height = PLOT_BOTTOM - PLOT_TOP;

    let max_len = sorted.iter().map(|r| r.length).max().unwrap_or(0);
    let min_len = sorted.iter().map(|r| r.length).min().unwrap_or(0);
    // Pad the value range so extreme points stay off the frame edges
    let span = (max_len - min_len).max(1) as f32;
    let y_min = min_len as f32 - span * 0.05;
    let y_max = max_len as f32 + span * 0.05;

    let x_for = |idx: usize| PLOT_LEFT + (idx as f32 + 0.5) * plot_width / n as f32;
    let y_for = |value: f32| PLOT_BOTTOM - (value - y_min) / (y_max - y_min) * plot_height;

    let mut doc = Document::new()
        .set("viewBox", (0, 0, FIG_WIDTH, FIG_HEIGHT))
        .set("width", FIG_WIDTH)
        .set("height", FIG_HEIGHT)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", FIG_WIDTH)
                .set("height", FIG_HEIGHT)
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new("GenBank Record Lengths")
                .set("x", (PLOT_LEFT + PLOT_RIGHT) / 2.0)
                .set("y", PLOT_TOP - 18.0)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 16)
                .set("fill", AXIS_COLOR),
        );

    // Axes
    doc = doc
        .add(
            Line::new()
                .set("x1", PLOT_LEFT)
                .set("y1", PLOT_TOP)
                .set("x2", PLOT_LEFT)
                .set("y2", PLOT_BOTTOM)
                .set("stroke", AXIS_COLOR)
                .set("stroke-width", 1),
        )
        .add(
            Line::new()
                .set("x1", PLOT_LEFT)
                .set("y1", PLOT_BOTTOM)
                .set("x2", PLOT_RIGHT)
                .set("y2", PLOT_BOTTOM)
                .set("stroke", AXIS_COLOR)
                .set("stroke-width", 1),
        );

    // Y ticks and labels
    for tick in 0..Y_TICK_COUNT {
        let value = y_min + (y_max - y_min) * tick as f32 / (Y_TICK_COUNT - 1) as f32;
        let y = y_for(value);
        doc = doc
            .add(
                Line::new()
                    .set("x1", PLOT_LEFT - 5.0)
                    .set("y1", y)
                    .set("x2", PLOT_LEFT)
                    .set("y2", y)
                    .set("stroke", AXIS_COLOR)
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(format!("{}", value.round() as i64))
                    .set("x", PLOT_LEFT - 10.0)
                    .set("y", y + 4.0)
                    .set("text-anchor", "end")
                    .set("font-family", "sans-serif")
                    .set("font-size", 11)
                    .set("fill", AXIS_COLOR),
            );
    }

    // X ticks and rotated accession labels
    for (idx, row) in sorted.iter().enumerate() {
        let x = x_for(idx);
        doc = doc
            .add(
                Line::new()
                    .set("x1", x)
                    .set("y1", PLOT_BOTTOM)
                    .set("x2", x)
                    .set("y2", PLOT_BOTTOM + 5.0)
                    .set("stroke", AXIS_COLOR)
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(row.accession.clone())
                    .set("x", x)
                    .set("y", PLOT_BOTTOM + 10.0)
                    .set("text-anchor", "end")
                    .set(
                        "transform",
                        format!("rotate(-90 {} {})", x, PLOT_BOTTOM + 10.0),
                    )
                    .set("font-family", "sans-serif")
                    .set("font-size", 10)
                    .set("fill", AXIS_COLOR),
            );
    }

    // Single connected series with circular markers
    let points = sorted
        .iter()
        .enumerate()
        .map(|(idx, row)| format!("{},{}", x_for(idx), y_for(row.length as f32)))
        .collect::<Vec<_>>()
        .join(" ");
    doc = doc.add(
        Polyline::new()
            .set("points", points)
            .set("fill", "none")
            .set("stroke", SERIES_COLOR)
            .set("stroke-width", 1.5),
    );
    for (idx, row) in sorted.iter().enumerate() {
        doc = doc.add(
            Circle::new()
                .set("cx", x_for(idx))
                .set("cy", y_for(row.length as f32))
                .set("r", 3.5)
                .set("fill", SERIES_COLOR),
        );
    }

    // Axis labels
    doc = doc
        .add(
            Text::new("Accession")
                .set("x", (PLOT_LEFT + PLOT_RIGHT) / 2.0)
                .set("y", FIG_HEIGHT as f32 - 12.0)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 13)
                .set("fill", AXIS_COLOR),
        )
        .add(
            Text::new("Sequence Length")
                .set("x", 22.0)
                .set("y", (PLOT_TOP + PLOT_BOTTOM) / 2.0)
                .set("text-anchor", "middle")
                .set(
                    "transform",
                    format!("rotate(-90 22 {})", (PLOT_TOP + PLOT_BOTTOM) / 2.0),
                )
                .set("font-family", "sans-serif")
                .set("font-size", 13)
                .set("fill", AXIS_COLOR),
        );

    doc.to_string()
}

/// Rasterize the SVG document to a PNG file
fn rasterize_to_png(svg_text: &str, path: &Path) -> Result<()> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg_text, &options)
        .map_err(|e| GbfetchError::Render(format!("SVG parse failed: {}", e)))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(FIG_WIDTH, FIG_HEIGHT)
        .ok_or_else(|| GbfetchError::Render("could not allocate render surface".to_string()))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    pixmap
        .save_png(path)
        .map_err(|e| GbfetchError::Render(format!("PNG encoding failed: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(accession: &str, length: u64) -> SequenceSummary {
        SequenceSummary {
            accession: accession.to_string(),
            length,
            description: String::new(),
        }
    }

    #[test]
    fn svg_has_title_labels_and_one_marker_per_row() {
        let rows = vec![row("X1", 1200), row("X2", 800), row("X3", 500)];
        let svg_text = length_plot_svg(&rows);

        assert!(svg_text.contains("GenBank Record Lengths"));
        assert!(svg_text.contains("Sequence Length"));
        assert!(svg_text.contains("Accession"));
        assert_eq!(svg_text.matches("<circle").count(), 3);
        assert_eq!(svg_text.matches("<polyline").count(), 1);
    }

    #[test]
    fn accession_labels_appear_in_plot_order() {
        let rows = vec![row("LONG.1", 1200), row("SHORT.1", 500)];
        let svg_text = length_plot_svg(&rows);
        let long_pos = svg_text.find("LONG.1").unwrap();
        let short_pos = svg_text.find("SHORT.1").unwrap();
        assert!(long_pos < short_pos);
    }

    #[test]
    fn equal_lengths_do_not_break_scaling() {
        let rows = vec![row("E1", 700), row("E2", 700)];
        let svg_text = length_plot_svg(&rows);
        assert_eq!(svg_text.matches("<circle").count(), 2);
        assert!(!svg_text.contains("NaN"));
    }

    #[test]
    fn single_row_renders() {
        let svg_text = length_plot_svg(&[row("ONLY.1", 42)]);
        assert_eq!(svg_text.matches("<circle").count(), 1);
    }

    #[test]
    fn empty_row_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        assert!(render_length_plot(&[], &path).is_err());
        assert!(!path.exists());
    }
}
