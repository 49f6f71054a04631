//! Comparison chart rendering
//!
//! One series per (scheduler, version) pair: resource-block count on the
//! x-axis, schedulability percentage on the y-axis, optional logarithmic
//! scaling on either axis, optional per-point value annotations.

use crate::json_output::JsonReport;
use anyhow::{Context, Result};
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::prelude::*;
use std::path::Path;

/// Chart rendering options
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub log_x: bool,
    pub log_y: bool,
    /// Draw each point's value above it
    pub annotate: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            log_x: false,
            log_y: false,
            annotate: false,
            width: 1000,
            height: 600,
        }
    }
}

struct Series {
    name: String,
    color: RGBAColor,
    marker: usize,
    points: Vec<(f64, f64)>,
}

/// Render the comparison chart for a report into a PNG file.
pub fn render_chart(report: &JsonReport, path: &Path, opts: &PlotOptions) -> Result<()> {
    let series = gather_series(report, opts.log_y);

    let (x_range, y_range) = ranges(&series, opts);

    let root = BitMapBackend::new(path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("failed to initialize chart {}", path.display()))?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60);

    match (opts.log_x, opts.log_y) {
        (false, false) => {
            let mut chart = builder.build_cartesian_2d(x_range, y_range)?;
            draw_chart(&mut chart, &series, opts)?;
        }
        (true, false) => {
            let mut chart = builder.build_cartesian_2d(x_range.log_scale(), y_range)?;
            draw_chart(&mut chart, &series, opts)?;
        }
        (false, true) => {
            let mut chart = builder.build_cartesian_2d(x_range, y_range.log_scale())?;
            draw_chart(&mut chart, &series, opts)?;
        }
        (true, true) => {
            let mut chart =
                builder.build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;
            draw_chart(&mut chart, &series, opts)?;
        }
    }

    root.present()
        .with_context(|| format!("failed to write chart {}", path.display()))?;
    Ok(())
}

/// One (scheduler, version) series per report section; a log-scaled
/// y-axis drops non-positive values since they have no log coordinate.
fn gather_series(report: &JsonReport, log_y: bool) -> Vec<Series> {
    let mut series = Vec::new();
    for version in &report.versions {
        for (scheduler, buckets) in &version.schedulers {
            let points: Vec<(f64, f64)> = buckets
                .iter()
                .map(|b| (f64::from(b.rb), b.schedulability))
                .filter(|&(_, y)| !log_y || y > 0.0)
                .collect();
            let idx = series.len();
            series.push(Series {
                name: format!("{} ({})", scheduler, version.label),
                color: Palette99::pick(idx).to_rgba(),
                marker: idx,
                points,
            });
        }
    }
    series
}

fn ranges(series: &[Series], opts: &PlotOptions) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let xs: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(x, _)| x))
        .collect();
    let ys: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .collect();

    let x_min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().cloned().fold(1.0, f64::max);
    let x_range = if xs.is_empty() {
        1.0..10.0
    } else if opts.log_x {
        (x_min * 0.8)..(x_max * 1.25)
    } else {
        0.0..(x_max * 1.05)
    };

    let y_range = if opts.log_y {
        let y_min_pos = ys
            .iter()
            .cloned()
            .filter(|&y| y > 0.0)
            .fold(f64::INFINITY, f64::min);
        let floor = if y_min_pos.is_finite() {
            y_min_pos * 0.5
        } else {
            0.1
        };
        floor..150.0
    } else {
        0.0..110.0
    };

    (x_range, y_range)
}

fn draw_chart<'a, X, Y>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, Y>>,
    series: &[Series],
    opts: &PlotOptions,
) -> Result<()>
where
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    chart
        .configure_mesh()
        .x_desc("Number of RBs")
        .y_desc("Schedulability (%)")
        .light_line_style(WHITE.mix(0.3))
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.clone(), color.stroke_width(2)))?
            .label(s.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        // Marker shapes cycle so overlapping series stay tellable apart
        let marker = s.marker;
        chart.draw_series(s.points.iter().map(|&(x, y)| match marker % 3 {
            0 => Circle::new((x, y), 4, color.filled()).into_dyn(),
            1 => TriangleMarker::new((x, y), 5, color.filled()).into_dyn(),
            _ => Cross::new((x, y), 4, color.stroke_width(2)).into_dyn(),
        }))?;

        if opts.annotate {
            chart.draw_series(s.points.iter().map(|&(x, y)| {
                let y_text = if opts.log_y { y * 1.2 } else { y * 1.05 };
                Text::new(
                    format!("{:.2}", y),
                    (x, y_text),
                    ("sans-serif", 12).into_font(),
                )
            }))?;
        }
    }

    if series.iter().any(|s| !s.points.is_empty()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}
