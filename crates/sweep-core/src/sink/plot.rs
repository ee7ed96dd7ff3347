//! SVG line plot of a finished sweep.
//!
//! The x axis follows the data, the y axis is fixed by [`PlotConfig::y_range`]
//! and outputs are clamped into it for display only.

use super::write_text_atomic;
use crate::domain::{ResultSpace, SweepError, SweepResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Plot appearance.
///
/// Defaults reproduce the reference figure: red half-transparent curve,
/// `[0, 1]` output axis and a dashed grid.
#[derive(Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_range: (f64, f64),
    pub line_color: RGBColor,
    pub line_opacity: f64,
    pub line_width: u32,
    /// Grid lines per axis; zero disables the grid.
    pub grid_divisions: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Reflectance sweep".to_string(),
            x_label: "Frequency (2πc/a)".to_string(),
            y_label: "Reflectance".to_string(),
            y_range: (0.0, 1.0),
            line_color: RED,
            line_opacity: 0.5,
            line_width: 2,
            grid_divisions: 10,
        }
    }
}

impl PlotConfig {
    fn validate(&self) -> SweepResult<()> {
        let (low, high) = self.y_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(SweepError::config(format!(
                "plot y range [{low}, {high}] must be finite and increasing"
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SweepError::config("plot dimensions must be non-zero"));
        }
        Ok(())
    }
}

pub fn render_svg(results: &ResultSpace, config: &PlotConfig) -> SweepResult<String> {
    config.validate()?;
    let x_range = results
        .input_bounds()
        .ok_or_else(|| SweepError::config("cannot plot an empty sweep"))?;

    let points = display_points(results, config.y_range);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        draw_sweep(&root, &points, x_range, config)
            .map_err(|source| SweepError::sink("<svg>", source))?;
    }
    Ok(svg)
}

pub fn write_plot(path: &Path, results: &ResultSpace, config: &PlotConfig) -> SweepResult<()> {
    check_plot_path(path)?;
    let svg = render_svg(results, config)?;
    write_text_atomic(path, &svg)
}

/// Only SVG output is supported.
pub fn check_plot_path(path: &Path) -> SweepResult<()> {
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(SweepError::config(format!(
            "plot output '{}' must use the .svg extension",
            path.display()
        )));
    }
    Ok(())
}

fn display_points(results: &ResultSpace, (low, high): (f64, f64)) -> Vec<(f64, f64)> {
    results
        .iter()
        .map(|result| (result.input, result.output.clamp(low, high)))
        .collect()
}

fn grid_ticks(low: f64, high: f64, divisions: usize) -> Vec<f64> {
    if divisions == 0 {
        return Vec::new();
    }
    let step = (high - low) / divisions as f64;
    (0..=divisions).map(|tick| low + tick as f64 * step).collect()
}

/// Splits the segment `from -> to` into dashes covering `duty` of each period.
fn dashes(from: (f64, f64), to: (f64, f64), periods: usize, duty: f64) -> Vec<[(f64, f64); 2]> {
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..periods)
        .map(|period| {
            let start = period as f64 / periods as f64;
            let end = start + duty / periods as f64;
            [lerp(start), lerp(end)]
        })
        .collect()
}

fn draw_sweep<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    (x_min, x_max): (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let (y_min, y_max) = config.y_range;
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .draw()?;

    let grid_style = BLACK.mix(0.25).stroke_width(1);
    let mut grid = Vec::new();
    for x in grid_ticks(x_min, x_max, config.grid_divisions) {
        grid.extend(dashes((x, y_min), (x, y_max), 40, 0.6));
    }
    for y in grid_ticks(y_min, y_max, config.grid_divisions) {
        grid.extend(dashes((x_min, y), (x_max, y), 60, 0.6));
    }
    chart.draw_series(
        grid.into_iter()
            .map(|segment| PathElement::new(segment.to_vec(), grid_style)),
    )?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        config
            .line_color
            .mix(config.line_opacity)
            .stroke_width(config.line_width),
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PlotConfig, dashes, display_points, grid_ticks, render_svg, write_plot};
    use crate::aggregate::merge;
    use crate::domain::{ResultSpace, Sample, SampleResult};
    use std::path::Path;

    fn sweep() -> ResultSpace {
        let results = [(0.25, 0.2), (0.3, 1.4), (0.35, -0.1)]
            .into_iter()
            .enumerate()
            .map(|(index, (input, output))| SampleResult::new(Sample { index, input }, output))
            .collect();
        merge(vec![results], 3).expect("merge should succeed")
    }

    #[test]
    fn outputs_are_clamped_for_display_only() {
        let results = sweep();
        let points = display_points(&results, (0.0, 1.0));
        assert_eq!(points, vec![(0.25, 0.2), (0.3, 1.0), (0.35, 0.0)]);
        assert_eq!(results.output_at(1), Some(1.4));
    }

    #[test]
    fn grid_ticks_include_both_edges() {
        let ticks = grid_ticks(0.0, 1.0, 4);
        assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(grid_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn dashes_leave_gaps_between_segments() {
        let segments = dashes((0.0, 0.0), (0.0, 1.0), 4, 0.5);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], [(0.0, 0.0), (0.0, 0.125)]);
        assert_eq!(segments[3], [(0.0, 0.75), (0.0, 0.875)]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let results = sweep();
        let first = render_svg(&results, &PlotConfig::default()).expect("render should succeed");
        let second = render_svg(&results, &PlotConfig::default()).expect("render should succeed");
        assert!(first.contains("<svg"));
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_y_range_is_rejected() {
        let config = PlotConfig {
            y_range: (1.0, 0.0),
            ..PlotConfig::default()
        };
        let error = render_svg(&sweep(), &config).expect_err("range should be rejected");
        assert_eq!(error.placeholder(), "INPUT.CONFIG");
    }

    #[test]
    fn non_svg_paths_are_rejected_before_rendering() {
        let error = write_plot(Path::new("plot.png"), &sweep(), &PlotConfig::default())
            .expect_err("png output is unsupported");
        assert_eq!(error.placeholder(), "INPUT.CONFIG");
    }
}
