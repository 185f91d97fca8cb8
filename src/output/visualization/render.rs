//! Drawing a laid-out [`Figure`] with `plotters`
//!
//! - `.svg` paths use the SVG backend, anything else the bitmap backend
//! - the drawing area is split evenly into `nrows x ncols` panels
//! - every panel shares the figure's x range (time)
//! - the first twin axis of a panel becomes the secondary y coordinate; further
//!   twins of the same panel share that scale
//! - dashed, dash-dot and dotted lines are cut into path pieces measured in
//!   axis-normalized length, so dashes look the same whatever the data units

use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use std::error::Error;
use tracing::debug;

use super::config::{LabelStyle, PlotConfig};
use super::layout::{padded_range, Axis, Figure, Line, Panel};
use crate::error::{PlotError, Result};

/// Twin axes of one panel folded onto the single secondary scale
struct SecondaryAxis<'a> {
    lines: Vec<&'a Line>,
    range: (f64, f64),
    color: Option<RGBColor>,
    label: String,
}

impl<'a> SecondaryAxis<'a> {
    fn merge(twins: &'a [Axis], style: LabelStyle) -> Option<Self> {
        if twins.is_empty() {
            return None;
        }

        if twins.len() > 1 {
            debug!(twins = twins.len(), "twin axes share one secondary scale");
        }

        let lines: Vec<&Line> = twins.iter().flat_map(|a| a.lines.iter()).collect();
        let range = padded_range(lines.iter().flat_map(|l| l.values.iter().copied()));
        let color = twins.iter().rev().find_map(|a| a.color);
        let label = twins
            .iter()
            .map(|a| a.ylabel.render(style))
            .collect::<Vec<_>>()
            .join("; ");

        Some(Self {
            lines,
            range,
            color,
            label,
        })
    }
}

/// Render a figure to an image file
///
/// # Arguments
///
/// * `figure`      — Laid-out figure (see [`layout_figure`](super::layout_figure))
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — Image size, background, fonts and label style
///
/// # Errors
///
/// [`PlotError::InvalidConfig`] when the figure does not match its grid or the
/// image has no area, [`PlotError::Render`] when the backend fails.
pub fn render_figure(figure: &Figure, output_path: &str, config: &PlotConfig) -> Result<()> {
    if figure.panels.len() != figure.nrows * figure.ncols || figure.panels.is_empty() {
        return Err(PlotError::config(format!(
            "figure has {} panels for a {}x{} grid",
            figure.panels.len(),
            figure.nrows,
            figure.ncols
        )));
    }

    if config.width == 0 || config.height == 0 {
        return Err(PlotError::config("image width and height must be positive"));
    }

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    debug!(path = output_path, backend = ext, "rendering figure");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            draw_figure(backend, figure, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            draw_figure(backend, figure, config)
        }
    }
    .map_err(PlotError::render)
}

// =================================================================================================
// Private drawing
// =================================================================================================

fn draw_figure<DB: DrawingBackend>(
    backend: DB,
    figure: &Figure,
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let root = match config.title {
        Some(ref title) => root.titled(title, ("sans-serif", 30).into_font())?,
        None => root,
    };

    let areas = root.split_evenly((figure.nrows, figure.ncols));
    let x_range = figure.x_range();

    for (area, panel) in areas.iter().zip(figure.panels.iter()) {
        draw_panel(area, panel, &figure.time, x_range, config)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    time: &[f64],
    (x0, x1): (f64, f64),
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let style = config.label_style;
    let primary = panel.primary.as_ref();
    let (y0, y1) = primary.map_or((0.0, 1.0), Axis::y_range);
    let secondary = SecondaryAxis::merge(&panel.twins, style);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70);
    if secondary.is_some() {
        builder.right_y_label_area_size(70);
    }

    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(config.xlabel.as_str())
        .y_desc(primary.map_or("", |a| a.ylabel.render(style)));
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    if let Some(axis) = primary {
        for line in &axis.lines {
            let shape = ShapeStyle::from(&line.color).stroke_width(config.line_width);
            let pieces = line_pieces(time, line, (x0, x1), (y0, y1));
            let anno = chart.draw_series(pieces.into_iter().map(|p| PathElement::new(p, shape)))?;

            if let Some(ref label) = line.label {
                let color = line.color;
                anno.label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
        }
    }

    let has_legend = panel.axes().any(|a| a.legend.is_some());

    match secondary {
        None => {
            if has_legend {
                draw_legend(&mut chart, config)?;
            }
        }
        Some(secondary) => {
            let (s0, s1) = secondary.range;
            let axis_color = secondary.color.unwrap_or(BLACK);
            let mut chart = chart.set_secondary_coord(x0..x1, s0..s1);

            chart
                .configure_secondary_axes()
                .y_desc(secondary.label.as_str())
                .y_label_formatter(&|y| format!("{:.3}", y))
                .axis_style(axis_color)
                .label_style(("sans-serif", 15).into_font().color(&axis_color))
                .axis_desc_style(("sans-serif", 16).into_font().color(&axis_color))
                .draw()?;

            for line in &secondary.lines {
                let shape = ShapeStyle::from(&line.color).stroke_width(config.line_width);
                let pieces = line_pieces(time, line, (x0, x1), (s0, s1));
                let anno = chart
                    .draw_secondary_series(pieces.into_iter().map(|p| PathElement::new(p, shape)))?;

                if let Some(ref label) = line.label {
                    let color = line.color;
                    anno.label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
                }
            }

            if has_legend {
                draw_legend(&mut *chart, config)?;
            }
        }
    }

    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a, CT: CoordTranslate>(
    chart: &mut ChartContext<'a, DB, CT>,
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Path pieces of a line: gaps at non-finite values, then dashes
fn line_pieces(
    time: &[f64],
    line: &Line,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = vec![Vec::new()];

    for (&t, &y) in time.iter().zip(line.values.iter()) {
        if t.is_finite() && y.is_finite() {
            if let Some(run) = runs.last_mut() {
                run.push((t, y));
            }
        } else if runs.last().is_some_and(|r| !r.is_empty()) {
            runs.push(Vec::new());
        }
    }

    runs.into_iter()
        .filter(|r| !r.is_empty())
        .flat_map(|run| dash_segments(&run, line.style.pattern(), x_range, y_range))
        .collect()
}

/// Cut a polyline into dashes
///
/// `pattern` alternates on and off lengths, measured after scaling both axes
/// to unit length. An empty pattern keeps the polyline whole.
pub(crate) fn dash_segments(
    points: &[(f64, f64)],
    pattern: &[f64],
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    if points.is_empty() {
        return Vec::new();
    }
    if pattern.is_empty() || points.len() < 2 {
        return vec![points.to_vec()];
    }

    let sx = (x_range.1 - x_range.0).abs().max(f64::EPSILON);
    let sy = (y_range.1 - y_range.0).abs().max(f64::EPSILON);

    let mut segments = Vec::new();
    let mut current = vec![points[0]];
    let mut phase = 0;
    let mut left = pattern[0];

    for pair in points.windows(2) {
        let (mut start, end) = (pair[0], pair[1]);
        let dx = (end.0 - start.0) / sx;
        let dy = (end.1 - start.1) / sy;
        let mut remaining = (dx * dx + dy * dy).sqrt();

        while remaining > left {
            let t = left / remaining;
            let cut = (
                start.0 + (end.0 - start.0) * t,
                start.1 + (end.1 - start.1) * t,
            );

            if phase % 2 == 0 {
                current.push(cut);
                segments.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }

            remaining -= left;
            start = cut;
            phase = (phase + 1) % pattern.len();
            left = pattern[phase];
        }

        left -= remaining;
        if phase % 2 == 0 {
            current.push(end);
        }
    }

    if phase % 2 == 0 && current.len() >= 2 {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::data::{StateCatalog, StateData, StateInfo, StateProfiles, StateSeries};
    use crate::output::visualization::config::{LineStyle, PlotOptions};
    use crate::output::visualization::layout::layout_figure;

    fn figure(options: &PlotOptions) -> Figure {
        let time: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let mut profiles = StateProfiles::new(time.clone());
        profiles.insert(StateSeries {
            name: "C".to_string(),
            data: StateData::from_columns(&[
                time.iter().map(|t| (-0.05 * t).exp()).collect(),
                time.iter().map(|t| 1.0 - (-0.05 * t).exp()).collect(),
            ])
            .unwrap(),
            selection: None,
            picks: None,
        });
        profiles.insert(StateSeries {
            name: "T".to_string(),
            data: StateData::from_vec(time.iter().map(|t| 300.0 + 0.5 * t).collect()),
            selection: None,
            picks: None,
        });

        let catalog = StateCatalog::new()
            .with_state("C", StateInfo::new().units("mol/L").index(["A", "B"]))
            .with_state("T", StateInfo::new().units("K"));

        layout_figure(&profiles, &catalog, options).unwrap()
    }

    fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
        assert_relative_eq!(actual.0, expected.0, epsilon = 1e-9);
        assert_relative_eq!(actual.1, expected.1, epsilon = 1e-9);
    }

    #[test]
    fn test_dash_segments_horizontal() {
        let points = [(0.0, 0.0), (1.0, 0.0)];
        let segments = dash_segments(&points, &[0.25, 0.25], (0.0, 1.0), (0.0, 1.0));

        assert_eq!(segments.len(), 2);
        assert_point(segments[0][0], (0.0, 0.0));
        assert_point(segments[0][1], (0.25, 0.0));
        assert_point(segments[1][0], (0.5, 0.0));
        assert_point(segments[1][1], (0.75, 0.0));
    }

    #[test]
    fn test_dash_segments_follow_corners() {
        // One dash spans the corner at (0.5, 0)
        let points = [(0.0, 0.0), (0.5, 0.0), (0.5, 1.0)];
        let segments = dash_segments(&points, &[0.75, 0.1], (0.0, 1.0), (0.0, 1.0));

        assert_eq!(segments[0].len(), 3);
        assert_point(segments[0][1], (0.5, 0.0));
        assert_point(segments[0][2], (0.5, 0.25));
    }

    #[test]
    fn test_dash_segments_scale_with_axes() {
        // Same shape in data units 100x larger gives the same number of dashes
        let small = dash_segments(&[(0.0, 0.0), (1.0, 0.0)], &[0.1, 0.1], (0.0, 1.0), (0.0, 1.0));
        let large = dash_segments(
            &[(0.0, 0.0), (100.0, 0.0)],
            &[0.1, 0.1],
            (0.0, 100.0),
            (0.0, 100.0),
        );
        assert_eq!(small.len(), large.len());
    }

    #[test]
    fn test_solid_keeps_polyline() {
        let points = [(0.0, 1.0), (1.0, 2.0), (2.0, 1.5)];
        let segments = dash_segments(&points, LineStyle::Solid.pattern(), (0.0, 2.0), (1.0, 2.0));
        assert_eq!(segments, vec![points.to_vec()]);
        assert!(dash_segments(&[], &[0.1, 0.1], (0.0, 1.0), (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_line_pieces_break_at_nan() {
        let line = Line {
            state: "T".to_string(),
            column: 0,
            values: vec![1.0, 2.0, f64::NAN, 3.0, 4.0],
            color: RED,
            style: LineStyle::Solid,
            label: None,
        };
        let time = [0.0, 1.0, 2.0, 3.0, 4.0];
        let pieces = line_pieces(&time, &line, (0.0, 4.0), (1.0, 4.0));
        assert_eq!(pieces, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
    }

    #[test]
    fn test_secondary_merge() {
        let options = PlotOptions::default().fig_map(vec![0, 0]);
        let figure = figure(&options);
        let secondary = SecondaryAxis::merge(&figure.panels[0].twins, LabelStyle::Unicode).unwrap();
        assert_eq!(secondary.lines.len(), 1);
        assert_eq!(secondary.label, "T (K)");
        assert!(secondary.range.0 < 300.0 && secondary.range.1 > 324.5);
        assert!(SecondaryAxis::merge(&[], LabelStyle::Unicode).is_none());
    }

    #[test]
    fn test_render_png() {
        let options = PlotOptions::new(PlotConfig::grid(2, 1));
        let figure = figure(&options);
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        render_figure(&figure, path.to_str().unwrap(), &options.config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_svg_with_twin_axis() {
        let options = PlotOptions::default().fig_map(vec![0, 0]);
        let figure = figure(&options);
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        render_figure(&figure, path.to_str().unwrap(), &options.config).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_rejects_mismatched_grid() {
        let options = PlotOptions::new(PlotConfig::grid(2, 1));
        let mut figure = figure(&options);
        figure.nrows = 3;
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        let err = render_figure(&figure, path.to_str().unwrap(), &options.config).unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
    }
}
