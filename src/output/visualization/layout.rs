//! Figure layout: panels, twin axes, colors and labels
//!
//! The layout step decides *what* is drawn without touching a backend:
//!
//! 1. Each extracted state is mapped to a panel (`fig_map`, row-major).
//! 2. The first state on a panel uses the panel's primary y-axis. A later state
//!    on the same panel gets a twin axis sharing the x-axis; its color counter
//!    starts after the lines already on the primary axis, and the twin axis is
//!    recolored with its lines' color (see [`color_axis`]).
//! 3. Every component column becomes a [`Line`] with a palette color and a
//!    cycled [`LineStyle`]. The counter restarts at 0 for the next state.
//! 4. Y-labels come from the state name (or a custom label in name
//!    convention) plus the units, kept in LaTeX and Unicode form.
//!
//! The resulting [`Figure`] is what [`plot_function`](super::plot_function)
//! returns, so callers can inspect every decision after rendering.

use plotters::style::RGBColor;
use tracing::{debug, warn};

use super::config::{LabelStyle, LineStyle, PlotOptions};
use crate::data::{StateCatalog, StateInfo, StateProfiles, StateSeries};
use crate::error::{PlotError, Result};
use crate::labels::{latexify_name, unicode_label};

// =================================================================================================
// Figure model
// =================================================================================================

/// An axis label in both renderings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisLabel {
    /// Mathtext/LaTeX form, e.g. `C ($\mathregular{mol \ L^{-1}}$)`
    pub latex: String,

    /// Plain Unicode form, e.g. `C (mol L⁻¹)`
    pub text: String,
}

impl AxisLabel {
    /// The rendering selected by `style`
    pub fn render(&self, style: LabelStyle) -> &str {
        match style {
            LabelStyle::Unicode => &self.text,
            LabelStyle::Latex => &self.latex,
        }
    }
}

/// One plotted column of a state
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// State the line belongs to
    pub state: String,

    /// Column within the extracted state
    pub column: usize,

    /// One value per time point
    pub values: Vec<f64>,

    pub color: RGBColor,
    pub style: LineStyle,

    /// Legend entry, when the state has index labels
    pub label: Option<String>,
}

/// A y-axis and the lines drawn against it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axis {
    pub ylabel: AxisLabel,
    pub lines: Vec<Line>,

    /// Legend entries, one per line
    pub legend: Option<Vec<String>>,

    /// Spine, tick and label color; `None` keeps the default black
    pub color: Option<RGBColor>,
}

impl Axis {
    /// Y range covering every finite value, with a 5% margin
    pub fn y_range(&self) -> (f64, f64) {
        padded_range(self.lines.iter().flat_map(|l| l.values.iter().copied()))
    }
}

/// Recolor an axis: spine, ticks and label
///
/// Used on twin axes so that each secondary scale reads in the color of the
/// lines it belongs to.
pub fn color_axis(axis: &mut Axis, color: RGBColor) {
    axis.color = Some(color);
}

/// One cell of the panel grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Axis of the first state mapped to the panel
    pub primary: Option<Axis>,

    /// Twin axes of the following states, in mapping order
    pub twins: Vec<Axis>,
}

impl Panel {
    /// Lines on the primary axis
    pub fn primary_lines(&self) -> usize {
        self.primary.as_ref().map_or(0, |a| a.lines.len())
    }

    /// Every axis of the panel, primary first
    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.primary.iter().chain(self.twins.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.axes().all(|a| a.lines.is_empty())
    }
}

/// A laid-out figure
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub nrows: usize,
    pub ncols: usize,

    /// Shared x values
    pub time: Vec<f64>,

    /// Panels in row-major order
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Panel at a grid position
    pub fn panel_at(&self, row: usize, col: usize) -> Option<&Panel> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.panels.get(row * self.ncols + col)
    }

    /// X range shared by every panel
    pub fn x_range(&self) -> (f64, f64) {
        padded_range(self.time.iter().copied())
    }

    /// Number of drawn lines across all panels
    pub fn line_count(&self) -> usize {
        self.panels
            .iter()
            .flat_map(|p| p.axes())
            .map(|a| a.lines.len())
            .sum()
    }
}

/// Min/max of the finite values with a 5% margin on each side
///
/// A flat series gets a margin of 5% of its value (or 0.5 around zero), and an
/// empty one the unit range.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return (0.0, 1.0);
    }

    let span = max - min;
    let margin = if span > 0.0 {
        0.05 * span
    } else if min != 0.0 {
        0.05 * min.abs()
    } else {
        0.5
    };

    (min - margin, max + margin)
}

// =================================================================================================
// Layout
// =================================================================================================

/// Y-label of a state: its name or a custom label, plus units
fn axis_label(name: &str, custom: Option<&str>, units: &str, include_units: bool) -> AxisLabel {
    let (mut latex, mut text) = match custom {
        Some(label) => (latexify_name(label, false), unicode_label(label)),
        None => (name.to_string(), name.to_string()),
    };

    if include_units && !units.is_empty() {
        latex.push_str(&format!(" ({})", latexify_name(units, true)));
        text.push_str(&format!(" ({})", unicode_label(units)));
    }

    AxisLabel { latex, text }
}

/// Legend labels of a state, restricted to its picked columns
///
/// Picks are matched against the plotting catalog's labels by name, so a
/// stored result may order its components differently.
fn legend_labels(series: &StateSeries, info: Option<&StateInfo>) -> Result<Vec<String>> {
    let labels = info.map(StateInfo::labels).unwrap_or(&[]);
    if labels.is_empty() {
        return Ok(Vec::new());
    }

    Ok(series
        .label_positions(labels)?
        .into_iter()
        .filter_map(|i| labels.get(i).cloned())
        .collect())
}

/// Lay out extracted profiles on a panel grid
///
/// `catalog` provides units and index labels of the states (for a unit
/// operation, its states and fstates merged).
///
/// # Errors
///
/// - [`PlotError::InvalidConfig`] for an empty panel grid
/// - [`PlotError::LengthMismatch`] when a state does not match the time vector
/// - [`PlotError::FigureMapTooLong`], [`PlotError::PanelOutOfRange`] for a bad `fig_map`
/// - [`PlotError::MissingLabels`] when fewer y-labels than mapped states are given
/// - [`PlotError::UnknownName`] when a column pick is missing from the catalog labels
pub fn layout_figure(
    profiles: &StateProfiles,
    catalog: &StateCatalog,
    options: &PlotOptions,
) -> Result<Figure> {
    let config = &options.config;

    if config.panels() == 0 {
        return Err(PlotError::config(format!(
            "panel grid must have at least one row and one column, got {}x{}",
            config.nrows, config.ncols
        )));
    }

    profiles.validate_lengths()?;

    let fig_map: Vec<usize> = match options.fig_map {
        Some(ref map) => map.clone(),
        None => (0..profiles.len()).collect(),
    };

    if fig_map.len() > profiles.len() {
        return Err(PlotError::FigureMapTooLong {
            mapped: fig_map.len(),
            available: profiles.len(),
        });
    }

    if let Some(ref ylabels) = options.ylabels
        && ylabels.len() < fig_map.len()
    {
        return Err(PlotError::MissingLabels {
            provided: ylabels.len(),
            required: fig_map.len(),
        });
    }

    let mut panels = vec![Panel::default(); config.panels()];

    for (ind, &idx) in fig_map.iter().enumerate() {
        if idx >= panels.len() {
            return Err(PlotError::PanelOutOfRange {
                panel: idx,
                nrows: config.nrows,
                ncols: config.ncols,
            });
        }

        let series = &profiles.series()[ind];
        let info = catalog.get(&series.name);
        let panel = &mut panels[idx];

        // A panel that already shows lines gets a twin axis
        let twin = panel.primary_lines() > 0;
        let mut count = if twin { panel.primary_lines() } else { 0 };

        let mut axis = if twin {
            debug!(state = %series.name, panel = idx, "creating twin axis");
            Axis::default()
        } else {
            panel.primary.take().unwrap_or_default()
        };

        let legend = legend_labels(series, info)?;
        if !legend.is_empty() && legend.len() != series.data.ncols() {
            warn!(
                state = %series.name,
                labels = legend.len(),
                lines = series.data.ncols(),
                "legend labels do not match the number of lines"
            );
        }

        for (column, values) in series.data.columns().into_iter().enumerate() {
            if values.iter().any(|v| !v.is_finite()) {
                warn!(state = %series.name, column, "non-finite values are left out of the plot");
            }

            let color = config.series_color(count);
            axis.lines.push(Line {
                state: series.name.clone(),
                column,
                values,
                color,
                style: LineStyle::cycle(count),
                label: legend.get(column).cloned(),
            });

            if twin {
                color_axis(&mut axis, color);
            }

            count += 1;
        }

        let custom = options.ylabels.as_ref().map(|labels| labels[ind].as_str());
        let units = info.map_or("", |i| i.units.as_str());
        axis.ylabel = axis_label(&series.name, custom, units, options.include_units);

        if !legend.is_empty() {
            axis.legend = Some(legend);
        }

        if twin {
            panel.twins.push(axis);
        } else {
            panel.primary = Some(axis);
        }
    }

    debug!(
        nrows = config.nrows,
        ncols = config.ncols,
        states = fig_map.len(),
        "figure laid out"
    );

    Ok(Figure {
        nrows: config.nrows,
        ncols: config.ncols,
        time: profiles.time.clone(),
        panels,
    })
}
