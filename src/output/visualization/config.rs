//! Plot configuration shared by the figure layout and the renderer
//!
//! [`PlotConfig`] describes the image (size, panel grid, colors, fonts), while
//! [`PlotOptions`] carries the per-call choices of [`plot_function`]: which
//! panel each state goes to, custom y-labels and whether units are shown.
//!
//! [`plot_function`]: super::plot_function

use plotters::prelude::*;

/// Matplotlib's `tab10` qualitative palette
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // blue
    RGBColor(255, 127, 14),  // orange
    RGBColor(44, 160, 44),   // green
    RGBColor(214, 39, 40),   // red
    RGBColor(148, 103, 189), // purple
    RGBColor(140, 86, 75),   // brown
    RGBColor(227, 119, 194), // pink
    RGBColor(127, 127, 127), // gray
    RGBColor(188, 189, 34),  // olive
    RGBColor(23, 190, 207),  // cyan
];

/// Dash pattern of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

/// Line styles cycled through on one axis
pub const LINE_STYLES: [LineStyle; 4] = [
    LineStyle::Solid,
    LineStyle::Dashed,
    LineStyle::DashDot,
    LineStyle::Dotted,
];

impl LineStyle {
    /// Style for the n-th line of an axis
    pub fn cycle(count: usize) -> Self {
        LINE_STYLES[count % LINE_STYLES.len()]
    }

    /// Alternating on/off lengths, with both axes scaled to unit length
    ///
    /// Empty for solid lines.
    pub fn pattern(self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[0.030, 0.015],
            LineStyle::DashDot => &[0.030, 0.010, 0.004, 0.010],
            LineStyle::Dotted => &[0.004, 0.008],
        }
    }
}

/// Which rendering of a label is drawn on the axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Unicode text (`mol L⁻¹`), readable on every backend
    #[default]
    Unicode,

    /// Raw LaTeX (`$\mathregular{mol \ L^{-1}}$`) for downstream typesetting
    Latex,
}

/// Configuration for customizing figures
///
/// # Example
///
/// ```rust,ignore
/// use procplot::output::visualization::PlotConfig;
///
/// // Two stacked panels, full HD
/// let config = PlotConfig::grid(2, 1).size(1920, 1080).title("Batch reactor");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Panel rows (default: 1)
    pub nrows: usize,

    /// Panel columns (default: 1)
    pub ncols: usize,

    /// Figure title, none by default
    pub title: Option<String>,

    /// X-axis label of every panel (default: "time (s)")
    pub xlabel: String,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Colors replacing the tab10 palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Label rendering drawn on the axes (default: Unicode)
    pub label_style: LabelStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            nrows: 1,
            ncols: 1,
            title: None,
            xlabel: "time (s)".to_string(),
            background: WHITE,
            line_width: 2,
            show_grid: true,
            series_colors: None,
            label_style: LabelStyle::Unicode,
        }
    }
}

impl PlotConfig {
    /// Config for a `nrows x ncols` panel grid
    pub fn grid(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            ..Default::default()
        }
    }

    /// Builder pattern: set image size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder pattern: set figure title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder pattern: set x-axis label
    pub fn xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = xlabel.into();
        self
    }

    /// Builder pattern: replace the palette
    pub fn series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Builder pattern: choose the drawn label rendering
    pub fn label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Number of panels in the grid
    pub fn panels(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Color for the n-th line of an axis
    ///
    /// Past the end of the palette the last color is reused.
    pub fn series_color(&self, count: usize) -> RGBColor {
        let palette: &[RGBColor] = match self.series_colors {
            Some(ref colors) if !colors.is_empty() => colors,
            _ => &TAB10,
        };

        palette[count.min(palette.len() - 1)]
    }
}

/// Per-call options of [`plot_function`](super::plot_function)
#[derive(Clone, Debug)]
pub struct PlotOptions {
    /// Panel of each extracted state, in request order (default: one panel per state)
    pub fig_map: Option<Vec<usize>>,

    /// Y-labels in name convention, one per plotted state (default: state names)
    pub ylabels: Option<Vec<String>>,

    /// Append the state's units to its y-label (default: true)
    pub include_units: bool,

    /// Image configuration
    pub config: PlotConfig,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            fig_map: None,
            ylabels: None,
            include_units: true,
            config: PlotConfig::default(),
        }
    }
}

impl PlotOptions {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Builder pattern: map states to panels
    pub fn fig_map(mut self, fig_map: Vec<usize>) -> Self {
        self.fig_map = Some(fig_map);
        self
    }

    /// Builder pattern: set y-labels
    pub fn ylabels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ylabels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Builder pattern: show or hide units
    pub fn include_units(mut self, include_units: bool) -> Self {
        self.include_units = include_units;
        self
    }
}
