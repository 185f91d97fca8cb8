//! Visualization of unit-operation states
//!
//! This module draws extracted time series with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Image configuration and per-call options (`PlotConfig`, `PlotOptions`)
//! - **layout**: Panel grid, twin axes, colors, line styles and labels (`Figure`)
//! - **render**: Drawing a `Figure` to PNG or SVG
//! - **figure**: `plot_function`, the extract → layout → render pipeline
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use procplot::data::StateRequest;
//! use procplot::output::visualization::{plot_function, PlotConfig, PlotOptions};
//!
//! // One panel per state
//! plot_function(&reactor, &[StateRequest::from("C"), StateRequest::from("T")], "states.png", None)?;
//!
//! // Temperature on a twin axis over the concentrations
//! let options = PlotOptions::default().fig_map(vec![0, 0]);
//! plot_function(&reactor, &[StateRequest::from("C"), StateRequest::from("T")], "overlay.svg", Some(&options))?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Plot states of a unit operation | `plot_function` |
//! | Inspect the layout without drawing | `build_figure` |
//! | Plot profiles gathered by hand | `layout_figure` + `render_figure` |

pub mod config;
pub mod figure;
pub mod layout;
pub mod render;

pub use config::{LabelStyle, LineStyle, PlotConfig, PlotOptions, TAB10};
pub use figure::{build_figure, plot_function};
pub use layout::{color_axis, layout_figure, Axis, AxisLabel, Figure, Line, Panel};
pub use render::render_figure;
