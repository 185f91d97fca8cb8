//! Output of extracted simulation states
//!
//! - **Visualization**: PNG/SVG multi-panel plots using plotters
//! - **Export**: CSV export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs
//! │   ├── layout.rs
//! │   ├── render.rs
//! │   └── figure.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use procplot::data::{extract_states, StateRequest};
//! use procplot::output::{export_states_csv, plot_function};
//!
//! let requests = [StateRequest::from("C"), StateRequest::from("T")];
//!
//! plot_function(&reactor, &requests, "reactor.png", None)?;
//!
//! let profiles = extract_states(&reactor, &requests)?;
//! export_states_csv(&profiles, "reactor.csv", None)?;
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{build_figure, plot_function, Figure, PlotConfig, PlotOptions};

pub use export::{export_states_csv, CsvConfig};
