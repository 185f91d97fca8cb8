//! procplot: Plotting helpers for process simulation results
//!
//! Pulls recorded time series out of unit-operation objects (reactors,
//! crystallizers, mixers...) or their stored results, and draws them on a grid
//! of panels with twin axes, publication-style labels and legends.
//!
//! # Architecture
//!
//! procplot keeps three steps apart:
//!
//! 1. **Extraction** ([`data`]): which states, which columns, from where
//! 2. **Layout** ([`output::visualization::layout`]): panels, twin axes,
//!    colors, line styles and labels, as a plain [`Figure`](output::Figure)
//! 3. **Rendering** ([`output::visualization::render`]): drawing a figure with
//!    `plotters`
//!
//! # Quick Start
//!
//! ```rust
//! use procplot::prelude::*;
//!
//! # fn main() -> procplot::Result<()> {
//! // A stored result with a two-component concentration and a temperature
//! let result = DynamicResult::new(vec![0.0, 1.0, 2.0])
//!     .with_state(
//!         "C",
//!         StateData::from_columns(&[vec![1.0, 0.6, 0.3], vec![0.0, 0.4, 0.7]])?,
//!         StateInfo::new().units("mol/L").index(["A", "B"]),
//!     )
//!     .with_state("T", vec![300.0, 305.0, 309.0], StateInfo::new().units("K"));
//!
//! // Only component B of C
//! let profiles = get_states_result(&result, &[StateRequest::columns("C", ["B"])])?;
//! assert_eq!(profiles.get("C").map(|s| s.data.ncols()), Some(1));
//!
//! // Axis labels
//! assert_eq!(latexify_name("mol/L", true), "$\\mathregular{mol \\ L^{-1}}$");
//! assert_eq!(unicode_label("mol/L"), "mol L⁻¹");
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`labels`]: LaTeX label formatting and column-name resolution
//! - [`data`]: State arrays, metadata and extraction
//! - [`output`]: Plotting and CSV export
//! - [`error`]: The crate error type

pub mod data;
pub mod error;
pub mod labels;
pub mod output;

pub use error::{PlotError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use procplot::prelude::*;
    //! ```
    pub use crate::data::{
        extract_states, get_state_data, get_states_result, DynamicResult, StateCatalog,
        StateData, StateInfo, StateProfiles, StateRequest, UnitOperation,
    };
    pub use crate::error::PlotError;
    pub use crate::labels::{get_indexes, latexify_name, unicode_label, Pick};
    pub use crate::output::export::{export_states_csv, CsvConfig};
    pub use crate::output::visualization::{
        build_figure, plot_function, Figure, LabelStyle, PlotConfig, PlotOptions,
    };
}
