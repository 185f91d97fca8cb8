//! Error type for label formatting, state extraction and plotting
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`PlotError`]. Backend failures raised by `plotters` are flattened into
//! [`PlotError::Render`] at the rendering boundary.

use thiserror::Error;

/// Main error type for procplot
#[derive(Error, Debug)]
pub enum PlotError {
    /// A requested name is not part of the known label set
    #[error("Name '{name}' not in the set of known names {known:?}")]
    UnknownName { name: String, known: Vec<String> },

    /// The unit operation or result has no profile for this state
    #[error("State '{0}' not found in the simulation object")]
    UnknownState(String),

    /// Column picks were given for a one-dimensional state
    #[error("State '{state}' is one-dimensional and has no columns to pick from")]
    NotIndexable { state: String },

    /// A column index points past the last column of a state
    #[error("Column {index} out of range for state '{state}' with {ncols} columns")]
    ColumnOutOfRange {
        state: String,
        index: usize,
        ncols: usize,
    },

    /// A state does not have one row per time point
    #[error("State '{state}' has {rows} rows but the time vector has {time_points} points")]
    LengthMismatch {
        state: String,
        rows: usize,
        time_points: usize,
    },

    /// The figure map points to a panel the figure does not have
    #[error("Panel {panel} out of range for a {nrows}x{ncols} figure")]
    PanelOutOfRange {
        panel: usize,
        nrows: usize,
        ncols: usize,
    },

    /// The figure map has more entries than there are extracted states
    #[error("Figure map has {mapped} entries but only {available} states were extracted")]
    FigureMapTooLong { mapped: usize, available: usize },

    /// Fewer y-labels than plotted states
    #[error("{provided} y-labels provided for {required} plotted states")]
    MissingLabels { provided: usize, required: usize },

    /// Nothing to plot or export
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// NaN or infinite values where finite numbers are required
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Plot configuration that cannot be honored
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Drawing backend failure
    #[error("Rendering failed: {0}")]
    Render(String),

    /// File system errors (output images, CSV files, metadata files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// State metadata could not be parsed
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Result type alias for procplot operations
pub type Result<T> = std::result::Result<T, PlotError>;

impl PlotError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a rendering error from any backend error
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_message_lists_known_names() {
        let err = PlotError::UnknownName {
            name: "water".to_string(),
            known: vec!["ethanol".to_string(), "acetone".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'water'"));
        assert!(msg.contains("ethanol"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PlotError = io.into();
        assert!(matches!(err, PlotError::Io(_)));
    }
}
