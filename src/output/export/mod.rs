//! Export of extracted state profiles
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a new
//! format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use procplot::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export(&profiles, "states.csv")?;
//! ```

pub mod csv;

pub use csv::{export_states_csv, CsvConfig, CsvMetadata};

use crate::data::StateProfiles;
use crate::error::PlotError;

/// Abstraction trait for all export formats
///
/// Each format manages its own errors via the associated type.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Writes every extracted state to `path`.
    fn export(&self, profiles: &StateProfiles, path: &str) -> Result<(), Self::Error>;
}

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = PlotError;

    fn export(&self, profiles: &StateProfiles, path: &str) -> Result<(), Self::Error> {
        export_states_csv(profiles, path, Some(&self.config))
    }
}
