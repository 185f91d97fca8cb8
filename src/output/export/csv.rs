//! CSV export of extracted state profiles
//!
//! Writes the time vector and every column of every extracted state, in
//! extraction order, to a CSV file readable by Excel, pandas or MATLAB.
//!
//! # Features
//!
//! - **Column headers**: `T` for a 1-D state, `C[A]` / `C[0]` for the columns of a 2-D one
//! - **Metadata support**: Optional `#` header with unit name and generation time
//! - **Customizable**: Delimiter, decimal separator, precision
//! - **Validation**: Checks for NaN, empty data, mismatched lengths
//!
//! # Quick Example
//!
//! ```rust,ignore
//! use procplot::data::{extract_states, StateRequest};
//! use procplot::output::export::{export_states_csv, CsvConfig};
//!
//! let profiles = extract_states(&reactor, &[StateRequest::from("C"), StateRequest::from("T")])?;
//! let config = CsvConfig::default().with_catalog(procplot::data::state_catalog(&reactor));
//! export_states_csv(&profiles, "reactor.csv", Some(&config))?;
//! ```
//!
//! **Output** (`reactor.csv`):
//! ```csv
//! time (s),C[A] (mol/L),C[B] (mol/L),T (K)
//! 0.000000,1.000000,0.000000,298.150000
//! 1.000000,0.904837,0.095163,299.150000
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::debug;

use crate::data::{StateCatalog, StateProfiles, StateSeries};
use crate::error::{PlotError, Result};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "time (s)")
    pub time_header: String,

    /// Index labels and units used in column headers
    pub catalog: Option<StateCatalog>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "time (s)".to_string(),
            catalog: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// Builder pattern: label columns from a state catalog
    pub fn with_catalog(mut self, catalog: StateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set end up in the header.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Unit operation name (e.g. "CSTR")
    pub unit_name: Option<String>,

    /// Free-form description of the run
    pub description: Option<String>,

    /// Additional key/value lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_unit(name: impl Into<String>) -> Self {
        Self {
            unit_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(
    out: &mut W,
    metadata: &CsvMetadata,
    profiles: &StateProfiles,
) -> Result<()> {
    writeln!(out, "# Process Simulation States")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(unit) = &metadata.unit_name {
        writeln!(out, "# Unit: {}", unit)?;
    }
    if let Some(description) = &metadata.description {
        writeln!(out, "# Description: {}", description)?;
    }

    writeln!(out, "# States: {}", profiles.names().join(", "))?;
    writeln!(out, "# Time Points: {}", profiles.time.len())?;

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Headers of one state's columns
fn column_headers(series: &StateSeries, catalog: Option<&StateCatalog>) -> Result<Vec<String>> {
    let info = catalog.and_then(|c| c.get(&series.name));
    let units = info
        .map(|i| i.units.as_str())
        .filter(|u| !u.is_empty())
        .map(|u| format!(" ({})", u))
        .unwrap_or_default();

    if series.data.ndim() == 1 {
        return Ok(vec![format!("{}{}", series.name, units)]);
    }

    let labels = info.map(|i| i.labels()).unwrap_or(&[]);

    Ok(series
        .label_positions(labels)?
        .into_iter()
        .map(|position| {
            let tag = labels
                .get(position)
                .cloned()
                .unwrap_or_else(|| position.to_string());
            format!("{}[{}]{}", series.name, tag, units)
        })
        .collect())
}

/// Quote a field holding the delimiter, a quote or a line break
///
/// Embedded quotes are doubled.
fn quote_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export extracted state profiles to CSV
///
/// # Arguments
///
/// * `profiles`    — Output of `extract_states` / `get_state_data`
/// * `output_path` — Output file path
/// * `config`      — Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - [`PlotError::EmptyData`] without time points or states
/// - [`PlotError::LengthMismatch`] when a state does not match the time vector
/// - [`PlotError::InvalidData`] for NaN or Inf values
/// - [`PlotError::InvalidConfig`] when delimiter and decimal separator collide
/// - [`PlotError::Io`] on file errors
pub fn export_states_csv(
    profiles: &StateProfiles,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    if profiles.time.is_empty() || profiles.is_empty() {
        return Err(PlotError::EmptyData(
            "time vector and extracted states must not be empty".to_string(),
        ));
    }

    profiles.validate_lengths()?;

    if profiles.time.iter().any(|t| !t.is_finite()) {
        return Err(PlotError::InvalidData("NaN or Inf detected in time vector".to_string()));
    }

    for series in profiles {
        if series.data.columns().iter().flatten().any(|v| !v.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "NaN or Inf detected in state '{}'",
                series.name
            )));
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);

    if config.delimiter == config.decimal_separator {
        return Err(PlotError::config(format!(
            "delimiter and decimal separator are both '{}'",
            config.delimiter
        )));
    }

    let columns: Vec<Vec<f64>> = profiles.iter().flat_map(|s| s.data.columns()).collect();

    let delimiter = config.delimiter.to_string();
    let mut header = vec![config.time_header.clone()];
    for series in profiles {
        header.extend(column_headers(series, config.catalog.as_ref())?);
    }
    let header: Vec<String> = header
        .iter()
        .map(|field| quote_field(field, config.delimiter))
        .collect();

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path)?);

    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut out, metadata, profiles)?;
    }

    writeln!(out, "{}", header.join(&delimiter))?;

    for (i, &t) in profiles.time.iter().enumerate() {
        write!(out, "{}", format_number(t, config))?;
        for column in &columns {
            write!(out, "{}{}", delimiter, format_number(column[i], config))?;
        }
        writeln!(out)?;
    }

    out.flush()?;

    debug!(
        path = output_path,
        rows = profiles.time.len(),
        columns = columns.len(),
        "states exported to CSV"
    );

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
