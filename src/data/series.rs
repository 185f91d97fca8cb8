//! Time-series containers
//!
//! A recorded state is either one value per time point (1-D) or one row per
//! time point with one column per component (2-D), e.g. the concentration of
//! every compound in a reactor.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::error::{PlotError, Result};
use crate::labels::{get_indexes, Pick};

/// Values of one state over time
///
/// # Layout
///
/// - **Vector**: `y[t]`, a single time series
/// - **Matrix**: `y[t, k]`, rows are time points, columns are components
#[derive(Debug, Clone, PartialEq)]
pub enum StateData {
    /// One value per time point
    Vector(DVector<f64>),

    /// One row per time point, one column per component
    Matrix(DMatrix<f64>),
}

impl StateData {

    // ======================================= constructors =======================================

    /// Create from a plain vector
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(values))
    }

    /// Create a matrix from component columns
    ///
    /// # Errors
    ///
    /// [`PlotError::EmptyData`] without columns, [`PlotError::InvalidData`] when
    /// the columns do not all have the same length.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let first = columns
            .first()
            .ok_or_else(|| PlotError::EmptyData("no columns given".to_string()))?;

        if let Some(bad) = columns.iter().position(|c| c.len() != first.len()) {
            return Err(PlotError::InvalidData(format!(
                "column {} has {} values, expected {}",
                bad,
                columns[bad].len(),
                first.len()
            )));
        }

        Ok(Self::Matrix(DMatrix::from_fn(first.len(), columns.len(), |i, k| {
            columns[k][i]
        })))
    }

    // ========================================== Queries ==========================================

    /// 1 for vectors, 2 for matrices
    pub fn ndim(&self) -> usize {
        match self {
            StateData::Vector(_) => 1,
            StateData::Matrix(_) => 2,
        }
    }

    /// Number of time points
    pub fn nrows(&self) -> usize {
        match self {
            StateData::Vector(v) => v.len(),
            StateData::Matrix(m) => m.nrows(),
        }
    }

    /// Number of components (1 for vectors)
    pub fn ncols(&self) -> usize {
        match self {
            StateData::Vector(_) => 1,
            StateData::Matrix(m) => m.ncols(),
        }
    }

    /// Total number of values
    pub fn len(&self) -> usize {
        match self {
            StateData::Vector(v) => v.len(),
            StateData::Matrix(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View as a matrix, a vector becoming a single column
    pub fn to_matrix(&self) -> DMatrix<f64> {
        match self {
            StateData::Vector(v) => DMatrix::from_column_slice(v.len(), 1, v.as_slice()),
            StateData::Matrix(m) => m.clone(),
        }
    }

    /// Component columns, each one value per time point
    pub fn columns(&self) -> Vec<Vec<f64>> {
        match self {
            StateData::Vector(v) => vec![v.iter().copied().collect()],
            StateData::Matrix(m) => m
                .column_iter()
                .map(|c| c.iter().copied().collect())
                .collect(),
        }
    }

    // ========================================= Selection =========================================

    /// Keep only the given columns, in the given order
    ///
    /// The result is always a matrix, even for a single column.
    ///
    /// # Errors
    ///
    /// - [`PlotError::NotIndexable`] when the data is one-dimensional
    /// - [`PlotError::ColumnOutOfRange`] for an index past the last column
    pub fn select_columns(&self, state: &str, indexes: &[usize]) -> Result<StateData> {
        let matrix = match self {
            StateData::Vector(_) => {
                return Err(PlotError::NotIndexable {
                    state: state.to_string(),
                });
            }
            StateData::Matrix(m) => m,
        };

        if let Some(&index) = indexes.iter().find(|&&i| i >= matrix.ncols()) {
            return Err(PlotError::ColumnOutOfRange {
                state: state.to_string(),
                index,
                ncols: matrix.ncols(),
            });
        }

        Ok(StateData::Matrix(matrix.select_columns(indexes)))
    }
}

impl From<Vec<f64>> for StateData {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<DVector<f64>> for StateData {
    fn from(vector: DVector<f64>) -> Self {
        Self::Vector(vector)
    }
}

impl From<DMatrix<f64>> for StateData {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<Array1<f64>> for StateData {
    fn from(array: Array1<f64>) -> Self {
        Self::Vector(DVector::from_vec(array.to_vec()))
    }
}

impl From<Array2<f64>> for StateData {
    fn from(array: Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        Self::Matrix(DMatrix::from_fn(rows, cols, |i, k| array[[i, k]]))
    }
}

// =================================================================================================
// Extracted profiles
// =================================================================================================

/// One extracted state, possibly restricted to some of its columns
#[derive(Debug, Clone, PartialEq)]
pub struct StateSeries {
    /// State name as requested
    pub name: String,

    /// Extracted values
    pub data: StateData,

    /// Resolved column positions when the request picked columns
    pub selection: Option<Vec<usize>>,

    /// Column picks as requested, or every source label for a whole state
    pub picks: Option<Vec<Pick>>,
}

impl StateSeries {
    /// Positions of the extracted columns within `labels`
    ///
    /// Picks are resolved again against `labels`, which may order the
    /// components differently from the labels used at extraction. Without
    /// picks (or without labels to match them against) the extracted positions
    /// are returned.
    ///
    /// # Errors
    ///
    /// [`PlotError::UnknownName`] for a named pick missing from `labels`.
    pub fn label_positions(&self, labels: &[String]) -> Result<Vec<usize>> {
        match (&self.picks, &self.selection) {
            (Some(picks), _) if !labels.is_empty() => get_indexes(labels, picks),
            (_, Some(selection)) => Ok(selection.clone()),
            _ => Ok((0..self.data.ncols()).collect()),
        }
    }
}

/// Time vector plus extracted states, in request order
///
/// Inserting a name that is already present replaces the earlier series but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateProfiles {
    pub time: Vec<f64>,
    series: Vec<StateSeries>,
}

impl StateProfiles {
    pub fn new(time: Vec<f64>) -> Self {
        Self {
            time,
            series: Vec::new(),
        }
    }

    /// Insert a series, replacing any series with the same name
    pub fn insert(&mut self, series: StateSeries) {
        match self.series.iter_mut().find(|s| s.name == series.name) {
            Some(existing) => *existing = series,
            None => self.series.push(series),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StateSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateSeries> {
        self.series.iter()
    }

    pub fn series(&self) -> &[StateSeries] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Check that every series has one row per time point
    pub fn validate_lengths(&self) -> Result<()> {
        for series in &self.series {
            if series.data.nrows() != self.time.len() {
                return Err(PlotError::LengthMismatch {
                    state: series.name.clone(),
                    rows: series.data.nrows(),
                    time_points: self.time.len(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a StateProfiles {
    type Item = &'a StateSeries;
    type IntoIter = std::slice::Iter<'a, StateSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
