//! Name-or-index column resolution
//!
//! Multi-component states (concentrations, distributions) carry index labels
//! such as compound names. Callers can pick columns either by label or by
//! position; [`get_indexes`] resolves both to positions.

use std::fmt;

use crate::error::{PlotError, Result};

/// A column pick: a label (matched case-insensitively) or a raw position
///
/// Positions count from the first column only. Negative positions counting
/// from the end are not supported; pick the last column by its label or by
/// `ncols - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pick {
    Name(String),
    Index(usize),
}

impl From<&str> for Pick {
    fn from(name: &str) -> Self {
        Pick::Name(name.to_string())
    }
}

impl From<String> for Pick {
    fn from(name: String) -> Self {
        Pick::Name(name)
    }
}

impl From<usize> for Pick {
    fn from(index: usize) -> Self {
        Pick::Index(index)
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Name(name) => write!(f, "{}", name),
            Pick::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Resolve picks to column positions
///
/// Names are compared case-insensitively and resolve to the first matching
/// label. Integer picks are passed through unchanged; bounds are checked when
/// the columns are actually selected.
///
/// # Errors
///
/// [`PlotError::UnknownName`] for a name that matches no label.
///
/// # Example
///
/// ```rust
/// use procplot::labels::{get_indexes, Pick};
///
/// let names = ["Ethanol", "Water", "Acetone"];
/// let picks = [Pick::from("acetone"), Pick::from(1)];
/// assert_eq!(get_indexes(&names, &picks).unwrap(), vec![2, 1]);
/// ```
pub fn get_indexes<S: AsRef<str>>(names: &[S], picks: &[Pick]) -> Result<Vec<usize>> {
    let lower_names: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();

    picks
        .iter()
        .map(|pick| match pick {
            Pick::Name(name) => {
                let low_pick = name.to_lowercase();
                lower_names
                    .iter()
                    .position(|n| *n == low_pick)
                    .ok_or_else(|| PlotError::UnknownName {
                        name: low_pick,
                        known: names.iter().map(|n| n.as_ref().to_string()).collect(),
                    })
            }
            Pick::Index(index) => Ok(*index),
        })
        .collect()
}
