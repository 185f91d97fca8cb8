//! State metadata: component labels and units
//!
//! Each recorded state may describe its columns (`index`) and its physical
//! units. Catalogs can be written inline or loaded from JSON:
//!
//! ```json
//! {
//!     "T":    { "units": "K" },
//!     "C":    { "index": ["ethanol", "water"], "units": "mol/L" },
//!     "distrib": { "index": [1, 2, 5, 10], "units": "1/m**3" }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;

/// Metadata of one state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInfo {
    /// Column labels, one per component
    #[serde(default, deserialize_with = "labels_as_strings")]
    pub index: Option<Vec<String>>,

    /// Units in name convention (`mol/L`, `m**3/s`); empty when dimensionless
    #[serde(default)]
    pub units: String,
}

impl StateInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set units
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Builder pattern: set column labels
    pub fn index<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Column labels, empty when the state has none
    pub fn labels(&self) -> &[String] {
        self.index.as_deref().unwrap_or(&[])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accept strings and numbers as labels (size classes are often numeric)
fn labels_as_strings<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<RawLabel>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|labels| {
        labels
            .into_iter()
            .map(|label| match label {
                RawLabel::Text(text) => text,
                RawLabel::Integer(value) => value.to_string(),
                RawLabel::Float(value) => value.to_string(),
            })
            .collect()
    }))
}

/// Metadata for every state of a unit operation or result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCatalog {
    states: HashMap<String, StateInfo>,
}

impl StateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a state
    pub fn with_state(mut self, name: impl Into<String>, info: StateInfo) -> Self {
        self.insert(name, info);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, info: StateInfo) {
        self.states.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&StateInfo> {
        self.states.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Union of two catalogs, entries of `other` win on conflicts
    pub fn merged(&self, other: &StateCatalog) -> StateCatalog {
        let mut states = self.states.clone();
        states.extend(other.states.iter().map(|(k, v)| (k.clone(), v.clone())));
        StateCatalog { states }
    }

    /// Parse a catalog from a JSON object
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: StateCatalog = serde_json::from_str(json)?;
        debug!(states = catalog.len(), "parsed state catalog");
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading state catalog");
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl FromIterator<(String, StateInfo)> for StateCatalog {
    fn from_iter<I: IntoIterator<Item = (String, StateInfo)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
