//! Simulation objects and state extraction
//!
//! Two kinds of objects hold recorded states:
//!
//! - a live [`UnitOperation`], which exposes one profile per state plus its
//!   state catalogs
//! - a stored [`DynamicResult`], which owns the arrays and their metadata
//!
//! [`get_state_data`] and [`get_states_result`] pull named time series out of
//! either one; [`extract_states`] picks the stored result when a unit
//! operation carries one.
//!
//! # Example
//!
//! ```rust
//! use procplot::data::{
//!     get_states_result, DynamicResult, StateInfo, StateRequest,
//! };
//!
//! let result = DynamicResult::new(vec![0.0, 1.0, 2.0])
//!     .with_state("T", vec![300.0, 305.0, 309.0], StateInfo::new().units("K"));
//!
//! let profiles = get_states_result(&result, &[StateRequest::from("T")]).unwrap();
//! assert_eq!(profiles.names(), vec!["T"]);
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::data::metadata::{StateCatalog, StateInfo};
use crate::data::series::{StateData, StateProfiles, StateSeries};
use crate::error::{PlotError, Result};
use crate::labels::{get_indexes, Pick};

// =================================================================================================
// Requests
// =================================================================================================

/// A state to extract, either whole or restricted to some columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateRequest {
    /// Every column of the state
    Whole(String),

    /// Only the picked columns, by label or position
    Columns { state: String, picks: Vec<Pick> },
}

impl StateRequest {
    pub fn whole(state: impl Into<String>) -> Self {
        Self::Whole(state.into())
    }

    /// Request some columns of a state
    ///
    /// ```rust
    /// use procplot::data::StateRequest;
    ///
    /// let request = StateRequest::columns("C", ["ethanol", "water"]);
    /// assert_eq!(request.state(), "C");
    /// ```
    pub fn columns<I, P>(state: impl Into<String>, picks: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pick>,
    {
        Self::Columns {
            state: state.into(),
            picks: picks.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the requested state
    pub fn state(&self) -> &str {
        match self {
            StateRequest::Whole(state) => state,
            StateRequest::Columns { state, .. } => state,
        }
    }

    /// Column picks, `None` for whole-state requests
    pub fn picks(&self) -> Option<&[Pick]> {
        match self {
            StateRequest::Whole(_) => None,
            StateRequest::Columns { picks, .. } => Some(picks),
        }
    }
}

impl From<&str> for StateRequest {
    fn from(state: &str) -> Self {
        Self::whole(state)
    }
}

impl From<String> for StateRequest {
    fn from(state: String) -> Self {
        Self::Whole(state)
    }
}

// =================================================================================================
// Simulation objects
// =================================================================================================

/// A unit operation exposing recorded time profiles
///
/// Implementors map state names to their recorded arrays. Only
/// [`time_profile`](UnitOperation::time_profile),
/// [`profile`](UnitOperation::profile) and [`states`](UnitOperation::states)
/// are required.
///
/// # Example
///
/// ```rust
/// use procplot::data::{StateCatalog, StateData, StateInfo, UnitOperation};
///
/// struct Heater {
///     time: Vec<f64>,
///     temperature: StateData,
///     catalog: StateCatalog,
/// }
///
/// impl UnitOperation for Heater {
///     fn time_profile(&self) -> &[f64] { &self.time }
///
///     fn profile(&self, state: &str) -> Option<&StateData> {
///         match state {
///             "T" => Some(&self.temperature),
///             _ => None,
///         }
///     }
///
///     fn states(&self) -> &StateCatalog { &self.catalog }
/// }
/// ```
pub trait UnitOperation {
    /// Time points of the recorded profiles
    fn time_profile(&self) -> &[f64];

    /// Recorded profile of a state, one row per time point
    fn profile(&self, state: &str) -> Option<&StateData>;

    /// Metadata of the differential states
    fn states(&self) -> &StateCatalog;

    /// Metadata of the states computed from the differential ones
    fn fstates(&self) -> Option<&StateCatalog> {
        None
    }

    /// Stored result, preferred over the live profiles when present
    fn dynamic_result(&self) -> Option<&DynamicResult> {
        None
    }

    fn name(&self) -> &str {
        "Unit operation"
    }
}

/// States and fstates of a unit operation in one catalog, fstates winning
pub fn state_catalog<U: UnitOperation + ?Sized>(uo: &U) -> StateCatalog {
    match uo.fstates() {
        Some(fstates) => uo.states().merged(fstates),
        None => uo.states().clone(),
    }
}

/// Stored outcome of a dynamic simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicResult {
    /// Time points shared by every state
    pub time: Vec<f64>,

    states: HashMap<String, StateData>,

    /// Metadata of the stored states
    pub di_states: StateCatalog,
}

impl DynamicResult {
    pub fn new(time: Vec<f64>) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    /// Builder pattern: add a state with its metadata
    pub fn with_state(
        mut self,
        name: impl Into<String>,
        data: impl Into<StateData>,
        info: StateInfo,
    ) -> Self {
        self.insert(name, data, info);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<StateData>, info: StateInfo) {
        let name = name.into();
        self.di_states.insert(name.clone(), info);
        self.states.insert(name, data.into());
    }

    pub fn get(&self, name: &str) -> Option<&StateData> {
        self.states.get(name)
    }

    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// =================================================================================================
// Extraction
// =================================================================================================

/// Resolve a request against one recorded array
fn extract_one(
    request: &StateRequest,
    data: &StateData,
    info: Option<&StateInfo>,
) -> Result<StateSeries> {
    let state = request.state();
    let labels = info.map(StateInfo::labels).unwrap_or(&[]);

    match request.picks() {
        // A whole state keeps its source labels so legends can match them by name
        None => Ok(StateSeries {
            name: state.to_string(),
            data: data.clone(),
            selection: None,
            picks: (!labels.is_empty())
                .then(|| labels.iter().map(|l| Pick::from(l.as_str())).collect()),
        }),
        Some(picks) => {
            let indexes = get_indexes(labels, picks)?;
            debug!(state, ?indexes, "selecting columns");

            Ok(StateSeries {
                name: state.to_string(),
                data: data.select_columns(state, &indexes)?,
                selection: Some(indexes),
                picks: Some(picks.to_vec()),
            })
        }
    }
}

/// Extract states from the live profiles of a unit operation
///
/// Column picks given by name are resolved against the state's index labels
/// (states and fstates catalogs merged).
///
/// # Errors
///
/// - [`PlotError::UnknownState`] when the unit operation has no such profile
/// - [`PlotError::UnknownName`] for a pick that matches no label
/// - [`PlotError::NotIndexable`] / [`PlotError::ColumnOutOfRange`] for bad picks
pub fn get_state_data<U: UnitOperation + ?Sized>(
    uo: &U,
    requests: &[StateRequest],
) -> Result<StateProfiles> {
    let catalog = state_catalog(uo);
    let mut profiles = StateProfiles::new(uo.time_profile().to_vec());

    for request in requests {
        let data = uo
            .profile(request.state())
            .ok_or_else(|| PlotError::UnknownState(request.state().to_string()))?;
        profiles.insert(extract_one(request, data, catalog.get(request.state()))?);
    }

    debug!(unit = uo.name(), states = profiles.len(), "extracted live profiles");
    Ok(profiles)
}

/// Extract states from a stored dynamic result
///
/// Same rules as [`get_state_data`], with labels taken from the result's own
/// `di_states` catalog.
pub fn get_states_result(result: &DynamicResult, requests: &[StateRequest]) -> Result<StateProfiles> {
    let mut profiles = StateProfiles::new(result.time.clone());

    for request in requests {
        let data = result
            .get(request.state())
            .ok_or_else(|| PlotError::UnknownState(request.state().to_string()))?;
        profiles.insert(extract_one(request, data, result.di_states.get(request.state()))?);
    }

    debug!(states = profiles.len(), "extracted stored result");
    Ok(profiles)
}

/// Extract states from a unit operation, preferring its stored result
pub fn extract_states<U: UnitOperation + ?Sized>(
    uo: &U,
    requests: &[StateRequest],
) -> Result<StateProfiles> {
    match uo.dynamic_result() {
        Some(result) => get_states_result(result, requests),
        None => get_state_data(uo, requests),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tank {
        time: Vec<f64>,
        profiles: HashMap<String, StateData>,
        states: StateCatalog,
        fstates: StateCatalog,
        result: Option<DynamicResult>,
    }

    impl UnitOperation for Tank {
        fn time_profile(&self) -> &[f64] {
            &self.time
        }

        fn profile(&self, state: &str) -> Option<&StateData> {
            self.profiles.get(state)
        }

        fn states(&self) -> &StateCatalog {
            &self.states
        }

        fn fstates(&self) -> Option<&StateCatalog> {
            Some(&self.fstates)
        }

        fn dynamic_result(&self) -> Option<&DynamicResult> {
            self.result.as_ref()
        }
    }

    fn tank() -> Tank {
        let mut profiles = HashMap::new();
        profiles.insert(
            "C".to_string(),
            StateData::from_columns(&[vec![1.0, 0.5], vec![0.0, 0.3], vec![0.0, 0.2]]).unwrap(),
        );
        profiles.insert("T".to_string(), StateData::from_vec(vec![300.0, 310.0]));
        profiles.insert("V".to_string(), StateData::from_vec(vec![1.0, 1.1]));

        Tank {
            time: vec![0.0, 60.0],
            profiles,
            states: StateCatalog::new()
                .with_state("C", StateInfo::new().units("mol/L").index(["A", "B", "C"]))
                .with_state("T", StateInfo::new().units("K")),
            fstates: StateCatalog::new().with_state("V", StateInfo::new().units("m**3")),
            result: None,
        }
    }

    #[test]
    fn test_whole_states_in_request_order() {
        let profiles = get_state_data(&tank(), &["T".into(), "C".into()]).unwrap();
        assert_eq!(profiles.time, vec![0.0, 60.0]);
        assert_eq!(profiles.names(), vec!["T", "C"]);
        assert_eq!(profiles.get("C").unwrap().data.ncols(), 3);
        assert_eq!(profiles.get("C").unwrap().selection, None);
    }

    #[test]
    fn test_column_picks_by_name_and_index() {
        let request = StateRequest::columns("C", [Pick::from("c"), Pick::from(0)]);
        let profiles = get_state_data(&tank(), &[request]).unwrap();
        let series = profiles.get("C").unwrap();
        assert_eq!(series.selection, Some(vec![2, 0]));
        assert_eq!(series.data.columns(), vec![vec![0.0, 0.2], vec![1.0, 0.5]]);
    }

    #[test]
    fn test_unknown_state() {
        let err = get_state_data(&tank(), &["P".into()]).unwrap_err();
        assert!(matches!(err, PlotError::UnknownState(ref s) if s == "P"));
    }

    #[test]
    fn test_unknown_pick() {
        let err = get_state_data(&tank(), &[StateRequest::columns("C", ["D"])]).unwrap_err();
        assert!(matches!(err, PlotError::UnknownName { .. }));
    }

    #[test]
    fn test_name_pick_without_labels_errors() {
        // T has no index labels: only positions could be used, and T is 1-D anyway
        let err = get_state_data(&tank(), &[StateRequest::columns("T", ["x"])]).unwrap_err();
        assert!(matches!(err, PlotError::UnknownName { ref known, .. } if known.is_empty()));
    }

    #[test]
    fn test_column_picks_on_flat_state() {
        let err = get_state_data(&tank(), &[StateRequest::columns("T", [0usize])]).unwrap_err();
        assert!(matches!(err, PlotError::NotIndexable { ref state } if state == "T"));
    }

    #[test]
    fn test_column_past_the_end() {
        let err =
            get_state_data(&tank(), &[StateRequest::columns("C", [Pick::Index(5)])]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::ColumnOutOfRange { ref state, index: 5, ncols: 3 } if state == "C"
        ));

        // The last column is reachable as ncols - 1
        let profiles = get_state_data(&tank(), &[StateRequest::columns("C", [2usize])]).unwrap();
        assert_eq!(profiles.get("C").unwrap().data.columns(), vec![vec![0.0, 0.2]]);
    }

    #[test]
    fn test_fstates_are_part_of_the_catalog() {
        let catalog = state_catalog(&tank());
        assert_eq!(catalog.get("V").unwrap().units, "m**3");
        assert_eq!(catalog.get("T").unwrap().units, "K");
    }

    #[test]
    fn test_stored_result_is_preferred() {
        let mut uo = tank();
        uo.result = Some(
            DynamicResult::new(vec![0.0, 1.0, 2.0])
                .with_state("T", vec![1.0, 2.0, 3.0], StateInfo::new().units("K")),
        );

        let profiles = extract_states(&uo, &["T".into()]).unwrap();
        assert_eq!(profiles.time.len(), 3);

        // Live profile "V" is not in the stored result
        assert!(extract_states(&uo, &["V".into()]).is_err());
    }

    #[test]
    fn test_result_picks_use_di_states_labels() {
        let result = DynamicResult::new(vec![0.0, 1.0]).with_state(
            "mu",
            StateData::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
            StateInfo::new().index(["mu_0", "mu_1"]),
        );

        let profiles =
            get_states_result(&result, &[StateRequest::columns("mu", ["MU_1"])]).unwrap();
        assert_eq!(profiles.get("mu").unwrap().data.columns(), vec![vec![3.0, 4.0]]);
        assert_eq!(result.state_names(), vec!["mu"]);
    }

    #[test]
    fn test_result_bad_column_picks() {
        let result = DynamicResult::new(vec![0.0, 1.0])
            .with_state("T", vec![300.0, 301.0], StateInfo::new().units("K"))
            .with_state(
                "mu",
                StateData::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
                StateInfo::new().index(["mu_0", "mu_1"]),
            );

        let err = get_states_result(&result, &[StateRequest::columns("T", [0usize])]).unwrap_err();
        assert!(matches!(err, PlotError::NotIndexable { ref state } if state == "T"));

        let err = get_states_result(&result, &[StateRequest::columns("mu", [2usize])]).unwrap_err();
        assert!(matches!(err, PlotError::ColumnOutOfRange { index: 2, ncols: 2, .. }));
    }

    #[test]
    fn test_picks_are_kept_with_the_series() {
        let request = StateRequest::columns("C", [Pick::from("b")]);
        let profiles = get_state_data(&tank(), &[request]).unwrap();
        let series = profiles.get("C").unwrap();
        assert_eq!(series.selection, Some(vec![1]));
        assert_eq!(series.picks, Some(vec![Pick::from("b")]));

        // Whole states carry their labels by name, flat ones nothing
        let profiles = get_state_data(&tank(), &["C".into(), "T".into()]).unwrap();
        assert_eq!(
            profiles.get("C").unwrap().picks,
            Some(vec![Pick::from("A"), Pick::from("B"), Pick::from("C")])
        );
        assert_eq!(profiles.get("T").unwrap().picks, None);
    }
}
