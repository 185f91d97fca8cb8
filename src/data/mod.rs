//! Simulation data access
//!
//! - **series**: `StateData` arrays and extracted `StateProfiles`
//! - **metadata**: per-state index labels and units (`StateCatalog`)
//! - **source**: `UnitOperation` / `DynamicResult` and the extraction helpers

pub mod metadata;
pub mod series;
pub mod source;

pub use metadata::{StateCatalog, StateInfo};
pub use series::{StateData, StateProfiles, StateSeries};
pub use source::{
    extract_states, get_state_data, get_states_result, state_catalog, DynamicResult,
    StateRequest, UnitOperation,
};
