//! Mock unit operations for testing
//!
//! Profiles follow closed-form expressions, so extracted values can be checked
//! against the formulas directly.

use std::collections::HashMap;

use procplot::data::{DynamicResult, StateCatalog, StateData, StateInfo, UnitOperation};

// =================================================================================================
// CSTR: A -> B, first order, heated jacket
// =================================================================================================

/// Continuous stirred tank with live profiles
///
/// - `C` (mol/L): columns `A`, `B`, with C_A = exp(-k t), C_B = 1 - C_A
/// - `T` (K): 298.15 + 0.1 t
/// - `vol_flow` (m**3/s, an fstate): constant outlet flow
pub struct Cstr {
    pub rate_constant: f64,
    time: Vec<f64>,
    profiles: HashMap<String, StateData>,
    states: StateCatalog,
    fstates: StateCatalog,
}

impl Cstr {
    pub fn new(points: usize, rate_constant: f64) -> Self {
        let time: Vec<f64> = (0..points).map(|i| i as f64 * 10.0).collect();

        let c_a: Vec<f64> = time.iter().map(|&t| Self::conc_a(rate_constant, t)).collect();
        let c_b: Vec<f64> = c_a.iter().map(|a| 1.0 - a).collect();
        let temp: Vec<f64> = time.iter().map(|t| 298.15 + 0.1 * t).collect();

        let mut profiles = HashMap::new();
        profiles.insert(
            "C".to_string(),
            StateData::from_columns(&[c_a, c_b]).expect("equal column lengths"),
        );
        profiles.insert("T".to_string(), StateData::from_vec(temp));
        profiles.insert("vol_flow".to_string(), StateData::from_vec(vec![1e-3; points]));

        Self {
            rate_constant,
            time,
            profiles,
            states: StateCatalog::new()
                .with_state("C", StateInfo::new().units("mol/L").index(["A", "B"]))
                .with_state("T", StateInfo::new().units("K")),
            fstates: StateCatalog::new()
                .with_state("vol_flow", StateInfo::new().units("m**3/s")),
        }
    }

    /// Analytical concentration of A at time t
    pub fn conc_a(rate_constant: f64, t: f64) -> f64 {
        (-rate_constant * t).exp()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }
}

impl UnitOperation for Cstr {
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

    fn name(&self) -> &str {
        "CSTR"
    }
}

// =================================================================================================
// Batch crystallizer with a stored result
// =================================================================================================

/// Metadata of the crystallizer states, as stored next to a run
pub const CRYSTALLIZER_STATES: &str = r#"{
    "mu_n": { "index": [0, 1, 2, 3], "units": "m**-3" },
    "temp": { "units": "K" }
}"#;

/// Batch crystallizer whose states live in a [`DynamicResult`]
///
/// - `mu_n`: moments 0..3 of the size distribution, mu_j = (j + 1) t
/// - `temp` (K): cooling ramp 320 - 0.5 t
pub struct Crystallizer {
    states: StateCatalog,
    result: DynamicResult,
}

impl Crystallizer {
    pub fn new(points: usize) -> Self {
        let time: Vec<f64> = (0..points).map(|i| i as f64).collect();

        let moments: Vec<Vec<f64>> = (0..4)
            .map(|j| time.iter().map(|t| (j + 1) as f64 * t).collect())
            .collect();
        let temp: Vec<f64> = time.iter().map(|t| 320.0 - 0.5 * t).collect();

        let states = StateCatalog::from_json_str(CRYSTALLIZER_STATES).expect("valid metadata");

        let result = DynamicResult::new(time)
            .with_state(
                "mu_n",
                StateData::from_columns(&moments).expect("equal column lengths"),
                StateInfo::new().index(["0", "1", "2", "3"]),
            )
            .with_state("temp", temp, StateInfo::new().units("K"));

        Self { states, result }
    }
}

impl UnitOperation for Crystallizer {
    fn time_profile(&self) -> &[f64] {
        &[]
    }

    fn profile(&self, _state: &str) -> Option<&StateData> {
        None
    }

    fn states(&self) -> &StateCatalog {
        &self.states
    }

    fn dynamic_result(&self) -> Option<&DynamicResult> {
        Some(&self.result)
    }

    fn name(&self) -> &str {
        "Batch crystallizer"
    }
}

// =================================================================================================
// CSTR run archived with reordered components
// =================================================================================================

/// Stored CSTR run whose result lists the components as `B`, `A`
///
/// The unit operation's own catalog keeps the `A`, `B` order of [`Cstr`].
pub struct ArchivedCstr {
    states: StateCatalog,
    result: DynamicResult,
}

impl ArchivedCstr {
    pub fn new(points: usize, rate_constant: f64) -> Self {
        let time: Vec<f64> = (0..points).map(|i| i as f64 * 10.0).collect();

        let c_a: Vec<f64> = time.iter().map(|&t| Cstr::conc_a(rate_constant, t)).collect();
        let c_b: Vec<f64> = c_a.iter().map(|a| 1.0 - a).collect();

        let result = DynamicResult::new(time).with_state(
            "C",
            StateData::from_columns(&[c_b, c_a]).expect("equal column lengths"),
            StateInfo::new().units("mol/L").index(["B", "A"]),
        );

        Self {
            states: StateCatalog::new()
                .with_state("C", StateInfo::new().units("mol/L").index(["A", "B"])),
            result,
        }
    }

    pub fn time(&self) -> &[f64] {
        &self.result.time
    }
}

impl UnitOperation for ArchivedCstr {
    fn time_profile(&self) -> &[f64] {
        &[]
    }

    fn profile(&self, _state: &str) -> Option<&StateData> {
        None
    }

    fn states(&self) -> &StateCatalog {
        &self.states
    }

    fn dynamic_result(&self) -> Option<&DynamicResult> {
        Some(&self.result)
    }

    fn name(&self) -> &str {
        "Archived CSTR"
    }
}
