//! Example: Batch reactor A -> B -> C
//!
//! Builds the concentration and temperature profiles of a consecutive
//! first-order reaction in closed form, then:
//!
//! - plots concentrations and temperature on two stacked panels
//! - overlays the temperature on a twin axis of the intermediate B
//! - exports everything to CSV with a metadata header
//!
//! **Kinetics**:
//! - k₁ = 0.02 1/s, k₂ = 0.008 1/s
//! - C_A(0) = 1 mol/L
//! - Exothermic: T rises with the converted A
//!
//! Run with `RUST_LOG=debug` to see the layout decisions.

use std::collections::HashMap;

use procplot::output::export::{CsvExporter, CsvMetadata, Exporter};
use procplot::prelude::*;
use tracing_subscriber::EnvFilter;

/// Batch reactor with recorded profiles
struct BatchReactor {
    time: Vec<f64>,
    profiles: HashMap<String, StateData>,
    states: StateCatalog,
}

impl BatchReactor {
    fn simulate(k1: f64, k2: f64, t_end: f64, points: usize) -> procplot::Result<Self> {
        let dt = t_end / (points - 1) as f64;
        let time: Vec<f64> = (0..points).map(|i| i as f64 * dt).collect();

        let c_a: Vec<f64> = time.iter().map(|t| (-k1 * t).exp()).collect();
        let c_b: Vec<f64> = time
            .iter()
            .map(|t| k1 / (k2 - k1) * ((-k1 * t).exp() - (-k2 * t).exp()))
            .collect();
        let c_c: Vec<f64> = c_a.iter().zip(&c_b).map(|(a, b)| 1.0 - a - b).collect();
        let temp: Vec<f64> = c_a.iter().map(|a| 298.15 + 25.0 * (1.0 - a)).collect();

        let mut profiles = HashMap::new();
        profiles.insert("C".to_string(), StateData::from_columns(&[c_a, c_b, c_c])?);
        profiles.insert("T".to_string(), StateData::from_vec(temp));

        Ok(Self {
            time,
            profiles,
            states: StateCatalog::new()
                .with_state("C", StateInfo::new().units("mol/L").index(["A", "B", "C"]))
                .with_state("T", StateInfo::new().units("K")),
        })
    }
}

impl UnitOperation for BatchReactor {
    fn time_profile(&self) -> &[f64] {
        &self.time
    }

    fn profile(&self, state: &str) -> Option<&StateData> {
        self.profiles.get(state)
    }

    fn states(&self) -> &StateCatalog {
        &self.states
    }

    fn name(&self) -> &str {
        "Batch reactor"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Batch Reactor A -> B -> C - State Profiles");
    println!("═══════════════════════════════════════════════════════\n");

    let reactor = BatchReactor::simulate(0.02, 0.008, 600.0, 301)?;

    // ====== Stacked panels ======

    let requests = [StateRequest::from("C"), StateRequest::from("T")];
    let options = PlotOptions::new(PlotConfig::grid(2, 1).size(1024, 1024).title("Batch reactor"))
        .ylabels(["C_i", "T_R"]);
    let figure = plot_function(&reactor, &requests, "reactor_states.png", Some(&options))?;
    println!("✓ reactor_states.png ({} lines)", figure.line_count());

    // ====== Twin axis ======

    let overlay = [StateRequest::columns("C", ["B"]), StateRequest::from("T")];
    let options = PlotOptions::default().fig_map(vec![0, 0]);
    plot_function(&reactor, &overlay, "reactor_overlay.svg", Some(&options))?;
    println!("✓ reactor_overlay.svg");

    // ====== CSV ======

    let profiles = extract_states(&reactor, &requests)?;
    let mut metadata = CsvMetadata::from_unit(reactor.name());
    metadata.add_custom("k1", "0.02 1/s");
    metadata.add_custom("k2", "0.008 1/s");

    let exporter = CsvExporter::new(
        CsvConfig::default()
            .with_catalog(reactor.states().clone())
            .with_metadata(metadata),
    );
    exporter.export(&profiles, "reactor_states.csv")?;
    println!("✓ reactor_states.csv ({} time points)", profiles.time.len());

    Ok(())
}
