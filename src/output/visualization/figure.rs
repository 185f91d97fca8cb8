//! Plotting states of a unit operation
//!
//! [`plot_function`] chains the three steps of a plot:
//!
//! ```text
//! extract_states ──► layout_figure ──► render_figure
//!  (data::source)      (layout)          (render)
//! ```
//!
//! Units and legend labels come from the unit operation's own catalogs
//! (`states` merged with `fstates`), even when the arrays are read from its
//! dynamic result.

use tracing::debug;

use super::config::PlotOptions;
use super::layout::{layout_figure, Figure};
use super::render::render_figure;
use crate::data::{extract_states, state_catalog, StateRequest, UnitOperation};
use crate::error::Result;

/// Extract and lay out states without drawing them
///
/// `options` defaults to one panel, one state per panel in request order.
pub fn build_figure<U: UnitOperation + ?Sized>(
    uo: &U,
    requests: &[StateRequest],
    options: Option<&PlotOptions>,
) -> Result<Figure> {
    let default_options = PlotOptions::default();
    let options = options.unwrap_or(&default_options);

    let profiles = extract_states(uo, requests)?;
    let catalog = state_catalog(uo);

    debug!(
        unit = uo.name(),
        states = profiles.len(),
        "building figure"
    );

    layout_figure(&profiles, &catalog, options)
}

/// Plot states of a unit operation to an image file
///
/// # Arguments
///
/// * `uo`          — Unit operation holding the recorded states
/// * `requests`    — States to plot, whole or restricted to some columns
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `options`     — Panel mapping, y-labels, units and image config (None = defaults)
///
/// # Returns
///
/// The laid-out [`Figure`], describing every panel, axis and line drawn.
///
/// # Example
///
/// ```rust,ignore
/// use procplot::data::StateRequest;
/// use procplot::output::visualization::{plot_function, PlotConfig, PlotOptions};
///
/// // Concentrations of A and B on top, temperature below
/// let options = PlotOptions::new(PlotConfig::grid(2, 1)).fig_map(vec![0, 1]);
/// let figure = plot_function(
///     &reactor,
///     &[StateRequest::columns("C", ["A", "B"]), StateRequest::from("T")],
///     "reactor.png",
///     Some(&options),
/// )?;
/// ```
pub fn plot_function<U: UnitOperation + ?Sized>(
    uo: &U,
    requests: &[StateRequest],
    output_path: &str,
    options: Option<&PlotOptions>,
) -> Result<Figure> {
    let default_options = PlotOptions::default();
    let options = options.unwrap_or(&default_options);

    let figure = build_figure(uo, requests, Some(options))?;
    render_figure(&figure, output_path, &options.config)?;

    Ok(figure)
}
