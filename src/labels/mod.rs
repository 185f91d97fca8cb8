//! Axis label helpers
//!
//! - **latex**: name -> LaTeX / Unicode label formatting
//! - **selection**: label-or-position column resolution

pub mod latex;
pub mod selection;

pub use latex::{latexify_name, unicode_label, ScriptKind, GREEK_TOKENS};
pub use selection::{get_indexes, Pick};
