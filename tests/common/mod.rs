//! Common utilities for integration tests

pub mod mock_units;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_units::{ArchivedCstr, Crystallizer, Cstr};
pub use test_helpers::{assert_close, temp_output};
