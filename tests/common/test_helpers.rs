//! Helper functions for integration tests

use std::path::PathBuf;

use approx::relative_eq;

use tempfile::TempDir;

/// Assert that two series are close element-wise (within tolerance)
pub fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            relative_eq!(a, e, epsilon = tolerance),
            "{}: Element {} is {} instead of {} (tolerance {})",
            message, i, a, e, tolerance
        );
    }
}

/// Output file inside a fresh temporary directory
///
/// Keep the returned `TempDir` alive while the file is used.
pub fn temp_output(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join(file_name);
    (dir, path)
}
