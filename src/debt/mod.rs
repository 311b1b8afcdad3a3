//! Cross-file debt detectors.
//!
//! Both detectors accumulate per-file data for the duration of one run and
//! produce their metrics once every file has been seen.

pub mod circular;
pub mod duplication;

pub use circular::{CircularDependency, DependencyGraph, DependencyNode};
pub use duplication::{CodeBlock, DuplicationDetector};
