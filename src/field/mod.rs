//! Displacement field generation.

/// Concentric-ring displacement field.
pub mod displacement;
