//! Session-level drivers over the renderer: the interactive tuning session and strength sweeps.

/// Interactive strength tuning and save.
pub mod interactive;
/// Strength sweeps streamed into frame sinks.
pub mod sweep;
