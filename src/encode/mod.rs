//! Output paths: frame sinks for sweeps and PNG export for stills.
//!
//! Sinks consume rendered frames in presentation order and are driven by the sweep driver.

/// `ffmpeg`-based video sink (system `ffmpeg` binary).
pub mod ffmpeg;
/// Still image export.
pub mod png;
/// Raw RGBA byte stream sink.
pub mod raw;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
