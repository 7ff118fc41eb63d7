//! Source image loading.

/// Image decoding into normalized rasters.
pub mod decode;
