//! CPU renderer: raster buffers, bilinear sampling, the distortion compositor and offscreen
//! capture.

/// 9-tap displacement-and-blur compositor.
pub mod compositor;
/// Offscreen rendering over long-lived distortion state.
pub mod offscreen;
/// Float RGBA images and RGBA8 frames.
pub mod raster;
/// Bilinear texture lookup.
pub mod sampler;
