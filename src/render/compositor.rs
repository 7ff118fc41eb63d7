use rayon::prelude::*;

use crate::field::displacement::{DisplacementField, decode_displacement};
use crate::foundation::core::{Strength, Viewport};
use crate::foundation::error::InkwarpResult;
use crate::render::raster::{FrameBuffer, Raster, checked_len};
use crate::render::sampler::sample;

/// Tap offsets in units of the viewport step, in kernel order (top row first).
const TAPS: [(f32, f32); 9] = [
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (-1.0, 0.0),
    (0.0, 0.0),
    (1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

/// Binomial 3x3 weights matching [`TAPS`]; they sum to [`KERNEL_SUM`].
pub const KERNEL_WEIGHTS: [f32; 9] = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];

/// Normalization divisor for [`KERNEL_WEIGHTS`].
pub const KERNEL_SUM: f32 = 16.0;

/// Compositor execution options. None of them change the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompositorOpts {
    /// Split rows across the rayon thread pool.
    pub parallel: bool,
}

/// Render one distorted frame of `viewport` size.
///
/// Each of the nine kernel taps looks up the displacement field at its own offset position and
/// then samples the image at the displaced coordinate, so the blur mixes already-displaced samples.
/// At zero strength this reduces to [`blur3x3`].
pub fn render(
    image: &Raster,
    field: &DisplacementField,
    strength: Strength,
    viewport: Viewport,
    opts: CompositorOpts,
) -> InkwarpResult<FrameBuffer> {
    let viewport = Viewport::new(viewport.width, viewport.height)?;
    let s = strength.units();
    composite(viewport, opts, |u, v| {
        let d = decode_displacement(sample(field, u, v), s);
        sample(image, u + d[0], v + d[1])
    })
}

/// The same 3x3 kernel applied to the image without any displacement.
pub fn blur3x3(
    image: &Raster,
    viewport: Viewport,
    opts: CompositorOpts,
) -> InkwarpResult<FrameBuffer> {
    let viewport = Viewport::new(viewport.width, viewport.height)?;
    composite(viewport, opts, |u, v| sample(image, u, v))
}

fn composite<F>(viewport: Viewport, opts: CompositorOpts, tap: F) -> InkwarpResult<FrameBuffer>
where
    F: Fn(f32, f32) -> [f32; 4] + Sync,
{
    let row_len = viewport.width as usize * 4;
    let mut data = vec![0.0f32; checked_len(viewport.width, viewport.height)?];

    if opts.parallel {
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| shade_row(row, y as u32, viewport, &tap));
    } else {
        for (y, row) in data.chunks_mut(row_len).enumerate() {
            shade_row(row, y as u32, viewport, &tap);
        }
    }

    Raster::new(viewport.width, viewport.height, data)
}

fn shade_row<F>(row: &mut [f32], y: u32, viewport: Viewport, tap: &F)
where
    F: Fn(f32, f32) -> [f32; 4],
{
    let (dx, dy) = viewport.tap_step();
    let v = (y as f32 + 0.5) / viewport.height as f32;
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let u = (x as f32 + 0.5) / viewport.width as f32;

        let mut acc = [0.0f32; 4];
        for (&(ox, oy), &w) in TAPS.iter().zip(KERNEL_WEIGHTS.iter()) {
            let c = tap(u + ox * dx, v + oy * dy);
            for ch in 0..4 {
                acc[ch] += w * c[ch];
            }
        }
        for ch in 0..4 {
            px[ch] = (acc[ch] / KERNEL_SUM).clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
