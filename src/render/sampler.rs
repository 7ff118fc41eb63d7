use crate::foundation::math::lerp;

/// A 2D grid of `N`-channel texels addressable by integer coordinates.
///
/// Implemented by the source image (4 channels) and the displacement field (2 channels), so both
/// go through the exact same lookup path.
pub trait Texture<const N: usize> {
    /// `(width, height)` in texels. Both are non-zero.
    fn size(&self) -> (u32, u32);

    /// Texel at integer coordinates inside `size()`.
    fn texel(&self, x: u32, y: u32) -> [f32; N];
}

/// How normalized coordinates outside `[0, 1]` are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Clamp to the edge texel; no wraparound.
    #[default]
    Clamp,
    /// Wrap around (tiling).
    Repeat,
}

/// Bilinear lookup at normalized `(u, v)` with clamp-to-edge addressing.
pub fn sample<const N: usize, T: Texture<N> + ?Sized>(tex: &T, u: f32, v: f32) -> [f32; N] {
    sample_with(tex, u, v, EdgeMode::Clamp)
}

/// Bilinear lookup at normalized `(u, v)`.
///
/// Texel centers sit at `(i + 0.5) / size`, so `u = 0` and `u = 1` land on the outer half-texel
/// and resolve to the edge texels.
pub fn sample_with<const N: usize, T: Texture<N> + ?Sized>(
    tex: &T,
    u: f32,
    v: f32,
    edge: EdgeMode,
) -> [f32; N] {
    let (w, h) = tex.size();
    let (u, v) = match edge {
        EdgeMode::Clamp => (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)),
        EdgeMode::Repeat => (u - u.floor(), v - v.floor()),
    };

    let fx = u * w as f32 - 0.5;
    let fy = v * h as f32 - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let (x0, x1) = (resolve(x0 as i64, w, edge), resolve(x0 as i64 + 1, w, edge));
    let (y0, y1) = (resolve(y0 as i64, h, edge), resolve(y0 as i64 + 1, h, edge));

    let top = lerp(tex.texel(x0, y0), tex.texel(x1, y0), tx);
    let bottom = lerp(tex.texel(x0, y1), tex.texel(x1, y1), tx);
    lerp(top, bottom, ty)
}

fn resolve(i: i64, size: u32, edge: EdgeMode) -> u32 {
    let size = i64::from(size);
    match edge {
        EdgeMode::Clamp => i.clamp(0, size - 1) as u32,
        EdgeMode::Repeat => i.rem_euclid(size) as u32,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sampler.rs"]
mod tests;
