use std::f64::consts::TAU;

use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::sampler::Texture;

/// Default number of concentric rings across the unit diagonal.
pub const DEFAULT_PERIOD: u32 = 32;

/// Dense 2-channel displacement field.
///
/// Despite the "noise" name used on the command line, the field is a deterministic concentric
/// ring pattern centered on the top-left corner. Each texel stores `(sin, cos)` of the ring phase
/// remapped into `[0, 1]`, so the pair decodes to a unit direction via `2c - 1` and the phase
/// never wraps during bilinear blending.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacementField {
    width: u32,
    height: u32,
    period: u32,
    data: Vec<[f32; 2]>,
}

impl DisplacementField {
    /// Generate the field for an image of `width x height` with `period` rings.
    ///
    /// For pixel `(x, y)`: `r = sqrt((x/W)^2 + (y/H)^2)`, `phase = 2π·r·period`,
    /// `c0 = 0.5·sin(phase) + 0.5`, `c1 = 0.5·cos(phase) + 0.5`.
    #[tracing::instrument(level = "debug")]
    pub fn generate(width: u32, height: u32, period: u32) -> InkwarpResult<Self> {
        if period == 0 {
            return Err(InkwarpError::configuration("period must be a positive integer"));
        }
        if width == 0 || height == 0 {
            return Err(InkwarpError::precondition(format!(
                "displacement field must have non-zero area, got {width}x{height}"
            )));
        }

        let w = f64::from(width);
        let h = f64::from(height);
        let rings = f64::from(period);
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let v = f64::from(y) / h;
            for x in 0..width {
                let u = f64::from(x) / w;
                let phase = TAU * (u * u + v * v).sqrt() * rings;
                data.push([
                    (0.5 * phase.sin() + 0.5).clamp(0.0, 1.0) as f32,
                    (0.5 * phase.cos() + 0.5).clamp(0.0, 1.0) as f32,
                ]);
            }
        }

        tracing::debug!(width, height, period, "generated displacement field");
        Ok(Self {
            width,
            height,
            period,
            data,
        })
    }

    /// Field width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Field height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ring count the field was generated with.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// `true` when this field was generated for exactly these parameters.
    pub fn matches(&self, width: u32, height: u32, period: u32) -> bool {
        self.width == width && self.height == height && self.period == period
    }

    /// Encoded channels at integer coordinates.
    ///
    /// Panics if `(x, y)` is outside the field.
    pub fn at(&self, x: u32, y: u32) -> [f32; 2] {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Raw texels, row-major.
    pub fn texels(&self) -> &[[f32; 2]] {
        &self.data
    }
}

impl Texture<2> for DisplacementField {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> [f32; 2] {
        self.at(x, y)
    }
}

/// Decode field channels into a displacement vector scaled by `strength` (implementation units).
pub fn decode_displacement(channels: [f32; 2], strength: f32) -> [f32; 2] {
    [
        strength * 2.0 * (channels[0] - 0.5),
        strength * 2.0 * (channels[1] - 0.5),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/field/displacement.rs"]
mod tests;
