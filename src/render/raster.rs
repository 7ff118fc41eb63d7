use crate::foundation::core::Viewport;
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::foundation::math::{u8_to_unit, unit_to_u8};
use crate::render::sampler::Texture;

/// Straight-alpha RGBA image with `f32` channels in `[0, 1]`, row-major, top row first.
///
/// Used both for the source image and for render output (see [`FrameBuffer`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

/// Output of one compositor invocation. Same layout as the source image.
pub type FrameBuffer = Raster;

impl Raster {
    /// Wrap interleaved RGBA `f32` data. Rejects zero-area sizes and mismatched lengths.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> InkwarpResult<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(InkwarpError::precondition(format!(
                "raster data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [f32; 4]) -> InkwarpResult<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: rgba.iter().copied().cycle().take(len).collect(),
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [f32; 4],
    ) -> InkwarpResult<Self> {
        let mut data = Vec::with_capacity(checked_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert tightly packed RGBA8 bytes to normalized floats.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> InkwarpResult<Self> {
        let expected = checked_len(width, height)?;
        if bytes.len() != expected {
            return Err(InkwarpError::precondition(format!(
                "rgba8 length {} does not match {width}x{height}x4",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: bytes.iter().map(|&b| u8_to_unit(b)).collect(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native size as a viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    /// Interleaved RGBA channels.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// RGBA at integer pixel coordinates. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Quantize to an RGBA8 frame (straight alpha).
    pub fn to_rgba8(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| unit_to_u8(v)).collect(),
        }
    }
}

impl Texture<4> for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixel(x, y)
    }
}

/// A rendered frame as straight-alpha RGBA8 bytes, tightly packed, row-major, top row first.
///
/// This is the byte layout sinks and encoders consume (`-pix_fmt rgba`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Expected byte length for `width * height * 4`.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

pub(crate) fn checked_len(width: u32, height: u32) -> InkwarpResult<usize> {
    if width == 0 || height == 0 {
        return Err(InkwarpError::precondition(format!(
            "image must have non-zero area, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| InkwarpError::precondition("image buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
