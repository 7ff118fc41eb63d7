use crate::field::displacement::DisplacementField;
use crate::foundation::core::{Strength, Viewport};
use crate::foundation::error::InkwarpResult;
use crate::render::compositor::{CompositorOpts, render};
use crate::render::raster::{FrameBuffer, Raster};

/// Everything the compositor needs between frames: the source image, its cached displacement
/// field, the current strength and the on-screen viewport.
///
/// Renders never overlap; strength and viewport are plain fields mutated between calls.
#[derive(Clone, Debug)]
pub struct DistortionState {
    image: Raster,
    field: DisplacementField,
    strength: Strength,
    viewport: Viewport,
    opts: CompositorOpts,
}

impl DistortionState {
    /// Build state for `image`, generating the field at the image's native size.
    ///
    /// The preview viewport starts at the image size.
    pub fn new(
        image: Raster,
        period: u32,
        strength: Strength,
        opts: CompositorOpts,
    ) -> InkwarpResult<Self> {
        let field = DisplacementField::generate(image.width(), image.height(), period)?;
        Ok(Self {
            viewport: image.viewport(),
            image,
            field,
            strength,
            opts,
        })
    }

    /// Source image.
    pub fn image(&self) -> &Raster {
        &self.image
    }

    /// Cached displacement field.
    pub fn field(&self) -> &DisplacementField {
        &self.field
    }

    /// Current strength.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Replace the strength used by the next render.
    pub fn set_strength(&mut self, strength: Strength) {
        self.strength = strength;
    }

    /// Ring count of the cached field.
    pub fn period(&self) -> u32 {
        self.field.period()
    }

    /// Change the ring count, regenerating the field only when it actually changes.
    pub fn set_period(&mut self, period: u32) -> InkwarpResult<()> {
        if !self
            .field
            .matches(self.image.width(), self.image.height(), period)
        {
            self.field = DisplacementField::generate(self.image.width(), self.image.height(), period)?;
        }
        Ok(())
    }

    /// On-screen viewport used by [`DistortionState::render_viewport`].
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the on-screen viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> InkwarpResult<()> {
        self.viewport = Viewport::new(viewport.width, viewport.height)?;
        Ok(())
    }

    /// Compositor options.
    pub fn opts(&self) -> CompositorOpts {
        self.opts
    }

    /// Render at the on-screen viewport size.
    pub fn render_viewport(&self) -> InkwarpResult<FrameBuffer> {
        render(
            &self.image,
            &self.field,
            self.strength,
            self.viewport,
            self.opts,
        )
    }

    /// Render offscreen at `width x height`, independent of the on-screen viewport.
    ///
    /// The tap step is derived from the output size; the stored viewport is left untouched, so
    /// later preview renders keep their own step.
    #[tracing::instrument(level = "debug", skip(self), fields(strength = self.strength.percent()))]
    pub fn render_to_buffer(&self, width: u32, height: u32) -> InkwarpResult<FrameBuffer> {
        let target = Viewport::new(width, height)?;
        render(&self.image, &self.field, self.strength, target, self.opts)
    }

    /// Render offscreen at the image's native size.
    pub fn render_native(&self) -> InkwarpResult<FrameBuffer> {
        self.render_to_buffer(self.image.width(), self.image.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/offscreen.rs"]
mod tests;
