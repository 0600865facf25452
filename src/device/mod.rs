//! Capability traits for the graphics backend.
//!
//! Postfx never talks to a GPU API directly. A backend exposes exactly what the
//! composer needs: allocate/clone offscreen targets, report the current output size,
//! and configure the stencil test during masked composition. Everything else
//! (draw calls, shaders, swapchains) stays on the backend's side of the [`Pass`]
//! boundary.

use crate::{foundation::error::PostfxResult, pass::Pass};

/// Texture sampling filter for a render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextureFilter {
    /// Smooth (bilinear) sampling. Default for pass-chain targets.
    #[default]
    Linear,
    /// Nearest-texel sampling.
    Nearest,
}

/// Color format for a render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextureFormat {
    /// Full RGBA, 8 bits per channel. Default.
    #[default]
    Rgba8,
    /// RGB without alpha, 8 bits per channel.
    Rgb8,
}

/// Allocation parameters for an offscreen render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetDesc {
    /// Sampling filter.
    pub filter: TextureFilter,
    /// Color format.
    pub format: TextureFormat,
    /// Whether a stencil attachment is allocated alongside the color buffer.
    ///
    /// Pass-chain targets leave this off: the stencil used by mask passes lives on the
    /// main framebuffer and is only touched transiently during masked composition.
    pub stencil: bool,
}

/// Stencil comparison function set during masked composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilCompare {
    /// Accept fragments where the stencil value equals the reference.
    Equal,
    /// Accept fragments where the stencil value differs from the reference.
    NotEqual,
}

/// An offscreen color buffer owning GPU-side storage.
pub trait RenderTarget {
    /// Current dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the backing storage. Contents after a resize are unspecified.
    fn set_size(&mut self, width: u32, height: u32);

    /// Release the GPU-side storage. The target must not be rendered to afterwards.
    fn dispose(&mut self);
}

/// The graphics backend as seen by the composer.
///
/// `Sized` is required so the backend can hand the composer pass objects typed against
/// itself ([`Device::create_copy_pass`]).
pub trait Device: Sized {
    /// The backend's render-target type.
    type Target: RenderTarget;

    /// Current output (drawable) size in pixels.
    fn output_size(&self) -> (u32, u32);

    /// Allocate a fresh offscreen target.
    fn create_target(
        &mut self,
        width: u32,
        height: u32,
        desc: &TargetDesc,
    ) -> PostfxResult<Self::Target>;

    /// Allocate a fresh target with the same size and parameters as `target`.
    ///
    /// Storage is never shared: the clone is an independent buffer.
    fn clone_target(&mut self, target: &Self::Target) -> PostfxResult<Self::Target>;

    /// Build the full-screen copy pass the composer uses to resolve stencil-masked
    /// regions. Called once per composer.
    fn create_copy_pass(&mut self) -> PostfxResult<Box<dyn Pass<Self>>>;

    /// Set the stencil comparison function and reference value.
    fn set_stencil_compare(&mut self, compare: StencilCompare, reference: u32);

    /// Enable or disable the stencil test entirely.
    fn set_stencil_enabled(&mut self, enabled: bool);
}

#[cfg(test)]
#[path = "../../tests/unit/device/device.rs"]
mod tests;
