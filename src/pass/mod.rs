//! The pass capability trait and the built-in passes that need no device specifics.

use crate::{device::Device, foundation::error::PostfxResult};

/// Closed set of pass roles the composer distinguishes.
///
/// The composer only needs to tell mask-opening and mask-closing passes apart from
/// everything else; every other effect is `Ordinary` regardless of what it draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PassKind {
    /// A regular effect pass.
    #[default]
    Ordinary,
    /// Opens a stencil-limited compositing region for subsequent passes.
    Mask,
    /// Closes the current stencil-limited compositing region.
    ClearMask,
}

/// One unit of image-transform work in a post-processing chain.
///
/// Passes are created and configured by the caller and handed to the composer, which
/// drives them in list order each frame. A pass receives the current read/write
/// targets for the duration of a single [`Pass::render`] call only.
pub trait Pass<D: Device> {
    /// Execute the pass.
    ///
    /// An ordinary pass samples `read` and draws into `write` or directly to the
    /// screen, per its own [`Pass::render_to_screen`]. `mask_active` tells the pass
    /// whether a stencil-masked region is currently open; how (and whether) it reacts
    /// is the pass's own business.
    fn render(
        &mut self,
        device: &mut D,
        write: &mut D::Target,
        read: &D::Target,
        delta: f64,
        mask_active: bool,
    ) -> PostfxResult<()>;

    /// Propagate an output resize to any pass-internal buffers.
    fn set_size(&mut self, width: u32, height: u32);

    /// Disabled passes are skipped entirely: no render, no swap, no mask transition.
    fn enabled(&self) -> bool {
        true
    }

    /// Whether the read/write targets should exchange roles after this pass.
    ///
    /// Passes that write directly to the screen, or whose output is not consumed by
    /// the next pass, return false.
    fn needs_swap(&self) -> bool {
        true
    }

    /// Whether the pass writes to the final framebuffer instead of the write target.
    fn render_to_screen(&self) -> bool {
        false
    }

    /// Flip where the pass writes. Used by [`Composer::bypass`](crate::Composer::bypass).
    fn set_render_to_screen(&mut self, to_screen: bool);

    /// Role tag consulted by the composer's mask tracking.
    fn kind(&self) -> PassKind {
        PassKind::Ordinary
    }
}

/// Built-in pass that closes a stencil-masked region.
///
/// The mask-opening side needs scene geometry and shaders and therefore lives with the
/// backend, but closing a mask is backend-agnostic: disable the stencil test and tag
/// the pass so the composer drops its mask flag.
#[derive(Debug)]
pub struct ClearMaskPass {
    /// Skipped by the composer when false.
    pub enabled: bool,
}

impl ClearMaskPass {
    /// Build an enabled clear-mask pass.
    pub fn new() -> Self {
        Self { enabled: true }
    }
}

impl Default for ClearMaskPass {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Device> Pass<D> for ClearMaskPass {
    fn render(
        &mut self,
        device: &mut D,
        _write: &mut D::Target,
        _read: &D::Target,
        _delta: f64,
        _mask_active: bool,
    ) -> PostfxResult<()> {
        device.set_stencil_enabled(false);
        Ok(())
    }

    fn set_size(&mut self, _width: u32, _height: u32) {}

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn needs_swap(&self) -> bool {
        false
    }

    // No output of its own, so nothing to redirect.
    fn set_render_to_screen(&mut self, _to_screen: bool) {}

    fn kind(&self) -> PassKind {
        PassKind::ClearMask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pass/pass.rs"]
mod tests;
