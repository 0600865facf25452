//! The composer: pass ordering, ping-pong buffering, and mask-stack tracking.

use crate::{
    device::{Device, RenderTarget, StencilCompare, TargetDesc},
    foundation::error::{PostfxError, PostfxResult},
    pass::{Pass, PassKind},
};

/// Stencil reference value written by mask passes and compared against during masked
/// composition.
pub const MASK_STENCIL_REF: u32 = 1;

/// Drives an ordered chain of post-processing passes over two ping-pong render targets.
///
/// The composer owns both targets exclusively. The write/read roles are indices into
/// the fixed two-element array, so a swap is a single index flip and the two roles can
/// never alias the same buffer.
///
/// Pass list order is execution order. After a pass that reports
/// [`needs_swap`](Pass::needs_swap), the roles exchange so the next pass reads what the
/// previous one wrote. While a stencil mask is open, each swap is preceded by a
/// copy-pass resolve restricted to the unmasked region (see [`Composer::render`]).
pub struct Composer<D: Device> {
    targets: [D::Target; 2],
    // Index of the write target; the read target is always the other element.
    write_idx: usize,
    passes: Vec<Box<dyn Pass<D>>>,
    // Retained privately for stencil resolves, never part of `passes`.
    copy_pass: Box<dyn Pass<D>>,
}

impl<D: Device> Composer<D> {
    /// Build a composer with an empty pass chain.
    ///
    /// If `target` is `None`, a target sized to the device's current output is
    /// allocated with [`TargetDesc::default`]: linear filtering, RGBA8, no stencil
    /// (the stencil used by mask passes lives on the main framebuffer). The second
    /// ping-pong target is always cloned from the first, so both stay identical in
    /// size and format.
    pub fn new(device: &mut D, target: Option<D::Target>) -> PostfxResult<Self> {
        let first = match target {
            Some(t) => t,
            None => {
                let (width, height) = device.output_size();
                device.create_target(width, height, &TargetDesc::default())?
            }
        };
        let second = device.clone_target(&first)?;
        let copy_pass = device.create_copy_pass()?;

        Ok(Self {
            targets: [first, second],
            write_idx: 0,
            passes: Vec::new(),
            copy_pass,
        })
    }

    /// Append a pass to the end of the chain.
    ///
    /// The pass is immediately sized to the composer's current output dimensions, so
    /// pass-internal buffers stay consistent even when added after construction.
    pub fn add_pass(&mut self, mut pass: Box<dyn Pass<D>>) {
        let (width, height) = self.targets[0].size();
        pass.set_size(width, height);
        self.passes.push(pass);
    }

    /// Insert a pass at `index`, shifting later passes back.
    ///
    /// Unlike [`Composer::add_pass`] this does not resize the pass; sizing a pass
    /// inserted after construction is the caller's responsibility.
    pub fn insert_pass(&mut self, pass: Box<dyn Pass<D>>, index: usize) -> PostfxResult<()> {
        if index > self.passes.len() {
            return Err(PostfxError::validation(format!(
                "insert index {index} out of range for chain of {} passes",
                self.passes.len()
            )));
        }
        self.passes.insert(index, pass);
        Ok(())
    }

    /// Toggle whether the chain is skipped.
    ///
    /// With `enable` the first pass renders directly to screen (bypassing every later
    /// pass); without it the last pass does. Exactly one of the two ends is
    /// screen-writing at a time. The responsibility follows whichever passes sit at
    /// the ends when this is called; reordering the chain afterwards moves it.
    pub fn bypass(&mut self, enable: bool) -> PostfxResult<()> {
        if self.passes.is_empty() {
            return Err(PostfxError::invalid_state(
                "bypass requires a non-empty pass chain",
            ));
        }
        let last = self.passes.len() - 1;
        self.passes[last].set_render_to_screen(!enable);
        self.passes[0].set_render_to_screen(enable);
        Ok(())
    }

    /// Number of passes in the chain.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether the chain has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// The target currently holding the write role.
    pub fn write_target(&self) -> &D::Target {
        &self.targets[self.write_idx]
    }

    /// The target currently holding the read role.
    pub fn read_target(&self) -> &D::Target {
        &self.targets[1 - self.write_idx]
    }

    /// Execute the chain for one frame.
    ///
    /// Passes run in list order; disabled passes are skipped entirely. `delta` is
    /// opaque to the composer and handed through to every pass unchanged.
    ///
    /// Mask tracking is local to one call: an enabled [`PassKind::Mask`] pass raises
    /// the mask flag, an enabled [`PassKind::ClearMask`] pass drops it, and every pass
    /// in between renders with `mask_active` set. While the flag is up, each swap is
    /// preceded by a stencil resolve: the stencil test is flipped to NOT-EQUAL the
    /// mask reference, the private copy pass runs over the current targets, and the
    /// test is restored to EQUAL. That keeps content outside the masked region from
    /// leaking into the composited result of a subsequent masked pass.
    #[tracing::instrument(level = "trace", skip(self, device))]
    pub fn render(&mut self, device: &mut D, delta: f64) -> PostfxResult<()> {
        let mut mask_active = false;

        let Self {
            targets,
            write_idx,
            passes,
            copy_pass,
        } = self;

        for pass in passes.iter_mut() {
            if !pass.enabled() {
                continue;
            }

            let (write, read) = split_targets(targets, *write_idx);
            pass.render(device, write, read, delta, mask_active)?;

            if pass.needs_swap() {
                if mask_active {
                    device.set_stencil_compare(StencilCompare::NotEqual, MASK_STENCIL_REF);
                    let (write, read) = split_targets(targets, *write_idx);
                    copy_pass.render(device, write, read, delta, false)?;
                    device.set_stencil_compare(StencilCompare::Equal, MASK_STENCIL_REF);
                }
                *write_idx = 1 - *write_idx;
            }

            match pass.kind() {
                PassKind::Mask => mask_active = true,
                PassKind::ClearMask => mask_active = false,
                PassKind::Ordinary => {}
            }
        }

        Ok(())
    }

    /// Resize both owned targets, then every pass in list order.
    ///
    /// Idempotent; does not touch pass order, enabled flags, or buffer roles.
    pub fn set_size(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "resizing pass chain");
        for target in &mut self.targets {
            target.set_size(width, height);
        }
        for pass in &mut self.passes {
            pass.set_size(width, height);
        }
    }

    /// Dispose both owned targets and adopt a fresh pair.
    ///
    /// `target` becomes the first target (if `None`, the first target is cloned and
    /// sized to the device's current output); the second is cloned from it. Buffer
    /// roles return to their initial assignment. The pass chain and the private copy
    /// pass are untouched.
    pub fn reset(&mut self, device: &mut D, target: Option<D::Target>) -> PostfxResult<()> {
        let first = match target {
            Some(t) => t,
            None => {
                let mut t = device.clone_target(&self.targets[0])?;
                let (width, height) = device.output_size();
                t.set_size(width, height);
                t
            }
        };
        let second = device.clone_target(&first)?;

        let old = std::mem::replace(&mut self.targets, [first, second]);
        for mut target in old {
            target.dispose();
        }
        self.write_idx = 0;
        tracing::debug!("pass chain reset");
        Ok(())
    }
}

// Split the two-element target array into distinct write/read borrows.
fn split_targets<T>(targets: &mut [T; 2], write_idx: usize) -> (&mut T, &T) {
    let (a, b) = targets.split_at_mut(1);
    if write_idx == 0 {
        (&mut a[0], &b[0])
    } else {
        (&mut b[0], &a[0])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composer/composer.rs"]
mod tests;
