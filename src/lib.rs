//! Postfx is a device-agnostic post-processing pass composer.
//!
//! A post-processing chain is an ordered sequence of full-screen image-transform passes
//! (blur, glitch, color-grade, ...) applied to an already-rendered scene. Postfx drives
//! that chain over two ping-pong render targets so effects can be stacked without
//! re-rendering geometry per effect, and tracks a stencil-mask region so a sub-chain of
//! passes can composite into a limited screen area.
//!
//! # Pipeline overview
//!
//! 1. Implement [`Device`] and [`RenderTarget`] for your graphics backend
//! 2. Implement [`Pass`] for each effect (or adapt existing full-screen shaders)
//! 3. Build a [`Composer`], [`Composer::add_pass`] the effects in order
//! 4. Call [`Composer::render`] once per frame with the frame delta-time
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No device knowledge**: the composer only ever asks a [`Device`] to allocate,
//!   clone, and resize offscreen targets and to flip its stencil test; everything
//!   GPU-specific lives behind the two capability traits.
//! - **Single-threaded frames**: a render call is a plain sequential iteration over the
//!   pass list on the thread that owns the graphics context. Passes borrow the
//!   read/write targets for one call only.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composer;
mod device;
mod foundation;
mod pass;

pub use composer::{Composer, MASK_STENCIL_REF};
pub use device::{Device, RenderTarget, StencilCompare, TargetDesc, TextureFilter, TextureFormat};
pub use foundation::error::{PostfxError, PostfxResult};
pub use pass::{ClearMaskPass, Pass, PassKind};
