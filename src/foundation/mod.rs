//! Shared plumbing used by every other module.

/// Error taxonomy and the crate-wide result alias.
pub mod error;
