//! Error types for carousel configuration and layout passes.

use thiserror::Error;

use crate::px::PxSize;

/// Rejected carousel configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    /// A grid needs at least one column.
    #[error("span count must be at least 1")]
    ZeroSpanCount,
    /// `min_scale` must be a finite value in `(0.0, 1.0]`.
    #[error("min scale {0} is outside (0.0, 1.0]")]
    InvalidMinScale(f32),
    /// Item gap must be finite and non-negative.
    #[error("item gap {0} must be finite and non-negative")]
    InvalidItemGap(f32),
}

/// Reasons a layout pass degraded to "no visible items".
///
/// These never escape the public API: the engine logs them, releases every
/// held child and retries on the next layout trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The host reported an empty container.
    #[error("container size {0:?} has no area")]
    EmptyViewport(PxSize),
    /// The host could not provide a child for the given adapter position.
    #[error("host has no child for position {0}")]
    ChildUnavailable(usize),
    /// The representative child measured to an empty size.
    #[error("child at position {position} measured to empty size {size:?}")]
    EmptyItem {
        /// Position of the measured child.
        position: usize,
        /// Size the host reported.
        size: PxSize,
    },
}
