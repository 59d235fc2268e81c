//! The contract between the engine and the virtualized list that owns the
//! child elements.
//!
//! The host is the only thing that can create, measure, draw, or pool
//! children. The engine never holds a child outside the attached set it
//! tracks, and every child it obtains in a pass is either placed in that pass
//! or handed straight back through [`CarouselHost::recycle`].

use std::hash::Hash;

use crate::{
    placement::{VisualTransform, ZOrder},
    px::{PxRect, PxSize},
};

/// A virtualized list host.
pub trait CarouselHost {
    /// Handle to a child element borrowed from the host's pool.
    type Child: Copy + Eq + Hash + std::fmt::Debug;

    /// Current container size in physical pixels.
    fn container_size(&self) -> PxSize;

    /// Padding on the trailing edges: `width` is the right padding and
    /// `height` the bottom padding. Rows and columns that would start inside
    /// it are not emitted.
    fn trailing_padding(&self) -> PxSize {
        PxSize::ZERO
    }

    /// Obtains a child bound to `position`, reusing a pooled element when
    /// possible. `None` means the host cannot provide one right now.
    fn obtain(&mut self, position: usize) -> Option<Self::Child>;

    /// The child's current measured size, or `None` if it has never been
    /// measured or its content asked for a new measurement.
    fn measured_size(&self, child: Self::Child) -> Option<PxSize>;

    /// Measures the child, including its margins.
    fn measure(&mut self, child: Self::Child) -> Option<PxSize>;

    /// Adds (or re-stacks) an attached child in the drawing order.
    fn stack(&mut self, child: Self::Child, order: ZOrder);

    /// Commits the child's layout rectangle.
    fn layout(&mut self, child: Self::Child, rect: PxRect);

    /// Commits the child's visual transform.
    fn apply_transform(&mut self, child: Self::Child, transform: VisualTransform);

    /// Returns the child to the pool.
    fn recycle(&mut self, child: Self::Child);
}
