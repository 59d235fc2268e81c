//! A recording, pool-backed [`CarouselHost`] for tests and headless demos.
//!
//! [`RecordingHost`] behaves like a small virtualized list: children are
//! handed out from a free pool, every child measures to one configured item
//! size, and drawing order is tracked the way `stack` describes it. Every
//! call the engine makes is appended to a call log so tests can assert on
//! exactly what a pass did.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    host::CarouselHost,
    placement::{VisualTransform, ZOrder},
    px::{PxRect, PxSize},
};

/// Handle to a child owned by a [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub u32);

/// One host call made by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCall {
    /// `obtain(position)` and what it returned.
    Obtain(usize, Option<ChildId>),
    /// `measure(child)`.
    Measure(ChildId),
    /// `stack(child, order)`.
    Stack(ChildId, ZOrder),
    /// `layout(child, rect)`.
    Layout(ChildId, PxRect),
    /// `apply_transform(child, transform)`.
    Transform(ChildId, VisualTransform),
    /// `recycle(child)`.
    Recycle(ChildId),
}

/// A fake host that records every call.
#[derive(Debug)]
pub struct RecordingHost {
    container: PxSize,
    trailing_padding: PxSize,
    item_size: PxSize,
    next_id: u32,
    pool: Vec<ChildId>,
    bound: FxHashMap<ChildId, usize>,
    measured: FxHashSet<ChildId>,
    drawing_order: Vec<ChildId>,
    layouts: FxHashMap<ChildId, PxRect>,
    transforms: FxHashMap<ChildId, VisualTransform>,
    unavailable: FxHashSet<usize>,
    calls: Vec<HostCall>,
    stray_recycles: usize,
}

impl RecordingHost {
    /// Creates a host with the given container and uniform item size.
    pub fn new(container: impl Into<PxSize>, item_size: impl Into<PxSize>) -> Self {
        Self {
            container: container.into(),
            trailing_padding: PxSize::ZERO,
            item_size: item_size.into(),
            next_id: 0,
            pool: Vec::new(),
            bound: FxHashMap::default(),
            measured: FxHashSet::default(),
            drawing_order: Vec::new(),
            layouts: FxHashMap::default(),
            transforms: FxHashMap::default(),
            unavailable: FxHashSet::default(),
            calls: Vec::new(),
            stray_recycles: 0,
        }
    }

    /// Sets the right and bottom padding reported to the engine.
    pub fn with_trailing_padding(mut self, padding: impl Into<PxSize>) -> Self {
        self.trailing_padding = padding.into();
        self
    }

    /// Resizes the container, as a host would on a configuration change.
    pub fn set_container_size(&mut self, size: impl Into<PxSize>) {
        self.container = size.into();
    }

    /// Changes the size children measure to from now on.
    pub fn set_item_size(&mut self, size: impl Into<PxSize>) {
        self.item_size = size.into();
    }

    /// Makes `obtain(position)` fail until [`restore`](Self::restore) is called.
    pub fn make_unavailable(&mut self, position: usize) {
        self.unavailable.insert(position);
    }

    /// Clears every injected failure.
    pub fn restore(&mut self) {
        self.unavailable.clear();
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Returns and clears the call log.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of children handed out and not yet recycled.
    pub fn live_children(&self) -> usize {
        self.bound.len()
    }

    /// Number of `recycle` calls for children that were not live.
    pub fn stray_recycles(&self) -> usize {
        self.stray_recycles
    }

    /// Number of children waiting in the free pool.
    pub fn pooled_children(&self) -> usize {
        self.pool.len()
    }

    /// Adapter positions of the live children, sorted.
    pub fn live_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.bound.values().copied().collect();
        positions.sort_unstable();
        positions
    }

    /// The live child bound to `position`.
    pub fn child_at(&self, position: usize) -> Option<ChildId> {
        self.bound
            .iter()
            .find_map(|(child, bound)| (*bound == position).then_some(*child))
    }

    /// The last rectangle committed for the child at `position`.
    pub fn rect_of(&self, position: usize) -> Option<PxRect> {
        self.child_at(position)
            .and_then(|child| self.layouts.get(&child).copied())
    }

    /// The last transform committed for the child at `position`.
    pub fn transform_of(&self, position: usize) -> Option<VisualTransform> {
        self.child_at(position)
            .and_then(|child| self.transforms.get(&child).copied())
    }

    /// Positions of the stacked children, bottom-most first.
    pub fn drawing_order(&self) -> Vec<usize> {
        self.drawing_order
            .iter()
            .filter_map(|child| self.bound.get(child).copied())
            .collect()
    }
}

impl CarouselHost for RecordingHost {
    type Child = ChildId;

    fn container_size(&self) -> PxSize {
        self.container
    }

    fn trailing_padding(&self) -> PxSize {
        self.trailing_padding
    }

    fn obtain(&mut self, position: usize) -> Option<ChildId> {
        let child = if self.unavailable.contains(&position) {
            None
        } else {
            let child = self.pool.pop().unwrap_or_else(|| {
                self.next_id += 1;
                ChildId(self.next_id)
            });
            self.bound.insert(child, position);
            Some(child)
        };
        self.calls.push(HostCall::Obtain(position, child));
        child
    }

    fn measured_size(&self, child: ChildId) -> Option<PxSize> {
        self.measured.contains(&child).then_some(self.item_size)
    }

    fn measure(&mut self, child: ChildId) -> Option<PxSize> {
        self.calls.push(HostCall::Measure(child));
        if !self.bound.contains_key(&child) {
            return None;
        }
        self.measured.insert(child);
        Some(self.item_size)
    }

    fn stack(&mut self, child: ChildId, order: ZOrder) {
        self.calls.push(HostCall::Stack(child, order));
        self.drawing_order.retain(|stacked| *stacked != child);
        match order {
            ZOrder::Top => self.drawing_order.push(child),
            ZOrder::Bottom => self.drawing_order.insert(0, child),
        }
    }

    fn layout(&mut self, child: ChildId, rect: PxRect) {
        self.calls.push(HostCall::Layout(child, rect));
        self.layouts.insert(child, rect);
    }

    fn apply_transform(&mut self, child: ChildId, transform: VisualTransform) {
        self.calls.push(HostCall::Transform(child, transform));
        self.transforms.insert(child, transform);
    }

    fn recycle(&mut self, child: ChildId) {
        self.calls.push(HostCall::Recycle(child));
        if self.bound.remove(&child).is_none() {
            self.stray_recycles += 1;
            return;
        }
        self.measured.remove(&child);
        self.drawing_order.retain(|stacked| *stacked != child);
        self.layouts.remove(&child);
        self.transforms.remove(&child);
        self.pool.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_reuses_recycled_children() {
        let mut host = RecordingHost::new([300, 300], [100, 100]);
        let first = host.obtain(0).expect("child");
        host.recycle(first);
        let second = host.obtain(5).expect("child");
        assert_eq!(first, second);
        assert_eq!(host.live_positions(), vec![5]);
        assert_eq!(host.pooled_children(), 0);
    }

    #[test]
    fn recycling_clears_measurement_and_flags_strays() {
        let mut host = RecordingHost::new([300, 300], [100, 100]);
        let child = host.obtain(0).expect("child");
        assert_eq!(host.measured_size(child), None);
        assert_eq!(host.measure(child), Some(PxSize::from([100, 100])));
        assert_eq!(host.measured_size(child), Some(PxSize::from([100, 100])));
        host.recycle(child);
        assert_eq!(host.measured_size(child), None);
        host.recycle(child);
        assert_eq!(host.stray_recycles(), 1);
    }

    #[test]
    fn stacking_tracks_drawing_order() {
        let mut host = RecordingHost::new([300, 300], [100, 100]);
        let a = host.obtain(0).expect("child");
        let b = host.obtain(1).expect("child");
        let c = host.obtain(2).expect("child");
        host.stack(a, ZOrder::Top);
        host.stack(b, ZOrder::Top);
        host.stack(c, ZOrder::Bottom);
        assert_eq!(host.drawing_order(), vec![2, 0, 1]);
        host.stack(c, ZOrder::Top);
        assert_eq!(host.drawing_order(), vec![0, 1, 2]);
    }

    #[test]
    fn unavailable_positions_fail_until_restored() {
        let mut host = RecordingHost::new([300, 300], [100, 100]);
        host.make_unavailable(3);
        assert_eq!(host.obtain(3), None);
        assert_eq!(host.calls(), &[HostCall::Obtain(3, None)]);
        host.restore();
        assert!(host.obtain(3).is_some());
    }
}
