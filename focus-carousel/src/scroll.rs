//! Scroll offsets, clamping and per-gesture axis arbitration.

use crate::geometry::{GridGeometry, ScrollOffset};

/// A scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right scrolling through columns.
    Horizontal,
    /// Up/down scrolling through rows.
    Vertical,
}

/// Scroll phase reported by the host's gesture tracking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// No gesture or fling is in progress.
    #[default]
    Idle,
    /// A finger is down and moving the content.
    Dragging,
    /// The finger lifted and the host is flinging the content.
    Settling,
}

/// Which axis, if any, owns the current gesture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    /// Neither axis has consumed a delta yet.
    #[default]
    Free,
    /// The gesture belongs to this axis.
    Locked(Axis),
}

/// Cumulative offsets plus gesture bookkeeping.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollState {
    offset: ScrollOffset,
    lock: AxisLock,
    phase: ScrollPhase,
}

impl ScrollState {
    /// Current offsets.
    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Replaces the offsets, clamped into the geometry's bounds.
    pub fn set_offset(&mut self, offset: ScrollOffset, geometry: &GridGeometry) {
        self.offset = geometry.clamp_offset(offset);
    }

    /// Re-clamps the current offsets, e.g. after the item count shrank.
    pub fn clamp_to(&mut self, geometry: &GridGeometry) {
        self.offset = geometry.clamp_offset(self.offset);
    }

    /// Current axis ownership.
    pub fn lock(&self) -> AxisLock {
        self.lock
    }

    /// Current host-reported phase.
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Records a phase change and returns the previous phase.
    ///
    /// Starting a drag begins a new gesture and returning to idle ends it;
    /// both release the axis lock. A fling keeps the lock of the drag that
    /// started it.
    pub fn set_phase(&mut self, phase: ScrollPhase) -> ScrollPhase {
        let previous = self.phase;
        self.phase = phase;
        if matches!(phase, ScrollPhase::Dragging | ScrollPhase::Idle) && previous != phase {
            self.lock = AxisLock::Free;
        }
        previous
    }

    /// Returns `false` once the other axis has claimed the gesture.
    pub fn can_scroll(&self, axis: Axis) -> bool {
        match self.lock {
            AxisLock::Free => true,
            AxisLock::Locked(owner) => owner == axis,
        }
    }

    /// Applies a drag delta along `axis` and returns the delta consumed.
    ///
    /// The first non-zero delta claims the gesture for its axis. Deltas on the
    /// other axis are rejected for the rest of the gesture. When the new
    /// offset would leave `[0, max]` it is pinned to the bound and nothing is
    /// reported as consumed, so the host can run its edge effects.
    pub fn scroll_by(&mut self, axis: Axis, delta: f32, geometry: &GridGeometry) -> f32 {
        if delta == 0.0 || !delta.is_finite() || !self.can_scroll(axis) {
            return 0.0;
        }
        self.lock = AxisLock::Locked(axis);

        let (current, max) = match axis {
            Axis::Horizontal => (
                &mut self.offset.horizontal,
                geometry.max_horizontal_offset(),
            ),
            Axis::Vertical => (&mut self.offset.vertical, geometry.max_vertical_offset()),
        };
        let next = *current + delta;
        if next < 0.0 {
            *current = 0.0;
            0.0
        } else if next > max {
            *current = max.max(0.0);
            0.0
        } else {
            *current = next;
            delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::GridSpec, px::PxSize};

    fn geometry() -> GridGeometry {
        let mut grid = GridSpec::new(3).expect("valid span count");
        grid.configure(9);
        let mut geometry = GridGeometry::new(grid, 0.0);
        geometry.set_item_size(PxSize::from([100, 100]));
        geometry
    }

    #[test]
    fn delta_is_consumed_inside_bounds() {
        let geometry = geometry();
        let mut state = ScrollState::default();
        assert_eq!(state.scroll_by(Axis::Vertical, 40.0, &geometry), 40.0);
        assert_eq!(state.scroll_by(Axis::Vertical, -15.0, &geometry), -15.0);
        assert_eq!(state.offset(), ScrollOffset::new(0.0, 25.0));
    }

    #[test]
    fn clamping_reports_zero_consumed() {
        let geometry = geometry();
        let mut state = ScrollState::default();
        assert_eq!(state.scroll_by(Axis::Horizontal, -10.0, &geometry), 0.0);
        assert_eq!(state.offset().horizontal, 0.0);
        assert_eq!(state.scroll_by(Axis::Horizontal, 150.0, &geometry), 150.0);
        assert_eq!(state.scroll_by(Axis::Horizontal, 80.0, &geometry), 0.0);
        assert_eq!(state.offset().horizontal, 200.0);
    }

    #[test]
    fn first_axis_claims_the_gesture() {
        let geometry = geometry();
        let mut state = ScrollState::default();
        state.set_phase(ScrollPhase::Dragging);
        assert!(state.can_scroll(Axis::Horizontal));
        assert!(state.can_scroll(Axis::Vertical));

        assert_eq!(state.scroll_by(Axis::Vertical, 30.0, &geometry), 30.0);
        assert_eq!(state.lock(), AxisLock::Locked(Axis::Vertical));
        assert!(!state.can_scroll(Axis::Horizontal));
        assert_eq!(state.scroll_by(Axis::Horizontal, 30.0, &geometry), 0.0);
        assert_eq!(state.offset().horizontal, 0.0);

        // The fling keeps the lock, idle releases it.
        state.set_phase(ScrollPhase::Settling);
        assert!(!state.can_scroll(Axis::Horizontal));
        state.set_phase(ScrollPhase::Idle);
        assert!(state.can_scroll(Axis::Horizontal));
    }

    #[test]
    fn new_drag_releases_the_lock() {
        let geometry = geometry();
        let mut state = ScrollState::default();
        state.set_phase(ScrollPhase::Dragging);
        state.scroll_by(Axis::Horizontal, 10.0, &geometry);
        state.set_phase(ScrollPhase::Settling);
        assert_eq!(state.set_phase(ScrollPhase::Dragging), ScrollPhase::Settling);
        assert_eq!(state.lock(), AxisLock::Free);
    }

    #[test]
    fn zero_and_non_finite_deltas_do_not_claim() {
        let geometry = geometry();
        let mut state = ScrollState::default();
        assert_eq!(state.scroll_by(Axis::Vertical, 0.0, &geometry), 0.0);
        assert_eq!(state.scroll_by(Axis::Vertical, f32::NAN, &geometry), 0.0);
        assert_eq!(state.lock(), AxisLock::Free);
    }

    #[test]
    fn clamp_to_follows_shrinking_bounds() {
        let mut geometry = geometry();
        let mut state = ScrollState::default();
        state.set_offset(ScrollOffset::new(200.0, 200.0), &geometry);
        geometry.configure(4);
        state.clamp_to(&geometry);
        assert_eq!(state.offset(), ScrollOffset::new(200.0, 100.0));
    }
}
