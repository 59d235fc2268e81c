//! Cell placement planning and the center-distance focus transform.
//!
//! Planning is pure: it walks the visible window row-major and decides which
//! positions to emit, where their top-left corners go and how they stack. The
//! engine then pairs each planned cell with a host child, measures it and
//! commits the rectangle and transform.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    color::Color,
    geometry::GridGeometry,
    px::{Px, PxPosition, PxRect, PxSize},
    viewport::ViewportWindow,
};

/// Smallest scale change that is written back to a child.
pub const SCALE_EPSILON: f32 = 0.01;

/// Default scale of a cell at (or beyond) one half-viewport from the center.
pub const DEFAULT_MIN_SCALE: f32 = 0.8;

/// Where a child is inserted in the host's drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// Drawn above every child attached so far.
    Top,
    /// Drawn beneath every child attached so far.
    Bottom,
}

/// The visual transform committed to a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    /// Uniform scale on both axes, within `[min_scale, 1.0]`.
    pub scale: f32,
    /// Background tint, present only when color interpolation is enabled.
    pub tint: Option<Color>,
}

/// A planned cell: which position goes where, and how it stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    /// Adapter position of the cell.
    pub position: usize,
    /// Top-left corner relative to the container origin.
    pub origin: PxPosition,
    /// Stacking relative to cells already emitted in this pass.
    pub z_order: ZOrder,
}

/// Planned cells for one pass; sized for a typical phone-sized window.
pub type CellPlan = SmallVec<[CellPlacement; 16]>;

/// Walks the visible window row-major, emitting every cell that intersects
/// the container.
///
/// A row ends when the next column would start past the right edge (minus
/// `trailing_padding.width`) or the grid wraps. The pass ends when the next
/// row would start past the bottom edge (minus `trailing_padding.height`) or
/// the next position runs past the item count. Cells up to and including
/// `focus_position` stack on top.
pub fn plan_cells(
    geometry: &GridGeometry,
    window: &ViewportWindow,
    container: PxSize,
    trailing_padding: PxSize,
    focus_position: usize,
) -> CellPlan {
    let mut plan = CellPlan::new();
    let grid = geometry.grid();
    let item_count = grid.item_count();
    let span_count = grid.span_count();
    let first = window.first_position;
    if first >= item_count {
        return plan;
    }

    let step_x = geometry.horizontal_extent();
    let step_y = geometry.vertical_extent();
    let right_limit = (container.width - trailing_padding.width).to_f32();
    let bottom_limit = (container.height - trailing_padding.height).to_f32();

    let start_left = window.columns.leading_edge();
    let mut left = start_left;
    let mut top = window.rows.leading_edge();
    let mut position = first;
    let mut rows_emitted = 1;

    loop {
        plan.push(CellPlacement {
            position,
            origin: PxPosition::new(Px::saturating_from_f32(left), Px::saturating_from_f32(top)),
            z_order: if position <= focus_position {
                ZOrder::Top
            } else {
                ZOrder::Bottom
            },
        });

        let mut next_row = (position + 1) % span_count == 0;
        if !next_row {
            left += step_x;
            if left > right_limit {
                next_row = true;
            } else {
                position += 1;
            }
        }
        if next_row {
            top += step_y;
            left = start_left;
            if top > bottom_limit {
                break;
            }
            position = first + rows_emitted * span_count;
            rows_emitted += 1;
        }
        if position >= item_count {
            break;
        }
    }
    plan
}

/// Scale of a cell from the distance between its center and the container
/// center, `max(min(scale_x, scale_y), min_scale)`.
///
/// Each axis falls off linearly: `1 - (1 - min_scale) * distance / half`,
/// where `half` is half the container extent on that axis.
pub fn focus_scale(rect: &PxRect, container: PxSize, min_scale: f32) -> f32 {
    let falloff = |center: Px, extent: Px| -> f32 {
        let parent_center = (extent / 2).raw().max(1);
        let fraction = (parent_center - center.raw()).unsigned_abs() as f32 / parent_center as f32;
        1.0 - (1.0 - min_scale) * fraction
    };
    let from_vertical = falloff(rect.center_y(), container.height);
    let from_horizontal = falloff(rect.center_x(), container.width);
    from_vertical.min(from_horizontal).max(min_scale).min(1.0)
}

/// Blends from `unselected` toward `selected` by `scale` remapped from
/// `[min_scale, 1.0]` onto `[0.0, 1.0]`.
pub fn focus_tint(unselected: Color, selected: Color, scale: f32, min_scale: f32) -> Color {
    let range = 1.0 - min_scale;
    let progress = if range <= f32::EPSILON {
        1.0
    } else {
        (scale - min_scale) / range
    };
    unselected.lerp(selected, progress)
}

/// Last scale written to each attached child.
#[derive(Debug)]
pub struct ScaleCache<C> {
    scales: FxHashMap<C, f32>,
}

impl<C> Default for ScaleCache<C> {
    fn default() -> Self {
        Self {
            scales: FxHashMap::default(),
        }
    }
}

impl<C: Copy + Eq + Hash> ScaleCache<C> {
    /// Records `scale` for `child` and returns `true` if it differs from the
    /// cached value by more than [`SCALE_EPSILON`] (or nothing was cached).
    pub fn update(&mut self, child: C, scale: f32) -> bool {
        match self.scales.get(&child) {
            Some(last) if (last - scale).abs() <= SCALE_EPSILON => false,
            _ => {
                self.scales.insert(child, scale);
                true
            }
        }
    }

    /// Forgets a single child.
    pub fn remove(&mut self, child: &C) {
        self.scales.remove(child);
    }

    /// Forgets every child.
    pub fn clear(&mut self) {
        self.scales.clear();
    }
}
