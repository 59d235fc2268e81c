//! Windowing: which cell is first visible, and by how much it is scrolled.
//!
//! At offset zero the first item sits centered in the viewport, so the first
//! scroll "unit" on each axis is not a full item step: it is the distance that
//! pushes the first item completely past the leading edge,
//! `viewport_extent / 2 + item_extent / 2`. Past that threshold every further
//! unit is a regular `item + gap` step and the leading cell starts one `gap`
//! into the viewport.

use crate::geometry::{GridGeometry, ScrollOffset};
use crate::px::PxSize;

/// Windowing result along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    /// Index of the first visible row or column.
    pub first_index: usize,
    /// Pixels the first visible cell has scrolled past its start edge.
    pub remainder: f32,
    /// Unscrolled leading edge of the first visible cell.
    pub start: f32,
}

impl AxisWindow {
    /// Leading edge of the first visible cell after applying the remainder.
    pub fn leading_edge(&self) -> f32 {
        self.start - self.remainder
    }
}

/// Resolves one axis.
///
/// `min_offset` is the leading edge of the first cell at offset zero, `gap`
/// the spacing between cells and `item_extent` the item size along the axis.
pub fn resolve_axis(
    offset: f32,
    viewport_extent: f32,
    item_extent: f32,
    gap: f32,
    min_offset: f32,
) -> AxisWindow {
    let threshold = viewport_extent / 2.0 + item_extent / 2.0;
    let unit = item_extent + gap;
    if offset >= threshold && unit > f32::EPSILON {
        let past = (offset - threshold).abs();
        AxisWindow {
            first_index: (past / unit).floor() as usize + 1,
            remainder: past % unit,
            start: gap,
        }
    } else {
        let remainder = if threshold > f32::EPSILON {
            offset.abs() % threshold
        } else {
            0.0
        };
        AxisWindow {
            first_index: 0,
            remainder,
            start: min_offset,
        }
    }
}

/// Both axes resolved against the current offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportWindow {
    /// Horizontal (column) window.
    pub columns: AxisWindow,
    /// Vertical (row) window.
    pub rows: AxisWindow,
    /// Combined index of the first visible cell,
    /// `first_row * span_count + first_column`.
    pub first_position: usize,
}

/// Resolves the first visible cell for the given offsets and container size.
pub fn resolve(
    geometry: &GridGeometry,
    offset: ScrollOffset,
    container: PxSize,
) -> ViewportWindow {
    let item = geometry.item_size();
    let gap = geometry.gap();
    let columns = resolve_axis(
        offset.horizontal,
        container.width.to_f32(),
        item.width.to_f32(),
        gap,
        geometry.horizontal_min_offset(container.width),
    );
    let rows = resolve_axis(
        offset.vertical,
        container.height.to_f32(),
        item.height.to_f32(),
        gap,
        geometry.vertical_min_offset(container.height),
    );
    let span_count = geometry.grid().span_count();
    ViewportWindow {
        columns,
        rows,
        first_position: rows.first_index * span_count + columns.first_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridSpec;

    #[test]
    fn zero_offset_anchors_first_item_at_center() {
        let window = resolve_axis(0.0, 400.0, 100.0, 20.0, 150.0);
        assert_eq!(window.first_index, 0);
        assert_eq!(window.remainder, 0.0);
        assert_eq!(window.leading_edge(), 150.0);
    }

    #[test]
    fn first_unit_is_partial_viewport_distance() {
        // threshold = 200 + 50 = 250
        let window = resolve_axis(249.0, 400.0, 100.0, 20.0, 150.0);
        assert_eq!(window.first_index, 0);
        assert_eq!(window.remainder, 249.0);
        assert_eq!(window.leading_edge(), -99.0);

        let window = resolve_axis(250.0, 400.0, 100.0, 20.0, 150.0);
        assert_eq!(window.first_index, 1);
        assert_eq!(window.remainder, 0.0);
        assert_eq!(window.leading_edge(), 20.0);
    }

    #[test]
    fn later_units_step_by_item_extent() {
        // 250 + 2 * 120 + 30
        let window = resolve_axis(520.0, 400.0, 100.0, 20.0, 150.0);
        assert_eq!(window.first_index, 3);
        assert_eq!(window.remainder, 30.0);
        assert_eq!(window.start, 20.0);
    }

    #[test]
    fn regimes_agree_at_threshold() {
        // The second cell sits at the same place whichever regime computes it.
        let before = resolve_axis(249.5, 400.0, 100.0, 20.0, 150.0);
        let after = resolve_axis(250.0, 400.0, 100.0, 20.0, 150.0);
        let second_before = before.leading_edge() + 120.0;
        assert!((second_before - after.leading_edge()).abs() <= 0.5);
    }

    #[test]
    fn combined_position_is_row_major() {
        let mut grid = GridSpec::new(3).expect("valid span count");
        grid.configure(12);
        let mut geometry = GridGeometry::new(grid, 0.0);
        geometry.set_item_size(PxSize::from([100, 100]));
        // threshold = 150 + 50 = 200 on both axes of a 300x300 container.
        let window = resolve(
            &geometry,
            ScrollOffset::new(210.0, 310.0),
            PxSize::from([300, 300]),
        );
        assert_eq!(window.columns.first_index, 1);
        assert_eq!(window.rows.first_index, 2);
        assert_eq!(window.first_position, 2 * 3 + 1);
    }
}
