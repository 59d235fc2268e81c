//! Grid shape, item geometry and scroll bounds.
//!
//! The carousel scrolls over a bounded grid whose first cell is centered in
//! the viewport at offset zero. Every scroll bound used for clamping is
//! derived here:
//!
//! - `max_vertical_offset = (item_height + gap) * (row_count - 1)`
//! - `max_horizontal_offset = (item_width + gap) * (span_count - 1)`
//! - `min_offset = (viewport_extent - item_extent) / 2` per axis, the start
//!   position that centers the first row or column.
//!
//! Offsets are unitless `f32` pixels so animation frames can land between
//! whole pixels.

use crate::{
    error::CarouselError,
    px::{Px, PxSize},
};

/// A pair of scroll offsets, one per axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollOffset {
    /// Cumulative horizontal scroll distance.
    pub horizontal: f32,
    /// Cumulative vertical scroll distance.
    pub vertical: f32,
}

impl ScrollOffset {
    /// Zero offset on both axes.
    pub const ZERO: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
    };

    /// Creates a new offset pair.
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Column count, item count and the derived row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    span_count: usize,
    item_count: usize,
    row_count: usize,
}

impl GridSpec {
    /// Creates an empty grid with `span_count` columns.
    pub fn new(span_count: usize) -> Result<Self, CarouselError> {
        if span_count == 0 {
            return Err(CarouselError::ZeroSpanCount);
        }
        Ok(Self {
            span_count,
            item_count: 0,
            row_count: 0,
        })
    }

    /// Updates the item count and recomputes the row count.
    pub fn configure(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.row_count = item_count.div_ceil(self.span_count);
    }

    /// Number of columns.
    pub fn span_count(&self) -> usize {
        self.span_count
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of rows, `ceil(item_count / span_count)`.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns `true` if `position` addresses an existing item.
    pub fn contains(&self, position: usize) -> bool {
        position < self.item_count
    }

    /// Row of the given position.
    pub fn row_of(&self, position: usize) -> usize {
        position / self.span_count
    }

    /// Column of the given position.
    pub fn column_of(&self, position: usize) -> usize {
        position % self.span_count
    }

    /// The position nearest the middle of the grid,
    /// `row_count / 2 * span_count + span_count / 2`, clamped to the last item
    /// when the final row is short.
    pub fn center_position(&self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let center = self.row_count / 2 * self.span_count + self.span_count / 2;
        Some(center.min(self.item_count - 1))
    }

    /// Maps a (row, column) pair onto an existing position, clamping both
    /// coordinates into the grid and falling back to the last item when the
    /// cell lies past the end of a short final row.
    pub fn clamp_cell(&self, row: usize, column: usize) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let row = row.min(self.row_count.saturating_sub(1));
        let column = column.min(self.span_count - 1);
        Some((row * self.span_count + column).min(self.item_count - 1))
    }
}

/// Grid spec plus the cached item size and gap, from which all scroll bounds
/// are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    grid: GridSpec,
    item_size: Option<PxSize>,
    gap: f32,
}

impl GridGeometry {
    /// Creates geometry for an empty grid with no measured item yet.
    pub fn new(grid: GridSpec, gap: f32) -> Self {
        Self {
            grid,
            item_size: None,
            gap,
        }
    }

    /// The underlying grid spec.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Reconfigures the item count.
    pub fn configure(&mut self, item_count: usize) {
        self.grid.configure(item_count);
    }

    /// Spacing between adjacent items on both axes.
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Replaces the item spacing.
    pub fn set_gap(&mut self, gap: f32) {
        self.gap = gap;
    }

    /// The cached item size, zero until a representative child is measured.
    pub fn item_size(&self) -> PxSize {
        self.item_size.unwrap_or(PxSize::ZERO)
    }

    /// Returns `true` once a representative child has been measured.
    pub fn is_measured(&self) -> bool {
        self.item_size.is_some()
    }

    /// Caches the item size measured from a representative child.
    pub fn set_item_size(&mut self, size: PxSize) {
        self.item_size = Some(size);
    }

    fn item_width(&self) -> f32 {
        self.item_size().width.to_f32()
    }

    fn item_height(&self) -> f32 {
        self.item_size().height.to_f32()
    }

    /// Distance between the origins of two horizontally adjacent items.
    pub fn horizontal_extent(&self) -> f32 {
        self.item_width() + self.gap
    }

    /// Distance between the origins of two vertically adjacent items.
    pub fn vertical_extent(&self) -> f32 {
        self.item_height() + self.gap
    }

    /// Largest vertical offset, zero when unmeasured, empty, or a single row.
    pub fn max_vertical_offset(&self) -> f32 {
        if !self.is_measured() || self.grid.item_count() == 0 {
            return 0.0;
        }
        self.vertical_extent() * self.grid.row_count().saturating_sub(1) as f32
    }

    /// Largest horizontal offset, zero when unmeasured, empty, or a single
    /// column.
    pub fn max_horizontal_offset(&self) -> f32 {
        if !self.is_measured() || self.grid.item_count() == 0 {
            return 0.0;
        }
        self.horizontal_extent() * (self.grid.span_count() - 1) as f32
    }

    /// Top edge of the first row at offset zero, centering it vertically.
    pub fn vertical_min_offset(&self, viewport_height: Px) -> f32 {
        if !self.is_measured() {
            return 0.0;
        }
        (viewport_height.to_f32() - self.item_height()) / 2.0
    }

    /// Left edge of the first column at offset zero, centering it
    /// horizontally.
    pub fn horizontal_min_offset(&self, viewport_width: Px) -> f32 {
        if !self.is_measured() {
            return 0.0;
        }
        (viewport_width.to_f32() - self.item_width()) / 2.0
    }

    /// Clamps an offset pair into `[0, max]` on both axes.
    pub fn clamp_offset(&self, offset: ScrollOffset) -> ScrollOffset {
        ScrollOffset {
            horizontal: clamp_axis(offset.horizontal, self.max_horizontal_offset()),
            vertical: clamp_axis(offset.vertical, self.max_vertical_offset()),
        }
    }

    /// The offsets that put `position` at the focal center.
    pub fn offset_for_position(&self, position: usize) -> Option<ScrollOffset> {
        if !self.is_measured() || !self.grid.contains(position) {
            return None;
        }
        Some(ScrollOffset {
            horizontal: self.grid.column_of(position) as f32 * self.horizontal_extent(),
            vertical: self.grid.row_of(position) as f32 * self.vertical_extent(),
        })
    }

    /// The position whose cell center is nearest the focal center at the
    /// given offsets.
    pub fn closest_position(&self, offset: ScrollOffset) -> Option<usize> {
        if !self.is_measured() {
            return None;
        }
        let row = nearest_unit(offset.vertical, self.vertical_extent());
        let column = nearest_unit(offset.horizontal, self.horizontal_extent());
        self.grid.clamp_cell(row, column)
    }

    /// The position whose cell was most recently crossed at the focal center.
    ///
    /// Unlike [`closest_position`](Self::closest_position) this floors each
    /// axis, which is what stacking order uses: cells up to and including this
    /// one stack above the rest.
    pub fn focus_position(&self, offset: ScrollOffset) -> usize {
        let row = floor_unit(offset.vertical, self.vertical_extent());
        let column = floor_unit(offset.horizontal, self.horizontal_extent());
        row * self.grid.span_count() + column
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

fn nearest_unit(offset: f32, extent: f32) -> usize {
    if extent <= f32::EPSILON || !offset.is_finite() {
        return 0;
    }
    (offset.abs() / extent).round() as usize
}

fn floor_unit(offset: f32, extent: f32) -> usize {
    if extent <= f32::EPSILON || !offset.is_finite() {
        return 0;
    }
    (offset.abs() / extent) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(span_count: usize, item_count: usize, gap: f32) -> GridGeometry {
        let mut grid = GridSpec::new(span_count).expect("valid span count");
        grid.configure(item_count);
        let mut geometry = GridGeometry::new(grid, gap);
        geometry.set_item_size(PxSize::from([100, 80]));
        geometry
    }

    #[test]
    fn zero_span_count_is_rejected() {
        assert_eq!(GridSpec::new(0), Err(CarouselError::ZeroSpanCount));
    }

    #[test]
    fn row_count_rounds_up() {
        let mut grid = GridSpec::new(3).expect("valid span count");
        grid.configure(10);
        assert_eq!(grid.row_count(), 4);
        grid.configure(9);
        assert_eq!(grid.row_count(), 3);
        grid.configure(1);
        assert_eq!(grid.row_count(), 1);
        grid.configure(0);
        assert_eq!(grid.row_count(), 0);
    }

    #[test]
    fn center_position_matches_grid_middle() {
        let mut grid = GridSpec::new(3).expect("valid span count");
        grid.configure(10);
        assert_eq!(grid.center_position(), Some(7));
        grid.configure(4);
        // 2 rows → 1 * 3 + 1 = 4, past the end, so the last item wins.
        assert_eq!(grid.center_position(), Some(3));
        grid.configure(0);
        assert_eq!(grid.center_position(), None);
    }

    #[test]
    fn max_offsets_follow_item_extent() {
        let geometry = geometry(3, 10, 10.0);
        assert_eq!(geometry.max_vertical_offset(), 90.0 * 3.0);
        assert_eq!(geometry.max_horizontal_offset(), 110.0 * 2.0);
    }

    #[test]
    fn single_row_has_no_vertical_travel() {
        let geometry = geometry(4, 3, 10.0);
        assert_eq!(geometry.max_vertical_offset(), 0.0);
        assert_eq!(geometry.max_horizontal_offset(), 110.0 * 3.0);
    }

    #[test]
    fn unmeasured_geometry_has_no_travel() {
        let mut grid = GridSpec::new(3).expect("valid span count");
        grid.configure(10);
        let geometry = GridGeometry::new(grid, 4.0);
        assert_eq!(geometry.item_size(), PxSize::ZERO);
        assert_eq!(geometry.max_vertical_offset(), 0.0);
        assert_eq!(geometry.max_horizontal_offset(), 0.0);
        assert_eq!(geometry.offset_for_position(4), None);
    }

    #[test]
    fn min_offset_centers_first_item() {
        let geometry = geometry(3, 10, 0.0);
        assert_eq!(geometry.vertical_min_offset(Px(400)), 160.0);
        assert_eq!(geometry.horizontal_min_offset(Px(300)), 100.0);
    }

    #[test]
    fn offset_for_position_uses_row_and_column() {
        let geometry = geometry(3, 10, 10.0);
        assert_eq!(
            geometry.offset_for_position(7),
            Some(ScrollOffset::new(110.0, 180.0))
        );
        assert_eq!(geometry.offset_for_position(10), None);
    }

    #[test]
    fn closest_position_rounds_and_clamps() {
        let geometry = geometry(3, 10, 10.0);
        assert_eq!(
            geometry.closest_position(ScrollOffset::new(60.0, 40.0)),
            Some(1)
        );
        assert_eq!(
            geometry.closest_position(ScrollOffset::new(54.0, 46.0)),
            Some(3)
        );
        // Row 3 only holds position 9.
        assert_eq!(
            geometry.closest_position(ScrollOffset::new(220.0, 270.0)),
            Some(9)
        );
    }

    #[test]
    fn clamp_offset_bounds_both_axes() {
        let geometry = geometry(3, 10, 10.0);
        let clamped = geometry.clamp_offset(ScrollOffset::new(-5.0, 10_000.0));
        assert_eq!(clamped, ScrollOffset::new(0.0, 270.0));
        let clamped = geometry.clamp_offset(ScrollOffset::new(f32::NAN, 12.0));
        assert_eq!(clamped, ScrollOffset::new(0.0, 12.0));
    }
}
