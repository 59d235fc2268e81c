//! Physical pixel primitives used by the carousel layout pass.
//!
//! Scroll offsets are tracked as `f32` so that animation frames can move by
//! sub-pixel amounts. Everything handed to the host (child rectangles and
//! container sizes) is expressed in whole physical pixels with the types in
//! this module.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the carousel container
//! - X-axis increases to the right
//! - Y-axis increases downward
//! - Negative coordinates are valid: cells partially scrolled past the top or
//!   left edge start off-screen
//!
//! # Example
//!
//! ```
//! use focus_carousel::px::{Px, PxRect, PxSize};
//!
//! let size = PxSize::new(Px::new(120), Px::new(160));
//! let rect = PxRect::from_origin_size(Px::new(-20), Px::new(40), size);
//! assert_eq!(rect.right, Px::new(100));
//! assert_eq!(rect.center_y(), Px::new(120));
//! ```

use std::ops::{Div, Sub};

/// A physical pixel coordinate value.
///
/// Supports negative values for cells positioned above or left of the
/// container origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub i32);

impl Px {
    /// A constant representing zero pixels.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Px` instance from an i32 value.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, truncating toward zero and saturating
    /// at the numeric bounds instead of overflowing.
    ///
    /// Non-finite inputs collapse to zero.
    ///
    /// ```
    /// use focus_carousel::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7), Px::new(42));
    /// assert_eq!(Px::saturating_from_f32(-42.7), Px::new(-42));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px::new(i32::MAX));
    /// assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        if !value.is_finite() {
            return if value.is_nan() {
                Px::ZERO
            } else if value > 0.0 {
                Px(i32::MAX)
            } else {
                Px(i32::MIN)
            };
        }
        let clamped_value = value.clamp(i32::MIN as f32, i32::MAX as f32);
        Px(clamped_value as i32)
    }

    /// Saturating integer addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Returns `true` when the value is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

/// A 2D position in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// The x-coordinate in physical pixels
    pub x: Px,
    /// The y-coordinate in physical pixels
    pub y: Px,
}

impl PxPosition {
    /// Creates a new position.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxSize {
    /// The width in physical pixels
    pub width: Px,
    /// The height in physical pixels
    pub height: Px,
}

impl PxSize {
    /// A constant representing zero size (0×0).
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size from width and height.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero or negative.
    ///
    /// ```
    /// use focus_carousel::px::{Px, PxSize};
    ///
    /// assert!(PxSize::ZERO.is_empty());
    /// assert!(PxSize::new(Px::new(10), Px::ZERO).is_empty());
    /// assert!(!PxSize::new(Px::new(10), Px::new(1)).is_empty());
    /// ```
    pub fn is_empty(self) -> bool {
        !self.width.is_positive() || !self.height.is_positive()
    }
}

impl From<[Px; 2]> for PxSize {
    fn from(size: [Px; 2]) -> Self {
        Self {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<[i32; 2]> for PxSize {
    fn from(size: [i32; 2]) -> Self {
        Self {
            width: Px(size[0]),
            height: Px(size[1]),
        }
    }
}

/// A layout rectangle expressed by its four edges.
///
/// This matches the `(left, top, right, bottom)` shape in which hosts commit
/// child bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxRect {
    /// Left edge
    pub left: Px,
    /// Top edge
    pub top: Px,
    /// Right edge (exclusive)
    pub right: Px,
    /// Bottom edge (exclusive)
    pub bottom: Px,
}

impl PxRect {
    /// Creates a rectangle from its four edges.
    pub const fn new(left: Px, top: Px, right: Px, bottom: Px) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from its top-left corner and a size.
    pub fn from_origin_size(left: Px, top: Px, size: PxSize) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add(size.width),
            bottom: top.saturating_add(size.height),
        }
    }

    /// Horizontal center, rounded toward zero like integer layout math.
    pub fn center_x(&self) -> Px {
        Px(((self.left.0 as i64 + self.right.0 as i64) / 2) as i32)
    }

    /// Vertical center, rounded toward zero like integer layout math.
    pub fn center_y(&self) -> Px {
        Px(((self.top.0 as i64 + self.bottom.0 as i64) / 2) as i32)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}
