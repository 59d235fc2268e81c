//! Construction-time configuration for [`CarouselEngine`](crate::CarouselEngine).

use derive_setters::Setters;

use crate::{color::Color, error::CarouselError, placement::DEFAULT_MIN_SCALE};

/// Arguments for a carousel engine.
///
/// ```
/// use focus_carousel::{CarouselArgs, Color};
///
/// let args = CarouselArgs::default()
///     .span_count(5)
///     .start_position(12)
///     .item_gap(16.0)
///     .auto_change_item_color(true)
///     .selected_background_color(Color::from_argb(0xFFFF_C107));
/// assert_eq!(args.span_count, 5);
/// assert_eq!(args.start_position, Some(12));
/// assert!(args.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselArgs {
    /// Number of columns. Fixed for the lifetime of the engine.
    pub span_count: usize,
    /// Position to focus on the first layout. `None` focuses the grid middle.
    #[setters(strip_option)]
    pub start_position: Option<usize>,
    /// Spacing between adjacent items on both axes, in pixels.
    pub item_gap: f32,
    /// Snap the nearest item to the center when a drag or fling settles.
    pub auto_select: bool,
    /// Jump to the start position on the first layout pass.
    pub init_layout_center: bool,
    /// Tint children between the two background colors by their scale.
    pub auto_change_item_color: bool,
    /// Tint of a fully focused child.
    pub selected_background_color: Color,
    /// Tint of a child at minimum scale.
    pub unselected_background_color: Color,
    /// Scale of children at or beyond half a viewport from the center.
    pub min_scale: f32,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            span_count: 3,
            start_position: None,
            item_gap: 0.0,
            auto_select: true,
            init_layout_center: true,
            auto_change_item_color: false,
            selected_background_color: Color::WHITE,
            unselected_background_color: Color::GRAY,
            min_scale: DEFAULT_MIN_SCALE,
        }
    }
}

impl CarouselArgs {
    /// Checks the arguments an engine cannot run with.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.span_count == 0 {
            return Err(CarouselError::ZeroSpanCount);
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 || self.min_scale > 1.0 {
            return Err(CarouselError::InvalidMinScale(self.min_scale));
        }
        validate_gap(self.item_gap)
    }
}

pub(crate) fn validate_gap(gap: f32) -> Result<(), CarouselError> {
    if !gap.is_finite() || gap < 0.0 {
        return Err(CarouselError::InvalidItemGap(gap));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = CarouselArgs::default();
        assert!(args.validate().is_ok());
        assert_eq!(args.min_scale, 0.8);
        assert!(args.auto_select);
        assert!(args.init_layout_center);
        assert!(!args.auto_change_item_color);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert_eq!(
            CarouselArgs::default().span_count(0).validate(),
            Err(CarouselError::ZeroSpanCount)
        );
        assert_eq!(
            CarouselArgs::default().min_scale(1.5).validate(),
            Err(CarouselError::InvalidMinScale(1.5))
        );
        assert_eq!(
            CarouselArgs::default().min_scale(0.0).validate(),
            Err(CarouselError::InvalidMinScale(0.0))
        );
        assert_eq!(
            CarouselArgs::default().item_gap(-2.0).validate(),
            Err(CarouselError::InvalidItemGap(-2.0))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_in_defaults() {
        let args: CarouselArgs = serde_json::from_str(
            r#"{ "span_count": 5, "item_gap": 12.0, "selected_background_color": 4294951175 }"#,
        )
        .expect("valid carousel args");
        assert_eq!(args.span_count, 5);
        assert_eq!(args.item_gap, 12.0);
        assert_eq!(args.selected_background_color, Color::from_argb(0xFFFF_C107));
        assert_eq!(args.min_scale, 0.8);
        assert!(args.auto_select);
    }
}
