//! Packed ARGB colors used for the focus highlight tint.

/// A color with 8-bit alpha, red, green and blue channels.
///
/// Hosts usually hand colors around as packed `0xAARRGGBB` integers, so the
/// type converts to and from that representation losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Color {
    /// Alpha channel
    pub a: u8,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    // --- Common Colors ---
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::from_argb(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Color = Color::from_argb(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Color = Color::from_argb(0xFFFF_FFFF);
    /// Opaque mid gray.
    pub const GRAY: Color = Color::from_argb(0xFF88_8888);

    /// Creates a color from individual channels.
    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates an opaque color from red, green and blue.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Unpacks a `0xAARRGGBB` integer.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs the color into a `0xAARRGGBB` integer.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Interpolates every channel independently from `self` toward `other`.
    ///
    /// `t` is clamped to `[0.0, 1.0]`; channel results truncate toward zero.
    ///
    /// ```
    /// use focus_carousel::Color;
    ///
    /// let from = Color::from_argb(0xFF00_0000);
    /// let to = Color::from_argb(0xFFFF_FFFF);
    /// assert_eq!(from.lerp(to, 0.0), from);
    /// assert_eq!(from.lerp(to, 1.0), to);
    /// assert_eq!(from.lerp(to, 0.5).to_argb(), 0xFF7F_7F7F);
    /// ```
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |from: u8, to: u8| -> u8 {
            let from = from as f32;
            let value = from + (to as f32 - from) * t;
            value.clamp(0.0, 255.0) as u8
        };
        Color {
            a: channel(self.a, other.a),
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Color> for u32 {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

impl From<[u8; 4]> for Color {
    /// Channels in `[a, r, g, b]` order.
    #[inline]
    fn from([a, r, g, b]: [u8; 4]) -> Self {
        Self::new(a, r, g, b)
    }
}
