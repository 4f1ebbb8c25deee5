// SPDX-License-Identifier: MIT
//
// RGB565: the packed 16-bit pixel every surface stores.
//
// Layout (MSB first):
//
//   15 ........ 11 10 .......... 5 4 ......... 0
//   [ red: 5 bits ][ green: 6 bits ][ blue: 5 bits ]
//
// Packing keeps the high bits of each 8-bit channel and drops the rest.
// Expanding back to 8 bits scales each field proportionally so that a
// full 5-bit or 6-bit channel lands on 255, not 248 or 252. The value
// stays packed everywhere; blending and dimming work on the unpacked
// 5/6/5 fields and repack, so no channel can spill into its neighbor.
#![allow(clippy::many_single_char_names)]

use std::fmt;

/// A packed RGB565 color.
///
/// ```
/// use pb_display::color::Rgb565;
///
/// let red = Rgb565::from_rgb(255, 0, 0);
/// assert_eq!(red, Rgb565(0xF800));
/// assert_eq!(red.to_rgb888(), (255, 0, 0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// The background sentinel every surface clears to.
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Pack three 8-bit channels, keeping the high 5/6/5 bits.
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Assemble from raw field values. Out-of-width bits are masked off.
    #[inline]
    #[must_use]
    pub const fn from_fields(r5: u8, g6: u8, b5: u8) -> Self {
        Self((((r5 & 0x1F) as u16) << 11) | (((g6 & 0x3F) as u16) << 5) | ((b5 & 0x1F) as u16))
    }

    /// The raw `(r5, g6, b5)` fields.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // each field is masked to ≤ 6 bits
    pub const fn fields(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 11) & 0x1F) as u8,
            ((self.0 >> 5) & 0x3F) as u8,
            (self.0 & 0x1F) as u8,
        )
    }

    /// Expand to 8 bits per channel with proportional scaling.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // field * 255 / max ≤ 255
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let (r5, g6, b5) = self.fields();
        (
            (r5 as u16 * 255 / 31) as u8,
            (g6 as u16 * 255 / 63) as u8,
            (b5 as u16 * 255 / 31) as u8,
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for Rgb565 {
    #[inline]
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    #[inline]
    fn from(c: Rgb565) -> Self {
        c.0
    }
}

impl fmt::Debug for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb565(0x{:04X})", self.0)
    }
}

impl fmt::Display for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04X}", self.0)
    }
}
