// SPDX-License-Identifier: MIT

//! Named colors shared by the animations.
//!
//! Values are packed RGB565, chosen by eye on a 64×64 HUB75 panel where
//! low-intensity reds and pinks need more headroom than sRGB suggests.

use pb_display::Rgb565;

pub const DEEP_RED: Rgb565 = Rgb565(0xC000);
pub const HEART_RED: Rgb565 = Rgb565(0xF800);
pub const SOFT_PINK: Rgb565 = Rgb565(0xFB2C);
pub const BLUSH_PINK: Rgb565 = Rgb565(0xFDF9);
/// Cream white.
pub const WARM_WHITE: Rgb565 = Rgb565(0xFFF8);
/// Pure white, for glints and stars.
pub const SPARKLE: Rgb565 = Rgb565(0xFFFF);
pub const CORAL: Rgb565 = Rgb565(0xFC10);
pub const MAGENTA: Rgb565 = Rgb565(0xF81F);
pub const BG_BLACK: Rgb565 = Rgb565(0x0000);
pub const ENVELOPE_TAN: Rgb565 = Rgb565(0xED55);
pub const SEAL_RED: Rgb565 = Rgb565(0xB000);

/// Sprite pixels of this color are skipped when blitting.
pub const TRANSPARENT: Rgb565 = MAGENTA;
