// SPDX-License-Identifier: MIT

//! Color arithmetic in the packed RGB565 domain.
//!
//! Dimming and blending unpack to 5/6/5-bit fields, scale with explicit
//! truncation and repack, so a channel can never overflow into its
//! neighbor. HSV conversion is integer-only.

use pb_display::Rgb565;

/// Scale every channel by `factor`.
///
/// `factor <= 0` gives black and `factor >= 1` returns `color` untouched.
/// Between those, each field is truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // factor ∈ (0, 1)
pub fn dim_color(color: Rgb565, factor: f32) -> Rgb565 {
    if factor <= 0.0 {
        return Rgb565::BLACK;
    }
    if factor >= 1.0 {
        return color;
    }
    let (r, g, b) = color.fields();
    let scale = |ch: u8| (f32::from(ch) * factor) as u8;
    Rgb565::from_fields(scale(r), scale(g), scale(b))
}

/// Linear interpolation from `from` (t = 0) to `to` (t = 1).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_color(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    let (r1, g1, b1) = from.fields();
    let (r2, g2, b2) = to.fields();
    let mix = |a: u8, b: u8| {
        let delta = f32::from(i16::from(b) - i16::from(a));
        (i32::from(a) + (delta * t) as i32) as u8
    };
    Rgb565::from_fields(mix(r1, r2), mix(g1, g2), mix(b1, b2))
}

/// Convert 8-bit HSV to RGB565 using six 43-step hue regions.
///
/// ```
/// use pb_ease::shade::hsv_to_565;
/// use pb_display::Rgb565;
///
/// assert_eq!(hsv_to_565(0, 255, 255), Rgb565::from_rgb(255, 0, 0));
/// assert_eq!(hsv_to_565(99, 0, 128), Rgb565::from_rgb(128, 128, 128));
/// ```
#[must_use]
#[allow(clippy::many_single_char_names, clippy::cast_possible_truncation)]
pub fn hsv_to_565(h: u8, s: u8, v: u8) -> Rgb565 {
    if s == 0 {
        return Rgb565::from_rgb(v, v, v);
    }

    let (h, s, v) = (u32::from(h), u32::from(s), u32::from(v));
    let region = h / 43;
    let rem = (h - region * 43) * 6;

    // All three are ≤ v ≤ 255 after the shift.
    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * rem) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - rem)) >> 8))) >> 8) as u8;
    let v = v as u8;

    let (r, g, b) = match region {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb565::from_rgb(r, g, b)
}
