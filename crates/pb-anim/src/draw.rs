// SPDX-License-Identifier: MIT
//
// Shape and sprite primitives layered on top of `Display`.
//
// Everything here goes through `draw_pixel` / `draw_fast_hline`, so
// clipping is the display's job. Shapes never allocate, and sprites
// and masks live in `'static` tables.

use bitflags::bitflags;
use pb_display::{Display, Rgb565};

// ─── Filled shapes ───────────────────────────────────────────────────────────

/// Filled circle as one horizontal run per row.
///
/// Half-width per row is `⌊√(r² − y²)⌋`. Negative radii draw nothing and
/// `r = 0` is a single pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn fill_disc(d: &mut dyn Display, cx: i32, cy: i32, r: i32, color: Rgb565) {
    for y in -r..=r {
        let xr = ((r * r - y * y) as f32).sqrt() as i32;
        d.draw_fast_hline(cx - xr, cy + y, xr * 2 + 1, color);
    }
}

/// Filled axis-aligned ellipse. Either radius `<= 0` draws nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn fill_ellipse(d: &mut dyn Display, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgb565) {
    if rx <= 0 || ry <= 0 {
        return;
    }
    for y in -ry..=ry {
        let fy = y as f32 / ry as f32;
        let fx = (1.0 - fy * fy).max(0.0).sqrt();
        let half = (rx as f32 * fx).floor() as i32;
        d.draw_fast_hline(cx - half, cy + y, half * 2 + 1, color);
    }
}

/// Dotted ring: one pixel every `step` radians, vertically squashed by
/// `squash`.
#[allow(clippy::cast_possible_truncation)]
pub fn ring(d: &mut dyn Display, cx: i32, cy: i32, radius: f32, squash: f32, step: f32, color: Rgb565) {
    if step <= 0.0 {
        return;
    }
    let mut angle = 0.0_f32;
    while angle < std::f32::consts::TAU {
        let x = cx + (angle.cos() * radius) as i32;
        let y = cy + (angle.sin() * radius * squash) as i32;
        d.draw_pixel(x, y, color);
        angle += step;
    }
}

/// A five-pixel plus, with the four diagonals filled too when `sparkle`.
pub fn star(d: &mut dyn Display, x: i32, y: i32, color: Rgb565, sparkle: bool) {
    d.draw_pixel(x, y, color);
    d.draw_pixel(x - 1, y, color);
    d.draw_pixel(x + 1, y, color);
    d.draw_pixel(x, y - 1, color);
    d.draw_pixel(x, y + 1, color);
    if sparkle {
        d.draw_pixel(x - 1, y - 1, color);
        d.draw_pixel(x + 1, y - 1, color);
        d.draw_pixel(x - 1, y + 1, color);
        d.draw_pixel(x + 1, y + 1, color);
    }
}

// ─── Bit masks ───────────────────────────────────────────────────────────────

/// A monochrome bitmap, one `u16` per row, most significant used bit on
/// the left.
#[derive(Debug, Clone, Copy)]
pub struct Mask {
    width: i32,
    rows: &'static [u16],
}

impl Mask {
    #[must_use]
    pub const fn new(width: i32, rows: &'static [u16]) -> Self {
        Self { width, rows }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Whether the cell at (`col`, `row`) is set. Outside the mask is unset.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn bit(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.width || row >= self.height() {
            return false;
        }
        self.rows[row as usize] & (1 << (self.width - 1 - col)) != 0
    }
}

/// Draw `mask` resized to `out_w × out_h` with nearest-neighbour sampling,
/// top-left at (`x0`, `y0`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::similar_names
)]
pub fn fill_mask_scaled(
    d: &mut dyn Display,
    mask: &Mask,
    x0: i32,
    y0: i32,
    out_w: i32,
    out_h: i32,
    color: Rgb565,
) {
    if out_w <= 0 || out_h <= 0 {
        return;
    }
    let (base_w, base_h) = (mask.width(), mask.height());
    let sample = |o: i32, out: i32, base: i32| {
        let src = (((o as f32 + 0.5) / out as f32) * base as f32).floor() as i32;
        src.min(base - 1)
    };
    for oy in 0..out_h {
        let sy = sample(oy, out_h, base_h);
        for ox in 0..out_w {
            if mask.bit(sample(ox, out_w, base_w), sy) {
                d.draw_pixel(x0 + ox, y0 + oy, color);
            }
        }
    }
}

/// Draw a glyph mask blown up to `cell × cell` blocks, then ring it with
/// a one-pixel outline.
///
/// Outline pixels are the unset pixels inside the glyph's own box that
/// touch a set pixel in any of the eight directions.
pub fn outlined_glyph(
    d: &mut dyn Display,
    glyph: &Mask,
    x: i32,
    y: i32,
    cell: i32,
    fill: Rgb565,
    outline: Rgb565,
) {
    if cell <= 0 {
        return;
    }
    let (w, h) = (glyph.width() * cell, glyph.height() * cell);
    let inked = |px: i32, py: i32| {
        px >= 0 && py >= 0 && px < w && py < h && glyph.bit(px / cell, py / cell)
    };

    for py in 0..h {
        for px in 0..w {
            if inked(px, py) {
                d.draw_pixel(x + px, y + py, fill);
            }
        }
    }

    for py in 0..h {
        for px in 0..w {
            if inked(px, py) {
                continue;
            }
            let edge = (-1..=1)
                .flat_map(|oy| (-1..=1).map(move |ox| (ox, oy)))
                .any(|(ox, oy)| (ox, oy) != (0, 0) && inked(px + ox, py + oy));
            if edge {
                d.draw_pixel(x + px, y + py, outline);
            }
        }
    }
}

// ─── Sprites ─────────────────────────────────────────────────────────────────

bitflags! {
    /// Mirroring applied while blitting a sprite.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flip: u8 {
        const X = 0b01;
        const Y = 0b10;
    }
}

/// Character-art sprite.
///
/// Each row is a string of key characters; a character missing from the
/// key (conventionally `.`) is transparent. Short rows are padded with
/// transparency.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    width: i32,
    rows: &'static [&'static str],
    key: &'static [(u8, Rgb565)],
}

impl Sprite {
    #[must_use]
    pub const fn new(width: i32, rows: &'static [&'static str], key: &'static [(u8, Rgb565)]) -> Self {
        Self { width, rows, key }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Color at (`col`, `row`), or `None` where transparent.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn color_at(&self, col: i32, row: i32) -> Option<Rgb565> {
        if col < 0 || row < 0 || col >= self.width || row >= self.height() {
            return None;
        }
        let ch = *self.rows[row as usize].as_bytes().get(col as usize)?;
        self.key.iter().find(|(k, _)| *k == ch).map(|&(_, c)| c)
    }

    /// Blit the whole sprite with its top-left at (`x`, `y`).
    pub fn draw(&self, d: &mut dyn Display, x: i32, y: i32, flip: Flip) {
        self.draw_rows(d, x, y, 0, flip, Some);
    }

    /// Blit rows `first_row..` only, each at its usual position, with every
    /// opaque pixel passed through `shade` first. Returning `None` from
    /// `shade` skips the pixel.
    pub fn draw_rows(
        &self,
        d: &mut dyn Display,
        x: i32,
        y: i32,
        first_row: i32,
        flip: Flip,
        shade: impl Fn(Rgb565) -> Option<Rgb565>,
    ) {
        let (w, h) = (self.width, self.height());
        for row in first_row.max(0)..h {
            let src_row = if flip.contains(Flip::Y) { h - 1 - row } else { row };
            for col in 0..w {
                let src_col = if flip.contains(Flip::X) { w - 1 - col } else { col };
                if let Some(color) = self.color_at(src_col, src_row).and_then(&shade) {
                    d.draw_pixel(x + col, y + row, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_display::SimulatedDisplay;
    use pretty_assertions::assert_eq;

    const RED: Rgb565 = Rgb565(0xF800);
    const BLUE: Rgb565 = Rgb565(0x001F);

    fn surface() -> SimulatedDisplay {
        SimulatedDisplay::new(16, 16, 1)
    }

    fn lit(d: &SimulatedDisplay) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..d.height() {
            for x in 0..d.width() {
                if !d.pixel(x, y).is_black() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    // ── Shapes ──────────────────────────────────────────────────────────

    #[test]
    fn disc_radius_zero_is_one_pixel() {
        let mut d = surface();
        fill_disc(&mut d, 5, 5, 0, RED);
        assert_eq!(lit(&d), vec![(5, 5)]);
    }

    #[test]
    fn disc_radius_one_is_a_plus() {
        let mut d = surface();
        fill_disc(&mut d, 5, 5, 1, RED);
        assert_eq!(lit(&d), vec![(5, 4), (4, 5), (5, 5), (6, 5), (5, 6)]);
    }

    #[test]
    fn negative_disc_draws_nothing() {
        let mut d = surface();
        fill_disc(&mut d, 5, 5, -2, RED);
        assert_eq!(d.lit_count(), 0);
    }

    #[test]
    fn disc_clips_at_edges() {
        let mut d = surface();
        fill_disc(&mut d, 0, 0, 3, RED);
        assert!(d.lit_count() > 0);
        assert_eq!(d.pixel(0, 0), RED);
    }

    #[test]
    fn ellipse_degenerate_radii() {
        let mut d = surface();
        fill_ellipse(&mut d, 8, 8, 0, 3, RED);
        fill_ellipse(&mut d, 8, 8, 3, -1, RED);
        assert_eq!(d.lit_count(), 0);
    }

    #[test]
    fn ellipse_spans() {
        let mut d = surface();
        fill_ellipse(&mut d, 8, 8, 3, 1, RED);
        // Middle row is 7 wide, top and bottom collapse to the center.
        assert_eq!(d.lit_count(), 7 + 1 + 1);
        assert_eq!(d.pixel(5, 8), RED);
        assert_eq!(d.pixel(11, 8), RED);
        assert_eq!(d.pixel(8, 7), RED);
        assert_eq!(d.pixel(7, 7), Rgb565::BLACK);
    }

    #[test]
    fn ring_stays_on_radius() {
        let mut d = surface();
        ring(&mut d, 8, 8, 5.0, 1.0, 0.1, BLUE);
        for (x, y) in lit(&d) {
            let r2 = (x - 8).pow(2) + (y - 8).pow(2);
            // Truncating both axes can pull a point in by up to √2.
            assert!((13..=25).contains(&r2), "({x},{y}) r²={r2}");
        }
    }

    #[test]
    fn star_shapes() {
        let mut d = surface();
        star(&mut d, 4, 4, RED, false);
        assert_eq!(d.lit_count(), 5);
        star(&mut d, 10, 10, RED, true);
        assert_eq!(d.lit_count(), 5 + 9);
    }

    // ── Masks ───────────────────────────────────────────────────────────

    const CORNER: Mask = Mask::new(4, &[0b1000, 0b0000, 0b0000, 0b0001]);
    const BAR: Mask = Mask::new(2, &[0b11]);

    #[test]
    fn mask_bits_read_left_to_right() {
        assert!(CORNER.bit(0, 0));
        assert!(!CORNER.bit(3, 0));
        assert!(CORNER.bit(3, 3));
        assert!(!CORNER.bit(-1, 0));
        assert!(!CORNER.bit(0, 4));
    }

    #[test]
    fn scaled_mask_identity_size() {
        let mut d = surface();
        fill_mask_scaled(&mut d, &CORNER, 2, 2, 4, 4, RED);
        assert_eq!(lit(&d), vec![(2, 2), (5, 5)]);
    }

    #[test]
    fn scaled_mask_doubles() {
        let mut d = surface();
        fill_mask_scaled(&mut d, &CORNER, 0, 0, 8, 8, RED);
        assert_eq!(lit(&d), vec![(0, 0), (1, 0), (0, 1), (1, 1), (6, 6), (7, 6), (6, 7), (7, 7)]);
    }

    #[test]
    fn outlined_glyph_fills_then_rings() {
        let mut d = surface();
        outlined_glyph(&mut d, &BAR, 4, 4, 2, RED, BLUE);
        // A 4×2 block filled, and nothing outside the glyph box.
        for x in 4..8 {
            assert_eq!(d.pixel(x, 4), RED);
            assert_eq!(d.pixel(x, 5), RED);
        }
        assert_eq!(d.lit_count(), 8);
    }

    #[test]
    fn outline_hugs_the_glyph() {
        let mut d = surface();
        let dot = Mask::new(3, &[0b000, 0b010, 0b000]);
        outlined_glyph(&mut d, &dot, 0, 0, 1, RED, BLUE);
        assert_eq!(d.pixel(1, 1), RED);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
            assert_eq!(d.pixel(x, y), BLUE, "({x},{y})");
        }
    }

    // ── Sprites ─────────────────────────────────────────────────────────

    const ARROW: Sprite = Sprite::new(3, &["r..", "rb", "..."], &[(b'r', RED), (b'b', BLUE)]);

    #[test]
    fn sprite_lookup() {
        assert_eq!(ARROW.color_at(0, 0), Some(RED));
        assert_eq!(ARROW.color_at(1, 1), Some(BLUE));
        // Short row pads with transparency.
        assert_eq!(ARROW.color_at(2, 1), None);
        assert_eq!(ARROW.color_at(5, 0), None);
        assert_eq!(ARROW.height(), 3);
    }

    #[test]
    fn sprite_blit_skips_transparent() {
        let mut d = surface();
        ARROW.draw(&mut d, 1, 1, Flip::empty());
        assert_eq!(lit(&d), vec![(1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn sprite_flip_x_mirrors() {
        let mut d = surface();
        ARROW.draw(&mut d, 0, 0, Flip::X);
        assert_eq!(d.pixel(2, 0), RED);
        assert_eq!(d.pixel(1, 1), BLUE);
        assert_eq!(d.pixel(2, 1), RED);
    }

    #[test]
    fn sprite_partial_rows_and_shading() {
        let mut d = surface();
        ARROW.draw_rows(&mut d, 0, 0, 1, Flip::empty(), |c| (c == BLUE).then_some(c));
        assert_eq!(lit(&d), vec![(1, 1)]);
    }
}
