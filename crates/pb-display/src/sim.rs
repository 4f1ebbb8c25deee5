// SPDX-License-Identifier: MIT
//
// SimulatedDisplay: an in-memory framebuffer behind the Display contract.
//
// Used off-hardware to run animations and capture frames. Everything an
// animation draws lands in a flat row-major `Vec<Rgb565>`; the export
// module turns that into an image file.
//
// Design:
//
//   - Row-major indexing: `y * width + x`. A row is contiguous, which is
//     the order both `fill_rect` and the exporter walk it in.
//
//   - `pixel_scale` is carried here (not passed to the exporter) so a
//     display configured once at startup produces consistently sized
//     frames for the whole run.
//
//   - `print` rasterizes the 5×7 font. Text size multiplies each font
//     pixel into a size×size block, wrapping at the right edge when wrap
//     is enabled.

use std::fmt;

use crate::color::Rgb565;
use crate::display::Display;
use crate::font;

/// Default matrix size of the target hardware.
pub const DEFAULT_SIZE: i32 = 64;

/// Default upscale factor for exported frames.
pub const DEFAULT_PIXEL_SCALE: u32 = 8;

pub struct SimulatedDisplay {
    width: i32,
    height: i32,
    pixel_scale: u32,
    pixels: Vec<Rgb565>,
    cursor_x: i32,
    cursor_y: i32,
    text_color: Rgb565,
    text_wrap: bool,
    text_size: u8,
}

impl SimulatedDisplay {
    /// Create a black surface. Non-positive dimensions yield an empty
    /// surface on which every primitive is a no-op; a zero scale is
    /// treated as 1.
    #[must_use]
    pub fn new(width: i32, height: i32, pixel_scale: u32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        #[allow(clippy::cast_sign_loss)] // clamped to ≥ 0 above
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixel_scale: pixel_scale.max(1),
            pixels: vec![Rgb565::BLACK; len],
            cursor_x: 0,
            cursor_y: 0,
            text_color: Rgb565::WHITE,
            text_wrap: true,
            text_size: 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn pixel_scale(&self) -> u32 {
        self.pixel_scale
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)] // callers check in_bounds first
    const fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Color at `(x, y)`, or black when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        if self.in_bounds(x, y) {
            self.pixels[self.index(x, y)]
        } else {
            Rgb565::BLACK
        }
    }

    /// The raw framebuffer, row-major.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Current text cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Count pixels that differ from black. Handy for "did anything draw".
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|c| !c.is_black()).count()
    }

    fn newline(&mut self) {
        let size = i32::from(self.text_size);
        self.cursor_x = 0;
        self.cursor_y = self.cursor_y.saturating_add(font::ADVANCE_Y * size);
    }

    fn draw_char(&mut self, ch: char) {
        let size = i32::from(self.text_size);
        let color = self.text_color;
        for col in 0..font::GLYPH_WIDTH {
            for row in 0..font::GLYPH_HEIGHT {
                if font::ink(ch, col, row) {
                    let px = self.cursor_x.saturating_add(col * size);
                    let py = self.cursor_y.saturating_add(row * size);
                    if size == 1 {
                        self.draw_pixel(px, py, color);
                    } else {
                        self.fill_rect(px, py, size, size, color);
                    }
                }
            }
        }
    }
}

impl Default for SimulatedDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE, DEFAULT_PIXEL_SCALE)
    }
}

impl Display for SimulatedDisplay {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    fn print(&mut self, text: &str) {
        let advance = font::ADVANCE_X * i32::from(self.text_size);
        for ch in text.chars() {
            match ch {
                '\n' => self.newline(),
                '\r' => {}
                _ => {
                    if self.text_wrap && self.cursor_x.saturating_add(advance) > self.width {
                        self.newline();
                    }
                    self.draw_char(ch);
                    self.cursor_x = self.cursor_x.saturating_add(advance);
                }
            }
        }
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_wrap(&mut self, wrap: bool) {
        self.text_wrap = wrap;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }
}

impl fmt::Debug for SimulatedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimulatedDisplay({}x{} @{}x)",
            self.width, self.height, self.pixel_scale
        )
    }
}
