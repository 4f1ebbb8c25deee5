// SPDX-License-Identifier: MIT
//
// Display: the drawing contract every surface implements.
//
// Animations never see hardware. They hold a shared handle to something
// that implements `Display` and issue primitive calls against it. A
// backend only has to provide `draw_pixel`, its size, and the text state
// setters; every other primitive has a provided implementation built on
// `draw_pixel`, so clipping behaves identically on every backend. A
// backend may override a primitive for speed as long as the visible
// result matches.
//
// Clipping rules:
//
//   - Coordinates are signed. Anything outside [0, width) × [0, height)
//     is silently dropped, never an error.
//   - Zero or negative widths and heights draw nothing.
//   - Lines include both endpoints.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Rgb565;

/// A shared, non-owning handle to a display surface.
///
/// The engine is single-threaded and only the active animation draws at a
/// time, so a `RefCell` borrow per frame is all the coordination needed.
pub type SharedDisplay = Rc<RefCell<dyn Display>>;

/// Wrap a concrete display into a [`SharedDisplay`] while keeping a typed
/// handle to it.
///
/// ```
/// use pb_display::color::Rgb565;
/// use pb_display::display::{share, Display, SharedDisplay};
/// use pb_display::sim::SimulatedDisplay;
///
/// let sim = share(SimulatedDisplay::default());
/// let dyn_handle: SharedDisplay = sim.clone();
/// dyn_handle.borrow_mut().draw_pixel(1, 1, Rgb565(0xF800));
/// assert_eq!(sim.borrow().pixel(1, 1).0, 0xF800);
/// ```
pub fn share<D: Display + 'static>(display: D) -> Rc<RefCell<D>> {
    Rc::new(RefCell::new(display))
}

/// The primitive surface operations animations draw with.
pub trait Display {
    /// Surface width in pixels.
    fn width(&self) -> i32;

    /// Surface height in pixels.
    fn height(&self) -> i32;

    /// Set one pixel. Out-of-bounds coordinates are ignored.
    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565);

    fn set_cursor(&mut self, x: i32, y: i32);

    /// Draw text at the cursor using the current text color and size.
    fn print(&mut self, text: &str);

    fn set_text_color(&mut self, color: Rgb565);

    fn set_text_wrap(&mut self, wrap: bool);

    fn set_text_size(&mut self, size: u8);

    /// Pack 8-bit channels into the surface's color format.
    fn color565(&self, r: u8, g: u8, b: u8) -> Rgb565 {
        Rgb565::from_rgb(r, g, b)
    }

    /// Integer Bresenham line, both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        let Some([x0, y0, x1, y1]) = clip_line(x0, y0, x1, y1, self.width(), self.height())
        else {
            return;
        };
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            if let (Ok(px), Ok(py)) = (i32::try_from(x), i32::try_from(y)) {
                self.draw_pixel(px, py, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Horizontal run of `w` pixels starting at `x`, clipped to the surface.
    fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565) {
        if y < 0 || y >= self.height() {
            return;
        }
        let Some((x0, x1)) = clip_span(x, w, self.width()) else {
            return;
        };
        for px in x0..=x1 {
            self.draw_pixel(px, y, color);
        }
    }

    /// Rectangle outline. Degenerate sizes draw nothing.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.draw_fast_hline(x, y, w, color);
        self.fill_rect(x, y, 1, h, color);
        // Far edges that land past i32::MAX are off-surface anyway.
        if let Ok(bottom) = i32::try_from(i64::from(y) + i64::from(h) - 1) {
            self.draw_fast_hline(x, bottom, w, color);
        }
        if let Ok(right) = i32::try_from(i64::from(x) + i64::from(w) - 1) {
            self.fill_rect(right, y, 1, h, color);
        }
    }

    /// Solid rectangle, clipped. Degenerate sizes draw nothing.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        let Some((x0, x1)) = clip_span(x, w, self.width()) else {
            return;
        };
        let Some((y0, y1)) = clip_span(y, h, self.height()) else {
            return;
        };
        for py in y0..=y1 {
            for px in x0..=x1 {
                self.draw_pixel(px, py, color);
            }
        }
    }

    fn fill_screen(&mut self, color: Rgb565) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, color);
    }

    /// Fill with the background sentinel (black).
    fn clear_screen(&mut self) {
        self.fill_screen(Rgb565::BLACK);
    }
}

/// Clip the run `[start, start + len)` to `[0, limit)`, returning inclusive
/// bounds. The sum is taken in `i64` so no `i32` input can overflow.
fn clip_span(start: i32, len: i32, limit: i32) -> Option<(i32, i32)> {
    if len <= 0 || limit <= 0 {
        return None;
    }
    let lo = i64::from(start).max(0);
    let hi = (i64::from(start) + i64::from(len) - 1).min(i64::from(limit) - 1);
    if lo > hi {
        return None;
    }
    Some((i32::try_from(lo).ok()?, i32::try_from(hi).ok()?))
}

/// Lines longer than this on either axis are cut to the surface before
/// rasterizing. Shorter ones keep their real endpoints, so every on-surface
/// pixel is exactly where plain Bresenham puts it.
const EXACT_LINE_SPAN: i64 = 1 << 12;

/// Endpoints to rasterize, widened to `i64`. `None` when the segment lies
/// entirely beyond one edge of a `w × h` surface.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn clip_line(x0: i32, y0: i32, x1: i32, y1: i32, w: i32, h: i32) -> Option<[i64; 4]> {
    let (ax, ay, bx, by) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let (w, h) = (i64::from(w), i64::from(h));

    if (ax < 0 && bx < 0) || (ax >= w && bx >= w) || (ay < 0 && by < 0) || (ay >= h && by >= h) {
        return None;
    }
    if (bx - ax).abs().max((by - ay).abs()) <= EXACT_LINE_SPAN {
        return Some([ax, ay, bx, by]);
    }

    // Liang-Barsky against the surface grown by one pixel on every side.
    let (fx, fy) = (ax as f64, ay as f64);
    let (ddx, ddy) = ((bx - ax) as f64, (by - ay) as f64);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-ddx, fx + 1.0),
        (ddx, w as f64 - fx),
        (-ddy, fy + 1.0),
        (ddy, h as f64 - fy),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| (t.mul_add(ddx, fx).round() as i64, t.mul_add(ddy, fy).round() as i64);
    let (cx0, cy0) = at(t0);
    let (cx1, cy1) = at(t1);
    Some([cx0, cy0, cx1, cy1])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal backend that only records pixels, so the provided methods
    /// are exercised without any override.
    struct Recorder {
        w: i32,
        h: i32,
        hits: Vec<(i32, i32)>,
    }

    impl Recorder {
        fn new(w: i32, h: i32) -> Self {
            Self { w, h, hits: Vec::new() }
        }
    }

    impl Display for Recorder {
        fn width(&self) -> i32 {
            self.w
        }
        fn height(&self) -> i32 {
            self.h
        }
        fn draw_pixel(&mut self, x: i32, y: i32, _color: Rgb565) {
            if x >= 0 && x < self.w && y >= 0 && y < self.h {
                self.hits.push((x, y));
            }
        }
        fn set_cursor(&mut self, _x: i32, _y: i32) {}
        fn print(&mut self, _text: &str) {}
        fn set_text_color(&mut self, _color: Rgb565) {}
        fn set_text_wrap(&mut self, _wrap: bool) {}
        fn set_text_size(&mut self, _size: u8) {}
    }

    const C: Rgb565 = Rgb565::WHITE;

    // ── Lines ───────────────────────────────────────────────────────────

    #[test]
    fn line_single_point() {
        let mut r = Recorder::new(8, 8);
        r.draw_line(3, 3, 3, 3, C);
        assert_eq!(r.hits, vec![(3, 3)]);
    }

    #[test]
    fn line_includes_both_endpoints() {
        let mut r = Recorder::new(8, 8);
        r.draw_line(0, 0, 4, 2, C);
        assert_eq!(r.hits.first(), Some(&(0, 0)));
        assert_eq!(r.hits.last(), Some(&(4, 2)));
        assert_eq!(r.hits.len(), 5);
    }

    #[test]
    fn line_reversed_direction() {
        let mut r = Recorder::new(8, 8);
        r.draw_line(5, 0, 0, 0, C);
        assert_eq!(r.hits, vec![(5, 0), (4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn line_diagonal_is_one_pixel_per_step() {
        let mut r = Recorder::new(8, 8);
        r.draw_line(0, 0, 3, 3, C);
        assert_eq!(r.hits, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn line_clips_offscreen_part() {
        let mut r = Recorder::new(4, 4);
        r.draw_line(-2, 1, 5, 1, C);
        assert_eq!(r.hits, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    // ── Horizontal lines ────────────────────────────────────────────────

    #[test]
    fn hline_clips_left_edge() {
        let mut r = Recorder::new(64, 64);
        r.draw_fast_hline(-5, 10, 10, C);
        assert_eq!(r.hits, vec![(0, 10), (1, 10), (2, 10), (3, 10), (4, 10)]);
    }

    #[test]
    fn hline_non_positive_width_is_noop() {
        let mut r = Recorder::new(8, 8);
        r.draw_fast_hline(2, 2, 0, C);
        r.draw_fast_hline(2, 2, -3, C);
        assert!(r.hits.is_empty());
    }

    #[test]
    fn hline_offscreen_row_is_noop() {
        let mut r = Recorder::new(8, 8);
        r.draw_fast_hline(0, -1, 8, C);
        r.draw_fast_hline(0, 8, 8, C);
        assert!(r.hits.is_empty());
    }

    // ── Rectangles ──────────────────────────────────────────────────────

    #[test]
    fn rect_outline_touches_only_border() {
        let mut r = Recorder::new(8, 8);
        r.draw_rect(1, 1, 4, 3, C);
        assert!(r.hits.contains(&(1, 1)));
        assert!(r.hits.contains(&(4, 3)));
        assert!(!r.hits.contains(&(2, 2)));
    }

    #[test]
    fn rect_degenerate_is_noop() {
        let mut r = Recorder::new(8, 8);
        r.draw_rect(1, 1, 0, 3, C);
        r.fill_rect(1, 1, 3, -1, C);
        assert!(r.hits.is_empty());
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut r = Recorder::new(4, 4);
        r.fill_rect(-2, -2, 4, 4, C);
        r.hits.sort_unstable();
        assert_eq!(r.hits, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn fill_screen_covers_everything() {
        let mut r = Recorder::new(3, 2);
        r.fill_screen(C);
        assert_eq!(r.hits.len(), 6);
    }

    #[test]
    fn color565_default_packs() {
        let r = Recorder::new(1, 1);
        assert_eq!(r.color565(255, 0, 0), Rgb565(0xF800));
    }

    // ── Extreme coordinates ─────────────────────────────────────────────

    #[test]
    fn hline_near_i32_max_is_noop() {
        let mut r = Recorder::new(64, 64);
        r.draw_fast_hline(i32::MAX - 1, 0, 10, C);
        r.draw_fast_hline(i32::MIN, 3, i32::MAX, C);
        assert!(r.hits.is_empty());
    }

    #[test]
    fn hline_with_huge_width_fills_the_row() {
        let mut r = Recorder::new(64, 64);
        r.draw_fast_hline(-10, 3, i32::MAX, C);
        assert_eq!(r.hits.len(), 64);
        assert_eq!(r.hits.last(), Some(&(63, 3)));
    }

    #[test]
    fn line_between_extreme_endpoints_crosses_the_row() {
        let mut r = Recorder::new(64, 64);
        r.draw_line(i32::MIN, 0, i32::MAX, 0, C);
        assert_eq!(r.hits.len(), 64);
        assert_eq!(r.hits.first(), Some(&(0, 0)));
        assert_eq!(r.hits.last(), Some(&(63, 0)));
    }

    #[test]
    fn line_extreme_diagonal_hits_the_diagonal() {
        let mut r = Recorder::new(64, 64);
        r.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, C);
        assert_eq!(r.hits.len(), 64);
        assert!(r.hits.iter().all(|&(x, y)| x == y));
    }

    #[test]
    fn line_entirely_beyond_one_edge_is_noop() {
        let mut r = Recorder::new(64, 64);
        r.draw_line(i32::MIN, 5, -1, 5, C);
        r.draw_line(0, i32::MAX, 63, i32::MAX - 7, C);
        assert!(r.hits.is_empty());
    }

    #[test]
    fn rects_near_i32_limits() {
        let mut r = Recorder::new(64, 64);
        r.fill_rect(i32::MAX - 1, 0, 10, 10, C);
        r.draw_rect(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX, C);
        r.fill_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, C);
        r.draw_rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX, C);
        assert!(r.hits.is_empty());

        r.fill_rect(-5, -5, i32::MAX, i32::MAX, C);
        assert_eq!(r.hits.len(), 64 * 64);
    }
}
