// SPDX-License-Identifier: MIT
//
// Love letter: a black card reading "I ♥ YOU" over a slowly scrolling,
// dim diagonal rainbow. The heart beats on a 1700 ms period; the rest of
// the scene is static apart from two blinking sparkles.
//
// There is a single looping `Sealed` phase, kept as a phase enum so the
// animation is driven exactly like the multi-phase ones.

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::easing::{self, heartbeat_pulse};
use pb_ease::palette::SPARKLE;
use pb_ease::{dim_color, hsv_to_565};

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw;
use crate::glyphs;

const BEAT_PERIOD_MS: u64 = 1700;

const CARD_X: i32 = 1;
const CARD_Y: i32 = 17;
const CARD_W: i32 = 62;
const CARD_H: i32 = 30;

const TEXT_Y: i32 = 22;
const HEART_X: i32 = 27;
const HEART_Y: i32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    Inactive,
    Sealed,
}

impl Phase for Letter {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        None
    }

    fn next(self) -> Self {
        self
    }
}

pub struct LoveLetter {
    io: Binding,
    timeline: Timeline<Letter>,
    t: u64,
    heart_scale: f32,
    heart_brightness: f32,
}

impl LoveLetter {
    pub const NAME: &'static str = "val3";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            io: Binding::new(clock),
            timeline: Timeline::new(Self::NAME),
            t: 0,
            heart_scale: 1.0,
            heart_brightness: 1.0,
        }
    }

    #[must_use]
    pub const fn heart_scale(&self) -> f32 {
        self.heart_scale
    }

    /// Whether (`x`, `y`) falls in the black margin around the card.
    const fn guarded(x: i32, y: i32) -> bool {
        x >= CARD_X - 2 && x <= CARD_X + CARD_W + 1 && y >= CARD_Y - 2 && y <= CARD_Y + CARD_H + 1
    }

    fn draw_backdrop(&self, d: &mut dyn Display) {
        let drift = self.t / 32;
        for y in 0..64 {
            for x in 0..64 {
                if Self::guarded(x, y) {
                    d.draw_pixel(x, y, Rgb565::BLACK);
                    continue;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let hue = ((x * 2 + y * 2) as u64 + drift) as u8;
                d.draw_pixel(x, y, hsv_to_565(hue, 160, 34));
            }
        }
        // Scanline bands.
        for y in (0..64).step_by(2) {
            d.draw_fast_hline(0, y, 64, Rgb565::BLACK);
        }
        d.fill_rect(CARD_X, CARD_Y, CARD_W, CARD_H, Rgb565::BLACK);
    }

    fn draw_words(d: &mut dyn Display) {
        let outline = Rgb565::from_rgb(70, 120, 255);
        draw::outlined_glyph(d, &glyphs::I, 4, TEXT_Y, glyphs::CELL, SPARKLE, outline);
        for (g, glyph) in [glyphs::Y, glyphs::O, glyphs::U].iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let gx = 35 + 10 * g as i32;
            draw::outlined_glyph(d, glyph, gx, TEXT_Y, glyphs::CELL, SPARKLE, outline);
        }
    }

    /// Two discs and a tapering triangle, plus a highlight on the left lobe.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_heart(&self, d: &mut dyn Display) {
        let (x, y) = (HEART_X, HEART_Y);
        let r = (5.0 * self.heart_scale) as i32;
        let main = dim_color(Rgb565::from_rgb(255, 0, 0), (self.heart_brightness * 1.12).min(1.0));
        let high = dim_color(Rgb565::from_rgb(255, 96, 96), (self.heart_brightness * 1.05).min(1.0));

        draw::fill_disc(d, x - r / 2, y - r / 3, r, main);
        draw::fill_disc(d, x + r / 2, y - r / 3, r, main);

        let bottom = y + (r as f32 * 1.7) as i32;
        let span = (bottom - y).max(1) as f32;
        for py in y..=bottom {
            let t = (py - y) as f32 / span;
            let half = ((1.0 - t) * r as f32) as i32;
            d.draw_fast_hline(x - half, py, half * 2 + 1, main);
        }

        draw::fill_disc(d, x - r / 2, y - r / 3, (r / 3).max(1), high);
    }
}

impl Animation for LoveLetter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, display: SharedDisplay) {
        self.io.bind(display);
        self.timeline.halt();
    }

    fn start(&mut self) {
        if !self.io.is_bound() {
            log::debug!("{}: start ignored, no display", Self::NAME);
            return;
        }
        self.t = 0;
        self.heart_scale = 1.0;
        self.heart_brightness = 1.0;
        self.timeline.begin(Letter::Sealed, self.io.now());
    }

    fn stop(&mut self) {
        self.timeline.halt();
        self.io.clear();
    }

    fn update(&mut self) {
        if !self.io.is_bound() || !self.timeline.is_active() {
            return;
        }
        self.t = self.timeline.runtime(self.io.now());
        let beat = heartbeat_pulse(easing::cycle(self.t, BEAT_PERIOD_MS));
        self.heart_scale = beat.mul_add(0.45, 0.95);
        self.heart_brightness = beat.mul_add(0.1, 0.9);
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            self.draw_backdrop(d);
            Self::draw_words(d);
            self.draw_heart(d);
            if (self.t / 140) % 2 == 0 {
                d.draw_pixel(22, 23, SPARKLE);
                d.draw_pixel(32, 35, SPARKLE);
            }
        });
    }

    fn is_running(&self) -> bool {
        self.timeline.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anims::fixture::Rig;
    use pretty_assertions::assert_eq;

    fn started(rig: &Rig) -> LoveLetter {
        let mut letter = LoveLetter::new(rig.clock());
        rig.bind(&mut letter);
        letter.start();
        letter
    }

    #[test]
    fn loops_without_completing() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.run(&mut letter, 60_000, 1_000);
        assert!(letter.is_running());
    }

    #[test]
    fn heart_beats_on_its_period() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.step(&mut letter, 680); // 0.4 of 1700
        assert!((letter.heart_scale() - 1.4).abs() < 1e-3);
        rig.step(&mut letter, 1020); // back to 0
        assert!((letter.heart_scale() - 0.95).abs() < 1e-3);
    }

    #[test]
    fn card_margin_is_black_and_rainbow_shows_outside() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.step(&mut letter, 1);
        // Odd rows outside the card carry the rainbow; even rows are banded.
        assert!(!rig.pixel(10, 5).is_black());
        assert!(rig.pixel(10, 4).is_black());
        assert!(rig.pixel(0, 16).is_black());
    }

    #[test]
    fn words_are_white_with_blue_outline() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.step(&mut letter, 1);
        // Top-left cell of "I".
        assert_eq!(rig.pixel(4, TEXT_Y), SPARKLE);
        // Left of the stem in row 2 is outline.
        assert_eq!(rig.pixel(5, TEXT_Y + 4), Rgb565::from_rgb(70, 120, 255));
    }

    #[test]
    fn heart_center_is_red() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.step(&mut letter, 1);
        let (r, g, _) = rig.pixel(HEART_X, HEART_Y + 2).to_rgb888();
        assert!(r > 200 && g < 60);
    }

    #[test]
    fn stop_clears() {
        let rig = Rig::new();
        let mut letter = started(&rig);
        rig.step(&mut letter, 100);
        letter.stop();
        assert_eq!(rig.lit(), 0);
    }
}
