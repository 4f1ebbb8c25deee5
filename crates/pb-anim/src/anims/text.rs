// SPDX-License-Identifier: MIT
//
// "I ♥ YOU" cards. `TextOnly` is the bare card: a red double border, four
// outlined letters and a bitmask heart that rests, then pulses through a
// table of scale keys. `TextChick` is the same card with a small chick
// pacing back and forth above it.
//
// Phases (shared):
//
//   Inactive ─start─► Hold (1800 ms) ─► Pulse (3800 ms) ─┐
//                      ▲──────────────────────────────────┘

use std::f32::consts::TAU;

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::easing::ease_in_out_quad;
use pb_ease::palette::{HEART_RED, SOFT_PINK, SPARKLE};
use pb_ease::dim_color;

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw::{self, Mask};
use crate::glyphs;

const HOLD_MS: u64 = 1800;
const PULSE_MS: u64 = 3800;

const SCALE_KEYS: [f32; 16] = [
    1.06, 1.07, 1.08, 1.09, 1.10, 1.11, 1.12, 1.11, //
    1.10, 1.09, 1.08, 1.07, 1.06, 1.07, 1.08, 1.09,
];
const REST_SCALE: f32 = 1.06;
const PEAK_SCALE: f32 = 1.12;

const TEXT_Y: i32 = 22;
const HEART_X: i32 = 24;
const HEART_Y: i32 = TEXT_Y + 8;

const HEART: Mask = Mask::new(
    13,
    &[
        0b0_0011_0001_1000,
        0b0_0111_1011_1100,
        0b0_1111_1111_1110,
        0b1_1111_1111_1111,
        0b1_1111_1111_1111,
        0b1_1111_1111_1111,
        0b0_1111_1111_1110,
        0b0_0111_1111_1100,
        0b0_0011_1111_1000,
        0b0_0001_1111_0000,
        0b0_0000_1110_0000,
        0b0_0000_0100_0000,
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Card {
    Inactive,
    Hold,
    Pulse,
}

impl Phase for Card {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::Hold => Some(HOLD_MS),
            Self::Pulse => Some(PULSE_MS),
            Self::Inactive => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Hold => Self::Pulse,
            Self::Pulse => Self::Hold,
            Self::Inactive => Self::Inactive,
        }
    }
}

// ─── Shared card ─────────────────────────────────────────────────────────────

/// Heart levels plus the timeline that drives them.
#[derive(Debug)]
struct Heart {
    timeline: Timeline<Card>,
    scale: f32,
    brightness: f32,
}

impl Heart {
    fn new(owner: &'static str) -> Self {
        Self { timeline: Timeline::new(owner), scale: REST_SCALE, brightness: 0.9 }
    }

    fn begin(&mut self, now: u64) {
        self.scale = REST_SCALE;
        self.brightness = 0.9;
        self.timeline.begin(Card::Hold, now);
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn update(&mut self, now: u64) {
        self.timeline.advance(now, |_| {});
        if self.timeline.phase() != Card::Pulse {
            self.scale = REST_SCALE;
            self.brightness = 0.9;
            return;
        }
        let key_pos = self.timeline.progress(now) * SCALE_KEYS.len() as f32;
        let whole = key_pos.floor();
        let i0 = whole as usize % SCALE_KEYS.len();
        let i1 = (i0 + 1) % SCALE_KEYS.len();
        let eased = ease_in_out_quad(key_pos - whole);

        self.scale = (SCALE_KEYS[i1] - SCALE_KEYS[i0]).mul_add(eased, SCALE_KEYS[i0]);
        self.brightness = 0.1f32.mul_add((self.scale - REST_SCALE) / (PEAK_SCALE - REST_SCALE), 0.9);
    }
}

fn draw_card(d: &mut dyn Display, heart: &Heart) {
    d.fill_screen(Rgb565::BLACK);
    d.draw_rect(2, 18, 60, 29, HEART_RED);
    d.draw_rect(3, 19, 58, 27, HEART_RED);

    let outline = dim_color(SOFT_PINK, 0.95);
    draw::outlined_glyph(d, &glyphs::I, 6, TEXT_Y, glyphs::CELL, SPARKLE, outline);
    draw_heart(d, heart.scale, heart.brightness);
    for (x, glyph) in [(31, glyphs::Y), (41, glyphs::O), (51, glyphs::U)] {
        draw::outlined_glyph(d, &glyph, x, TEXT_Y, glyphs::CELL, SPARKLE, outline);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn draw_heart(d: &mut dyn Display, scale: f32, brightness: f32) {
    let out_w = ((HEART.width() as f32 * scale).round() as i32).max(8);
    let out_h = ((HEART.height() as f32 * scale).round() as i32).max(7);
    let x0 = HEART_X - out_w / 2;
    let y0 = HEART_Y - out_h / 2;

    draw::fill_mask_scaled(d, &HEART, x0, y0, out_w, out_h, dim_color(HEART_RED, brightness));

    let light = dim_color(SPARKLE, brightness * 0.95);
    let hx = x0 + ((out_w as f32 * 0.30) as i32).max(1);
    let hy = y0 + ((out_h as f32 * 0.25) as i32).max(1);
    d.draw_pixel(hx, hy, light);
    d.draw_pixel(hx + 1, hy, light);
    d.draw_pixel(hx, hy + 1, dim_color(light, 0.8));
}

// ─── Text only ───────────────────────────────────────────────────────────────

pub struct TextOnly {
    io: Binding,
    heart: Heart,
}

impl TextOnly {
    pub const NAME: &'static str = "val4";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self { io: Binding::new(clock), heart: Heart::new(Self::NAME) }
    }

    #[must_use]
    pub const fn heart_scale(&self) -> f32 {
        self.heart.scale
    }

    #[must_use]
    pub const fn heart_brightness(&self) -> f32 {
        self.heart.brightness
    }
}

impl Animation for TextOnly {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, display: SharedDisplay) {
        self.io.bind(display);
        self.heart.timeline.halt();
    }

    fn start(&mut self) {
        if !self.io.is_bound() {
            log::debug!("{}: start ignored, no display", Self::NAME);
            return;
        }
        self.heart.begin(self.io.now());
    }

    fn stop(&mut self) {
        self.heart.timeline.halt();
        self.io.clear();
    }

    fn update(&mut self) {
        if !self.io.is_bound() || !self.heart.timeline.is_active() {
            return;
        }
        self.heart.update(self.io.now());
    }

    fn render(&self) {
        if self.heart.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| draw_card(d, &self.heart));
    }

    fn is_running(&self) -> bool {
        self.heart.timeline.is_active()
    }
}

// ─── Text with chick ─────────────────────────────────────────────────────────

const WALK_MIN_X: f32 = 6.0;
const WALK_MAX_X: f32 = 52.0;
const WALK_LEG_MS: u64 = 5000;
const TURN_PAUSE_MS: u64 = 280;
const WALK_CYCLE_MS: u64 = 2 * (WALK_LEG_MS + TURN_PAUSE_MS);
const STEP_MS: u64 = 360;
const CHICK_Y: i32 = 12;

/// Where the chick is and which foot is down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walk {
    pub x: f32,
    pub facing_right: bool,
    pub step_a: bool,
    pub bob: f32,
}

impl Walk {
    const HOME: Self = Self { x: WALK_MIN_X, facing_right: true, step_a: true, bob: 0.0 };

    /// Pose `t` ms into the walk.
    #[allow(clippy::cast_precision_loss)]
    fn at(t: u64) -> Self {
        let span = WALK_MAX_X - WALK_MIN_X;
        let c = t % WALK_CYCLE_MS;
        let leg = |ms: u64| ease_in_out_quad(ms as f32 / WALK_LEG_MS as f32);

        let (x, facing_right) = if c < WALK_LEG_MS {
            (span.mul_add(leg(c), WALK_MIN_X), true)
        } else if c < WALK_LEG_MS + TURN_PAUSE_MS {
            (WALK_MAX_X, false)
        } else if c < 2 * WALK_LEG_MS + TURN_PAUSE_MS {
            (span.mul_add(-leg(c - WALK_LEG_MS - TURN_PAUSE_MS), WALK_MAX_X), false)
        } else {
            (WALK_MIN_X, true)
        };

        let stride = (t % STEP_MS) as f32 / STEP_MS as f32;
        Self { x, facing_right, step_a: stride < 0.5, bob: (stride * TAU).sin() * 0.35 }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw(self, d: &mut dyn Display) {
        let yellow = Rgb565::from_rgb(255, 255, 0);
        let shade = Rgb565::from_rgb(255, 228, 0);
        let orange = Rgb565::from_rgb(255, 150, 40);
        let x = self.x.round() as i32;
        let y = CHICK_Y + self.bob.round() as i32;

        for oy in 0..5 {
            for ox in 0..7 {
                let (dx, dy) = (ox - 3, oy - 2);
                if dx * dx + dy * dy <= 10 {
                    d.draw_pixel(x + ox, y + oy, yellow);
                }
            }
        }
        d.draw_fast_hline(x + 2, y + 3, 3, shade);

        let (eye, glint, beak, tip) = if self.facing_right {
            (x + 4, x + 3, x + 6, x + 7)
        } else {
            (x + 2, x + 3, x, x - 1)
        };
        d.draw_pixel(eye, y + 1, Rgb565::BLACK);
        d.draw_pixel(glint, y + 1, SPARKLE);
        d.draw_pixel(beak, y + 2, orange);
        d.draw_pixel(tip, y + 2, orange);
        d.draw_pixel(beak, y + 3, orange);

        let (left, right) = if self.step_a { (0, 1) } else { (1, 0) };
        d.draw_pixel(x + 2, y + 5 + left, orange);
        d.draw_pixel(x + 4, y + 5 + right, orange);
    }
}

pub struct TextChick {
    io: Binding,
    heart: Heart,
    walk: Walk,
}

impl TextChick {
    pub const NAME: &'static str = "val5";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self { io: Binding::new(clock), heart: Heart::new(Self::NAME), walk: Walk::HOME }
    }

    #[must_use]
    pub const fn walk(&self) -> Walk {
        self.walk
    }
}

impl Animation for TextChick {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, display: SharedDisplay) {
        self.io.bind(display);
        self.heart.timeline.halt();
        self.walk = Walk::HOME;
    }

    fn start(&mut self) {
        if !self.io.is_bound() {
            log::debug!("{}: start ignored, no display", Self::NAME);
            return;
        }
        self.walk = Walk::HOME;
        self.heart.begin(self.io.now());
    }

    fn stop(&mut self) {
        self.heart.timeline.halt();
        self.io.clear();
    }

    fn update(&mut self) {
        if !self.io.is_bound() || !self.heart.timeline.is_active() {
            return;
        }
        let now = self.io.now();
        self.heart.update(now);
        self.walk = Walk::at(self.heart.timeline.runtime(now));
    }

    fn render(&self) {
        if self.heart.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            draw_card(d, &self.heart);
            self.walk.draw(d);
        });
    }

    fn is_running(&self) -> bool {
        self.heart.timeline.is_active()
    }
}
