// SPDX-License-Identifier: MIT
//
// Mosque at night: a seeded sky of twinkling stars, a crescent on the
// right minaret, a shooting star arcing across every 3600 ms and the
// caption "RAMADAN" printed in the display's own font.
//
// Phases:
//
//   Inactive ─start─► Streak (1450 ms) ─► Rest (2150 ms) ─┐
//                      ▲───────────────────────────────────┘

use std::f32::consts::PI;

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::dim_color;

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw::{self, fill_disc};
use crate::stars::StarField;

const STREAK_MS: u64 = 1450;
const SHOWER_CYCLE_MS: u64 = 3600;
const TRAIL_LEN: i32 = 14;

const STAR_COUNT: usize = 9;
const SKY_HEIGHT: i32 = 20;

const WHITE: Rgb565 = Rgb565::from_rgb(248, 248, 255);
const BLUE: Rgb565 = Rgb565::from_rgb(40, 120, 255);
const BLUE_DARK: Rgb565 = Rgb565::from_rgb(18, 64, 168);
const STAR_WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);
const STAR_SOFT: Rgb565 = Rgb565::from_rgb(170, 210, 255);
const MOON: Rgb565 = Rgb565::from_rgb(245, 248, 255);
const CAPTION: Rgb565 = Rgb565::from_rgb(220, 235, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sky {
    Inactive,
    Streak,
    Rest,
}

impl Phase for Sky {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::Streak => Some(STREAK_MS),
            Self::Rest => Some(SHOWER_CYCLE_MS - STREAK_MS),
            Self::Inactive => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Streak => Self::Rest,
            Self::Rest => Self::Streak,
            Self::Inactive => Self::Inactive,
        }
    }
}

/// Point on the shooting star's arc at parameter `p ∈ [0, 1]`.
#[allow(clippy::cast_possible_truncation)]
fn arc(p: f32) -> (i32, i32) {
    let x = p.mul_add(86.0, -10.0);
    let y = 5.0f32.mul_add(-(p * PI).sin(), p.mul_add(11.0, 6.0));
    (x as i32, y as i32)
}

pub struct Mosque {
    io: Binding,
    timeline: Timeline<Sky>,
    stars: StarField,
    t: u64,
    /// Shooting-star head position along its arc; `None` while resting.
    streak: Option<f32>,
}

impl Mosque {
    pub const NAME: &'static str = "mosq1";

    #[must_use]
    pub fn new(clock: SharedClock, seed: u64) -> Self {
        Self {
            io: Binding::new(clock),
            timeline: Timeline::new(Self::NAME),
            stars: StarField::new(seed, STAR_COUNT, 64, SKY_HEIGHT),
            t: 0,
            streak: None,
        }
    }

    #[must_use]
    pub const fn sky(&self) -> Sky {
        self.timeline.phase()
    }

    fn draw_stars(&self, d: &mut dyn Display) {
        for (i, s) in self.stars.stars().iter().enumerate() {
            let level = StarField::twinkle(s, i, self.t);
            draw::star(d, s.x, s.y, dim_color(STAR_SOFT, level * 0.6), level > 0.9);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_shooting_star(&self, d: &mut dyn Display, head: f32) {
        let t = self.t as f32;
        let (x, y) = arc(head);

        let pulse = 0.18f32.mul_add(0.5f32.mul_add((t * 0.025).sin(), 0.5), 0.82);
        let core = dim_color(STAR_WHITE, pulse);
        let glow = dim_color(STAR_SOFT, 0.10f32.mul_add((t * 0.018).sin(), 0.72));

        d.draw_pixel(x, y, core);
        d.draw_pixel(x - 1, y, glow);
        d.draw_pixel(x + 1, y, glow);
        d.draw_pixel(x, y - 1, glow);
        d.draw_pixel(x, y + 1, glow);
        d.draw_pixel(x - 1, y - 1, dim_color(glow, 0.70));
        d.draw_pixel(x + 1, y - 1, dim_color(glow, 0.60));
        d.draw_pixel(x - 1, y + 1, dim_color(glow, 0.60));
        d.draw_pixel(x + 1, y + 1, dim_color(glow, 0.45));

        for i in 1..=TRAIL_LEN {
            let back = head - i as f32 * 0.028;
            if back < 0.0 {
                break;
            }
            let (tx, ty) = arc(back);
            let fade = 1.0 - i as f32 / TRAIL_LEN as f32;
            let base = if i < 4 { STAR_WHITE } else { STAR_SOFT };
            let c = dim_color(base, 0.78f32.mul_add(fade, 0.22));

            d.draw_pixel(tx, ty, c);
            if i % 2 == 0 && i < 12 {
                d.draw_pixel(tx - 1, ty, dim_color(c, 0.65));
            }
            if i % 4 == 0 {
                d.draw_pixel(tx - 1, ty + 1, dim_color(STAR_SOFT, 0.30 * fade));
            }
        }
    }

    fn draw_mosque(d: &mut dyn Display) {
        d.fill_rect(8, 47, 48, 4, BLUE_DARK);

        d.fill_rect(16, 34, 32, 13, WHITE);
        d.draw_rect(16, 34, 32, 13, BLUE);

        fill_disc(d, 32, 32, 8, BLUE);
        fill_disc(d, 32, 32, 5, WHITE);
        d.draw_pixel(32, 23, BLUE_DARK);

        fill_disc(d, 22, 35, 3, BLUE);
        fill_disc(d, 42, 35, 3, BLUE);

        for x in [10, 48] {
            d.fill_rect(x, 24, 6, 23, WHITE);
            d.draw_rect(x, 24, 6, 23, BLUE);
            fill_disc(d, x + 3, 23, 3, BLUE);
        }

        d.fill_rect(29, 39, 6, 8, BLUE_DARK);
        d.fill_rect(20, 39, 4, 5, BLUE);
        d.fill_rect(40, 39, 4, 5, BLUE);

        // Crescent: a full disc with a smaller one bitten out.
        fill_disc(d, 51, 18, 3, MOON);
        fill_disc(d, 52, 18, 2, Rgb565::BLACK);
    }

    fn draw_caption(d: &mut dyn Display) {
        d.set_text_size(1);
        d.set_text_wrap(false);
        d.set_text_color(CAPTION);
        d.set_cursor(11, 54);
        d.print("RAMADAN");
    }
}

impl Animation for Mosque {
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
        self.streak = Some(0.0);
        self.timeline.begin(Sky::Streak, self.io.now());
    }

    fn stop(&mut self) {
        self.timeline.halt();
        self.io.clear();
    }

    fn update(&mut self) {
        if !self.io.is_bound() || !self.timeline.is_active() {
            return;
        }
        let now = self.io.now();
        self.timeline.advance(now, |_| {});
        self.t = self.timeline.runtime(now);
        self.streak = match self.timeline.phase() {
            Sky::Streak => Some(self.timeline.progress(now)),
            Sky::Rest | Sky::Inactive => None,
        };
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            d.fill_screen(Rgb565::BLACK);
            self.draw_stars(d);
            if let Some(head) = self.streak {
                self.draw_shooting_star(d, head);
            }
            Self::draw_mosque(d);
            Self::draw_caption(d);
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

    fn started(rig: &Rig) -> Mosque {
        let mut m = Mosque::new(rig.clock(), 12345);
        rig.bind(&mut m);
        m.start();
        m
    }

    #[test]
    fn arc_runs_left_to_right() {
        assert_eq!(arc(0.0), (-10, 6));
        assert_eq!(arc(1.0), (76, 17));
        let (x, y) = arc(0.5);
        assert_eq!((x, y), (33, 6));
    }

    #[test]
    fn shooting_star_cycles() {
        let rig = Rig::new();
        let mut m = started(&rig);
        rig.step(&mut m, 1000);
        assert_eq!(m.sky(), Sky::Streak);
        rig.step(&mut m, 450);
        assert_eq!(m.sky(), Sky::Rest);
        rig.step(&mut m, 2150);
        assert_eq!(m.sky(), Sky::Streak);
        assert!(m.is_running());
    }

    #[test]
    fn streak_head_is_drawn_mid_flight() {
        let rig = Rig::new();
        let mut m = started(&rig);
        rig.step(&mut m, 725);
        assert!(!rig.pixel(33, 6).is_black());
    }

    #[test]
    fn crescent_and_mosque() {
        let rig = Rig::new();
        let mut m = started(&rig);
        rig.step(&mut m, 2000);
        assert_eq!(rig.pixel(48, 18), MOON);
        assert!(rig.pixel(52, 18).is_black());
        assert_eq!(rig.pixel(26, 44), WHITE);
        assert_eq!(rig.pixel(31, 42), BLUE_DARK);
    }

    #[test]
    fn caption_is_printed() {
        let rig = Rig::new();
        let mut m = started(&rig);
        rig.step(&mut m, 100);
        let mut hits = 0;
        for y in 54..62 {
            for x in 11..54 {
                if rig.pixel(x, y) == CAPTION {
                    hits += 1;
                }
            }
        }
        assert!(hits > 20, "caption pixels: {hits}");
    }

    #[test]
    fn same_seed_same_sky() {
        let a = Rig::new();
        let b = Rig::new();
        let mut x = started(&a);
        let mut y = started(&b);
        a.step(&mut x, 2500);
        b.step(&mut y, 2500);
        assert_eq!(a.frame(), b.frame());
    }
}
