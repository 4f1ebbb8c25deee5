// SPDX-License-Identifier: MIT
//
// Rose: a flower that blooms, swirls, pulses at the core and settles back,
// over a dark garden. The phase names follow the two-hearts story that
// first used the `val2` slot.
//
// Phases:
//
//   Inactive ─start─► Appear (1000) ─► Notice (800) ─► Approach (2200)
//       ─► Merge (1700) ─► Unity (2600) ─► Separate (1600)
//       ─► ReturnHome (900) ─► Pause (900) ─► Notice ...
//
// Each phase animates one or two levels and leaves everything else where
// the previous phase put it. When a phase is skipped over by a late tick
// its levels are settled to their end values, so a coarse poll still
// lands in the same place as a fine one.

use std::f32::consts::{PI, TAU};

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::easing::{ease_in_out_cubic, ease_out_cubic};
use pb_ease::palette::{CORAL, HEART_RED, SPARKLE, WARM_WHITE};
use pb_ease::{blend_color, dim_color};

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw;

const CX: i32 = 32;
const CY: i32 = 34;
const STEM_BOTTOM: i32 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bloom {
    Inactive,
    Appear,
    Notice,
    Approach,
    Merge,
    Unity,
    Separate,
    ReturnHome,
    Pause,
}

impl Phase for Bloom {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::Inactive => None,
            Self::Appear => Some(1000),
            Self::Notice => Some(800),
            Self::Approach => Some(2200),
            Self::Merge => Some(1700),
            Self::Unity => Some(2600),
            Self::Separate => Some(1600),
            Self::ReturnHome | Self::Pause => Some(900),
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Inactive => Self::Inactive,
            Self::Appear | Self::Pause => Self::Notice,
            Self::Notice => Self::Approach,
            Self::Approach => Self::Merge,
            Self::Merge => Self::Unity,
            Self::Unity => Self::Separate,
            Self::Separate => Self::ReturnHome,
            Self::ReturnHome => Self::Pause,
        }
    }
}

/// Everything the render reads.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Levels {
    /// Flower size; also drives stem height.
    bloom: f32,
    petal_light: f32,
    /// Swirl dot size, 0 until the approach.
    swirl: f32,
    core_scale: f32,
    core_glow: f32,
}

impl Levels {
    const START: Self = Self {
        bloom: 0.2,
        petal_light: 0.0,
        swirl: 0.0,
        core_scale: 0.2,
        core_glow: 0.0,
    };

    /// Mid-phase values at linear progress `p`.
    fn animate(&mut self, phase: Bloom, p: f32) {
        match phase {
            Bloom::Appear => self.petal_light = ease_in_out_cubic(p),
            Bloom::Notice => self.bloom = 0.05f32.mul_add((p * TAU).sin(), 0.45),
            Bloom::Approach => {
                self.swirl = ease_out_cubic(p);
                self.bloom = 0.55f32.mul_add(self.swirl, 0.45);
            }
            Bloom::Merge => self.core_scale = 0.14f32.mul_add((p * TAU).sin(), 1.0),
            Bloom::Unity => self.core_glow = 0.2f32.mul_add((p * 8.0 * PI).sin(), 0.8),
            Bloom::Separate => self.bloom = 0.45f32.mul_add(-ease_in_out_cubic(p), 1.0),
            Bloom::ReturnHome => self.petal_light = 0.4f32.mul_add(-p, 1.0),
            Bloom::Inactive | Bloom::Pause => {}
        }
    }

    /// End-of-phase values.
    fn settle(&mut self, phase: Bloom) {
        match phase {
            Bloom::Appear => {
                self.petal_light = 1.0;
                self.bloom = 0.45;
            }
            Bloom::Notice => self.bloom = 0.45,
            Bloom::Approach => {
                self.swirl = 1.0;
                self.bloom = 1.0;
            }
            Bloom::Merge => self.core_scale = 1.0,
            Bloom::Unity => self.core_glow = 0.8,
            Bloom::Separate => self.bloom = 0.55,
            Bloom::ReturnHome => self.petal_light = 0.6,
            Bloom::Inactive | Bloom::Pause => {}
        }
    }
}

pub struct Rose {
    io: Binding,
    timeline: Timeline<Bloom>,
    t: u64,
    levels: Levels,
}

impl Rose {
    pub const NAME: &'static str = "val2";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            io: Binding::new(clock),
            timeline: Timeline::new(Self::NAME),
            t: 0,
            levels: Levels::START,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Bloom {
        self.timeline.phase()
    }

    #[must_use]
    pub const fn bloom(&self) -> f32 {
        self.levels.bloom
    }

    fn draw_garden(&self, d: &mut dyn Display) {
        d.fill_screen(Rgb565::BLACK);
        let grass = Rgb565::from_rgb(0, 120, 40);
        for y in 40..64u8 {
            let depth = f32::from(y - 40) / 24.0;
            d.draw_fast_hline(0, i32::from(y), 64, dim_color(grass, depth.mul_add(0.25, 0.25)));
        }

        #[allow(clippy::cast_possible_truncation)]
        let stem_top = STEM_BOTTOM - (24.0 * self.levels.bloom) as i32;
        d.draw_line(CX, STEM_BOTTOM, CX, stem_top, dim_color(Rgb565::from_rgb(0, 255, 80), 0.9));
        d.draw_line(CX - 1, STEM_BOTTOM, CX - 1, stem_top, dim_color(Rgb565::from_rgb(0, 200, 70), 0.55));

        let leaf = dim_color(Rgb565::from_rgb(0, 230, 80), 0.8);
        d.draw_line(CX, 52, CX - 7, 56, leaf);
        d.draw_line(CX, 49, CX + 8, 53, leaf);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_flower(&self, d: &mut dyn Display) {
        let lv = &self.levels;
        let t = self.t as f32;
        let petal_base = 3 + (5.0 * lv.bloom) as i32;
        let base = petal_base as f32;
        let deep = dim_color(HEART_RED, lv.petal_light);
        let light = dim_color(CORAL, lv.petal_light);

        for i in 0..8u8 {
            let a = (f32::from(i) / 8.0).mul_add(TAU, t * 0.0006);
            let x = CX + (a.cos() * (4.0 + base)) as i32;
            let y = CY + (a.sin() * base.mul_add(0.8, 3.0)) as i32;
            let color = if i % 2 == 0 { deep } else { light };
            draw::fill_disc(d, x, y, 2 + (lv.bloom * 2.0) as i32, color);
        }

        for i in 0..12u8 {
            let s = f32::from(i) / 11.0;
            let a = s.mul_add(7.5, t * 0.0013);
            let r = s * base.mul_add(0.7, 3.0);
            let x = CX + (a.cos() * r) as i32;
            let y = CY + (a.sin() * r * 0.75) as i32;
            let color = dim_color(blend_color(deep, light, s), 0.9);
            draw::fill_disc(d, x, y, 1 + (lv.swirl * 2.0) as i32, color);
        }

        let core = dim_color(WARM_WHITE, 0.2f32.mul_add(lv.core_glow, 0.75));
        draw::fill_disc(d, CX, CY, 2 + (lv.core_scale * 1.5) as i32, core);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_sparkles(&self, d: &mut dyn Display) {
        let t = self.t as f32;
        let color = dim_color(SPARKLE, 0.75);
        for i in 0..10u8 {
            if (self.t / 120 + u64::from(i)) % 3 != 0 {
                continue;
            }
            let fi = f32::from(i);
            let a = fi.mul_add(0.62, t * 0.002);
            let r = 7.0f32.mul_add(0.5f32.mul_add(t.mul_add(0.0013, fi).sin(), 0.5), 8.0);
            let x = CX + (a.cos() * r) as i32;
            let y = CY - 4 + (a.sin() * r * 0.7) as i32;
            d.draw_pixel(x, y, color);
        }
    }
}

impl Animation for Rose {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, display: SharedDisplay) {
        self.io.bind(display);
        self.timeline.halt();
        self.levels = Levels::START;
    }

    fn start(&mut self) {
        if !self.io.is_bound() {
            log::debug!("{}: start ignored, no display", Self::NAME);
            return;
        }
        self.t = 0;
        self.levels = Levels::START;
        self.timeline.begin(Bloom::Appear, self.io.now());
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
        let levels = &mut self.levels;
        self.timeline.advance(now, |done| levels.settle(done));
        self.t = self.timeline.runtime(now);
        let p = self.timeline.progress(now);
        self.levels.animate(self.timeline.phase(), p);
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            self.draw_garden(d);
            self.draw_flower(d);
            self.draw_sparkles(d);
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

    fn started(rig: &Rig) -> Rose {
        let mut rose = Rose::new(rig.clock());
        rig.bind(&mut rose);
        rose.start();
        rose
    }

    // ── Sequence ────────────────────────────────────────────────────────

    #[test]
    fn walks_the_story_in_order() {
        let rig = Rig::new();
        let mut rose = started(&rig);
        let expected = [
            (1000, Bloom::Notice),
            (800, Bloom::Approach),
            (2200, Bloom::Merge),
            (1700, Bloom::Unity),
            (2600, Bloom::Separate),
            (1600, Bloom::ReturnHome),
            (900, Bloom::Pause),
            (900, Bloom::Notice),
        ];
        assert_eq!(rose.phase(), Bloom::Appear);
        for (ms, phase) in expected {
            rig.step(&mut rose, ms);
            assert_eq!(rose.phase(), phase);
        }
        assert!(rose.is_running());
    }

    #[test]
    fn skipped_phases_settle_their_levels() {
        let rig = Rig::new();
        let mut rose = started(&rig);
        // One tick straight into Merge: Appear, Notice and Approach all
        // completed in between.
        rig.step(&mut rose, 4000);
        assert_eq!(rose.phase(), Bloom::Merge);
        assert!((rose.bloom() - 1.0).abs() < 1e-6);
        assert!((rose.levels.petal_light - 1.0).abs() < 1e-6);
        assert!((rose.levels.swirl - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coarse_and_fine_ticks_agree() {
        let fine = Rig::new();
        let coarse = Rig::new();
        let mut a = started(&fine);
        let mut b = started(&coarse);
        fine.run(&mut a, 9_000, 16);
        coarse.run(&mut b, 9_000, 1_500);
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.levels, b.levels);
        assert_eq!(fine.frame(), coarse.frame());
    }

    // ── Render ──────────────────────────────────────────────────────────

    #[test]
    fn garden_ground_is_green() {
        let rig = Rig::new();
        let mut rose = started(&rig);
        rig.step(&mut rose, 10);
        let (r, g, b) = rig.pixel(2, 63).to_rgb888();
        assert_eq!(r, 0);
        assert!(g > b && g > 0);
        // The sky stays black.
        assert!(rig.pixel(2, 2).is_black());
    }

    #[test]
    fn core_is_lit() {
        let rig = Rig::new();
        let mut rose = started(&rig);
        rig.step(&mut rose, 5000);
        assert!(!rig.pixel(CX, CY).is_black());
    }

    #[test]
    fn stop_clears() {
        let rig = Rig::new();
        let mut rose = started(&rig);
        rig.step(&mut rose, 500);
        rose.stop();
        assert_eq!(rig.lit(), 0);
        assert!(!rose.is_running());
    }
}
