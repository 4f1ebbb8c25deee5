// SPDX-License-Identifier: MIT
//
// Heartbeat: a pixel heart pulsing over a star field, with an ECG trace
// sweeping along the bottom and glow rings expanding on every beat.
//
// Phases:
//
//   Inactive ─start─► FadeIn (900 ms) ─► Breathe (loops forever)
//
// The beat runs on a 1600 ms grid measured from `start`, so the first
// beat lines up with the end of the fade whatever the tick rate.

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::easing::{ease_in_out_cubic, heartbeat_pulse};
use pb_ease::palette::{CORAL, HEART_RED, SOFT_PINK, SPARKLE};
use pb_ease::{dim_color, easing};

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw::{self, Mask};
use crate::stars::StarField;

const FADE_IN_MS: u64 = 900;
const BEAT_PERIOD_MS: u64 = 1600;
const STAR_COUNT: usize = 24;

const HEART_X: i32 = 32;
const HEART_Y: i32 = 26;
const ECG_Y: i32 = 50;

const HEART: Mask = Mask::new(
    15,
    &[
        0b000_1110_0011_1000,
        0b001_1111_0111_1100,
        0b011_1111_1111_1110,
        0b111_1111_1111_1111,
        0b111_1111_1111_1111,
        0b111_1111_1111_1111,
        0b011_1111_1111_1110,
        0b001_1111_1111_1100,
        0b000_1111_1111_1000,
        0b000_0111_1111_0000,
        0b000_0011_1110_0000,
        0b000_0001_1100_0000,
        0b000_0000_1000_0000,
        0b000_0000_1000_0000,
        0b000_0000_0000_0000,
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Inactive,
    FadeIn,
    Breathe,
}

impl Phase for Beat {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::FadeIn => Some(FADE_IN_MS),
            Self::Inactive | Self::Breathe => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::FadeIn => Self::Breathe,
            other => other,
        }
    }
}

pub struct Heartbeat {
    io: Binding,
    timeline: Timeline<Beat>,
    stars: StarField,
    /// Time since `start`, as of the last `update`.
    t: u64,
    scale: f32,
    brightness: f32,
    glow_radius: f32,
    glow_alpha: f32,
}

impl Heartbeat {
    pub const NAME: &'static str = "val1";

    #[must_use]
    pub fn new(clock: SharedClock, seed: u64) -> Self {
        Self {
            io: Binding::new(clock),
            timeline: Timeline::new(Self::NAME),
            stars: StarField::new(seed, STAR_COUNT, 64, 64),
            t: 0,
            scale: 1.0,
            brightness: 0.0,
            glow_radius: 0.0,
            glow_alpha: 0.0,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Beat {
        self.timeline.phase()
    }

    #[must_use]
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    fn reset_levels(&mut self) {
        self.t = 0;
        self.scale = 1.0;
        self.brightness = 0.0;
        self.glow_radius = 0.0;
        self.glow_alpha = 0.0;
    }

    fn draw_ecg(d: &mut dyn Display, t: u64) {
        d.draw_fast_hline(0, ECG_Y, 64, dim_color(SPARKLE, 0.25));
        let trace = dim_color(Rgb565::from_rgb(0, 255, 180), 0.9);
        let ghost = dim_color(Rgb565::from_rgb(0, 180, 255), 0.4);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let sweep = ((t / 24) % 64) as i32;

        for x in 0..64 {
            let rel = x - sweep;
            let y = match rel {
                -12..=-9 => ECG_Y - 2,
                -8..=-7 => ECG_Y + 4,
                -6..=-5 => ECG_Y - 10,
                -4..=-3 => ECG_Y + 6,
                -2..=1 => ECG_Y - 1,
                _ => continue,
            };
            d.draw_pixel(x, y, trace);
            d.draw_pixel(x, y - 1, ghost);
        }
    }

    fn draw_glow(&self, d: &mut dyn Display) {
        for ring in 0..4u8 {
            let ring = f32::from(ring);
            let radius = 3.0f32.mul_add(ring, 10.0 + self.glow_radius);
            let alpha = self.glow_alpha * 0.22f32.mul_add(-ring, 1.0);
            if alpha < 0.05 {
                continue;
            }
            draw::ring(d, HEART_X, HEART_Y, radius, 0.8, 0.09, dim_color(SOFT_PINK, alpha * 0.4));
        }
    }

    fn draw_heart(&self, d: &mut dyn Display) {
        let px = if self.scale > 1.15 { 3 } else { 2 };
        let edge = dim_color(SPARKLE, 0.9 * self.brightness);
        let deep = dim_color(HEART_RED, self.brightness);
        let light = dim_color(CORAL, self.brightness);

        for row in 0..HEART.height() {
            for col in 0..HEART.width() {
                if !HEART.bit(col, row) {
                    continue;
                }
                let x = HEART_X + (col - 7) * px;
                let y = HEART_Y + (row - 7) * px;
                let body = if row < 5 || col < 5 { light } else { deep };
                d.fill_rect(x, y, px, px, body);

                let rim = row == 0 || row == 14 || col == 0 || col == 14;
                if rim || !HEART.bit((col - 1).max(0), row) {
                    d.draw_pixel(x, y, edge);
                }
            }
        }
    }
}

impl Animation for Heartbeat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, display: SharedDisplay) {
        self.io.bind(display);
        self.timeline.halt();
        self.reset_levels();
    }

    fn start(&mut self) {
        if !self.io.is_bound() {
            log::debug!("{}: start ignored, no display", Self::NAME);
            return;
        }
        self.reset_levels();
        self.timeline.begin(Beat::FadeIn, self.io.now());
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

        match self.timeline.phase() {
            Beat::FadeIn => {
                self.brightness = ease_in_out_cubic(self.timeline.progress(now));
            }
            Beat::Breathe => {
                let beat = easing::cycle(self.t, BEAT_PERIOD_MS);
                let pulse = heartbeat_pulse(beat);
                self.scale = pulse.mul_add(0.42, 0.95);
                self.glow_radius = 24.0f32.mul_add(beat, 2.0);
                self.glow_alpha = 0.85f32.mul_add(pulse, 0.15);
                self.brightness = 0.28f32.mul_add(pulse, 0.72);
            }
            Beat::Inactive => {}
        }
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            d.fill_screen(Rgb565::BLACK);
            self.stars.draw(d, SPARKLE, 0.55, self.t);
            Self::draw_ecg(d, self.t);
            if self.glow_alpha > 0.03 {
                self.draw_glow(d);
            }
            self.draw_heart(d);
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

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn started(rig: &Rig) -> Heartbeat {
        let mut hb = Heartbeat::new(rig.clock(), 12345);
        rig.bind(&mut hb);
        hb.start();
        hb
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn start_without_display_is_ignored() {
        let rig = Rig::new();
        let mut hb = Heartbeat::new(rig.clock(), 1);
        hb.start();
        assert!(!hb.is_running());
        assert_eq!(hb.phase(), Beat::Inactive);
    }

    #[test]
    fn stop_clears_and_idles() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        rig.run(&mut hb, 2000, 33);
        assert!(rig.lit() > 0);
        hb.stop();
        assert!(!hb.is_running());
        assert_eq!(rig.lit(), 0);
        // Idle renders draw nothing.
        rig.step(&mut hb, 33);
        assert_eq!(rig.lit(), 0);
    }

    // ── Timing ──────────────────────────────────────────────────────────

    #[test]
    fn fades_in_then_breathes() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        rig.step(&mut hb, 450);
        assert_eq!(hb.phase(), Beat::FadeIn);
        assert!(close(hb.brightness(), 0.5));
        rig.step(&mut hb, 450);
        assert_eq!(hb.phase(), Beat::Breathe);
        assert!(hb.is_running());
    }

    #[test]
    fn beat_peaks_at_forty_percent() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        // 1600 + 640 ms: second beat, t = 0.4.
        rig.step(&mut hb, 2240);
        assert!(close(hb.scale(), 1.37));
        assert!(close(hb.brightness(), 1.0));
    }

    #[test]
    fn beat_rests_between_pulses() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        rig.step(&mut hb, 3200);
        assert!(close(hb.scale(), 0.95));
        assert!(close(hb.brightness(), 0.72));
    }

    #[test]
    fn tick_rate_does_not_change_the_frame() {
        let fast = Rig::new();
        let slow = Rig::new();
        let mut a = started(&fast);
        let mut b = started(&slow);
        fast.run(&mut a, 3000, 10);
        slow.run(&mut b, 3000, 250);
        assert_eq!(fast.frame(), slow.frame());
    }

    // ── Render ──────────────────────────────────────────────────────────

    #[test]
    fn heart_is_drawn_at_center() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        rig.step(&mut hb, 1600);
        let (r, _, _) = rig.pixel(HEART_X + 2, HEART_Y + 2).to_rgb888();
        assert!(r > 150, "heart body should be red, got r={r}");
    }

    #[test]
    fn baseline_spans_the_width() {
        let rig = Rig::new();
        let mut hb = started(&rig);
        rig.step(&mut hb, 0);
        // Sweep at x = 0, so the trace only touches the left few columns.
        assert!(!rig.pixel(40, ECG_Y).is_black());
        assert!(!rig.pixel(63, ECG_Y).is_black());
    }
}
