// SPDX-License-Identifier: MIT
//
// Seeded background star field.
//
// Positions and twinkle phases are rolled once from a fixed seed, so the
// same seed always gives the same sky and rendered frames stay
// reproducible across runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pb_display::{Display, Rgb565};
use pb_ease::dim_color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// Twinkle phase offset in radians, `[0, 6.28)`.
    pub phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Roll `count` stars uniformly over a `width × height` area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(seed: u64, count: usize, width: i32, height: i32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0..width.max(1)),
                y: rng.gen_range(0..height.max(1)),
                phase: rng.gen_range(0..628) as f32 / 100.0,
            })
            .collect();
        Self { stars }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Twinkle level in `[0.35, 1.0]` for star `index` at `t_ms`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn twinkle(star: &Star, index: usize, t_ms: u64) -> f32 {
        let wave = (star.phase + t_ms as f32 * 0.0035 + index as f32).sin();
        0.65f32.mul_add(0.5f32.mul_add(wave, 0.5), 0.35)
    }

    /// Draw every star as a single pixel of `color` scaled by its twinkle
    /// and by `gain`.
    pub fn draw(&self, d: &mut dyn Display, color: Rgb565, gain: f32, t_ms: u64) {
        for (i, s) in self.stars.iter().enumerate() {
            d.draw_pixel(s.x, s.y, dim_color(color, Self::twinkle(s, i, t_ms) * gain));
        }
    }
}
