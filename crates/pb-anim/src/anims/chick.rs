// SPDX-License-Identifier: MIT
//
// Front-facing chick, built from ellipses. It sits still and blinks for
// 90 ms out of every 4200 ms, starting with a blink.

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::palette::SPARKLE;

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw::fill_ellipse;

const BLINK_MS: u64 = 90;
const BLINK_CYCLE_MS: u64 = 4200;

const CX: i32 = 32;
const CY: i32 = 32;

const OUTLINE: Rgb565 = Rgb565::from_rgb(96, 34, 34);
const MAIN: Rgb565 = Rgb565::from_rgb(255, 235, 0);
const LIGHT: Rgb565 = Rgb565::from_rgb(255, 248, 130);
const SHADE: Rgb565 = Rgb565::from_rgb(255, 198, 40);
const BEAK: Rgb565 = Rgb565::from_rgb(255, 145, 22);
const BEAK_DARK: Rgb565 = Rgb565::from_rgb(220, 92, 8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eyes {
    Inactive,
    Blink,
    Open,
}

impl Phase for Eyes {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::Blink => Some(BLINK_MS),
            Self::Open => Some(BLINK_CYCLE_MS - BLINK_MS),
            Self::Inactive => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Blink => Self::Open,
            Self::Open => Self::Blink,
            Self::Inactive => Self::Inactive,
        }
    }
}

pub struct Chick {
    io: Binding,
    timeline: Timeline<Eyes>,
}

impl Chick {
    pub const NAME: &'static str = "chick1";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self { io: Binding::new(clock), timeline: Timeline::new(Self::NAME) }
    }

    #[must_use]
    pub const fn eyes(&self) -> Eyes {
        self.timeline.phase()
    }

    fn draw(&self, d: &mut dyn Display) {
        let (cx, cy) = (CX, CY);

        fill_ellipse(d, cx, cy + 4, 12, 10, MAIN);
        fill_ellipse(d, cx, cy - 5, 10, 8, MAIN);
        fill_ellipse(d, cx, cy - 10, 4, 2, LIGHT);
        fill_ellipse(d, cx - 5, cy - 3, 2, 1, LIGHT);
        fill_ellipse(d, cx + 5, cy - 3, 2, 1, LIGHT);
        fill_ellipse(d, cx, cy + 10, 7, 2, SHADE);

        for side in [-1, 1] {
            fill_ellipse(d, cx + 13 * side, cy + 2, 5, 4, MAIN);
            fill_ellipse(d, cx + 14 * side, cy + 2, 3, 2, LIGHT);
        }

        // Eye band keeps the yellow from bleeding into the eyes.
        d.fill_rect(cx - 11, cy - 8, 22, 7, Rgb565::BLACK);
        if self.timeline.phase() == Eyes::Blink {
            d.draw_fast_hline(cx - 6, cy - 5, 5, OUTLINE);
            d.draw_fast_hline(cx + 2, cy - 5, 5, OUTLINE);
        } else {
            fill_ellipse(d, cx - 4, cy - 5, 3, 2, Rgb565::BLACK);
            fill_ellipse(d, cx + 4, cy - 5, 3, 2, Rgb565::BLACK);
            d.draw_pixel(cx - 6, cy - 6, SPARKLE);
            d.draw_pixel(cx + 2, cy - 6, SPARKLE);
        }

        fill_ellipse(d, cx, cy - 1, 4, 2, BEAK);
        d.draw_fast_hline(cx - 3, cy - 1, 7, BEAK_DARK);
        d.draw_fast_hline(cx - 2, cy, 5, BEAK_DARK);

        for leg in [-3, 3] {
            d.draw_line(cx + leg, cy + 13, cx + leg, cy + 17, BEAK_DARK);
        }
        d.draw_fast_hline(cx - 6, cy + 17, 5, BEAK);
        d.draw_fast_hline(cx + 2, cy + 17, 5, BEAK);
    }
}

impl Animation for Chick {
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
        self.timeline.begin(Eyes::Blink, self.io.now());
    }

    fn stop(&mut self) {
        self.timeline.halt();
        self.io.clear();
    }

    fn update(&mut self) {
        if !self.io.is_bound() || !self.timeline.is_active() {
            return;
        }
        self.timeline.advance(self.io.now(), |_| {});
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| {
            d.fill_screen(Rgb565::BLACK);
            self.draw(d);
        });
    }

    fn is_running(&self) -> bool {
        self.timeline.is_active()
    }
}
