// SPDX-License-Identifier: MIT
//
// Egg hatching: a one-shot story. The egg wobbles, cracks in three ever
// more violent stages, breaks open, and a chick pops out, looks around
// and blows a heart that floats away.
//
// Phases:
//
//   Inactive ─start─► EggIdle 1500 ─► Crack1 1500 ─► Crack2 1500
//     ─► Crack3 1500 ─► Hatching 1500 ─► ChickEmerge 1000
//     ─► ChickLook 1200 ─► ChickKiss 1000 ─► HeartFloat 5000 ─► Complete
//
// `Complete` is terminal: `is_running` turns false but the final frame
// (chick in its shell) keeps rendering until `stop`.
//
// Every sub-frame (wobble step, emerge height, heart rise) is a function
// of the time spent in the current phase, so the story plays out the
// same at any tick rate.

use pb_display::{Display, Rgb565, SharedDisplay};
use pb_ease::palette::{CORAL, HEART_RED, MAGENTA, SOFT_PINK, SPARKLE};

use crate::animation::{Animation, Binding, Phase, Timeline};
use crate::clock::SharedClock;
use crate::draw::{Flip, Sprite};

// ─── Layout ──────────────────────────────────────────────────────────────────

const EGG_X: i32 = 12;
const EGG_Y: i32 = 10;
const CHICK_X: i32 = 16;
const CHICK_Y: i32 = 8;
const HEART_X: i32 = 44;
const HEART_Y: i32 = 20;

/// First egg row kept as the broken shell once the chick is out.
const SHELL_ROW: i32 = 26;

const FLASH_MS: u64 = 60;
const EMERGE_STEP_MS: u64 = 100;
const EMERGE_FRAMES: u64 = 10;
const LOOK_STEP_MS: u64 = 600;
const RISE_STEP_MS: u64 = 120;
const FADE_AFTER_MS: u64 = 2000;

const WOBBLE: [i32; 4] = [0, 1, 0, -1];
const SHAKE: [i32; 4] = [0, 2, 0, -2];
const VIOLENT: [i32; 4] = [0, 3, -1, -3];
const LOOK_BOUNCE: [i32; 4] = [0, -1, 0, 1];

// ─── Art ─────────────────────────────────────────────────────────────────────

const EGG_MAIN: Rgb565 = Rgb565(0xFFDE);
const EGG_SHADOW: Rgb565 = Rgb565(0xE71C);

const EGG: Sprite = Sprite::new(
    40,
    &[
        "...............ssmmmmmmss",
        "............ssmmmllllllmmmss",
        "..........smmmlllllllllllmmms",
        "........smmmllllllllllllllmmms",
        ".......smmlllllllllllllllllmmms",
        "......smmllllpllllllllllplllmmms",
        ".....smmlllllllllllllllllllllmmms",
        "....smmlllllllllllllllllllllllmmms",
        "...smmlllllllllllllllllllllllllmmms",
        "..smmllllllpllllllllllllllplllllmmms",
        "..smlllllllllllllllllllllllllllllmms",
        ".smmllllllllllllllllllllllllllllllmms",
        ".smlllllllllllllpllllpllllllllllllmms",
        "smmllllllllllllllllllllllllllllllllmms",
        "smllllllllllllllllllllllllllllllllllmms",
        "smllllllllllllllllllllllllllllllllllmms",
        "smlllllpllllllllllllllllllllllplllllmms",
        "smllllllllllllllllllllllllllllllllllmms",
        "smllllllllllllllllllllllllllllllllllmms",
        "smllllllllllllllllllllllllllllllllllmms",
        "smmllllllllllllllllllllllllllllllllmms",
        "smmllllllllllpllllllllllpllllllllllmms",
        ".smmllllllllllllllllllllllllllllllmms",
        ".smmllllllllllllllllllllllllllllllmms",
        ".smmllllllllllllllllllllllllllllllmms",
        "..smmllllllllllllllllllllllllllllmms",
        "..smmllllllllllllllllllllllllllllmms",
        "...smmllllllllllllllllllllllllllmms",
        "...smmllllllllllllllllllllllllllmms",
        "....smmllllllllllllllllllllllllmms",
        ".....smmllllllllllllllllllllllmms",
        "......smmllllllllllllllllllllmms",
        ".......smmllllllllllllllllllmms",
        "........smmllllllllllllllllmms",
        ".........smmllllllllllllllmms",
        "..........smmllllllllllllmms",
        "...........smmllllllllllmms",
        "............smmllllllllmms",
        ".............smmllllllmms",
        "..............smmmllmmms",
        "...............smmmmmms",
        "................ssmmss",
    ],
    &[
        (b'm', EGG_MAIN),
        (b'l', Rgb565(0xFFFF)),
        (b's', EGG_SHADOW),
        (b'p', Rgb565(0xC618)),
    ],
);

const CHICK_YELLOW: Rgb565 = Rgb565(0xFFE0);

const CHICK: Sprite = Sprite::new(
    32,
    &[
        "............yyy..yyy",
        "...........ylyyyyyyly",
        "..........yyllyyyyllyy",
        ".........yylllyyyylllyy",
        "........yylllllyylllllyy",
        ".......yyllllllllllllllyy",
        "......yyllllllllllllllllyy",
        ".....yyllllllllllllllllllyy",
        "....yylllwwwlllllllwwwlllyy",
        "...yylllwwkwllllllwwkwllllyy",
        "...yylllwkkwllllllwkkwllllyy",
        "...yyllllwwllllllllwwlllllyy",
        "...yylccllllllllllllllccllyy",
        "...yylcclllllooooollllccllyy",
        "...yylllllllooooooolllllllyy",
        "....yylllllllooooolllllllyy",
        "....yyllllllllooollllllllyy",
        ".....yylllllllllllllllllyy",
        "......yylllllllllllllllyy",
        ".......yyylllllllllllyyy",
        "......yyyyylllllllllyyyyy",
        ".....yyyyyyylllllllyyyyyyy",
        "....yyddyyyyyyyyyyyyyyddyy",
        "....ydddyyyyyyyyyyyyyydddy",
        ".....ddyyyyyyyyyyyyyyyydd",
        "......dyyyyyyyyyyyyyyyyd",
        ".......dyyyyyyyyyyyyyyd",
        "........ddyyyyyyyyyydd",
    ],
    &[
        (b'y', CHICK_YELLOW),
        (b'l', Rgb565(0xFFF0)),
        (b'o', Rgb565(0xFD20)),
        (b'd', Rgb565(0xE520)),
        (b'k', Rgb565::BLACK),
        (b'c', SOFT_PINK),
        (b'w', SPARKLE),
    ],
);

const HEART: Sprite = Sprite::new(
    8,
    &[".rr..rr", "rlrrrlrr", "rrrrrrrr", "rrrrrrrr", ".rrrrrr", "..rrrr", "...rr", ""],
    &[(b'r', HEART_RED), (b'l', CORAL)],
);

/// Crack segments in egg coordinates. Each stage draws a longer prefix.
static CRACKS: [(i32, i32, i32, i32); 13] = [
    (20, 10, 18, 16),
    (18, 16, 22, 22),
    (22, 22, 19, 28),
    // branches
    (18, 16, 12, 18),
    (12, 18, 8, 15),
    (22, 22, 28, 20),
    (28, 20, 32, 24),
    // shatter
    (19, 28, 14, 32),
    (19, 28, 24, 34),
    (12, 18, 10, 24),
    (28, 20, 30, 14),
    (32, 24, 36, 22),
    (8, 25, 32, 25),
];

fn cracks_for(stage: u8) -> &'static [(i32, i32, i32, i32)] {
    match stage {
        1 => &CRACKS[..3],
        2 => &CRACKS[..7],
        3 => &CRACKS,
        _ => &[],
    }
}

// ─── Phases ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hatch {
    Inactive,
    EggIdle,
    Crack1,
    Crack2,
    Crack3,
    Hatching,
    ChickEmerge,
    ChickLook,
    ChickKiss,
    HeartFloat,
    Complete,
}

impl Phase for Hatch {
    const IDLE: Self = Self::Inactive;

    fn duration_ms(self) -> Option<u64> {
        match self {
            Self::EggIdle | Self::Crack1 | Self::Crack2 | Self::Crack3 | Self::Hatching => Some(1500),
            Self::ChickEmerge | Self::ChickKiss => Some(1000),
            Self::ChickLook => Some(1200),
            Self::HeartFloat => Some(5000),
            Self::Inactive | Self::Complete => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::EggIdle => Self::Crack1,
            Self::Crack1 => Self::Crack2,
            Self::Crack2 => Self::Crack3,
            Self::Crack3 => Self::Hatching,
            Self::Hatching => Self::ChickEmerge,
            Self::ChickEmerge => Self::ChickLook,
            Self::ChickLook => Self::ChickKiss,
            Self::ChickKiss => Self::HeartFloat,
            Self::HeartFloat | Self::Complete => Self::Complete,
            Self::Inactive => Self::Inactive,
        }
    }

    fn is_terminal(self) -> bool {
        self == Self::Complete
    }
}

impl Hatch {
    const fn crack_stage(self) -> u8 {
        match self {
            Self::Crack1 => 1,
            Self::Crack2 => 2,
            Self::Crack3 | Self::Hatching => 3,
            _ => 0,
        }
    }

    const fn flashes(self) -> bool {
        matches!(self, Self::Crack1 | Self::Crack2 | Self::Crack3 | Self::Hatching)
    }

    const fn chick_out(self) -> bool {
        matches!(
            self,
            Self::ChickEmerge | Self::ChickLook | Self::ChickKiss | Self::HeartFloat | Self::Complete
        )
    }
}

// ─── Animation ───────────────────────────────────────────────────────────────

pub struct EggChick {
    io: Binding,
    timeline: Timeline<Hatch>,
    /// Time since `start`.
    t: u64,
    /// Time spent in the current phase.
    elapsed: u64,
}

impl EggChick {
    pub const NAME: &'static str = "egg";

    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self { io: Binding::new(clock), timeline: Timeline::new(Self::NAME), t: 0, elapsed: 0 }
    }

    #[must_use]
    pub const fn phase(&self) -> Hatch {
        self.timeline.phase()
    }

    /// Whether the story has played to the end.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.timeline.phase() == Hatch::Complete
    }

    /// Horizontal egg offset for the current frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn wobble(&self) -> i32 {
        let step = |ms: u64| (self.elapsed / ms % 4) as usize;
        match self.timeline.phase() {
            Hatch::EggIdle => WOBBLE[step(300)],
            Hatch::Crack1 | Hatch::Crack2 => SHAKE[step(100)],
            Hatch::Crack3 => VIOLENT[step(30)],
            _ => 0,
        }
    }

    /// Top row of the chick sprite, once it is out of the egg.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn chick_top(&self) -> Option<i32> {
        match self.timeline.phase() {
            Hatch::ChickEmerge => {
                let frame = (self.elapsed / EMERGE_STEP_MS).min(EMERGE_FRAMES);
                Some(CHICK_Y + (EMERGE_FRAMES - frame) as i32 * 2)
            }
            Hatch::ChickLook => Some(CHICK_Y + LOOK_BOUNCE[self.look_frame()]),
            p if p.chick_out() => Some(CHICK_Y),
            _ => None,
        }
    }

    /// Heart brightness out of 255 while it floats; full before the fade.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn heart_alpha(&self) -> u8 {
        let fading = self.rise_steps().saturating_sub(FADE_AFTER_MS / RISE_STEP_MS);
        let drop = fading.saturating_mul(5);
        if drop >= 245 { 10 } else { 255 - drop as u8 }
    }

    const fn rise_steps(&self) -> u64 {
        match self.timeline.phase() {
            Hatch::HeartFloat => self.elapsed / RISE_STEP_MS,
            _ => 0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn look_frame(&self) -> usize {
        (self.elapsed / LOOK_STEP_MS % 4) as usize
    }

    fn draw_egg(&self, d: &mut dyn Display) {
        let x = EGG_X + self.wobble();
        EGG.draw(d, x, EGG_Y, Flip::empty());

        for &(x1, y1, x2, y2) in cracks_for(self.timeline.phase().crack_stage()) {
            let (x1, y1, x2, y2) = (x + x1, EGG_Y + y1, x + x2, EGG_Y + y2);
            d.draw_line(x1, y1, x2, y2, Rgb565::BLACK);
            d.draw_line(x1 + 1, y1, x2 + 1, y2, Rgb565::BLACK);
            d.draw_line(x1, y1 + 1, x2, y2 + 1, Rgb565::BLACK);
        }
    }

    fn draw_shell(d: &mut dyn Display) {
        EGG.draw_rows(d, EGG_X, EGG_Y, SHELL_ROW, Flip::empty(), Some);

        let edge = EGG_Y + SHELL_ROW;
        for x in 6..34 {
            let dy = if x % 4 < 2 { 0 } else { -2 };
            d.draw_pixel(EGG_X + x, edge + dy, EGG_MAIN);
            d.draw_pixel(EGG_X + x, edge + dy + 1, EGG_SHADOW);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn draw_heart(&self, d: &mut dyn Display) {
        let rise = self.rise_steps() as i32;
        let alpha = self.heart_alpha();
        let x = HEART_X + if rise % 6 < 3 { 1 } else { -1 };
        let y = HEART_Y - rise;

        HEART.draw_rows(d, x, y, 0, Flip::empty(), |c| Some(fade(c, alpha)));

        let t = self.t;
        if alpha > 128 {
            let tick = (t / 100) as i32;
            for i in 0..3 {
                let sx = x + 4 + (tick + i * 7) % 12 - 6;
                let sy = y + 4 + (tick + i * 11) % 10 - 5;
                d.draw_pixel(sx, sy, SPARKLE);
            }
        }

        if alpha > 50 {
            if (t / 300) % 2 == 0 {
                d.draw_pixel(x - 8, y + 2, MAGENTA);
            }
            if (t / 250) % 2 == 0 {
                d.draw_pixel(x + 10, y + 4, HEART_RED);
            }
            if (t / 400) % 2 == 0 {
                d.draw_pixel(x - 3, y - 5, SPARKLE);
            }

            // Rising dots; each shows on alternate halves of a 200 ms beat.
            let lift1 = ((t / 60) % 24) as i32;
            let lift2 = (((t + 100) / 70) % 24) as i32;
            if t % 200 < 100 {
                d.draw_pixel(x + 6, y + 8 + lift1, CORAL);
            }
            if t % 200 > 100 {
                d.draw_pixel(x - 6, y + 4 + lift2, MAGENTA);
            }
        }
    }

    fn draw_scene(&self, d: &mut dyn Display) {
        let phase = self.timeline.phase();
        if phase.flashes() && self.elapsed < FLASH_MS {
            d.fill_screen(SPARKLE);
            return;
        }

        d.fill_screen(Rgb565::BLACK);
        let Some(top) = self.chick_top() else {
            self.draw_egg(d);
            return;
        };

        Self::draw_shell(d);
        let flip = if phase == Hatch::ChickLook && self.look_frame() == 1 { Flip::X } else { Flip::empty() };
        CHICK.draw(d, CHICK_X, top, flip);
        if phase == Hatch::HeartFloat {
            self.draw_heart(d);
        }
    }
}

/// Scale each 565 channel by `alpha / 255`.
#[allow(clippy::cast_possible_truncation)]
fn fade(c: Rgb565, alpha: u8) -> Rgb565 {
    if alpha == u8::MAX {
        return c;
    }
    let scale = |ch: u8| (u16::from(ch) * u16::from(alpha) / 255) as u8;
    let (r, g, b) = c.fields();
    Rgb565::from_fields(scale(r), scale(g), scale(b))
}

impl Animation for EggChick {
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
        self.elapsed = 0;
        self.timeline.begin(Hatch::EggIdle, self.io.now());
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
        self.timeline.advance(now, |done| {
            if done == Hatch::HeartFloat {
                log::info!("{}: hatched", Self::NAME);
            }
        });
        self.t = self.timeline.runtime(now);
        self.elapsed = self.timeline.elapsed(now);
    }

    fn render(&self) {
        if self.timeline.is_idle() {
            return;
        }
        self.io.paint(|d| self.draw_scene(d));
    }

    fn is_running(&self) -> bool {
        self.timeline.is_active()
    }
}
