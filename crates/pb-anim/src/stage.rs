// SPDX-License-Identifier: MIT
//
// Stage: owns every animation and guarantees at most one is playing.
//
// On the panel this sits behind the remote-command handler; here it is
// driven by the simulator CLI and by tests. Commands arrive as short
// tokens:
//
//   | Token                                       | Plays                  |
//   |---------------------------------------------|------------------------|
//   | val1, heartbeat, pulse                      | Heartbeat              |
//   | val2, twohearts, love                       | Rose                   |
//   | val3, letter, envelope                      | LoveLetter             |
//   | val4, textlove, ily                         | TextOnly               |
//   | val5, chicklove, ilychick                   | TextChick              |
//   | egg, hatch, chick, animation/egg_chick      | EggChick               |
//   | chick1, cutechick                           | Chick                  |
//   | mosq1, mosque                               | Mosque                 |
//   | stop, animation/stop                        | (stops everything)     |
//
// Tokens are case-insensitive and may carry an `anim:` prefix.

use std::fmt;
use std::str::FromStr;

use pb_display::SharedDisplay;

use crate::animation::Animation;
use crate::anims::{Chick, EggChick, Heartbeat, LoveLetter, Mosque, Rose, TextChick, TextOnly};
use crate::clock::SharedClock;

// ---------------------------------------------------------------------------
// AnimationKind
// ---------------------------------------------------------------------------

/// One of the built-in animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Heartbeat,
    Rose,
    LoveLetter,
    TextOnly,
    TextChick,
    EggChick,
    Chick,
    Mosque,
}

impl AnimationKind {
    pub const ALL: [Self; 8] = [
        Self::Heartbeat,
        Self::Rose,
        Self::LoveLetter,
        Self::TextOnly,
        Self::TextChick,
        Self::EggChick,
        Self::Chick,
        Self::Mosque,
    ];

    /// Canonical command token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Heartbeat => Heartbeat::NAME,
            Self::Rose => Rose::NAME,
            Self::LoveLetter => LoveLetter::NAME,
            Self::TextOnly => TextOnly::NAME,
            Self::TextChick => TextChick::NAME,
            Self::EggChick => EggChick::NAME,
            Self::Chick => Chick::NAME,
            Self::Mosque => Mosque::NAME,
        }
    }

    /// Construct a fresh, unbound instance. `seed` feeds the animations
    /// that roll a star field.
    #[must_use]
    pub fn build(self, clock: SharedClock, seed: u64) -> Box<dyn Animation> {
        match self {
            Self::Heartbeat => Box::new(Heartbeat::new(clock, seed)),
            Self::Rose => Box::new(Rose::new(clock)),
            Self::LoveLetter => Box::new(LoveLetter::new(clock)),
            Self::TextOnly => Box::new(TextOnly::new(clock)),
            Self::TextChick => Box::new(TextChick::new(clock)),
            Self::EggChick => Box::new(EggChick::new(clock)),
            Self::Chick => Box::new(Chick::new(clock)),
            Self::Mosque => Box::new(Mosque::new(clock, seed)),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A command token that names no animation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown animation `{0}` (expected one of val1..val5, egg, chick1, mosq1)")]
pub struct ParseKindError(pub String);

/// Lowercase, trim, and drop an optional `anim:` prefix.
fn normalize(token: &str) -> String {
    let lower = token.trim().to_ascii_lowercase();
    match lower.strip_prefix("anim:") {
        Some(rest) => rest.trim().to_owned(),
        None => lower,
    }
}

impl FromStr for AnimationKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match normalize(s).as_str() {
            "val1" | "heartbeat" | "pulse" => Self::Heartbeat,
            "val2" | "twohearts" | "love" => Self::Rose,
            "val3" | "letter" | "envelope" => Self::LoveLetter,
            "val4" | "textlove" | "ily" => Self::TextOnly,
            "val5" | "chicklove" | "ilychick" => Self::TextChick,
            "egg" | "hatch" | "chick" | "animation/egg_chick" => Self::EggChick,
            "chick1" | "cutechick" => Self::Chick,
            "mosq1" | "mosque" => Self::Mosque,
            _ => return Err(ParseKindError(s.to_owned())),
        };
        Ok(kind)
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What a remote command asks the stage to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(AnimationKind),
    Stop,
}

impl FromStr for Command {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "stop" | "animation/stop" => Ok(Self::Stop),
            _ => s.parse().map(Self::Play),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Every animation, bound to one display, with at most one active.
pub struct Stage {
    anims: Vec<Box<dyn Animation>>,
    active: Option<AnimationKind>,
}

impl Stage {
    #[must_use]
    pub fn new(clock: SharedClock, display: SharedDisplay, seed: u64) -> Self {
        let anims = AnimationKind::ALL
            .iter()
            .map(|kind| {
                let mut anim = kind.build(clock.clone(), seed);
                anim.init(display.clone());
                anim
            })
            .collect();
        Self { anims, active: None }
    }

    /// The animation most recently played, if any. It stays active after
    /// a one-shot finishes so its last frame keeps rendering.
    #[must_use]
    pub const fn active(&self) -> Option<AnimationKind> {
        self.active
    }

    #[must_use]
    pub fn animation(&self, kind: AnimationKind) -> &dyn Animation {
        self.anims[kind.index()].as_ref()
    }

    /// Stop everything, then start `kind`.
    pub fn play(&mut self, kind: AnimationKind) {
        self.stop_all();
        log::info!("playing {kind}");
        self.anims[kind.index()].start();
        self.active = Some(kind);
    }

    pub fn stop_all(&mut self) {
        for anim in &mut self.anims {
            anim.stop();
        }
        if let Some(kind) = self.active.take() {
            log::info!("stopped {kind}");
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Play(kind) => self.play(kind),
            Command::Stop => self.stop_all(),
        }
    }

    /// One frame: `update` then `render` on the active animation.
    pub fn tick(&mut self) {
        if let Some(kind) = self.active {
            let anim = &mut self.anims[kind.index()];
            anim.update();
            anim.render();
        }
    }

    /// Whether the active animation is still playing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some_and(|kind| self.animation(kind).is_running())
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active {
            Some(kind) => write!(f, "Stage(playing {kind})"),
            None => f.write_str("Stage(idle)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use pb_display::{SimulatedDisplay, share};
    use pretty_assertions::assert_eq;

    use crate::clock::ManualClock;

    fn stage() -> (Stage, Rc<ManualClock>, Rc<std::cell::RefCell<SimulatedDisplay>>) {
        let clock = Rc::new(ManualClock::new(0));
        let display = share(SimulatedDisplay::default());
        let stage = Stage::new(clock.clone(), display.clone(), 12345);
        (stage, clock, display)
    }

    // ── Parsing ─────────────────────────────────────────────────────────

    #[test]
    fn canonical_tokens_parse_back() {
        for kind in AnimationKind::ALL {
            assert_eq!(kind.to_string().parse::<AnimationKind>(), Ok(kind));
        }
    }

    #[test]
    fn aliases_case_and_prefix() {
        let kind = |s: &str| s.parse::<AnimationKind>();
        assert_eq!(kind("Heartbeat"), Ok(AnimationKind::Heartbeat));
        assert_eq!(kind("anim:VAL4"), Ok(AnimationKind::TextOnly));
        assert_eq!(kind(" ilychick "), Ok(AnimationKind::TextChick));
        assert_eq!(kind("animation/egg_chick"), Ok(AnimationKind::EggChick));
        assert_eq!(kind("chick"), Ok(AnimationKind::EggChick));
        assert_eq!(kind("cutechick"), Ok(AnimationKind::Chick));
        assert_eq!(kind("mosque"), Ok(AnimationKind::Mosque));
    }

    #[test]
    fn unknown_token_is_an_error() {
        let err = "val9".parse::<AnimationKind>().unwrap_err();
        assert_eq!(err, ParseKindError("val9".into()));
        assert!(err.to_string().contains("val9"));
    }

    #[test]
    fn commands_parse() {
        let cmd = |s: &str| s.parse::<Command>();
        assert_eq!(cmd("stop"), Ok(Command::Stop));
        assert_eq!(cmd("animation/stop"), Ok(Command::Stop));
        assert_eq!(cmd("anim:STOP"), Ok(Command::Stop));
        assert_eq!(cmd("egg"), Ok(Command::Play(AnimationKind::EggChick)));
        assert!("dance".parse::<Command>().is_err());
    }

    // ── Playback ────────────────────────────────────────────────────────

    #[test]
    fn starts_idle() {
        let (mut stage, _, display) = stage();
        assert_eq!(stage.active(), None);
        assert!(!stage.is_running());
        stage.tick();
        assert_eq!(display.borrow().lit_count(), 0);
    }

    #[test]
    fn only_one_animation_plays() {
        let (mut stage, clock, _) = stage();
        stage.play(AnimationKind::Heartbeat);
        clock.advance(100);
        stage.tick();
        stage.play(AnimationKind::Mosque);

        let running: Vec<_> = AnimationKind::ALL
            .into_iter()
            .filter(|&k| stage.animation(k).is_running())
            .collect();
        assert_eq!(running, vec![AnimationKind::Mosque]);
        assert_eq!(stage.active(), Some(AnimationKind::Mosque));
    }

    #[test]
    fn tick_draws_the_active_animation() {
        let (mut stage, clock, display) = stage();
        stage.apply("val4".parse().unwrap());
        clock.advance(33);
        stage.tick();
        assert!(display.borrow().lit_count() > 0);
    }

    #[test]
    fn stop_command_clears_everything() {
        let (mut stage, clock, display) = stage();
        stage.apply(Command::Play(AnimationKind::Rose));
        clock.advance(2000);
        stage.tick();
        stage.apply(Command::Stop);
        assert_eq!(stage.active(), None);
        assert!(!stage.is_running());
        assert_eq!(display.borrow().lit_count(), 0);
    }

    #[test]
    fn finished_one_shot_stays_active() {
        let (mut stage, clock, display) = stage();
        stage.play(AnimationKind::EggChick);
        for _ in 0..170 {
            clock.advance(100);
            stage.tick();
        }
        assert!(!stage.is_running());
        assert_eq!(stage.active(), Some(AnimationKind::EggChick));
        assert!(display.borrow().lit_count() > 0);
    }

    #[test]
    fn replaying_restarts_from_the_top() {
        let (mut stage, clock, _) = stage();
        stage.play(AnimationKind::EggChick);
        clock.advance(20_000);
        stage.tick();
        assert!(!stage.is_running());
        stage.play(AnimationKind::EggChick);
        clock.advance(10);
        stage.tick();
        assert!(stage.is_running());
    }

    #[test]
    fn debug_names_the_active_animation() {
        let (mut stage, _, _) = stage();
        assert_eq!(format!("{stage:?}"), "Stage(idle)");
        stage.play(AnimationKind::Chick);
        assert_eq!(format!("{stage:?}"), "Stage(playing chick1)");
    }
}
