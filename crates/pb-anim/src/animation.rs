// SPDX-License-Identifier: MIT
//
// Animation lifecycle and the timed phase machine behind it.
//
// Every animation is driven the same way by whoever owns it:
//
//   init(display)      once, binds the shared surface
//   start()            enter the first phase, zero all timers
//   update(); render() every tick, in that order
//   stop()             back to idle, surface cleared
//
// `update` samples the clock exactly once and derives all interpolation
// from elapsed time; `render` only reads what `update` left behind. Neither
// blocks, sleeps or allocates per frame.
//
// Timeline:
//
//   A `Timeline<P>` tracks which phase an animation is in and when that
//   phase began. Phase lengths are fixed, so a phase boundary is a point
//   in time, not a tick. When a tick lands late, the overshoot carries
//   into the next phase (entered = entered + duration, never = now). A
//   slow poll rate therefore cannot stretch a sequence, and any two
//   cadences that reach the same instant agree on phase and elapsed time.

use std::fmt;

use pb_display::{Display, SharedDisplay};
use pb_ease::easing;

use crate::clock::SharedClock;

/// The lifecycle contract every animation implements.
pub trait Animation {
    /// Stable short identifier, also used as the frame file prefix.
    fn name(&self) -> &'static str;

    /// Bind the shared display and reset to idle.
    fn init(&mut self, display: SharedDisplay);

    /// Enter the first phase. Silently ignored until `init` has bound a
    /// display.
    fn start(&mut self);

    /// Return to idle and clear the display. Always succeeds.
    ///
    /// The state change is unconditional. The clear goes through
    /// [`Binding::clear`], so it is skipped with a warning if the caller is
    /// holding a borrow of the display at that moment.
    fn stop(&mut self);

    /// Advance state from the clock. No-op while idle or complete.
    fn update(&mut self);

    /// Draw the current frame. No-op while idle or unbound.
    fn render(&self);

    /// True while the animation is neither idle nor complete.
    fn is_running(&self) -> bool;
}

// ─── Binding ─────────────────────────────────────────────────────────────────

/// The two collaborators every animation holds: the clock it samples and
/// the display it was bound to by `init`.
pub struct Binding {
    clock: SharedClock,
    display: Option<SharedDisplay>,
}

impl Binding {
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            display: None,
        }
    }

    pub fn bind(&mut self, display: SharedDisplay) {
        self.display = Some(display);
    }

    #[inline]
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.display.is_some()
    }

    #[inline]
    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Run `f` against the bound display, if any. Returns whether `f` ran.
    ///
    /// A display that is already borrowed elsewhere is skipped rather than
    /// panicking; the next tick redraws the whole frame anyway.
    pub fn paint(&self, f: impl FnOnce(&mut dyn Display)) -> bool {
        let Some(handle) = &self.display else {
            return false;
        };
        if let Ok(mut surface) = handle.try_borrow_mut() {
            f(&mut *surface);
            true
        } else {
            log::warn!("display busy, frame skipped");
            false
        }
    }

    /// Clear the bound display to black. Returns `false` when unbound or
    /// when the display is borrowed elsewhere, in which case the surface
    /// keeps its last frame.
    pub fn clear(&self) -> bool {
        self.paint(|d| d.clear_screen())
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = if self.is_bound() { "bound" } else { "unbound" };
        write!(f, "Binding({bound} @{}ms)", self.now())
    }
}

// ─── Phase ───────────────────────────────────────────────────────────────────

/// A named step of an animation's sequence.
pub trait Phase: Copy + Eq + fmt::Debug {
    /// The idle phase the machine rests in before `start` and after `stop`.
    const IDLE: Self;

    /// Fixed length of this phase, or `None` if it holds until something
    /// external changes it (idle, looping display states, completion).
    fn duration_ms(self) -> Option<u64>;

    /// The phase that follows once the duration has elapsed.
    fn next(self) -> Self;

    /// Terminal phases stop counting as running but keep their last frame.
    fn is_terminal(self) -> bool {
        false
    }
}

// ─── Timeline ────────────────────────────────────────────────────────────────

pub struct Timeline<P: Phase> {
    owner: &'static str,
    phase: P,
    /// When `begin` was called.
    origin: u64,
    /// When the current phase began.
    entered: u64,
}

impl<P: Phase> Timeline<P> {
    #[must_use]
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            phase: P::IDLE,
            origin: 0,
            entered: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> P {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == P::IDLE
    }

    /// Active means neither idle nor terminal.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_idle() && !self.phase.is_terminal()
    }

    /// Start the sequence at `first`, with both clocks zeroed at `now`.
    pub fn begin(&mut self, first: P, now: u64) {
        self.phase = first;
        self.origin = now;
        self.entered = now;
        log::debug!("{}: begin in {first:?}", self.owner);
    }

    /// Drop back to idle.
    pub fn halt(&mut self) {
        if !self.is_idle() {
            log::debug!("{}: {:?} -> {:?} (stopped)", self.owner, self.phase, P::IDLE);
        }
        self.phase = P::IDLE;
    }

    /// Milliseconds spent in the current phase.
    #[inline]
    #[must_use]
    pub const fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.entered)
    }

    /// Milliseconds since `begin`.
    #[inline]
    #[must_use]
    pub const fn runtime(&self, now: u64) -> u64 {
        now.saturating_sub(self.origin)
    }

    /// Linear progress through the current phase, clamped to `[0, 1]`.
    /// Open-ended phases report 0.
    #[must_use]
    pub fn progress(&self, now: u64) -> f32 {
        self.phase
            .duration_ms()
            .map_or(0.0, |d| easing::progress(self.elapsed(now), d))
    }

    /// Step through every phase boundary at or before `now`.
    ///
    /// `on_exit` sees each completed phase in order, which lets the caller
    /// settle values to their end-of-phase state. Returns whether the
    /// phase changed.
    pub fn advance(&mut self, now: u64, mut on_exit: impl FnMut(P)) -> bool {
        let mut changed = false;
        while !self.is_idle() {
            let Some(duration) = self.phase.duration_ms() else {
                break;
            };
            if self.elapsed(now) < duration {
                break;
            }
            let done = self.phase;
            self.entered += duration;
            self.phase = done.next();
            changed = true;
            on_exit(done);
            log::debug!(
                "{}: {done:?} -> {:?} at +{}ms",
                self.owner,
                self.phase,
                self.entered - self.origin
            );
            if duration == 0 {
                break;
            }
        }
        changed
    }
}

impl<P: Phase> fmt::Debug for Timeline<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timeline({}: {:?})", self.owner, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use pb_display::{Rgb565, SimulatedDisplay, share};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Idle,
        A,
        B,
        Loop,
        Done,
    }

    impl Phase for Step {
        const IDLE: Self = Self::Idle;

        fn duration_ms(self) -> Option<u64> {
            match self {
                Self::A => Some(100),
                Self::B => Some(250),
                Self::Loop => Some(50),
                Self::Idle | Self::Done => None,
            }
        }

        fn next(self) -> Self {
            match self {
                Self::A => Self::B,
                Self::B => Self::Done,
                Self::Loop => Self::Loop,
                other => other,
            }
        }

        fn is_terminal(self) -> bool {
            self == Self::Done
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn starts_idle() {
        let t: Timeline<Step> = Timeline::new("test");
        assert!(t.is_idle());
        assert!(!t.is_active());
    }

    #[test]
    fn begin_and_halt() {
        let mut t = Timeline::new("test");
        t.begin(Step::A, 1000);
        assert!(t.is_active());
        assert_eq!(t.elapsed(1040), 40);
        t.halt();
        assert!(t.is_idle());
    }

    #[test]
    fn idle_never_advances() {
        let mut t: Timeline<Step> = Timeline::new("test");
        assert!(!t.advance(1_000_000, |_| {}));
        assert!(t.is_idle());
    }

    // ── Advancing ───────────────────────────────────────────────────────

    #[test]
    fn advance_waits_for_boundary() {
        let mut t = Timeline::new("test");
        t.begin(Step::A, 0);
        assert!(!t.advance(99, |_| {}));
        assert_eq!(t.phase(), Step::A);
        assert!(t.advance(100, |_| {}));
        assert_eq!(t.phase(), Step::B);
        assert_eq!(t.elapsed(100), 0);
    }

    #[test]
    fn late_tick_carries_overshoot() {
        let mut t = Timeline::new("test");
        t.begin(Step::A, 0);
        t.advance(130, |_| {});
        assert_eq!(t.phase(), Step::B);
        assert_eq!(t.elapsed(130), 30);
    }

    #[test]
    fn one_tick_can_cross_several_phases() {
        let mut t = Timeline::new("test");
        t.begin(Step::A, 0);
        let mut exited = Vec::new();
        t.advance(10_000, |p| exited.push(p));
        assert_eq!(exited, vec![Step::A, Step::B]);
        assert_eq!(t.phase(), Step::Done);
        assert!(!t.is_active());
        assert!(!t.is_idle());
    }

    #[test]
    fn terminal_phase_is_stable() {
        let mut t = Timeline::new("test");
        t.begin(Step::A, 0);
        t.advance(350, |_| {});
        assert_eq!(t.phase(), Step::Done);
        assert!(!t.advance(99_999, |_| {}));
        assert_eq!(t.phase(), Step::Done);
    }

    #[test]
    fn looping_phase_keeps_grid() {
        let mut t = Timeline::new("test");
        t.begin(Step::Loop, 0);
        t.advance(175, |_| {});
        assert_eq!(t.phase(), Step::Loop);
        assert_eq!(t.elapsed(175), 25);
    }

    #[test]
    fn cadence_does_not_change_outcome() {
        let mut fast = Timeline::new("fast");
        let mut slow = Timeline::new("slow");
        fast.begin(Step::A, 0);
        slow.begin(Step::A, 0);
        for now in (0..=300).step_by(7) {
            fast.advance(now, |_| {});
        }
        fast.advance(300, |_| {});
        slow.advance(300, |_| {});
        assert_eq!(fast.phase(), slow.phase());
        assert_eq!(fast.elapsed(300), slow.elapsed(300));
    }

    #[test]
    fn progress_through_phase() {
        let mut t = Timeline::new("test");
        t.begin(Step::B, 0);
        assert!((t.progress(125) - 0.5).abs() < 1e-6);
        t.advance(300, |_| {});
        assert_eq!(t.phase(), Step::Done);
        assert!(t.progress(400).abs() < 1e-6);
        assert_eq!(t.runtime(400), 400);
    }

    // ── Binding ─────────────────────────────────────────────────────────

    #[test]
    fn unbound_paint_is_a_no_op() {
        let b = Binding::new(Rc::new(ManualClock::new(0)));
        let mut ran = false;
        b.paint(|_| ran = true);
        assert!(!ran);
        assert!(!b.is_bound());
    }

    #[test]
    fn paint_and_clear_reach_the_display() {
        let sim = share(SimulatedDisplay::new(4, 4, 1));
        let mut b = Binding::new(Rc::new(ManualClock::new(0)));
        b.bind(sim.clone());
        b.paint(|d| d.draw_pixel(1, 1, Rgb565::WHITE));
        assert_eq!(sim.borrow().lit_count(), 1);
        b.clear();
        assert_eq!(sim.borrow().lit_count(), 0);
    }

    #[test]
    fn busy_display_skips_the_frame() {
        let sim = share(SimulatedDisplay::new(4, 4, 1));
        let mut b = Binding::new(Rc::new(ManualClock::new(0)));
        b.bind(sim.clone());
        let held = sim.borrow();
        let mut ran = false;
        assert!(!b.paint(|_| ran = true));
        assert!(!ran);
        assert!(!b.clear());
        drop(held);
        assert!(b.clear());
    }

    #[test]
    fn binding_reads_the_shared_clock() {
        let clock = Rc::new(ManualClock::new(10));
        let b = Binding::new(clock.clone());
        clock.advance(5);
        assert_eq!(b.now(), 15);
    }

    #[test]
    fn debug_format() {
        let mut t = Timeline::new("demo");
        t.begin(Step::A, 0);
        assert_eq!(format!("{t:?}"), "Timeline(demo: A)");
    }
}
