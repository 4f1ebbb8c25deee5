// SPDX-License-Identifier: MIT
//
// Clock: the single source of time for every animation.
//
// Animations sample the clock once per `update()` and derive everything
// else from the elapsed span, so the clock is the only thing that decides
// where in an animation we are. Injecting it (rather than reading a global
// monotonic timer) lets the simulator run faster than real time and lets
// tests step time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond time source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Shared handle animations hold on to.
pub type SharedClock = Rc<dyn Clock>;

// ─── SystemClock ─────────────────────────────────────────────────────────────

/// Wall-clock-independent time from `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[must_use]
    pub fn shared() -> SharedClock {
        Rc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)] // u64 ms covers ~584 million years
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

// ─── ManualClock ─────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
///
/// ```
/// use pb_anim::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0);
/// clock.advance(33);
/// clock.advance(33);
/// assert_eq!(clock.now_ms(), 66);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time. Moving backwards is ignored so the clock
    /// stays monotonic.
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let c = ManualClock::new(100);
        assert_eq!(c.now_ms(), 100);
        c.advance(50);
        assert_eq!(c.now_ms(), 150);
    }

    #[test]
    fn manual_clock_never_goes_back() {
        let c = ManualClock::new(500);
        c.set(200);
        assert_eq!(c.now_ms(), 500);
        c.set(900);
        assert_eq!(c.now_ms(), 900);
    }

    #[test]
    fn manual_clock_saturates() {
        let c = ManualClock::new(u64::MAX - 1);
        c.advance(10);
        assert_eq!(c.now_ms(), u64::MAX);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let c = SystemClock::new();
        let a = c.now_ms();
        let b = c.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn shared_handles_see_the_same_time() {
        let manual = Rc::new(ManualClock::new(0));
        let shared: SharedClock = manual.clone();
        manual.advance(42);
        assert_eq!(shared.now_ms(), 42);
    }
}
