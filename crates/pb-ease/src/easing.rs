// SPDX-License-Identifier: MIT

//! Easing curves over normalized time.
//!
//! Every function maps `t ∈ [0, 1]` to a shaped progress value. Inputs
//! outside that range are not clamped here; callers clamp first (see
//! [`progress`]). The polynomial families reach exactly 0 and 1 at the
//! ends. [`heartbeat_pulse`] and [`ease_out_bounce`] are deliberately
//! non-monotonic and document their own endpoints.

/// π as the curves have always spelled it. `breathe` depends on this exact
/// value, so it is not `std::f32::consts::PI`.
#[allow(clippy::approx_constant)]
const HALF_TURN: f32 = 3.14159;

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A zero duration counts as already finished.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)] // millisecond spans stay far below 2^24
pub fn progress(elapsed: u64, duration: u64) -> f32 {
    if duration == 0 {
        return 1.0;
    }
    (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
}

/// Position within a repeating period, in `[0, 1)`.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cycle(time: u64, period: u64) -> f32 {
    if period == 0 {
        return 0.0;
    }
    (time % period) as f32 / period as f32
}

// ─── Polynomial ──────────────────────────────────────────────────────────────

#[inline]
#[must_use]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

#[inline]
#[must_use]
#[allow(clippy::suboptimal_flops)] // unfused: results are bit-exact with the reference curves
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[inline]
#[must_use]
pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powf(3.0)
}

/// Slow at both ends. The softest of the polynomial curves.
#[inline]
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powf(3.0) / 2.0
    }
}

// ─── Shaped ──────────────────────────────────────────────────────────────────

/// Two-bump cardiac pulse: quick rise to 0.7, dip to 0.4, peak at 1.0,
/// then a long eased fall.
///
/// Breakpoints are at `t = 0.15`, `0.25` and `0.4`. Starts and ends at 0.
/// Every expression is evaluated unfused, in the written order, so the
/// output is bit-for-bit stable.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn heartbeat_pulse(t: f32) -> f32 {
    if t < 0.15 {
        ease_out_quad(t / 0.15) * 0.7
    } else if t < 0.25 {
        0.7 - ease_in_quad((t - 0.15) / 0.1) * 0.3
    } else if t < 0.4 {
        0.4 + ease_out_quad((t - 0.25) / 0.15) * 0.6
    } else {
        1.0 - ease_in_out_cubic((t - 0.4) / 0.6)
    }
}

/// Symmetric slow in and out, `(1 - cos(πt)) / 2`.
#[inline]
#[must_use]
pub fn breathe(t: f32) -> f32 {
    (1.0 - (t * HALF_TURN).cos()) / 2.0
}

/// Landing curve: reaches 1 at the midpoint, sags to 0.85, settles at 1
/// from `t = 0.75` on.
#[must_use]
pub fn ease_out_bounce(t: f32) -> f32 {
    if t < 0.5 {
        ease_out_quad(t * 2.0)
    } else if t < 0.75 {
        let bt = (t - 0.5) * 4.0;
        let sag = 0.15 * (1.0 - bt * bt);
        1.0 - sag
    } else {
        1.0
    }
}
