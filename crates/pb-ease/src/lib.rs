// SPDX-License-Identifier: MIT

//! # pb-ease: motion curves and color math
//!
//! The shared numeric layer every animation leans on for a consistent
//! feel. Everything here is a pure function or a constant.
//!
//! ```text
//! elapsed ms ──► easing::progress / easing::cycle ──► t ∈ [0, 1]
//!                                                       │
//!                           easing::ease_* / heartbeat_pulse / breathe
//!                                                       │
//!                                                       ▼
//!                          scale, brightness, offset, glow radius
//!                                                       │
//!        palette::* ──► shade::dim_color / blend_color ◄┘
//! ```

pub mod easing;
pub mod palette;
pub mod shade;

pub use shade::{blend_color, dim_color, hsv_to_565};
