// SPDX-License-Identifier: MIT
//
// pb-anim, the animation engine of pixelbeat.
//
// Eight small animations share one lifecycle (`Animation`) and one way of
// keeping time (`Timeline` over an injected `Clock`). The `Stage` owns an
// instance of each and keeps at most one playing on the shared display.
//
//   clock.rs     → Clock trait, SystemClock, ManualClock
//   animation.rs → Animation trait, Binding, Phase + Timeline
//   draw.rs      → discs, ellipses, rings, bit masks, character sprites
//   glyphs.rs    → 4×6 card letters
//   stars.rs     → seeded twinkling star field
//   anims/       → the concrete animations
//   stage.rs     → AnimationKind, Command, Stage

pub mod animation;
pub mod anims;
pub mod clock;
pub mod draw;
pub mod glyphs;
pub mod stage;
pub mod stars;

pub use animation::{Animation, Binding, Phase, Timeline};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use stage::{AnimationKind, Command, ParseKindError, Stage};
