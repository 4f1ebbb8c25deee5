// SPDX-License-Identifier: MIT
//
// The concrete animations.
//
// Each one owns a `Binding` (clock + display) and, where it sequences
// beats, a `Timeline` over its own phase enum. `update` snapshots the
// time since `start` into the struct; `render` draws from that snapshot
// and never touches the clock itself.

pub mod chick;
pub mod egg_chick;
pub mod heartbeat;
pub mod love_letter;
pub mod mosque;
pub mod rose;
pub mod text;

pub use chick::Chick;
pub use egg_chick::EggChick;
pub use heartbeat::Heartbeat;
pub use love_letter::LoveLetter;
pub use mosque::Mosque;
pub use rose::Rose;
pub use text::{TextChick, TextOnly};
