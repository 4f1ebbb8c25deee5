// SPDX-License-Identifier: MIT
//
// pb-display, the surface layer of pixelbeat.
//
// Animations draw through the `Display` trait and never learn what is
// behind it: a HUB75 driver on hardware, or the `SimulatedDisplay`
// framebuffer when running off-device. Colors travel as packed RGB565
// end to end; the only place they widen to 8 bits per channel is frame
// export.
//
//   color.rs   → Rgb565 newtype, pack/unpack/expand
//   display.rs → Display trait, SharedDisplay handle
//   sim.rs     → in-memory framebuffer implementing Display
//   font.rs    → 5×7 ASCII font used by the simulator's print
//   export.rs  → framebuffer to PPM/PNG, atomic writes

pub mod color;
pub mod display;
pub mod export;
pub mod font;
pub mod sim;

pub use color::Rgb565;
pub use display::{Display, SharedDisplay, share};
pub use export::{ExportError, FrameFormat};
pub use sim::SimulatedDisplay;
