// SPDX-License-Identifier: MIT
//
// Chunky 4×6 letters for the valentine cards. Drawn with
// `draw::outlined_glyph`, usually at a cell size of 2.

use crate::draw::Mask;

pub const I: Mask = Mask::new(4, &[0b1111, 0b0110, 0b0110, 0b0110, 0b0110, 0b1111]);
pub const Y: Mask = Mask::new(4, &[0b1001, 0b1001, 0b0110, 0b0110, 0b0110, 0b0110]);
pub const O: Mask = Mask::new(4, &[0b0110, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110]);
pub const U: Mask = Mask::new(4, &[0b1001, 0b1001, 0b1001, 0b1001, 0b1001, 0b0110]);

/// Scale factor every card uses.
pub const CELL: i32 = 2;
