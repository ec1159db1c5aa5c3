/*!
cycles.rs - Cycle timing helpers for the 6502 CPU core.

Purpose
=======
Provides:
  - `base_cycles(op)`        : baseline cycle count for one opcode, read
                               from the opcode table (no conditional
                               penalties).
  - `add_page_cross_penalty` : +1 when the opcode's policy says an indexed
                               page cross costs a cycle and one occurred.
  - `branch_penalty`         : 0 not taken, +1 taken, +2 taken across a page.

Scope
=====
Purely data/logic. The dispatcher decides when a penalty applies; this module
only knows how much it costs. Cycle counts are reported, never ticked: the
core has no clock of its own.
*/

use crate::cpu::table::OPCODE_TABLE;

/// Cycles to push PC and P and load a vector (NMI / IRQ service).
pub const INTERRUPT_CYCLES: u32 = 7;

/// Flat cost of an undocumented opcode executed as an inert NOP.
pub const ILLEGAL_NOP_CYCLES: u32 = 2;

/// Base cycle count for `op` (page-cross and branch penalties excluded).
#[inline]
pub fn base_cycles(op: u8) -> u32 {
    OPCODE_TABLE[op as usize].cycles as u32
}

/// Add 1 to `cycles` if `crossed` and the opcode charges for page crossings.
#[inline]
pub(crate) fn add_page_cross_penalty(cycles: &mut u32, penalty_applies: bool, crossed: bool) {
    if penalty_applies && crossed {
        *cycles += 1;
    }
}

/// Extra cycles for a conditional branch.
#[inline]
pub(crate) fn branch_penalty(taken: bool, crossed: bool) -> u32 {
    match (taken, crossed) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    }
}
