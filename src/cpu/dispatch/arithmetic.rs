/*!
arithmetic.rs - ADC / SBC opcode family handler

Overview
========
Implements 6502 add / subtract with carry instructions:

ADC: 0x69, 0x65, 0x75, 0x6D, 0x7D*, 0x79*, 0x61, 0x71*
SBC: 0xE9, 0xE5, 0xF5, 0xED, 0xFD*, 0xF9*, 0xE1, 0xF1*

(*) Page-cross capable addressing modes add +1 cycle when a page boundary is
    crossed.

Responsibilities
================
- Read the operand (immediate or memory).
- Invoke `adc` / `sbc` from `cpu::execute`.
- Apply the page-cross penalty when the opcode charges for it.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::Resolved;
use crate::cpu::cycles::add_page_cross_penalty;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{adc, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute an ADC or SBC instruction.
///
/// Returns:
///   true  - handled (operand read, operation executed, cycles possibly bumped)
///   false - not an arithmetic instruction
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    cycles: &mut u32,
) -> bool {
    let apply: fn(&mut C, u8) = match op.mnemonic {
        Mnemonic::Adc => adc::<C>,
        Mnemonic::Sbc => sbc::<C>,
        _ => return false,
    };
    let Some(v) = operand_value(cpu, bus, resolved.operand) else {
        return false;
    };
    apply(cpu, v);
    add_page_cross_penalty(cycles, op.page_cross_penalty, resolved.page_crossed);
    true
}
