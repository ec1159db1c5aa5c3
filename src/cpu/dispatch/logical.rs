/*!
logical.rs - AND / ORA / EOR / BIT opcode family handler

Overview
========
AND: 29, 25, 35, 2D, 3D*, 39*, 21, 31*
ORA: 09, 05, 15, 0D, 1D*, 19*, 01, 11*
EOR: 49, 45, 55, 4D, 5D*, 59*, 41, 51*
BIT: 24, 2C

(*) +1 cycle when the indexed address crosses a page.

AND/ORA/EOR store the result in A and set Z/N. BIT leaves A untouched:
Z = (A & M) == 0, N = M bit 7, V = M bit 6.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::Resolved;
use crate::cpu::cycles::add_page_cross_penalty;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{and, bit, eor, ora};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a logical instruction.
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    cycles: &mut u32,
) -> bool {
    let apply: fn(&mut C, u8) = match op.mnemonic {
        Mnemonic::And => and::<C>,
        Mnemonic::Ora => ora::<C>,
        Mnemonic::Eor => eor::<C>,
        Mnemonic::Bit => bit::<C>,
        _ => return false,
    };
    let Some(v) = operand_value(cpu, bus, resolved.operand) else {
        return false;
    };
    apply(cpu, v);
    add_page_cross_penalty(cycles, op.page_cross_penalty, resolved.page_crossed);
    true
}
