/*!
control_flow.rs - Control-flow / system opcode family handler

Overview
========
Implements 6502 control-flow and system instructions that manipulate the
program counter, stack and processor status:

  JMP abs        (0x4C)
  JMP (ind)      (0x6C)  (indirect page-wrap quirk applied by the resolver)
  JSR abs        (0x20)
  RTS            (0x60)
  RTI            (0x40)
  BRK            (0x00)

Behavior Details
================
- JSR pushes (PC - 1), high byte then low, where PC is the address of the
  next instruction.
- RTS pulls the return address and adds 1 (wrap-safe).
- RTI pulls status (B dropped, bit 5 forced) then PC. No +1.
- BRK is two bytes on hardware: the byte after the opcode is padding. The
  pushed return address is BRK + 2 and the pushed status has B set. BRK then
  sets I and loads PC from $FFFE/$FFFF. It does not stop the engine.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::{Operand, Resolved};
use crate::cpu::execute::{php, pop_word, pull_status, push_word, set_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::StatusFlags;
use crate::cpu::table::{Mnemonic, Operation};
use crate::cpu::vectors::IRQ_VECTOR;

#[inline]
fn op_jsr<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, target: u16) {
    let ret = cpu.pc().wrapping_sub(1);
    push_word(cpu, bus, ret);
    cpu.set_pc(target);
}

#[inline]
fn op_rts<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    let ret = pop_word(cpu, bus);
    cpu.set_pc(ret.wrapping_add(1));
}

#[inline]
fn op_brk<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    // Skip the padding byte.
    let ret = cpu.pc().wrapping_add(1);
    push_word(cpu, bus, ret);
    php(cpu, bus);
    set_flag(cpu, StatusFlags::IRQ_DISABLE, true);
    let vector = bus.read_word(IRQ_VECTOR);
    cpu.set_pc(vector);
}

#[inline]
fn op_rti<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    pull_status(cpu, bus);
    let return_pc = pop_word(cpu, bus);
    cpu.set_pc(return_pc);
}

/// Attempt to execute a control-flow instruction.
///
/// Returns:
///   true  if handled here
///   false if not a control-flow mnemonic, or JMP/JSR without a target
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    match (op.mnemonic, resolved.operand) {
        (Mnemonic::Jmp, Operand::Address(target)) => cpu.set_pc(target),
        (Mnemonic::Jsr, Operand::Address(target)) => op_jsr(cpu, bus, target),
        (Mnemonic::Rts, _) => op_rts(cpu, bus),
        (Mnemonic::Rti, _) => op_rti(cpu, bus),
        (Mnemonic::Brk, _) => op_brk(cpu, bus),
        _ => return false,
    }
    true
}
