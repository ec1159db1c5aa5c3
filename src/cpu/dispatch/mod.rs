/*!
dispatch - Instruction execution for one decoded opcode.

Overview
========
The engine (`core::Cpu::step`) fetches the opcode, looks up its `Operation`,
and resolves the operand. `execute` then:
1. Seeds the cycle count with the operation's base cycles.
2. Routes to the family handler for the mnemonic. The routing `match` is
   exhaustive over `Mnemonic`, so a new mnemonic cannot be silently dropped.
3. Returns the total cycles, including any penalty the handler added.

Family handlers
===============
- arithmetic   : ADC / SBC
- branches     : BPL BMI BVC BVS BCC BCS BNE BEQ
- compare      : CMP / CPX / CPY
- control_flow : JMP / JSR / RTS / RTI / BRK
- load_store   : LDA LDX LDY / STA STX STY
- logical      : AND / ORA / EOR / BIT
- misc         : transfers, stack, flag set/clear, register inc/dec, NOP
- rmw          : ASL LSR ROL ROR / INC DEC

Handler contract
================
`handle(op, resolved, cpu, bus, cycles) -> bool`
- PC already points past the whole instruction.
- Handlers never recompute base cycles; read handlers add the page-cross
  penalty when the opcode's policy allows it, branches add their own.
- Returns false when the mnemonic or operand shape is not one the handler
  owns. With a well-formed table that never happens for routed mnemonics.

Undocumented opcodes never reach `execute`; the engine applies the illegal
opcode policy first.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::bus::MemoryBus;
use crate::cpu::addressing::{Operand, Resolved};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Execute a decoded, resolved instruction and return the cycles it took.
pub(crate) fn execute<C: CpuRegs, B: MemoryBus>(op: Operation, resolved: Resolved, cpu: &mut C, bus: &mut B) -> u32 {
    use Mnemonic::*;

    let mut cycles = op.cycles as u32;
    let handled = match op.mnemonic {
        Adc | Sbc => arithmetic::handle(&op, resolved, cpu, bus, &mut cycles),
        Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq => branches::handle(&op, resolved, cpu, bus, &mut cycles),
        Cmp | Cpx | Cpy => compare::handle(&op, resolved, cpu, bus, &mut cycles),
        Jmp | Jsr | Rts | Rti | Brk => control_flow::handle(&op, resolved, cpu, bus, &mut cycles),
        Lda | Ldx | Ldy | Sta | Stx | Sty => load_store::handle(&op, resolved, cpu, bus, &mut cycles),
        And | Ora | Eor | Bit => logical::handle(&op, resolved, cpu, bus, &mut cycles),
        Tax | Tay | Txa | Tya | Tsx | Txs | Pha | Php | Pla | Plp | Clc | Sec | Cli | Sei | Clv | Cld | Sed
        | Inx | Iny | Dex | Dey | Nop => misc::handle(&op, resolved, cpu, bus, &mut cycles),
        Asl | Lsr | Rol | Ror | Inc | Dec => rmw::handle(&op, resolved, cpu, bus, &mut cycles),
        Illegal => false,
    };
    debug_assert!(handled, "{} {} not handled", op.mnemonic, op.mode);
    cycles
}

/// The byte an instruction operates on: immediate value, memory at the
/// effective address, or A. `None` for implied operands.
#[inline]
pub(crate) fn operand_value<C: CpuRegs, B: MemoryBus>(cpu: &C, bus: &mut B, operand: Operand) -> Option<u8> {
    match operand {
        Operand::Immediate(v) => Some(v),
        Operand::Address(addr) => Some(bus.read(addr)),
        Operand::Accumulator => Some(cpu.a()),
        Operand::Implied => None,
    }
}
