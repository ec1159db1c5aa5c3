/*!
branches.rs - Relative branch handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Overview
========
Executes all conditional relative branch instructions. The resolver has
already consumed the displacement and computed the target relative to the
next instruction, along with whether that target lies on another page.

Cycle Rules
===========
Base cost: 2 cycles.
If branch is taken: +1 cycle.
If branch is taken and target crosses a page boundary: +2 total (vs base).

Return Contract
===============
`handle` returns:
- true  => branch recognized, extra cycles already added to *cycles.
- false => not a branch, or the operand is not a target address.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::{Operand, Resolved};
use crate::cpu::cycles::branch_penalty;
use crate::cpu::execute::get_flag;
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::StatusFlags;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a branch instruction.
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    _bus: &mut B,
    cycles: &mut u32,
) -> bool {
    let take = match op.mnemonic {
        Mnemonic::Bpl => !get_flag(cpu, StatusFlags::NEGATIVE),
        Mnemonic::Bmi => get_flag(cpu, StatusFlags::NEGATIVE),
        Mnemonic::Bvc => !get_flag(cpu, StatusFlags::OVERFLOW),
        Mnemonic::Bvs => get_flag(cpu, StatusFlags::OVERFLOW),
        Mnemonic::Bcc => !get_flag(cpu, StatusFlags::CARRY),
        Mnemonic::Bcs => get_flag(cpu, StatusFlags::CARRY),
        Mnemonic::Bne => !get_flag(cpu, StatusFlags::ZERO),
        Mnemonic::Beq => get_flag(cpu, StatusFlags::ZERO),
        _ => return false,
    };
    let Operand::Address(target) = resolved.operand else {
        return false;
    };
    if take {
        cpu.set_pc(target);
    }
    *cycles += branch_penalty(take, resolved.page_crossed);
    true
}

#[cfg(test)]
mod tests {
    use crate::test_utils::setup;

    #[test]
    fn branch_not_taken_base_cycles() {
        // BCS +2 with carry clear after reset: not taken.
        let (mut cpu, mut bus) = setup(&[0xB0, 0x02, 0xEA, 0x00]);
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn branch_taken_no_page_cross() {
        // BCC +2 (carry clear) lands on the BRK past the NOP.
        let (mut cpu, mut bus) = setup(&[0x90, 0x02, 0xEA, 0x00]);
        assert_eq!(cpu.step(&mut bus).unwrap(), 3);
        assert_eq!(cpu.pc(), 0x8004);
    }

    #[test]
    fn branch_taken_page_cross() {
        // 0xFD NOPs, then BCC +1 at $80FD; next instruction at $80FF, target $8100.
        let mut prg = vec![0xEA; 0xFD];
        prg.push(0x90);
        prg.push(0x01);
        let (mut cpu, mut bus) = setup(&prg);
        for _ in 0..0xFD {
            assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        }
        assert_eq!(cpu.step(&mut bus).unwrap(), 4);
        assert_eq!(cpu.pc(), 0x8100);
    }

    #[test]
    fn branch_backward_across_page() {
        // BNE -4 at $8000: next instruction $8002, target $7FFE.
        let (mut cpu, mut bus) = setup(&[0xD0, 0xFC]);
        assert_eq!(cpu.step(&mut bus).unwrap(), 4);
        assert_eq!(cpu.pc(), 0x7FFE);
    }

    #[test]
    fn branch_not_taken_ignores_cross() {
        // BEQ -4 with Z clear: target would cross, but not taken costs base only.
        let (mut cpu, mut bus) = setup(&[0xF0, 0xFC]);
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn branch_on_each_flag() {
        // SEC; BCS +0; LDA #$80; BMI +0; CLV; BVC +0
        let (mut cpu, mut bus) = setup(&[0x38, 0xB0, 0x00, 0xA9, 0x80, 0x30, 0x00, 0xB8, 0x50, 0x00]);
        cpu.step(&mut bus).unwrap(); // SEC
        assert_eq!(cpu.step(&mut bus).unwrap(), 3); // BCS taken
        cpu.step(&mut bus).unwrap(); // LDA
        assert_eq!(cpu.step(&mut bus).unwrap(), 3); // BMI taken
        cpu.step(&mut bus).unwrap(); // CLV
        assert_eq!(cpu.step(&mut bus).unwrap(), 3); // BVC taken
        assert_eq!(cpu.pc(), 0x800A);
    }
}
