/*!
compare.rs - Compare opcode family handler (CMP / CPX / CPY)

Scope
=====
CMP: 0xC9 (imm), 0xC5 (zp), 0xD5 (zp,X), 0xCD (abs),
     0xDD (abs,X*), 0xD9 (abs,Y*), 0xC1 ((ind,X)), 0xD1 ((ind),Y*)
CPX: 0xE0 (imm), 0xE4 (zp), 0xEC (abs)
CPY: 0xC0 (imm), 0xC4 (zp), 0xCC (abs)

(*) Page-cross capable read modes receive a +1 cycle penalty when a page
    boundary is crossed.

Semantics
=========
register - operand without storing: C = register >= operand (unsigned),
Z and N from the 8-bit difference.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::Resolved;
use crate::cpu::cycles::add_page_cross_penalty;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::compare;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a CMP/CPX/CPY instruction.
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    cycles: &mut u32,
) -> bool {
    let reg = match op.mnemonic {
        Mnemonic::Cmp => cpu.a(),
        Mnemonic::Cpx => cpu.x(),
        Mnemonic::Cpy => cpu.y(),
        _ => return false,
    };
    let Some(v) = operand_value(cpu, bus, resolved.operand) else {
        return false;
    };
    compare(cpu, reg, v);
    add_page_cross_penalty(cycles, op.page_cross_penalty, resolved.page_crossed);
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryBus;
    use crate::cpu::status::StatusFlags;
    use crate::test_utils::setup;

    #[test]
    fn cmp_immediate_equal_sets_z_and_c() {
        // LDA #$42; CMP #$42
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42, 0xC9, 0x42]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert!(cpu.flag(StatusFlags::ZERO));
        assert!(cpu.flag(StatusFlags::CARRY));
        assert!(!cpu.flag(StatusFlags::NEGATIVE));
        assert_eq!(cpu.a(), 0x42);
    }

    #[test]
    fn cmp_less_than_clears_carry() {
        // LDA #$10; CMP #$20  => 0x10 - 0x20 = 0xF0
        let (mut cpu, mut bus) = setup(&[0xA9, 0x10, 0xC9, 0x20]);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert!(!cpu.flag(StatusFlags::CARRY));
        assert!(!cpu.flag(StatusFlags::ZERO));
        assert!(cpu.flag(StatusFlags::NEGATIVE));
    }

    #[test]
    fn cmp_abs_y_page_cross_penalty() {
        // LDY #$01; CMP $12FF,Y
        let (mut cpu, mut bus) = setup(&[0xA0, 0x01, 0xD9, 0xFF, 0x12]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
    }

    #[test]
    fn cpx_zero_page() {
        // LDX #$05; CPX $10   ($10 = $03)
        let (mut cpu, mut bus) = setup(&[0xA2, 0x05, 0xE4, 0x10]);
        bus.write(0x0010, 0x03);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 3);
        assert!(cpu.flag(StatusFlags::CARRY));
        assert!(!cpu.flag(StatusFlags::ZERO));
    }

    #[test]
    fn cpy_absolute() {
        // LDY #$00; CPY $0200   ($0200 = $01)
        let (mut cpu, mut bus) = setup(&[0xA0, 0x00, 0xCC, 0x00, 0x02]);
        bus.write(0x0200, 0x01);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 4);
        assert!(!cpu.flag(StatusFlags::CARRY));
        assert!(cpu.flag(StatusFlags::NEGATIVE));
    }
}
