/*!
rmw.rs - RMW / shift / increment / decrement opcode family handler

Overview
========
Implements the 6502 shift / rotate instructions (accumulator and memory) and
memory INC / DEC.

Covered Opcodes
---------------
Shifts / Rotates
  ASL: 0x0A (A), 0x06 (zp), 0x16 (zp,X), 0x0E (abs), 0x1E (abs,X)
  LSR: 0x4A (A), 0x46 (zp), 0x56 (zp,X), 0x4E (abs), 0x5E (abs,X)
  ROL: 0x2A (A), 0x26 (zp), 0x36 (zp,X), 0x2E (abs), 0x3E (abs,X)
  ROR: 0x6A (A), 0x66 (zp), 0x76 (zp,X), 0x6E (abs), 0x7E (abs,X)

Memory Increment / Decrement
  INC: 0xE6 (zp), 0xF6 (zp,X), 0xEE (abs), 0xFE (abs,X)
  DEC: 0xC6 (zp), 0xD6 (zp,X), 0xCE (abs), 0xDE (abs,X)

Notes
=====
abs,X RMW forms always cost 7; there is no page-cross penalty to add.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::{Operand, Resolved};
use crate::cpu::execute::{
    asl_acc, asl_mem, dec_mem, inc_mem, lsr_acc, lsr_mem, rol_acc, rol_mem, ror_acc, ror_mem,
};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a shift / rotate / INC / DEC instruction.
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    match (op.mnemonic, resolved.operand) {
        (Mnemonic::Asl, Operand::Accumulator) => asl_acc(cpu),
        (Mnemonic::Lsr, Operand::Accumulator) => lsr_acc(cpu),
        (Mnemonic::Rol, Operand::Accumulator) => rol_acc(cpu),
        (Mnemonic::Ror, Operand::Accumulator) => ror_acc(cpu),

        (Mnemonic::Asl, Operand::Address(addr)) => asl_mem(cpu, bus, addr),
        (Mnemonic::Lsr, Operand::Address(addr)) => lsr_mem(cpu, bus, addr),
        (Mnemonic::Rol, Operand::Address(addr)) => rol_mem(cpu, bus, addr),
        (Mnemonic::Ror, Operand::Address(addr)) => ror_mem(cpu, bus, addr),
        (Mnemonic::Inc, Operand::Address(addr)) => inc_mem(cpu, bus, addr),
        (Mnemonic::Dec, Operand::Address(addr)) => dec_mem(cpu, bus, addr),

        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryBus;
    use crate::cpu::status::StatusFlags;
    use crate::test_utils::{CountingBus, setup};

    #[test]
    fn asl_accumulator() {
        // LDA #$81; ASL A
        let (mut cpu, mut bus) = setup(&[0xA9, 0x81, 0x0A]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert_eq!(cpu.a(), 0x02);
        assert!(cpu.flag(StatusFlags::CARRY));
        assert!(!cpu.flag(StatusFlags::NEGATIVE));
    }

    #[test]
    fn ror_accumulator_carry_in() {
        // SEC; LDA #$02; ROR A
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0x02, 0x6A]);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a(), 0x81);
        assert!(!cpu.flag(StatusFlags::CARRY));
        assert!(cpu.flag(StatusFlags::NEGATIVE));
    }

    #[test]
    fn inc_zero_page_cycles_and_value() {
        // INC $10
        let (mut cpu, mut bus) = setup(&[0xE6, 0x10]);
        bus.write(0x0010, 0x7F);
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
        assert_eq!(bus.peek(0x0010), 0x80);
        assert!(cpu.flag(StatusFlags::NEGATIVE));
    }

    #[test]
    fn dec_abs_x_no_page_cross_penalty() {
        // LDX #$01; DEC $12FF,X
        let (mut cpu, mut bus) = setup(&[0xA2, 0x01, 0xDE, 0xFF, 0x12]);
        bus.write(0x1300, 0x01);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 7);
        assert_eq!(bus.peek(0x1300), 0x00);
        assert!(cpu.flag(StatusFlags::ZERO));
    }

    #[test]
    fn lsr_absolute_memory() {
        // LSR $0200
        let (mut cpu, mut bus) = setup(&[0x4E, 0x00, 0x02]);
        bus.write(0x0200, 0x03);
        assert_eq!(cpu.step(&mut bus).unwrap(), 6);
        assert_eq!(bus.peek(0x0200), 0x01);
        assert!(cpu.flag(StatusFlags::CARRY));
    }

    #[test]
    fn rol_zero_page_x_single_write() {
        // SEC; ROL $10,X  (X = 0)
        let (mut cpu, ram) = setup(&[0x38, 0x36, 0x10]);
        let mut bus = CountingBus::new(ram);
        bus.inner.write(0x0010, 0x40);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 6);
        assert_eq!(bus.inner.peek(0x0010), 0x81);
        assert_eq!(bus.writes, 1);
    }
}
