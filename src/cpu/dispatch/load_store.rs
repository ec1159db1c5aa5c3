/*!
load_store.rs - Load / Store opcode family handler

Overview
========
Handles all 6502 load and store instructions:

Loads (set Z/N flags; may incur page-cross penalty):
    LDA: A9, A5, B5, AD, BD*, B9*, A1, B1*
    LDX: A2, A6, B6, AE, BE*
    LDY: A0, A4, B4, AC, BC*

Stores (no flags changed, no page-cross cycle penalties):
    STA: 85, 95, 8D, 9D, 99, 81, 91
    STX: 86, 96, 8E
    STY: 84, 94, 8C

(*) +1 cycle when the indexed address crosses a page.

Cycle Accounting
================
Indexed stores pay their extra cycle unconditionally; it is already part of
the base count, so this handler only ever adds the read penalty.

Stores never read the target address.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::{Operand, Resolved};
use crate::cpu::cycles::add_page_cross_penalty;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{lda, ldx, ldy};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a load/store instruction.
///
/// Returns:
/// - true if the instruction was recognized and executed
/// - false if the mnemonic is not a load/store, or a store has no address
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    cycles: &mut u32,
) -> bool {
    match op.mnemonic {
        Mnemonic::Lda | Mnemonic::Ldx | Mnemonic::Ldy => {
            let Some(v) = operand_value(cpu, bus, resolved.operand) else {
                return false;
            };
            match op.mnemonic {
                Mnemonic::Lda => lda(cpu, v),
                Mnemonic::Ldx => ldx(cpu, v),
                _ => ldy(cpu, v),
            }
            add_page_cross_penalty(cycles, op.page_cross_penalty, resolved.page_crossed);
        }
        Mnemonic::Sta | Mnemonic::Stx | Mnemonic::Sty => {
            let Operand::Address(addr) = resolved.operand else {
                return false;
            };
            let v = match op.mnemonic {
                Mnemonic::Sta => cpu.a(),
                Mnemonic::Stx => cpu.x(),
                _ => cpu.y(),
            };
            bus.write(addr, v);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::MemoryBus;
    use crate::cpu::status::StatusFlags;
    use crate::test_utils::setup;

    #[test]
    fn lda_immediate_sets_flags() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0xA9, 0x80]);
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert!(cpu.flag(StatusFlags::ZERO));
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag(StatusFlags::NEGATIVE));
        assert!(!cpu.flag(StatusFlags::ZERO));
    }

    #[test]
    fn lda_abs_x_page_cross_adds_cycle() {
        // LDX #$01; LDA $12FF,X  ; LDA $1200,X
        let (mut cpu, mut bus) = setup(&[0xA2, 0x01, 0xBD, 0xFF, 0x12, 0xBD, 0x00, 0x12]);
        bus.write(0x1300, 0x77);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
        assert_eq!(cpu.a(), 0x77);
        assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    }

    #[test]
    fn sta_abs_x_same_cost_with_or_without_cross() {
        // LDA #$55; LDX #$01; STA $12FF,X ; STA $1200,X
        let (mut cpu, mut bus) = setup(&[0xA9, 0x55, 0xA2, 0x01, 0x9D, 0xFF, 0x12, 0x9D, 0x00, 0x12]);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
        assert_eq!(cpu.step(&mut bus).unwrap(), 5);
        assert_eq!(bus.peek(0x1300), 0x55);
        assert_eq!(bus.peek(0x1201), 0x55);
    }

    #[test]
    fn sta_indirect_y_fixed_cost() {
        // LDA #$AA; LDY #$01; STA ($10),Y   ($10 -> $12FF)
        let (mut cpu, mut bus) = setup(&[0xA9, 0xAA, 0xA0, 0x01, 0x91, 0x10]);
        bus.write(0x0010, 0xFF);
        bus.write(0x0011, 0x12);
        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 6);
        assert_eq!(bus.peek(0x1300), 0xAA);
    }

    #[test]
    fn ldx_zero_page_y_wraps() {
        // LDY #$02; LDX $FF,Y  -> reads $0001
        let (mut cpu, mut bus) = setup(&[0xA0, 0x02, 0xB6, 0xFF]);
        bus.write(0x0001, 0x99);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 4);
        assert_eq!(cpu.x(), 0x99);
    }

    #[test]
    fn stores_leave_flags_alone() {
        // LDA #$00 (Z set); LDY #$80 (N set, Z clear); STY $20; STX $21
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0xA0, 0x80, 0x84, 0x20, 0x86, 0x21]);
        for _ in 0..2 {
            cpu.step(&mut bus).unwrap();
        }
        let p = cpu.status();
        assert_eq!(cpu.step(&mut bus).unwrap(), 3);
        assert_eq!(cpu.step(&mut bus).unwrap(), 3);
        assert_eq!(cpu.status(), p);
        assert_eq!(bus.peek(0x0020), 0x80);
        assert_eq!(bus.peek(0x0021), 0x00);
    }

    #[test]
    fn lda_indexed_indirect() {
        // LDX #$04; LDA ($20,X)   ($24/$25 -> $0300)
        let (mut cpu, mut bus) = setup(&[0xA2, 0x04, 0xA1, 0x20]);
        bus.write(0x0024, 0x00);
        bus.write(0x0025, 0x03);
        bus.write(0x0300, 0x5A);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.step(&mut bus).unwrap(), 6);
        assert_eq!(cpu.a(), 0x5A);
    }
}
