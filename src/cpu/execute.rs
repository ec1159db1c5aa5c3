/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW)

Purpose
=======
Centralize side-effect logic for instructions so the dispatch family handlers
stay thin: they pick the helper, the helper does the work. Every helper is
generic over `CpuRegs` (registers) and, where memory is involved,
`MemoryBus`.

Scope (crate-visible)
---------------------
Flag helpers:
    set_flag, get_flag, update_zn

Stack helpers:
    push, pop, push_word, pop_word, push_status_with_break
    php, plp, pha, pla

Loads / transfers:
    lda/ldx/ldy, tax/tay/txa/tya, tsx/txs

ALU:
    and/ora/eor/bit, adc/sbc, compare
    inx/iny/dex/dey

Shifts / rotates:
    accumulator and memory forms; memory forms go through `rmw_memory`

Design Notes
============
- The core reports cycles instead of ticking a clock, so RMW helpers issue a
  single read and a single write. The hardware's intermediate write of the
  unmodified value is not replayed.
- Decimal mode is stored but ignored: ADC/SBC are always binary.
- Stack is page 1: push writes $0100|SP then decrements, pull increments then
  reads. SP wraps within the page.
*/

use crate::bus::MemoryBus;
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::{Status, StatusFlags};

/// Base of the hardware stack page.
pub(crate) const STACK_BASE: u16 = 0x0100;

// ---------------------------------------------------------------------------
// Flag helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn set_flag<C: CpuRegs>(cpu: &mut C, flag: StatusFlags, on: bool) {
    cpu.assign_flag(flag, on);
}

#[inline]
pub(crate) fn get_flag<C: CpuRegs>(cpu: &C, flag: StatusFlags) -> bool {
    cpu.is_flag_set(flag)
}

#[inline]
pub(crate) fn update_zn<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.update_zn(v);
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, v: u8) {
    let sp = cpu.sp();
    bus.write(STACK_BASE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

#[inline]
pub(crate) fn pop<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_BASE | sp as u16)
}

/// Push high byte, then low byte.
#[inline]
pub(crate) fn push_word<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, (v & 0xFF) as u8);
}

/// Pull low byte, then high byte.
#[inline]
pub(crate) fn pop_word<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = pop(cpu, bus) as u16;
    let hi = pop(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push P with control over Break flag semantics (BRK/PHP vs IRQ/NMI).
#[inline]
pub(crate) fn push_status_with_break<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, set_break: bool) {
    let v = cpu.compose_status_for_push(set_break);
    push(cpu, bus, v);
}

/// Restore P from the stack (PLP / RTI): B dropped, bit 5 forced.
#[inline]
pub(crate) fn pull_status<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    let v = pop(cpu, bus);
    cpu.set_status(Status::from_pulled(v));
}

#[inline]
pub(crate) fn php<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    push_status_with_break(cpu, bus, true);
}

#[inline]
pub(crate) fn plp<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    pull_status(cpu, bus);
}

#[inline]
pub(crate) fn pha<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    let a = cpu.a();
    push(cpu, bus, a);
}

#[inline]
pub(crate) fn pla<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) {
    let val = pop(cpu, bus);
    cpu.set_a(val);
    update_zn(cpu, val);
}

// ---------------------------------------------------------------------------
// Loads / Transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn tax<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    ldx(cpu, a);
}

#[inline]
pub(crate) fn tay<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    ldy(cpu, a);
}

#[inline]
pub(crate) fn txa<C: CpuRegs>(cpu: &mut C) {
    let x = cpu.x();
    lda(cpu, x);
}

#[inline]
pub(crate) fn tya<C: CpuRegs>(cpu: &mut C) {
    let y = cpu.y();
    lda(cpu, y);
}

#[inline]
pub(crate) fn tsx<C: CpuRegs>(cpu: &mut C) {
    let sp = cpu.sp();
    ldx(cpu, sp);
}

/// TXS does not touch flags.
#[inline]
pub(crate) fn txs<C: CpuRegs>(cpu: &mut C) {
    let x = cpu.x();
    cpu.set_sp(x);
}

// ---------------------------------------------------------------------------
// Logical / Bit
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() & v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() | v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() ^ v;
    lda(cpu, r);
}

/// Z from A & M; N and V copied from bits 7 and 6 of M.
#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    let zero = (cpu.a() & v) == 0;
    set_flag(cpu, StatusFlags::ZERO, zero);
    set_flag(cpu, StatusFlags::NEGATIVE, (v & 0x80) != 0);
    set_flag(cpu, StatusFlags::OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Increment / Decrement (register)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx<C: CpuRegs>(cpu: &mut C) {
    let x = cpu.x().wrapping_add(1);
    ldx(cpu, x);
}

#[inline]
pub(crate) fn iny<C: CpuRegs>(cpu: &mut C) {
    let y = cpu.y().wrapping_add(1);
    ldy(cpu, y);
}

#[inline]
pub(crate) fn dex<C: CpuRegs>(cpu: &mut C) {
    let x = cpu.x().wrapping_sub(1);
    ldx(cpu, x);
}

#[inline]
pub(crate) fn dey<C: CpuRegs>(cpu: &mut C) {
    let y = cpu.y().wrapping_sub(1);
    ldy(cpu, y);
}

// ---------------------------------------------------------------------------
// Shift / rotate cores (shared by accumulator and memory forms)
// ---------------------------------------------------------------------------

#[inline]
fn shift_left<C: CpuRegs>(cpu: &mut C, v: u8, carry_in: u8) -> u8 {
    set_flag(cpu, StatusFlags::CARRY, (v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
fn shift_right<C: CpuRegs>(cpu: &mut C, v: u8, carry_in: u8) -> u8 {
    set_flag(cpu, StatusFlags::CARRY, (v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
fn asl_value<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    shift_left(cpu, v, 0)
}

#[inline]
fn lsr_value<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    shift_right(cpu, v, 0)
}

#[inline]
fn rol_value<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = get_flag(cpu, StatusFlags::CARRY) as u8;
    shift_left(cpu, v, carry_in)
}

#[inline]
fn ror_value<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = if get_flag(cpu, StatusFlags::CARRY) { 0x80 } else { 0 };
    shift_right(cpu, v, carry_in)
}

// ---------------------------------------------------------------------------
// Shifts / Rotates - Accumulator
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl_acc<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    let r = asl_value(cpu, a);
    cpu.set_a(r);
}

#[inline]
pub(crate) fn lsr_acc<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    let r = lsr_value(cpu, a);
    cpu.set_a(r);
}

#[inline]
pub(crate) fn rol_acc<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    let r = rol_value(cpu, a);
    cpu.set_a(r);
}

#[inline]
pub(crate) fn ror_acc<C: CpuRegs>(cpu: &mut C) {
    let a = cpu.a();
    let r = ror_value(cpu, a);
    cpu.set_a(r);
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// Binary add with carry (9-bit intermediate). D is ignored.
#[inline]
pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, StatusFlags::CARRY) as u16;
    let sum16 = a as u16 + v as u16 + carry_in;
    let result = sum16 as u8;

    cpu.update_carry(sum16 > 0xFF);
    // Overflow: operands share a sign that the result does not.
    cpu.update_overflow(((!(a ^ v)) & (a ^ result) & 0x80) != 0);

    lda(cpu, result);
}

/// A + !M + C.
#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, v ^ 0xFF);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// CMP/CPX/CPY core: C = reg >= v, Z/N from reg - v.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    set_flag(cpu, StatusFlags::CARRY, reg >= v);
    update_zn(cpu, reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Read-Modify-Write (memory)
// ---------------------------------------------------------------------------

/// Read `addr`, transform, write the result back. Returns the new value.
pub(crate) fn rmw_memory<C: CpuRegs, B: MemoryBus, F>(cpu: &mut C, bus: &mut B, addr: u16, transform: F) -> u8
where
    F: FnOnce(&mut C, u8) -> u8,
{
    let old = bus.read(addr);
    let newv = transform(cpu, old);
    bus.write(addr, newv);
    newv
}

#[inline]
pub(crate) fn asl_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    rmw_memory(cpu, bus, addr, asl_value::<C>);
}

#[inline]
pub(crate) fn lsr_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    rmw_memory(cpu, bus, addr, lsr_value::<C>);
}

#[inline]
pub(crate) fn rol_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    rmw_memory(cpu, bus, addr, rol_value::<C>);
}

#[inline]
pub(crate) fn ror_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    rmw_memory(cpu, bus, addr, ror_value::<C>);
}

#[inline]
pub(crate) fn inc_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |_, old| old.wrapping_add(1));
    update_zn(cpu, r);
}

#[inline]
pub(crate) fn dec_mem<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |_, old| old.wrapping_sub(1));
    update_zn(cpu, r);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatRam;
    use crate::cpu::state::CpuState;

    fn setup() -> (CpuState, FlatRam) {
        let mut cpu = CpuState::new();
        cpu.set_status(Status::from_bits(0x00));
        (cpu, FlatRam::new())
    }

    #[test]
    fn adc_overflow_and_carry() {
        let (mut cpu, _) = setup();
        cpu.set_a(0x50);
        adc(&mut cpu, 0x50); // 0x50 + 0x50 = 0xA0 (signed overflow)
        assert!(get_flag(&cpu, StatusFlags::OVERFLOW));
        assert!(!get_flag(&cpu, StatusFlags::CARRY));
        assert!(get_flag(&cpu, StatusFlags::NEGATIVE));
        cpu.set_a(0xF0);
        adc(&mut cpu, 0x20); // 0xF0 + 0x20 = 0x110
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        assert_eq!(cpu.a(), 0x10);
    }

    #[test]
    fn adc_matches_reference_exhaustively() {
        let (mut cpu, _) = setup();
        for a in 0..=255u8 {
            for m in 0..=255u8 {
                for c in [false, true] {
                    cpu.set_a(a);
                    set_flag(&mut cpu, StatusFlags::CARRY, c);
                    adc(&mut cpu, m);

                    let unsigned = a as u16 + m as u16 + c as u16;
                    let signed = a as i8 as i16 + m as i8 as i16 + c as i16;
                    let r = unsigned as u8;
                    assert_eq!(cpu.a(), r);
                    assert_eq!(get_flag(&cpu, StatusFlags::CARRY), unsigned > 0xFF);
                    assert_eq!(get_flag(&cpu, StatusFlags::ZERO), r == 0);
                    assert_eq!(get_flag(&cpu, StatusFlags::NEGATIVE), r & 0x80 != 0);
                    assert_eq!(
                        get_flag(&cpu, StatusFlags::OVERFLOW),
                        !(-128..=127).contains(&signed),
                        "A={a:02X} M={m:02X} C={c}"
                    );
                }
            }
        }
    }

    #[test]
    fn sbc_matches_reference_exhaustively() {
        let (mut cpu, _) = setup();
        for a in 0..=255u8 {
            for m in 0..=255u8 {
                for c in [false, true] {
                    cpu.set_a(a);
                    set_flag(&mut cpu, StatusFlags::CARRY, c);
                    sbc(&mut cpu, m);

                    let borrow = (!c) as i16;
                    let unsigned = a as i16 - m as i16 - borrow;
                    let signed = a as i8 as i16 - m as i8 as i16 - borrow;
                    let r = unsigned as u8;
                    assert_eq!(cpu.a(), r);
                    assert_eq!(get_flag(&cpu, StatusFlags::CARRY), unsigned >= 0);
                    assert_eq!(get_flag(&cpu, StatusFlags::ZERO), r == 0);
                    assert_eq!(
                        get_flag(&cpu, StatusFlags::OVERFLOW),
                        !(-128..=127).contains(&signed),
                        "A={a:02X} M={m:02X} C={c}"
                    );
                }
            }
        }
    }

    #[test]
    fn decimal_flag_does_not_change_adc() {
        let (mut cpu, _) = setup();
        set_flag(&mut cpu, StatusFlags::DECIMAL, true);
        cpu.set_a(0x09);
        adc(&mut cpu, 0x01);
        assert_eq!(cpu.a(), 0x0A);
    }

    #[test]
    fn compare_flags() {
        let (mut cpu, _) = setup();
        compare(&mut cpu, 0x40, 0x40);
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        assert!(get_flag(&cpu, StatusFlags::ZERO));
        compare(&mut cpu, 0x40, 0x41);
        assert!(!get_flag(&cpu, StatusFlags::CARRY));
        assert!(get_flag(&cpu, StatusFlags::NEGATIVE));
        compare(&mut cpu, 0x80, 0x01);
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        assert!(!get_flag(&cpu, StatusFlags::NEGATIVE));
    }

    #[test]
    fn push_pull_roundtrip_restores_sp() {
        let (mut cpu, mut ram) = setup();
        let sp = cpu.sp();
        push(&mut cpu, &mut ram, 0xAB);
        assert_eq!(ram.peek(0x0100 | sp as u16), 0xAB);
        assert_eq!(cpu.sp(), sp.wrapping_sub(1));
        assert_eq!(pop(&mut cpu, &mut ram), 0xAB);
        assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn stack_wraps_within_page_one() {
        let (mut cpu, mut ram) = setup();
        cpu.set_sp(0x00);
        push(&mut cpu, &mut ram, 0x11);
        assert_eq!(ram.peek(0x0100), 0x11);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(pop(&mut cpu, &mut ram), 0x11);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn push_word_is_high_then_low() {
        let (mut cpu, mut ram) = setup();
        push_word(&mut cpu, &mut ram, 0x1234);
        assert_eq!(ram.peek(0x01FD), 0x12);
        assert_eq!(ram.peek(0x01FC), 0x34);
        assert_eq!(pop_word(&mut cpu, &mut ram), 0x1234);
    }

    #[test]
    fn php_sets_break_plp_clears_it() {
        let (mut cpu, mut ram) = setup();
        set_flag(&mut cpu, StatusFlags::CARRY, true);
        php(&mut cpu, &mut ram);
        assert_eq!(ram.peek(0x01FD), 0x31);
        ram.write(0x01FD, 0xFF);
        plp(&mut cpu, &mut ram);
        assert_eq!(cpu.status().bits(), 0xEF);
    }

    #[test]
    fn inc_mem_sequence() {
        let (mut cpu, mut ram) = setup();
        ram.write(0x0200, 0xFF);
        inc_mem(&mut cpu, &mut ram, 0x0200);
        assert_eq!(ram.peek(0x0200), 0x00);
        assert!(get_flag(&cpu, StatusFlags::ZERO));
        dec_mem(&mut cpu, &mut ram, 0x0200);
        assert_eq!(ram.peek(0x0200), 0xFF);
        assert!(get_flag(&cpu, StatusFlags::NEGATIVE));
    }

    #[test]
    fn rotates_chain_through_carry() {
        let (mut cpu, mut ram) = setup();
        cpu.set_a(0x80);
        rol_acc(&mut cpu); // 0x80 -> carry set, A = 0x00
        assert_eq!(cpu.a(), 0x00);
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        assert!(get_flag(&cpu, StatusFlags::ZERO));
        ror_acc(&mut cpu); // carry back into bit 7
        assert_eq!(cpu.a(), 0x80);
        assert!(!get_flag(&cpu, StatusFlags::CARRY));

        ram.write(0x0010, 0x01);
        lsr_mem(&mut cpu, &mut ram, 0x0010);
        assert_eq!(ram.peek(0x0010), 0x00);
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        ror_mem(&mut cpu, &mut ram, 0x0010);
        assert_eq!(ram.peek(0x0010), 0x80);
        asl_mem(&mut cpu, &mut ram, 0x0010);
        assert_eq!(ram.peek(0x0010), 0x00);
        assert!(get_flag(&cpu, StatusFlags::CARRY));
        rol_mem(&mut cpu, &mut ram, 0x0010);
        assert_eq!(ram.peek(0x0010), 0x01);
    }

    #[test]
    fn bit_copies_high_bits() {
        let (mut cpu, _) = setup();
        cpu.set_a(0x01);
        bit(&mut cpu, 0xC0);
        assert!(get_flag(&cpu, StatusFlags::ZERO));
        assert!(get_flag(&cpu, StatusFlags::NEGATIVE));
        assert!(get_flag(&cpu, StatusFlags::OVERFLOW));
        assert_eq!(cpu.a(), 0x01);
    }

    #[test]
    fn generic_register_ops() {
        let (mut cpu, _) = setup();
        lda(&mut cpu, 0x10);
        ldx(&mut cpu, 0x01);
        inx(&mut cpu);
        assert_eq!(cpu.x(), 0x02);
        and(&mut cpu, 0x00);
        assert_eq!(cpu.a(), 0x00);
        assert!(get_flag(&cpu, StatusFlags::ZERO));
        ora(&mut cpu, 0x80);
        assert_eq!(cpu.a(), 0x80);
        assert!(get_flag(&cpu, StatusFlags::NEGATIVE));
        eor(&mut cpu, 0xFF);
        assert_eq!(cpu.a(), 0x7F);
        tsx(&mut cpu);
        assert_eq!(cpu.x(), 0xFD);
        ldx(&mut cpu, 0x00);
        txs(&mut cpu);
        assert_eq!(cpu.sp(), 0x00);
        assert!(get_flag(&cpu, StatusFlags::ZERO));
    }
}
