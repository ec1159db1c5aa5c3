/*!
addressing.rs - 6502 addressing modes and operand resolution.

Overview
========
Provides:
- `AddressingMode`, the thirteen NMOS operand forms.
- `resolve`, which consumes an instruction's operand bytes from the stream and
  produces the effective address (or immediate value) plus a page-cross flag.
- The low-level fetch / pointer helpers `resolve` is built from.

Scope & Responsibilities
========================
- Pure address / operand resolution only. The resolver never reads the
  effective address itself (that is the handler's read, and stores must not
  read at all) and never applies cycle penalties; it only reports `crossed` so
  the engine can consult the opcode's penalty policy.
- Only architecturally meaningful bus reads are issued (operand bytes and
  pointer bytes). The hardware's dummy reads are not replayed.

Caller Assumptions
==================
- PC points at the first operand byte (the opcode has been consumed).
- On return PC points at the next instruction: the resolver advances PC by
  exactly `mode.operand_width()`.

Wraparound Rules
================
- Zero page indexed: (base + index) & $FF.
- (zp,X): pointer address (zp + X) & $FF, pointer high byte read from
  (pointer + 1) & $FF.
- (zp),Y: pointer high byte read from (zp + 1) & $FF; Y added to the full
  16-bit pointer, page cross reported like abs,Y.
- JMP (abs): the NMOS page-wrap quirk. A pointer at $xxFF reads its high byte
  from $xx00.
- Relative: displacement is relative to the address after the operand; page
  cross compares that address with the target.
*/

use std::fmt;

use crate::bus::MemoryBus;
use crate::cpu::regs::CpuRegs;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operand addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_width(self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressingMode::Implicit => "impl",
            AddressingMode::Accumulator => "A",
            AddressingMode::Immediate => "#imm",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::ZeroPageX => "zp,X",
            AddressingMode::ZeroPageY => "zp,Y",
            AddressingMode::Absolute => "abs",
            AddressingMode::AbsoluteX => "abs,X",
            AddressingMode::AbsoluteY => "abs,Y",
            AddressingMode::Indirect => "(abs)",
            AddressingMode::IndirectX => "(zp,X)",
            AddressingMode::IndirectY => "(zp),Y",
            AddressingMode::Relative => "rel",
        };
        f.pad(s)
    }
}

/// What an addressing mode resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand (implicit instructions).
    Implied,
    /// The accumulator is the operand (shift/rotate A).
    Accumulator,
    /// The operand byte itself.
    Immediate(u8),
    /// An effective address: data location, jump target, or branch target.
    Address(u16),
}

/// Resolver output: operand plus whether index/branch arithmetic crossed a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    pub page_crossed: bool,
}

impl Resolved {
    #[inline]
    fn at(addr: u16) -> Self {
        Self {
            operand: Operand::Address(addr),
            page_crossed: false,
        }
    }

    #[inline]
    fn crossing(addr: u16, crossed: bool) -> Self {
        Self {
            operand: Operand::Address(addr),
            page_crossed: crossed,
        }
    }
}

/// Resolve `mode` at the current PC, consuming its operand bytes.
pub fn resolve<C: CpuRegs, B: MemoryBus>(mode: AddressingMode, cpu: &mut C, bus: &mut B) -> Resolved {
    match mode {
        AddressingMode::Implicit => Resolved {
            operand: Operand::Implied,
            page_crossed: false,
        },
        AddressingMode::Accumulator => Resolved {
            operand: Operand::Accumulator,
            page_crossed: false,
        },
        AddressingMode::Immediate => Resolved {
            operand: Operand::Immediate(fetch_byte(cpu, bus)),
            page_crossed: false,
        },
        AddressingMode::ZeroPage => Resolved::at(addr_zp(cpu, bus)),
        AddressingMode::ZeroPageX => Resolved::at(addr_zp_x(cpu, bus)),
        AddressingMode::ZeroPageY => Resolved::at(addr_zp_y(cpu, bus)),
        AddressingMode::Absolute => Resolved::at(addr_abs(cpu, bus)),
        AddressingMode::AbsoluteX => {
            let (addr, crossed) = addr_abs_x(cpu, bus);
            Resolved::crossing(addr, crossed)
        }
        AddressingMode::AbsoluteY => {
            let (addr, crossed) = addr_abs_y(cpu, bus);
            Resolved::crossing(addr, crossed)
        }
        AddressingMode::Indirect => {
            let ptr = fetch_word(cpu, bus);
            Resolved::at(read_word_indirect_bug(bus, ptr))
        }
        AddressingMode::IndirectX => Resolved::at(addr_ind_x(cpu, bus)),
        AddressingMode::IndirectY => {
            let (addr, crossed) = addr_ind_y(cpu, bus);
            Resolved::crossing(addr, crossed)
        }
        AddressingMode::Relative => {
            let (target, crossed) = addr_rel(cpu, bus);
            Resolved::crossing(target, crossed)
        }
    }
}

// -------------------------
// Instruction stream fetch
// -------------------------

/// Fetch next byte from the instruction stream, incrementing PC.
#[inline]
pub(crate) fn fetch_byte<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u8 {
    let v = bus.read(cpu.pc());
    cpu.advance_pc(1);
    v
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
#[inline]
pub(crate) fn fetch_word<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let lo = fetch_byte(cpu, bus) as u16;
    let hi = fetch_byte(cpu, bus) as u16;
    (hi << 8) | lo
}

// -------------------------
// Effective address helpers
// -------------------------

#[inline]
fn addr_zp<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    fetch_byte(cpu, bus) as u16
}

#[inline]
fn addr_zp_x<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    fetch_byte(cpu, bus).wrapping_add(cpu.x()) as u16
}

#[inline]
fn addr_zp_y<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    fetch_byte(cpu, bus).wrapping_add(cpu.y()) as u16
}

#[inline]
fn addr_abs<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    fetch_word(cpu, bus)
}

#[inline]
fn addr_abs_x<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> (u16, bool) {
    let base = fetch_word(cpu, bus);
    index_with_cross(base, cpu.x())
}

#[inline]
fn addr_abs_y<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> (u16, bool) {
    let base = fetch_word(cpu, bus);
    index_with_cross(base, cpu.y())
}

#[inline]
fn addr_ind_x<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> u16 {
    let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
    read_word_zp(bus, zp)
}

#[inline]
fn addr_ind_y<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> (u16, bool) {
    let zp = fetch_byte(cpu, bus);
    let base = read_word_zp(bus, zp);
    index_with_cross(base, cpu.y())
}

#[inline]
fn addr_rel<C: CpuRegs, B: MemoryBus>(cpu: &mut C, bus: &mut B) -> (u16, bool) {
    let offset = fetch_byte(cpu, bus) as i8;
    let next = cpu.pc();
    let target = next.wrapping_add(offset as i16 as u16);
    (target, page_crossed(next, target))
}

#[inline]
fn index_with_cross(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, page_crossed(base, addr))
}

/// True when `a` and `b` lie on different 256-byte pages.
#[inline]
pub(crate) fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Read a 16-bit little endian pointer from zero page with wraparound
/// on the high byte.
#[inline]
pub(crate) fn read_word_zp<B: MemoryBus>(bus: &mut B, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP (indirect) pointer read: when the low byte of the pointer is $FF the
/// high byte is fetched from the start of the same page.
#[inline]
pub(crate) fn read_word_indirect_bug<B: MemoryBus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}
