/*!
state.rs - Canonical 6502 CPU architectural state (registers + status).

Overview
========
`CpuState` is the single owner of all architecturally visible registers. It
intentionally excludes:
  - Bus / memory logic (beyond the fetch helpers, which only read)
  - Instruction decode / dispatch logic
  - Timing / cycle accounting and run state (those live in `core::Cpu`)

The struct is `Copy`, so it doubles as the register snapshot handed to hosts
and tests (`Cpu::registers`), and with the `serde` feature it is the
save-state payload for the CPU.

Power-up values
===============
A = X = Y = 0, SP = $FD, P = $34. PC is loaded from the RESET vector by the
engine, not here (state has no bus).
*/

use crate::bus::MemoryBus;
use crate::cpu::status::{Status, StatusFlags};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stack pointer value at power-up.
pub const POWER_UP_SP: u8 = 0xFD;

/// Pure architectural register / flag container for the 6502 CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_UP_SP,
            pc: 0x0000,
            status: Status::new(),
        }
    }
}

impl CpuState {
    /// Create a new CPU state using power-up defaults (PC = 0).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Basic Accessors (Read)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    // ---------------------------------------------------------------------
    // Mutators (Write)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_status(&mut self, v: Status) {
        self.status = v;
    }

    // ---------------------------------------------------------------------
    // Program Counter Helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Fetch a byte from memory at current PC and then advance PC by 1.
    #[inline]
    pub fn fetch_u8<B: MemoryBus>(&mut self, bus: &mut B) -> u8 {
        let b = bus.read(self.pc);
        self.advance_pc(1);
        b
    }

    /// Fetch a little-endian 16-bit word (low then high) from current PC and
    /// advance PC by 2.
    #[inline]
    pub fn fetch_u16<B: MemoryBus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch_u8(bus) as u16;
        let hi = self.fetch_u8(bus) as u16;
        (hi << 8) | lo
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    /// Return true if a status flag is set.
    #[inline]
    pub fn is_flag_set(&self, flag: StatusFlags) -> bool {
        self.status.get(flag)
    }

    /// Assign a flag based on boolean `value`.
    #[inline]
    pub fn assign_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }
}
