/*!
regs.rs - CpuRegs trait: the register + flag surface instruction semantics are
written against.

Scope
=====
The trait does NOT include:
  - Stack push/pop
  - Instruction fetch
  - Bus access of any kind

Memory, stack, and fetch operations stay explicit at call sites via
`&mut impl MemoryBus`, which keeps borrows short and the trait trivial to
implement.

Design Goals
============
1. Small surface area: only what the instruction helpers require.
2. Static dispatch via generics (no trait objects) in the hot path.
3. Default methods for composites (`update_zn`, `update_carry`, ...) so
   implementors only provide raw accessors.

Implementations
===============
- `CpuState` (the canonical state owner).
*/

use crate::cpu::state::CpuState;
use crate::cpu::status::{Status, StatusFlags};

/// Minimal 6502 register + flag API used by the execute and dispatch layers.
///
/// ALL mutating methods take &mut self, enabling generic call sites:
///   fn op<C: CpuRegs>(cpu: &mut C) { ... }
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> Status;

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------
    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    fn set_status(&mut self, v: Status);

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        let pc = self.pc().wrapping_add(delta);
        self.set_pc(pc);
    }

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    #[inline]
    fn is_flag_set(&self, flag: StatusFlags) -> bool {
        self.status().get(flag)
    }

    #[inline]
    fn assign_flag(&mut self, flag: StatusFlags, value: bool) {
        let mut s = self.status();
        s.set(flag, value);
        self.set_status(s);
    }

    /// Composite: update ZERO and NEGATIVE based on result.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        let mut s = self.status();
        s.update_zn(result);
        self.set_status(s);
    }

    #[inline]
    fn update_carry(&mut self, carry: bool) {
        self.assign_flag(StatusFlags::CARRY, carry);
    }

    #[inline]
    fn update_overflow(&mut self, overflow: bool) {
        self.assign_flag(StatusFlags::OVERFLOW, overflow);
    }

    /// Processor status byte for a stack push (PHP/BRK with `set_break`,
    /// IRQ/NMI without).
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        self.status().to_pushed(set_break)
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: Status) {
        self.status = v;
    }

    // Flag helpers go straight to the field instead of copy/modify/store.
    #[inline]
    fn is_flag_set(&self, flag: StatusFlags) -> bool {
        self.status.get(flag)
    }

    #[inline]
    fn assign_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }

    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.status.update_zn(result);
    }
}
