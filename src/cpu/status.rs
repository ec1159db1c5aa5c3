/*!
status.rs - Processor status register (P).

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1, cannot be cleared)
  B = BREAK (only meaningful in the copy pushed by PHP/BRK; IRQ/NMI push it clear)
  D = DECIMAL (stored and toggled, but the 2A03 has no BCD adder, so arithmetic ignores it)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY

Invariants
==========
- Every constructor and mutator forces UNUSED on.
- BREAK in the live register is inert: nothing reads it for behavior, and
  restoring from the stack (PLP/RTI) clears it.
*/

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Processor status flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Status byte at power-up ($34: UNUSED | BREAK | IRQ_DISABLE).
pub const POWER_UP_STATUS: u8 = 0x34;

/// The P register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status(StatusFlags);

impl Default for Status {
    fn default() -> Self {
        Self::from_bits(POWER_UP_STATUS)
    }
}

impl Status {
    /// Power-up status ($34).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw byte; bit 5 is forced on.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self(StatusFlags::from_bits_retain(bits) | StatusFlags::UNUSED)
    }

    /// Raw byte (bit 5 always set).
    #[inline]
    pub fn bits(self) -> u8 {
        self.0.bits()
    }

    #[inline]
    pub fn flags(self) -> StatusFlags {
        self.0
    }

    /// True if every bit in `flag` is set.
    #[inline]
    pub fn get(self, flag: StatusFlags) -> bool {
        self.0.contains(flag)
    }

    /// Set or clear `flag`. Clearing UNUSED is ignored.
    #[inline]
    pub fn set(&mut self, flag: StatusFlags, value: bool) {
        self.0.set(flag, value);
        self.0.insert(StatusFlags::UNUSED);
    }

    /// ZERO + NEGATIVE from a result byte.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.set(StatusFlags::ZERO, result == 0);
        self.set(StatusFlags::NEGATIVE, result & 0x80 != 0);
    }

    /// The byte pushed to the stack. BRK/PHP push with `break_set`, IRQ/NMI without.
    #[inline]
    pub fn to_pushed(self, break_set: bool) -> u8 {
        let mut v = self.0 | StatusFlags::UNUSED;
        v.set(StatusFlags::BREAK, break_set);
        v.bits()
    }

    /// Status restored by PLP/RTI: BREAK dropped, UNUSED forced.
    #[inline]
    pub fn from_pulled(bits: u8) -> Self {
        let mut s = Self::from_bits(bits);
        s.0.remove(StatusFlags::BREAK);
        s
    }
}

impl From<Status> for u8 {
    fn from(s: Status) -> u8 {
        s.bits()
    }
}
