#![doc = r#"
Bus module: the memory interface consumed by the CPU core.

Overview
- `MemoryBus` is the only way the core touches memory. It is byte-addressed over
  the full 16-bit space and total over that range; mirroring, bank switching and
  device registers are the implementor's business.
- `ram::FlatRam` is a plain 64 KiB implementation with no mirroring, used by the
  test suite and by hosts that just want a scratch machine.

Contract
- Both methods are synchronous. A write must be visible to a following read of
  the same address.
- `read` takes `&mut self` because real buses have read side effects (open bus
  latches, register reads that clear status bits).
- The CPU never holds on to a bus between calls; every engine entry point
  receives it as `&mut B`.
"#]

pub mod ram;

pub use ram::FlatRam;

/// Byte-addressable 16-bit memory bus as seen by the CPU.
pub trait MemoryBus {
    /// Read the byte at `address`.
    fn read(&mut self, address: u16) -> u8;

    /// Write `value` to `address`.
    fn write(&mut self, address: u16, value: u8);

    /// Read a little-endian word (low byte at `address`, high byte at
    /// `address + 1`, wrapping at the top of the address space).
    #[inline]
    fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address) as u16;
        let hi = self.read(address.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

impl<B: MemoryBus + ?Sized> MemoryBus for &mut B {
    #[inline]
    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    #[inline]
    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value);
    }
}
