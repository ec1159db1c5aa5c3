//! Shared test utilities for loading small programs and observing bus traffic.
//!
//! Programs are placed at $8000 and the reset vector points there, so a fresh
//! `Cpu` starts on the first byte of the program.

#![allow(dead_code)]

use crate::bus::{FlatRam, MemoryBus};
use crate::cpu::core::Cpu;
use crate::cpu::vectors::RESET_VECTOR;

/// Load origin used by `setup`.
pub const PRG_ORIGIN: u16 = 0x8000;

/// Fresh RAM with `prg` at $8000 and a CPU powered up on it.
pub fn setup(prg: &[u8]) -> (Cpu, FlatRam) {
    let mut ram = FlatRam::new();
    ram.load(PRG_ORIGIN, prg);
    ram.set_vector(RESET_VECTOR, PRG_ORIGIN);
    let cpu = Cpu::new(&mut ram);
    (cpu, ram)
}

/// Bus wrapper counting every read and write that reaches it.
pub struct CountingBus {
    pub inner: FlatRam,
    pub reads: usize,
    pub writes: usize,
}

impl CountingBus {
    pub fn new(inner: FlatRam) -> Self {
        Self {
            inner,
            reads: 0,
            writes: 0,
        }
    }
}

impl MemoryBus for CountingBus {
    fn read(&mut self, address: u16) -> u8 {
        self.reads += 1;
        self.inner.read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.writes += 1;
        self.inner.write(address, value);
    }
}
