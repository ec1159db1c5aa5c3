#![doc = r#"
rp2a03 library crate.

An instruction-level, cycle-counting emulator of the 6502 CPU as found in the
Ricoh 2A03 (decimal mode ignored). The host owns the memory and hands the
core a `MemoryBus` on every call.

Modules:
- bus: `MemoryBus` trait and `FlatRam`, a plain 64 KiB bus
- config: engine options (illegal opcode policy, instruction tracing)
- cpu: 6502 CPU core (facade + state + table + dispatch + execute modules)
- error: `CpuError` returned by stepping

In tests, shared program loaders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod config;
pub mod cpu;
pub mod error;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{FlatRam, MemoryBus};
pub use config::{CpuConfig, IllegalOpcodePolicy};
pub use cpu::{
    AddressingMode, Cpu, CpuState, Interrupt, Mnemonic, Operation, Status, StatusFlags, lookup,
};
pub use error::{CpuError, Result};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
