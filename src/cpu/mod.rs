/*!
cpu::mod - Public façade for the 6502 / 2A03 CPU core.

Layout
======
```text
status.rs       - Status register (NV1BDIZC) with the bit-5 invariant.
state.rs        - Architectural registers (`CpuState`), also the snapshot type.
regs.rs         - `CpuRegs` trait: register access used by the generic helpers.
addressing.rs   - Addressing modes and operand resolution.
table.rs        - 256-entry opcode table (mnemonic, mode, cycles, penalty).
cycles.rs       - Cycle constants and penalty rules.
execute.rs      - Instruction semantic helpers (ALU, stack, shifts, RMW).
dispatch/       - Mnemonic family handlers routed from the table entry.
vectors.rs      - NMI / RESET / IRQ vector addresses.
core/           - `Cpu` engine: step, reset, interrupts, run state.
```

The public surface is the `Cpu` facade plus the table and snapshot types.
Execution internals (`dispatch`, `execute`) are crate-private.

Usage:
```rust
use rp2a03::{Cpu, FlatRam};

let mut ram = FlatRam::new();
ram.load(0x8000, &[0xA9, 0x05, 0x69, 0x01]); // LDA #$05; ADC #$01
ram.set_vector(rp2a03::cpu::RESET_VECTOR, 0x8000);

let mut cpu = Cpu::new(&mut ram);
cpu.run(&mut ram, 2).unwrap();
assert_eq!(cpu.a(), 0x06);
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod status;
pub mod table;
pub mod vectors;

pub use crate::cpu::addressing::AddressingMode;
pub use crate::cpu::core::{Cpu, Interrupt, RunState};
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::CpuState;
pub use crate::cpu::status::{Status, StatusFlags};
pub use crate::cpu::table::{Mnemonic, OPCODE_TABLE, Operation, lookup};
pub use crate::cpu::vectors::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
