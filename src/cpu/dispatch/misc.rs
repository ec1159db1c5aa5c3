/*!
misc.rs - Transfers / Stack / Flag / register inc-dec family handler

Overview
========
Handles the fixed-cycle implied instructions:

Transfers:
  TAX (0xAA), TAY (0xA8), TXA (0x8A), TYA (0x98), TSX (0xBA), TXS (0x9A)

Stack:
  PHA (0x48), PLA (0x68), PHP (0x08), PLP (0x28)

Flag operations:
  CLC (0x18), SEC (0x38),
  CLI (0x58), SEI (0x78),
  CLD (0xD8), SED (0xF8),
  CLV (0xB8)

Register increment / decrement:
  INX (0xE8), INY (0xC8), DEX (0xCA), DEY (0x88)

NOP (0xEA)

Timing
======
All listed instructions have fixed base cycles; this handler never alters
*cycles.
*/

use crate::bus::MemoryBus;
use crate::cpu::addressing::Resolved;
use crate::cpu::execute::{dex, dey, inx, iny, pha, php, pla, plp, set_flag, tax, tay, tsx, txa, txs, tya};
use crate::cpu::regs::CpuRegs;
use crate::cpu::status::StatusFlags;
use crate::cpu::table::{Mnemonic, Operation};

/// Attempt to execute a transfer / stack / flag / inc-dec / NOP instruction.
pub(super) fn handle<C: CpuRegs, B: MemoryBus>(
    op: &Operation,
    _resolved: Resolved,
    cpu: &mut C,
    bus: &mut B,
    _cycles: &mut u32,
) -> bool {
    match op.mnemonic {
        // Transfers
        Mnemonic::Tax => tax(cpu),
        Mnemonic::Tay => tay(cpu),
        Mnemonic::Txa => txa(cpu),
        Mnemonic::Tya => tya(cpu),
        Mnemonic::Tsx => tsx(cpu),
        Mnemonic::Txs => txs(cpu),

        // Stack
        Mnemonic::Pha => pha(cpu, bus),
        Mnemonic::Pla => pla(cpu, bus),
        Mnemonic::Php => php(cpu, bus),
        Mnemonic::Plp => plp(cpu, bus),

        // Flags
        Mnemonic::Clc => set_flag(cpu, StatusFlags::CARRY, false),
        Mnemonic::Sec => set_flag(cpu, StatusFlags::CARRY, true),
        Mnemonic::Cli => set_flag(cpu, StatusFlags::IRQ_DISABLE, false),
        Mnemonic::Sei => set_flag(cpu, StatusFlags::IRQ_DISABLE, true),
        Mnemonic::Cld => set_flag(cpu, StatusFlags::DECIMAL, false),
        Mnemonic::Sed => set_flag(cpu, StatusFlags::DECIMAL, true),
        Mnemonic::Clv => set_flag(cpu, StatusFlags::OVERFLOW, false),

        // Register inc / dec
        Mnemonic::Inx => inx(cpu),
        Mnemonic::Iny => iny(cpu),
        Mnemonic::Dex => dex(cpu),
        Mnemonic::Dey => dey(cpu),

        Mnemonic::Nop => {}
        _ => return false,
    }
    true
}
