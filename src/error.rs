//! Error taxonomy for the CPU engine.
//!
//! Nothing here is fatal to the host: every variant describes a caller-side
//! situation the engine refused to paper over. Hardware-level oddities (stack
//! wraparound, garbage vectors) are not errors and never show up here.

use thiserror::Error;

/// Errors returned by [`Cpu::step`](crate::Cpu::step) and the run helpers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// `step()` was called while the engine is halted; call `resume()` or
    /// `reset()` first.
    #[error("CPU is halted")]
    Halted,

    /// An undocumented opcode was fetched while the illegal-opcode policy is
    /// `Trap`. PC has been rewound to `pc` (the opcode's address).
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CpuError>;
