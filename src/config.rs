/*!
config.rs - Construction-time configuration for the CPU engine.

The core has very few knobs. The ones that exist are behavioral policies the
hardware does not pin down for an emulator (what to do with undocumented
opcodes) and diagnostics (per-instruction trace logging).

Defaults
========
- `illegal_opcode_policy`: `Nop` (inert multi-byte NOP, fixed 2-cycle cost).
- `trace`: off.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the engine does when it fetches an undocumented opcode.
///
/// Neither variant emulates the NMOS "illegal" instructions (LAX, SAX, DCP...).
/// `Nop` keeps running with deterministic, documented behavior; `Trap` hands
/// the decision to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IllegalOpcodePolicy {
    /// Skip the opcode and the operand bytes the real instruction would
    /// consume, touch nothing else, and report a fixed cycle cost.
    #[default]
    Nop,
    /// Leave PC on the opcode and return `CpuError::IllegalOpcode`.
    Trap,
}

/// CPU engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpuConfig {
    pub illegal_opcode_policy: IllegalOpcodePolicy,
    /// Emit a `log::trace!` line for every executed instruction.
    pub trace: bool,
}

impl CpuConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_illegal_opcode_policy(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.illegal_opcode_policy = policy;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CpuConfig::default();
        assert_eq!(c.illegal_opcode_policy, IllegalOpcodePolicy::Nop);
        assert!(!c.trace);
    }

    #[test]
    fn builder_overrides() {
        let c = CpuConfig::new()
            .with_illegal_opcode_policy(IllegalOpcodePolicy::Trap)
            .with_trace(true);
        assert_eq!(c.illegal_opcode_policy, IllegalOpcodePolicy::Trap);
        assert!(c.trace);
    }
}
