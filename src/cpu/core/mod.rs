/*!
core::Cpu - The 6502 execution engine facade wrapping `CpuState`.

Overview
========
`Cpu` owns the architectural state (`CpuState`), the engine configuration, the
run state (Running / Halted), the NMI / IRQ latches and a running cycle
counter. The memory bus is never owned: every call that touches memory takes
`&mut B` where `B: MemoryBus`.

Step sequence
=============
1. Halted: return `Err(CpuError::Halted)` without touching the bus.
2. Pending NMI, or pending IRQ with I clear: service it. That is the whole
   step (push PC and P with B clear, set I, load the vector, 7 cycles).
3. Otherwise fetch the opcode and look up its `Operation`.
   - Undocumented opcode: apply `IllegalOpcodePolicy`.
   - Documented: resolve the operand, then `dispatch::execute`.
4. Add the cycles to `total_cycles` and return them.

Interrupts are only sampled at instruction boundaries, so at most one is
serviced per step. NMI wins over IRQ. A masked IRQ stays latched until it is
serviced or withdrawn.

Reset
=====
PC from $FFFC, SP decremented by 3 with no bus writes, I set, both latches
cleared, engine back to Running. A, X, Y and the other flags keep their
values. `total_cycles` is not cleared.

Logging
=======
- debug: reset, interrupt service, illegal opcode executed as NOP.
- warn: illegal opcode trapped.
- trace: one line per instruction when `CpuConfig::trace` is set.
*/

use crate::bus::MemoryBus;
use crate::config::{CpuConfig, IllegalOpcodePolicy};
use crate::cpu::addressing::resolve;
use crate::cpu::cycles::{ILLEGAL_NOP_CYCLES, INTERRUPT_CYCLES};
use crate::cpu::dispatch;
use crate::cpu::execute::{push_status_with_break, push_word, set_flag};
use crate::cpu::state::CpuState;
use crate::cpu::status::{Status, StatusFlags};
use crate::cpu::table::{Operation, lookup};
use crate::cpu::vectors::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::error::{CpuError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interrupt request lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interrupt {
    /// Non-maskable interrupt (vector $FFFA).
    Nmi,
    /// Maskable interrupt request (vector $FFFE), ignored while I is set.
    Irq,
}

impl Interrupt {
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// Engine run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    #[default]
    Running,
    /// Entered only through `Cpu::halt`.
    Halted,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cpu {
    state: CpuState,
    config: CpuConfig,
    run_state: RunState,
    nmi_pending: bool,
    irq_pending: bool,
    total_cycles: u64,
}

impl Cpu {
    /// Power up with the default configuration: A=X=Y=0, SP=$FD, P=$34,
    /// PC from the reset vector.
    pub fn new<B: MemoryBus>(bus: &mut B) -> Self {
        Self::with_config(CpuConfig::default(), bus)
    }

    /// Power up with an explicit configuration.
    pub fn with_config<B: MemoryBus>(config: CpuConfig, bus: &mut B) -> Self {
        let mut state = CpuState::new();
        state.set_pc(bus.read_word(RESET_VECTOR));
        log::debug!("cpu power-up: PC=${:04X} SP=${:02X}", state.pc(), state.sp());
        Self {
            state,
            config,
            run_state: RunState::Running,
            nmi_pending: false,
            irq_pending: false,
            total_cycles: 0,
        }
    }

    /// Reset: PC from the reset vector, SP -= 3 without writes, I set,
    /// latches cleared, engine Running.
    pub fn reset<B: MemoryBus>(&mut self, bus: &mut B) {
        let pc = bus.read_word(RESET_VECTOR);
        self.state.set_pc(pc);
        self.state.set_sp(self.state.sp().wrapping_sub(3));
        self.state.assign_flag(StatusFlags::IRQ_DISABLE, true);
        self.nmi_pending = false;
        self.irq_pending = false;
        self.run_state = RunState::Running;
        log::debug!("cpu reset: PC=${:04X} SP=${:02X}", pc, self.state.sp());
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute one instruction, or service one pending interrupt, and return
    /// the cycles consumed.
    pub fn step<B: MemoryBus>(&mut self, bus: &mut B) -> Result<u32> {
        if self.is_halted() {
            return Err(CpuError::Halted);
        }

        if let Some(kind) = self.serviceable_interrupt() {
            let cycles = self.service_interrupt(kind, bus);
            self.total_cycles += cycles as u64;
            return Ok(cycles);
        }

        let pc = self.state.pc();
        let opcode = self.state.fetch_u8(bus);
        let op = lookup(opcode);

        let cycles = if op.is_legal() {
            if self.config.trace {
                self.trace(pc, opcode, &op);
            }
            let resolved = resolve(op.mode, &mut self.state, bus);
            dispatch::execute(op, resolved, &mut self.state, bus)
        } else {
            self.illegal_opcode(&op, opcode, pc)?
        };

        self.total_cycles += cycles as u64;
        Ok(cycles)
    }

    /// Step up to `max_instructions` times. Returns the cycles consumed.
    /// Stops at the first error.
    pub fn run<B: MemoryBus>(&mut self, bus: &mut B, max_instructions: usize) -> Result<u64> {
        let mut elapsed = 0u64;
        for _ in 0..max_instructions {
            elapsed += self.step(bus)? as u64;
        }
        Ok(elapsed)
    }

    /// Step until at least `budget` cycles have elapsed. Returns the cycles
    /// actually consumed; the last instruction may overshoot the budget.
    pub fn run_cycles<B: MemoryBus>(&mut self, bus: &mut B, budget: u64) -> Result<u64> {
        let mut elapsed = 0u64;
        while elapsed < budget {
            elapsed += self.step(bus)? as u64;
        }
        Ok(elapsed)
    }

    fn serviceable_interrupt(&self) -> Option<Interrupt> {
        if self.nmi_pending {
            Some(Interrupt::Nmi)
        } else if self.irq_pending && !self.state.is_flag_set(StatusFlags::IRQ_DISABLE) {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }

    /// Push PC and P (B clear), set I, load the vector. Consumes the latch.
    fn service_interrupt<B: MemoryBus>(&mut self, kind: Interrupt, bus: &mut B) -> u32 {
        match kind {
            Interrupt::Nmi => self.nmi_pending = false,
            Interrupt::Irq => self.irq_pending = false,
        }
        let return_pc = self.state.pc();
        push_word(&mut self.state, bus, return_pc);
        push_status_with_break(&mut self.state, bus, false);
        set_flag(&mut self.state, StatusFlags::IRQ_DISABLE, true);
        let target = bus.read_word(kind.vector());
        self.state.set_pc(target);
        log::debug!("{kind:?} serviced: return=${return_pc:04X} vector=${target:04X}");
        INTERRUPT_CYCLES
    }

    /// PC has already moved past the opcode byte.
    fn illegal_opcode(&mut self, op: &Operation, opcode: u8, pc: u16) -> Result<u32> {
        match self.config.illegal_opcode_policy {
            IllegalOpcodePolicy::Nop => {
                self.state.advance_pc(op.mode.operand_width());
                log::debug!("illegal opcode ${opcode:02X} at ${pc:04X} executed as {}-byte NOP", op.size());
                Ok(ILLEGAL_NOP_CYCLES)
            }
            IllegalOpcodePolicy::Trap => {
                self.state.set_pc(pc);
                log::warn!("illegal opcode ${opcode:02X} at ${pc:04X} trapped");
                Err(CpuError::IllegalOpcode { opcode, pc })
            }
        }
    }

    fn trace(&self, pc: u16, opcode: u8, op: &Operation) {
        let s = &self.state;
        log::trace!(
            "{pc:04X}  {opcode:02X}  {} {:<6}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            op.mnemonic,
            op.mode,
            s.a(),
            s.x(),
            s.y(),
            s.status().bits(),
            s.sp(),
            self.total_cycles
        );
    }

    // ---------------------------------------------------------------------
    // Interrupt lines
    // ---------------------------------------------------------------------

    /// Latch an interrupt request; serviced at the start of a later step.
    pub fn request_interrupt(&mut self, kind: Interrupt) {
        match kind {
            Interrupt::Nmi => self.nmi_pending = true,
            Interrupt::Irq => self.irq_pending = true,
        }
    }

    /// Drop a latched request that has not been serviced yet.
    pub fn withdraw_interrupt(&mut self, kind: Interrupt) {
        match kind {
            Interrupt::Nmi => self.nmi_pending = false,
            Interrupt::Irq => self.irq_pending = false,
        }
    }

    /// Highest-priority latched request, masked or not.
    pub fn pending_interrupt(&self) -> Option<Interrupt> {
        if self.nmi_pending {
            Some(Interrupt::Nmi)
        } else if self.irq_pending {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }

    // ---------------------------------------------------------------------
    // Run state
    // ---------------------------------------------------------------------

    pub fn halt(&mut self) {
        self.run_state = RunState::Halted;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    /// Copy of the architectural registers.
    pub fn registers(&self) -> CpuState {
        self.state
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Cycles consumed since power-up.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Current value of `flag` in the live status register.
    ///
    /// `BREAK` is not processor state: it only has meaning in the copy pushed
    /// by BRK / PHP. The live bit reads as set after power-up ($34) and is
    /// meaningless until the first PLP or RTI clears it.
    pub fn flag(&self, flag: StatusFlags) -> bool {
        self.state.is_flag_set(flag)
    }

    pub fn a(&self) -> u8 {
        self.state.a()
    }
    pub fn x(&self) -> u8 {
        self.state.x()
    }
    pub fn y(&self) -> u8 {
        self.state.y()
    }
    pub fn sp(&self) -> u8 {
        self.state.sp()
    }
    pub fn pc(&self) -> u16 {
        self.state.pc()
    }
    pub fn status(&self) -> Status {
        self.state.status()
    }

    // ---------------------------------------------------------------------
    // Register mutators (debuggers / test harnesses)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.set_a(v);
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.set_x(v);
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.set_y(v);
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.set_sp(v);
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.set_pc(v);
    }
    pub fn set_status(&mut self, v: Status) {
        self.state.set_status(v);
    }
    pub fn set_flag(&mut self, flag: StatusFlags, on: bool) {
        self.state.assign_flag(flag, on);
    }

    /// Replace every register at once (loading a snapshot).
    pub fn set_registers(&mut self, state: CpuState) {
        self.state = state;
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
