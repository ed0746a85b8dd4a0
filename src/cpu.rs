use anyhow::Error;
use crate::decoder::{Decoded, Decoder};
use crate::exec::{Executor, Outcome};
use crate::memory::{Addr, Bus};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Steps `run()` executes before it gives up on a program.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// Register that receives the return address of `jal`.
pub const LINK_REG: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub step_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status: u8 {
const COMPILED = 1 << 0; // Memory holds a successfully assembled image
const RUNNING = 1 << 1; // Cleared = Halted
}
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Program counter {pc:x} not in memory")]
    PcOutOfRange { pc: Addr },
    #[error("Program stopped: Maximum step count reached (possible infinite loop) after {steps} steps")]
    StepLimit { steps: usize },
    #[error("Unknown opcode in word {raw:04x} at {pc:x}")]
    InvalidInstruction { pc: Addr, raw: u16 },
    #[error("Bus error at {addr:04x}: {source}")]
    Bus { addr: Addr, #[source] source: Error },
    #[error("Processor is halted")]
    NotRunning,
}

/// One executed instruction as seen by the core.
#[derive(Debug, Clone)]
pub struct Retired {
    pub pc: Addr,
    pub raw: u16,
    pub decoded: Decoded,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: Addr,
    pub regs: [u16; 16],
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self { pc: 0, regs: [0; 16] }
    }

    pub fn reset(&mut self) {
        self.pc = 0;
        self.regs = [0; 16];
    }

    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<Retired, Trap> {
        let pc = self.pc;
        let raw = bus.fetch(pc).ok_or(Trap::PcOutOfRange { pc })?;
        let decoded = dec.decode(raw).ok_or(Trap::InvalidInstruction { pc, raw })?;
        // The executor owns PC movement: branches are relative to the fetch address.
        let outcome = exec.exec(self, bus, decoded)?;
        Ok(Retired { pc, raw, decoded, outcome })
    }
}
