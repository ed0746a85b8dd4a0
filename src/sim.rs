use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::asm::{assemble, CompilationError, Program};
use crate::cpu::{Cpu, SimConfig, Status, Trap};
use crate::disasm::fmt_decoded;
use crate::exec::IntExecutor;
use crate::isa::albacore::AlbacoreDecoder;
use crate::memory::{Addr, SparseMemory};

/// One executed instruction: where, what, and what it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    pub addr: Addr,
    pub raw: u16,
    pub source: String,
    pub effect: String,
    pub running: bool,
}

impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}  {:04x}  {}", self.addr, self.raw, self.source)
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub steps: usize,
    /// Why the run ended, when it was not a `quit`.
    pub fault: Option<Trap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataLabel {
    pub name: String,
    pub addr: Addr,
    pub value: u16,
}

/// Assembler plus engine state for one program.
pub struct Simulator {
    cpu: Cpu,
    memory: SparseMemory,
    program: Option<Program>,
    status: Status,
    cfg: SimConfig,
    dec: AlbacoreDecoder,
    exec: IntExecutor,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulator {
    pub fn new(cfg: SimConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: SparseMemory::new(),
            program: None,
            status: Status::empty(),
            cfg,
            dec: AlbacoreDecoder::new(),
            exec: IntExecutor,
        }
    }

    /// Replaces the image with `source` assembled. On failure the simulator
    /// is left uncompiled with an empty image.
    pub fn compile(&mut self, source: &str) -> Result<&Program, CompilationError> {
        match assemble(source) {
            Ok(program) => {
                info!(words = program.word_count(), data_base = program.data_base, "compilation successful");
                self.memory = program.memory.clone();
                self.status = Status::COMPILED;
                self.reset();
                Ok(&*self.program.insert(program))
            }
            Err(e) => {
                warn!(error = %e, "compilation failed");
                self.memory.clear();
                self.program = None;
                self.status = Status::empty();
                self.cpu.reset();
                Err(e)
            }
        }
    }

    /// Zeroes registers and PC. Memory, including stored words, is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.status.set(Status::RUNNING, self.status.contains(Status::COMPILED));
        debug!(running = self.is_running(), "processor reset");
    }

    /// Halts a running program. Returns whether anything was stopped.
    pub fn stop(&mut self) -> bool {
        if self.status.contains(Status::COMPILED | Status::RUNNING) {
            self.status.remove(Status::RUNNING);
            info!(pc = self.cpu.pc, "execution stopped by user");
            return true;
        }
        false
    }

    pub fn step(&mut self) -> Result<StepTrace, Trap> {
        if !self.status.contains(Status::COMPILED | Status::RUNNING) {
            return Err(Trap::NotRunning);
        }
        let retired = match self.cpu.step(&mut self.memory, &self.dec, &self.exec) {
            Ok(r) => r,
            Err(trap) => {
                self.status.remove(Status::RUNNING);
                warn!(%trap, "execution fault");
                return Err(trap);
            }
        };
        if retired.outcome.halted {
            self.status.remove(Status::RUNNING);
        }
        let source = self
            .program
            .as_ref()
            .and_then(|p| p.text.get(&retired.pc).cloned())
            .unwrap_or_else(|| fmt_decoded(&retired.decoded));
        let trace = StepTrace {
            addr: retired.pc,
            raw: retired.raw,
            source,
            effect: retired.outcome.effect,
            running: self.is_running(),
        };
        debug!("{trace}  => {}", trace.effect);
        Ok(trace)
    }

    pub fn run(&mut self) -> RunSummary {
        self.run_with(|_| {})
    }

    /// Steps until halt, a fault, or the configured step limit.
    pub fn run_with<F: FnMut(&StepTrace)>(&mut self, mut on_step: F) -> RunSummary {
        if !self.is_running() {
            return RunSummary { steps: 0, fault: Some(Trap::NotRunning) };
        }
        let mut steps = 0;
        let mut fault = None;
        while self.is_running() && steps < self.cfg.step_limit {
            match self.step() {
                Ok(trace) => {
                    steps += 1;
                    on_step(&trace);
                }
                Err(trap) => {
                    fault = Some(trap);
                    break;
                }
            }
        }
        if fault.is_none() && self.is_running() {
            self.status.remove(Status::RUNNING);
            let trap = Trap::StepLimit { steps };
            warn!(%trap, "run aborted");
            fault = Some(trap);
        }
        info!(steps, pc = self.cpu.pc, "run finished");
        RunSummary { steps, fault }
    }

    pub fn is_running(&self) -> bool {
        self.status.contains(Status::RUNNING)
    }

    pub fn is_compiled(&self) -> bool {
        self.status.contains(Status::COMPILED)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn registers(&self) -> &[u16; 16] {
        &self.cpu.regs
    }

    pub fn pc(&self) -> Addr {
        self.cpu.pc
    }

    pub fn memory(&self) -> &SparseMemory {
        &self.memory
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Source line of the instruction at PC.
    pub fn current_line(&self) -> Option<usize> {
        self.program.as_ref()?.line_of(self.cpu.pc)
    }

    /// Labels in the data segment with their current values.
    pub fn data_labels(&self) -> Vec<DataLabel> {
        let Some(p) = &self.program else { return Vec::new() };
        p.labels
            .iter()
            .filter(|&(_, addr)| addr >= p.data_base)
            .map(|(name, addr)| DataLabel {
                name: name.to_string(),
                addr,
                value: self.memory.get(addr).unwrap_or(0),
            })
            .collect()
    }

    /// Memory dump of the compiled program with live memory values.
    pub fn mem_dump(&self) -> Option<String> {
        self.program.as_ref().map(|p| p.mem_dump(&self.memory))
    }
}
