pub mod asm;
pub mod cpu;
pub mod decoder;
pub mod exec;
pub mod disasm;
pub mod instructions;
pub mod memory;
pub mod sim;

pub mod isa {
    pub mod albacore; // Albacore 16-bit, 16-opcode teaching ISA
}

pub use asm::{assemble, AssemblyError, CompilationError, Program};
pub use cpu::{Cpu, SimConfig, Status, Trap};
pub use memory::{Addr, Bus, SparseMemory};
pub use sim::{RunSummary, Simulator, StepTrace};
