use serde::{Deserialize, Serialize};

use crate::cpu::{Cpu, Trap, LINK_REG};
use crate::decoder::{Decoded, Op};
use crate::memory::{Addr, Bus};

/// What one instruction did, for the caller's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub effect: String,
    pub halted: bool,
}

impl Outcome {
    fn cont(effect: String) -> Self {
        Self { effect, halted: false }
    }
}

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<Outcome, Trap>;
}

fn reg_effect(cpu: &Cpu, rd: usize) -> String {
    let v = cpu.regs[rd];
    format!("r{rd} = 0x{v:x} ({})", v as i16)
}

fn pc_effect(pc: Addr) -> String {
    format!("pc = {pc:04x}")
}

fn branch(pc: Addr, off: u16) -> Addr {
    pc.wrapping_add(off as i16 as i32 as u32)
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<Outcome, Trap> {
        let rd = d.rd as usize;
        let a = cpu.regs[d.rs1 as usize];
        let b = cpu.regs[d.rs2 as usize];
        let pc = cpu.pc;

        let alu = |cpu: &mut Cpu, res: u32| -> Result<Outcome, Trap> {
            cpu.regs[rd] = (res & 0xFFFF) as u16;
            cpu.pc = pc.wrapping_add(1);
            Ok(Outcome::cont(reg_effect(cpu, rd)))
        };

        match d.op {
            Op::Add => alu(cpu, a as u32 + b as u32),
            Op::Sub => alu(cpu, (a as u32).wrapping_sub(b as u32)),
            Op::And => alu(cpu, (a & b) as u32),
            Op::Or => alu(cpu, (a | b) as u32),
            Op::Not => alu(cpu, !a as u32),
            // Shift count is the low five bits of rs2; shr is logical.
            Op::Shl => alu(cpu, (a as u32) << (b & 0x1F)),
            Op::Shr => alu(cpu, (a as u32) >> (b & 0x1F)),
            Op::Ldi => alu(cpu, d.imm as u32),
            Op::Ld => {
                let addr = (a.wrapping_add(d.imm)) as Addr;
                let val = bus
                    .read_u16(addr)
                    .map_err(|source| Trap::Bus { addr, source })?;
                alu(cpu, val as u32)
            }
            Op::St => {
                let addr = (a.wrapping_add(d.imm)) as Addr;
                bus.write_u16(addr, b)
                    .map_err(|source| Trap::Bus { addr, source })?;
                cpu.pc = pc.wrapping_add(1);
                Ok(Outcome::cont(format!("mem[{addr:04x}] = 0x{b:x} ({})", b as i16)))
            }
            Op::Br => {
                cpu.pc = branch(pc, d.imm);
                Ok(Outcome::cont(pc_effect(cpu.pc)))
            }
            Op::Bz => {
                cpu.pc = if a == 0 { branch(pc, d.imm) } else { pc.wrapping_add(1) };
                Ok(Outcome::cont(pc_effect(cpu.pc)))
            }
            Op::Bn => {
                cpu.pc = if a & 0x8000 != 0 { branch(pc, d.imm) } else { pc.wrapping_add(1) };
                Ok(Outcome::cont(pc_effect(cpu.pc)))
            }
            Op::Jal => {
                // Bank-local: the top four PC bits survive the jump.
                cpu.regs[LINK_REG] = (pc.wrapping_add(1) & 0xFFFF) as u16;
                cpu.pc = (pc & 0xF000) | (d.imm as Addr & 0xFFF);
                Ok(Outcome::cont(format!(
                    "r15 = {}, pc = {:04x}",
                    cpu.regs[LINK_REG], cpu.pc
                )))
            }
            Op::Jr => {
                cpu.pc = a as Addr;
                Ok(Outcome::cont(pc_effect(cpu.pc)))
            }
            Op::Quit => Ok(Outcome {
                effect: "Program terminated".to_string(),
                halted: true,
            }),
        }
    }
}
