use serde::{Deserialize, Serialize};

/// The sixteen Albacore operations. Discriminants are the 4-bit opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Op {
    Add = 0x0,
    Sub = 0x1,
    And = 0x2,
    Or = 0x3,
    Not = 0x4,
    Shl = 0x5,
    Shr = 0x6,
    Ldi = 0x7,
    Ld = 0x8,
    St = 0x9,
    Br = 0xA,
    Bz = 0xB,
    Bn = 0xC,
    Jal = 0xD,
    Jr = 0xE,
    Quit = 0xF,
}

impl Op {
    pub const fn opcode(self) -> u16 {
        self as u16
    }

    pub fn from_opcode(nibble: u16) -> Option<Self> {
        Some(match nibble {
            0x0 => Op::Add,
            0x1 => Op::Sub,
            0x2 => Op::And,
            0x3 => Op::Or,
            0x4 => Op::Not,
            0x5 => Op::Shl,
            0x6 => Op::Shr,
            0x7 => Op::Ldi,
            0x8 => Op::Ld,
            0x9 => Op::St,
            0xA => Op::Br,
            0xB => Op::Bz,
            0xC => Op::Bn,
            0xD => Op::Jal,
            0xE => Op::Jr,
            0xF => Op::Quit,
            _ => return None,
        })
    }
}

/// Operand fields of one instruction word.
///
/// Field use per op:
/// - R ops: `rd`, `rs1`, `rs2`
/// - `not`: `rd`, `rs1`
/// - `ldi`: `rd`, `imm` (8-bit, zero-extended)
/// - `ld`: `rd` destination, `rs1` base, `imm` (4-bit)
/// - `st`: `rs2` value, `rs1` base, `imm` (4-bit)
/// - `br`/`bz`/`bn`: `imm` (offset, sign-extended to 16 bits), `rs1` tested register
/// - `jal`: `imm` (12-bit target)
/// - `jr`: `rs1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub imm: u16,
}

pub trait Decoder {
    fn decode(&self, raw: u16) -> Option<Decoded>;
}
