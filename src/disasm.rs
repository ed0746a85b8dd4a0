use crate::decoder::{Decoded, Op};
use crate::instructions::describe;

/// Renders a decoded word in assembler syntax. Offsets print signed, so the
/// output reassembles to the same word.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = describe(d.op).mnemonic;
    match d.op {
        Op::Add | Op::Sub | Op::And | Op::Or | Op::Shl | Op::Shr => {
            format!("{mn} r{}, r{}, r{}", d.rd, d.rs1, d.rs2)
        }
        Op::Not => format!("{mn} r{}, r{}", d.rd, d.rs1),
        Op::Ldi => format!("{mn} r{}, {}", d.rd, d.imm),
        Op::Ld => format!("{mn} r{}, r{}, {}", d.rd, d.rs1, d.imm),
        Op::St => format!("{mn} r{}, r{}, {}", d.rs2, d.rs1, d.imm),
        Op::Br => format!("{mn} {}", d.imm as i16),
        Op::Bz | Op::Bn => format!("{mn} r{}, {}", d.rs1, d.imm as i16),
        Op::Jal => format!("{mn} {:#05x}", d.imm),
        Op::Jr => format!("{mn} r{}", d.rs1),
        Op::Quit => mn.to_string(),
    }
}
