use crate::decoder::Op;

/// Operand layout shared by a group of mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// rd, rs1, rs2
    R,
    /// rd, rs1
    Not,
    /// rd, literal | low label | high label
    Ldi,
    /// rd, base, imm4
    Ld,
    /// value, base, imm4
    St,
    /// test-reg, offset | label
    BzBn,
    /// offset | label
    Br,
    /// address | label
    Jal,
    /// link-reg
    Jr,
    Q,
}

impl Format {
    /// Operand count, where fixed. `ldi` takes 2 or 3 tokens.
    pub fn arg_count(self) -> Option<usize> {
        match self {
            Format::R | Format::Ld | Format::St => Some(3),
            Format::Not | Format::BzBn => Some(2),
            Format::Br | Format::Jal | Format::Jr => Some(1),
            Format::Q => Some(0),
            Format::Ldi => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub format: Format,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc { op: Op::Add, mnemonic: "add", format: Format::R },
    InstrDesc { op: Op::Sub, mnemonic: "sub", format: Format::R },
    InstrDesc { op: Op::And, mnemonic: "and", format: Format::R },
    InstrDesc { op: Op::Or, mnemonic: "or", format: Format::R },
    InstrDesc { op: Op::Not, mnemonic: "not", format: Format::Not },
    InstrDesc { op: Op::Shl, mnemonic: "shl", format: Format::R },
    InstrDesc { op: Op::Shr, mnemonic: "shr", format: Format::R },
    InstrDesc { op: Op::Ldi, mnemonic: "ldi", format: Format::Ldi },
    InstrDesc { op: Op::Ld, mnemonic: "ld", format: Format::Ld },
    InstrDesc { op: Op::St, mnemonic: "st", format: Format::St },
    InstrDesc { op: Op::Br, mnemonic: "br", format: Format::Br },
    InstrDesc { op: Op::Bz, mnemonic: "bz", format: Format::BzBn },
    InstrDesc { op: Op::Bn, mnemonic: "bn", format: Format::BzBn },
    InstrDesc { op: Op::Jal, mnemonic: "jal", format: Format::Jal },
    InstrDesc { op: Op::Jr, mnemonic: "jr", format: Format::Jr },
    InstrDesc { op: Op::Quit, mnemonic: "quit", format: Format::Q },
];

/// Case-sensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

/// Table entry for a decoded op.
pub fn describe(op: Op) -> &'static InstrDesc {
    &TABLE[op as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_opcode() {
        for (i, d) in TABLE.iter().enumerate() {
            assert_eq!(d.op.opcode() as usize, i, "{}", d.mnemonic);
            assert_eq!(describe(d.op).mnemonic, d.mnemonic);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("add").is_some());
        assert!(lookup("ADD").is_none());
    }
}
