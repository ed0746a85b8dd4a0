use super::error::{AsmErrorKind, AssemblyError, ValueClass};
use super::labels::LabelTable;
use super::numeric::{check_range, parse_int, parse_reg};
use crate::instructions::{lookup, Format};
use crate::memory::Addr;

/// Tokens of one instruction plus the context needed to resolve them.
struct Line<'a> {
    addr: Addr,
    tokens: Vec<&'a str>,
    labels: &'a LabelTable,
}

impl<'a> Line<'a> {
    fn err(&self, kind: AsmErrorKind) -> AssemblyError {
        AssemblyError::new(kind, self.addr)
    }

    fn tok(&self, i: usize) -> &'a str {
        self.tokens.get(i).copied().unwrap_or("")
    }

    fn args(&self, n: usize) -> Result<(), AssemblyError> {
        if self.tokens.len() != n + 1 {
            return Err(self.err(AsmErrorKind::WrongArgCount {
                mnemonic: self.tok(0).to_string(),
                expected: n,
            }));
        }
        Ok(())
    }

    fn reg(&self, i: usize) -> Result<u16, AssemblyError> {
        let t = self.tok(i);
        parse_reg(t).ok_or_else(|| self.err(AsmErrorKind::InvalidRegister(t.to_string())))
    }

    fn label(&self, name: &str) -> Result<Addr, AssemblyError> {
        self.labels
            .get(name)
            .ok_or_else(|| self.err(AsmErrorKind::UndefinedLabel(name.to_string())))
    }

    fn range(&self, v: i64, min: i64, max: i64, class: ValueClass, bits: u32) -> Result<i64, AssemblyError> {
        check_range(v, min, max, class, bits).map_err(|k| self.err(k))
    }

    /// Literal offset, or PC-relative distance to a label.
    fn offset(&self, i: usize) -> Result<i64, AssemblyError> {
        let t = self.tok(i);
        match parse_int(t) {
            Some(v) => Ok(v),
            None => Ok(self.label(t)? as i64 - self.addr as i64),
        }
    }

    fn imm4(&self, i: usize) -> Result<u16, AssemblyError> {
        let t = self.tok(i);
        let v = parse_int(t).ok_or_else(|| self.err(AsmErrorKind::InvalidImmediate(t.to_string())))?;
        Ok(self.range(v, 0, 15, ValueClass::Unsigned, 4)? as u16)
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '(' || c == ')' || c.is_whitespace()
}

/// Encodes one program-segment line at `addr` against the final label table.
pub fn encode_instruction(addr: Addr, instruction: &str, labels: &LabelTable) -> Result<u16, AssemblyError> {
    let tokens: Vec<&str> = instruction.split(is_separator).filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        return Ok(0);
    }
    let l = Line { addr, tokens, labels };

    let mnemonic = l.tok(0);
    let desc = lookup(mnemonic)
        .ok_or_else(|| l.err(AsmErrorKind::UnknownInstruction(mnemonic.to_string())))?;
    let op = desc.op.opcode() << 12;
    if let Some(n) = desc.format.arg_count() {
        l.args(n)?;
    }

    let code = match desc.format {
        Format::R => {
            let (rd, rs1, rs2) = (l.reg(1)?, l.reg(2)?, l.reg(3)?);
            op | (rd << 8) | (rs1 << 4) | rs2
        }
        Format::Not => {
            let (rd, rs1) = (l.reg(1)?, l.reg(2)?);
            op | (rd << 8) | (rs1 << 4)
        }
        Format::Ldi => {
            if l.tokens.len() < 3 {
                l.args(2)?;
            }
            let rd = l.reg(1)?;
            let t = l.tok(2);
            let imm = match parse_int(t) {
                Some(v) => {
                    l.args(2)?;
                    v
                }
                None if t == "low" || t == "high" => {
                    l.args(3)?;
                    let a = l.label(l.tok(3))? as i64;
                    if t == "low" { a & 0xFF } else { (a >> 8) & 0xFF }
                }
                None => return Err(l.err(AsmErrorKind::InvalidImmediate(t.to_string()))),
            };
            // Accepts both the signed and unsigned 8-bit spellings.
            let imm = l.range(imm, -128, 255, ValueClass::Immediate, 8)?;
            op | (rd << 8) | (imm as u16 & 0xFF)
        }
        Format::Ld => {
            let (rd, base, imm) = (l.reg(1)?, l.reg(2)?, l.imm4(3)?);
            op | (rd << 8) | (imm << 4) | base
        }
        Format::St => {
            let (val, base, imm) = (l.reg(1)?, l.reg(2)?, l.imm4(3)?);
            op | (imm << 8) | (val << 4) | base
        }
        Format::BzBn => {
            let rs = l.reg(1)?;
            let off = l.range(l.offset(2)?, -128, 255, ValueClass::Integer, 8)?;
            op | ((off as u16 & 0xFF) << 4) | rs
        }
        Format::Br => {
            let off = l.range(l.offset(1)?, -128, 255, ValueClass::Integer, 8)?;
            op | ((off as u16 & 0xFF) << 4)
        }
        Format::Jal => {
            let t = l.tok(1);
            let target = match parse_int(t) {
                Some(v) => v,
                None => (l.label(t)? & 0xFFF) as i64,
            };
            let target = l.range(target, 0, 0xFFF, ValueClass::Integer, 12)?;
            op | target as u16
        }
        Format::Jr => op | (l.reg(1)? << 4),
        Format::Q => op,
    };
    Ok(code)
}
