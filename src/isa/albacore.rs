use crate::decoder::{Decoded, Decoder, Op};

/// Sign-extends the low `bits` bits of `v` to 16 bits.
#[inline]
pub fn sign_ext(v: u16, bits: u32) -> u16 {
    let s = 16 - bits;
    ((v << s) as i16 >> s) as u16
}

/// Albacore word decoder. Opcode in bits 15..12, operand layout per op.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlbacoreDecoder;

impl AlbacoreDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for AlbacoreDecoder {
    fn decode(&self, raw: u16) -> Option<Decoded> {
        let op = Op::from_opcode((raw >> 12) & 0xF)?;
        let f11_8 = ((raw >> 8) & 0xF) as u8;
        let f7_4 = ((raw >> 4) & 0xF) as u8;
        let f3_0 = (raw & 0xF) as u8;

        let mut d = Decoded { op, rd: 0, rs1: 0, rs2: 0, imm: 0 };
        match op {
            Op::Add | Op::Sub | Op::And | Op::Or | Op::Shl | Op::Shr => {
                d.rd = f11_8;
                d.rs1 = f7_4;
                d.rs2 = f3_0;
            }
            Op::Not => {
                d.rd = f11_8;
                d.rs1 = f7_4;
            }
            Op::Ldi => {
                d.rd = f11_8;
                d.imm = raw & 0xFF;
            }
            Op::Ld => {
                // rd, imm4, base
                d.rd = f11_8;
                d.imm = f7_4 as u16;
                d.rs1 = f3_0;
            }
            Op::St => {
                // imm4, value, base
                d.imm = f11_8 as u16;
                d.rs2 = f7_4;
                d.rs1 = f3_0;
            }
            Op::Br => {
                d.imm = sign_ext((raw >> 4) & 0xFF, 8);
            }
            Op::Bz | Op::Bn => {
                d.imm = sign_ext((raw >> 4) & 0xFF, 8);
                d.rs1 = f3_0;
            }
            Op::Jal => {
                d.imm = raw & 0xFFF;
            }
            Op::Jr => {
                d.rs1 = f7_4;
            }
            Op::Quit => {}
        }
        Some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_ext_8() {
        assert_eq!(sign_ext(0x7F, 8), 0x007F);
        assert_eq!(sign_ext(0x80, 8), 0xFF80);
        assert_eq!(sign_ext(0xFE, 8) as i16, -2);
    }

    #[test]
    fn every_opcode_decodes() {
        let dec = AlbacoreDecoder::new();
        for nibble in 0u16..16 {
            let d = dec.decode(nibble << 12).expect("opcode");
            assert_eq!(d.op.opcode(), nibble);
        }
    }
}
