use super::error::{AsmErrorKind, AssemblyError, ValueClass};
use super::numeric::{check_range, parse_int};
use crate::memory::Addr;

/// Encodes one data literal. Signed and unsigned 16-bit spellings are both
/// accepted and stored as the same bit pattern.
pub fn encode_data_value(token: &str, addr: Addr) -> Result<u16, AssemblyError> {
    let value = parse_int(token)
        .ok_or_else(|| AssemblyError::new(AsmErrorKind::InvalidInteger(token.to_string()), addr))?;
    let value = check_range(value, -32768, 65535, ValueClass::Integer, 16)
        .map_err(|k| AssemblyError::new(k, addr))?;
    Ok((value & 0xFFFF) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_and_unsigned_extremes() {
        assert_eq!(encode_data_value("-32768", 3).unwrap(), 0x8000);
        assert_eq!(encode_data_value("65535", 3).unwrap(), 0xFFFF);
        assert_eq!(encode_data_value("-1", 3).unwrap(), 0xFFFF);
        assert_eq!(encode_data_value("0x1234", 3).unwrap(), 0x1234);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        let e = encode_data_value("65536", 7).unwrap_err();
        assert_eq!(e.addr, 7);
        assert_eq!(e.to_string(), "Integer 0x10000 (65536) outside 16-bit range");
        let e = encode_data_value("-32769", 7).unwrap_err();
        assert!(matches!(e.kind, AsmErrorKind::OutOfRange { bits: 16, .. }));
        let e = encode_data_value("abc", 7).unwrap_err();
        assert_eq!(e.kind, AsmErrorKind::InvalidInteger("abc".into()));
    }
}
