use super::error::{AsmErrorKind, ValueClass};

/// Parses an integer literal: optional sign, then decimal or a `0x`/`0o`/`0b`
/// prefixed body. Returns `None` for anything else, which callers treat as a
/// symbol.
pub fn parse_int(token: &str) -> Option<i64> {
    let t = token.trim();
    let (neg, body) = if let Some(rest) = t.strip_prefix('-') {
        (true, rest)
    } else {
        (false, t.strip_prefix('+').unwrap_or(t))
    };
    let (radix, digits) = if let Some(h) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, h)
    } else if let Some(b) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, b)
    } else if let Some(o) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (8, o)
    } else {
        (10, body)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let v = i64::from_str_radix(digits, radix).ok()?;
    Some(if neg { -v } else { v })
}

/// Register names are exactly `r0`..`r15`.
pub fn parse_reg(token: &str) -> Option<u16> {
    let n = token.strip_prefix('r')?;
    if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) || (n.len() > 1 && n.starts_with('0')) {
        return None;
    }
    n.parse::<u16>().ok().filter(|&r| r < 16)
}

pub fn check_range(value: i64, min: i64, max: i64, class: ValueClass, bits: u32) -> Result<i64, AsmErrorKind> {
    if value < min || value > max {
        return Err(AsmErrorKind::OutOfRange { class, value, bits });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_bases() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-128"), Some(-128));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("0xFF"), Some(255));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("0b1010"), Some(10));
        assert_eq!(parse_int("0o17"), Some(15));
    }

    #[test]
    fn symbols_are_not_literals() {
        assert_eq!(parse_int("loop"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("12abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn register_names() {
        for i in 0..16u16 {
            assert_eq!(parse_reg(&format!("r{i}")), Some(i));
        }
        for bad in ["r16", "r", "R1", "r01", "r+1", "x1", "1"] {
            assert_eq!(parse_reg(bad), None, "{bad}");
        }
    }

    #[test]
    fn range_error_names_value_and_width() {
        let e = check_range(256, -128, 255, ValueClass::Immediate, 8).unwrap_err();
        assert_eq!(e.to_string(), "Immediate value 0x100 (256) outside 8-bit range");
        let e = check_range(-129, -128, 255, ValueClass::Integer, 8).unwrap_err();
        assert_eq!(e.to_string(), "Integer -0x81 (-129) outside 8-bit range");
    }
}
