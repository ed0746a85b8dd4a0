use std::fmt;

use crate::memory::Addr;

/// Wording used for a range violation, by the kind of field being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Immediate,
    Unsigned,
    Integer,
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueClass::Immediate => "Immediate value",
            ValueClass::Unsigned => "Unsigned integer",
            ValueClass::Integer => "Integer",
        })
    }
}

/// `-0x81` rather than the two's-complement spelling of negative values.
pub(crate) fn signed_hex(v: &i64) -> String {
    let v = *v;
    if v < 0 {
        format!("-0x{:x}", v.unsigned_abs())
    } else {
        format!("0x{v:x}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
    #[error("Invalid register {0}")]
    InvalidRegister(String),
    #[error("{mnemonic} must have {expected} arguments")]
    WrongArgCount { mnemonic: String, expected: usize },
    #[error("Invalid immediate expression: {0}")]
    InvalidImmediate(String),
    #[error("Invalid integer format {0}")]
    InvalidInteger(String),
    #[error("Undefined label: {0}")]
    UndefinedLabel(String),
    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),
    #[error("{class} {} ({value}) outside {bits}-bit range", signed_hex(.value))]
    OutOfRange { class: ValueClass, value: i64, bits: u32 },
}

/// A pass-2 failure, tagged with the address being encoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct AssemblyError {
    pub kind: AsmErrorKind,
    pub addr: Addr,
}

impl AssemblyError {
    pub fn new(kind: AsmErrorKind, addr: Addr) -> Self {
        Self { kind, addr }
    }
}

/// An [`AssemblyError`] mapped back to its source line (1-based).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Assembly error line {line}: {source}")]
pub struct CompilationError {
    pub line: usize,
    #[source]
    pub source: AssemblyError,
}

impl CompilationError {
    pub fn kind(&self) -> &AsmErrorKind {
        &self.source.kind
    }
}
