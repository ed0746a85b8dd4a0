//! Two-pass assembler: [`parser`] scans the source into segments and labels,
//! then every word is encoded against the resolved label table.

pub mod data;
pub mod encoder;
pub mod error;
pub mod labels;
pub mod numeric;
pub mod parser;
pub mod program;

pub use data::encode_data_value;
pub use encoder::encode_instruction;
pub use error::{AsmErrorKind, AssemblyError, CompilationError, ValueClass};
pub use labels::LabelTable;
pub use parser::{parse_source, Parsed};
pub use program::Program;

use crate::memory::SparseMemory;

/// Assembles `source` into a memory image. Any error aborts the whole program.
pub fn assemble(source: &str) -> Result<Program, CompilationError> {
    let parsed = parse_source(source);

    if let Some(dup) = parsed.duplicates.first() {
        return Err(CompilationError {
            line: dup.line,
            source: AssemblyError::new(AsmErrorKind::DuplicateLabel(dup.name.clone()), dup.addr),
        });
    }

    let locate = |e: AssemblyError| CompilationError {
        line: parsed.line_numbers.get(&e.addr).copied().unwrap_or(0),
        source: e,
    };

    let mut memory = SparseMemory::new();
    for (&addr, line) in &parsed.text {
        let word = encode_instruction(addr, line, &parsed.labels).map_err(locate)?;
        memory.insert(addr, word);
    }
    for (&addr, token) in &parsed.data {
        let word = encode_data_value(token, addr).map_err(locate)?;
        memory.insert(addr, word);
    }

    let Parsed { text, data, labels, inverse_labels, data_base, line_numbers, .. } = parsed;
    Ok(Program {
        memory,
        text,
        data,
        labels,
        inverse_labels,
        data_base,
        line_numbers,
    })
}
