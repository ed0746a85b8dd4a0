use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::labels::LabelTable;
use crate::memory::{Addr, SparseMemory};

/// Result of a successful assembly.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub memory: SparseMemory,
    pub text: BTreeMap<Addr, String>,
    /// Data literals keyed by absolute address.
    pub data: BTreeMap<Addr, String>,
    pub labels: LabelTable,
    pub inverse_labels: BTreeMap<Addr, String>,
    pub data_base: Addr,
    pub line_numbers: BTreeMap<Addr, usize>,
}

impl Program {
    pub fn word_count(&self) -> usize {
        self.text.len() + self.data.len()
    }

    pub fn line_of(&self, addr: Addr) -> Option<usize> {
        self.line_numbers.get(&addr).copied()
    }

    fn label_at(&self, addr: Addr) -> &str {
        self.inverse_labels.get(&addr).map_or("", String::as_str)
    }

    /// `.mem` dump of this program's addresses with values taken from `memory`.
    pub fn mem_dump(&self, memory: &SparseMemory) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "// Memory dump from Albacore Simulator");
        let _ = writeln!(out, "// Format: @address value // comments");
        let _ = writeln!(out);

        let _ = writeln!(out, "// .text");
        for (&addr, src) in &self.text {
            self.dump_line(&mut out, memory, addr, src);
        }
        if !self.data.is_empty() {
            let _ = writeln!(out, "// .data");
            for (&addr, src) in &self.data {
                self.dump_line(&mut out, memory, addr, src);
            }
        }
        out
    }

    fn dump_line(&self, out: &mut String, memory: &SparseMemory, addr: Addr, src: &str) {
        let value = memory.get(addr).unwrap_or(0);
        let _ = writeln!(out, "@{addr:04X} {value:04X}  // {}{src}", self.label_at(addr));
    }
}
