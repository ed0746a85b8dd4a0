use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use albacore_rs::{Addr, SparseMemory};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelKV {
    pub addr: Addr,
    pub name: String,
}

pub fn load_mem_dump(path: &Path) -> Result<SparseMemory> {
    let text = std::fs::read_to_string(path)?;
    parse_mem_dump(&text)
}

/// Reads `@AAAA VVVV  // comment` lines back into memory. Comment-only and
/// blank lines are skipped.
pub fn parse_mem_dump(text: &str) -> Result<SparseMemory> {
    let mut mem = SparseMemory::new();
    for (i, line) in text.lines().enumerate() {
        let body = line.split("//").next().unwrap_or("").trim();
        if body.is_empty() {
            continue;
        }
        let rest = body
            .strip_prefix('@')
            .ok_or_else(|| anyhow!("line {}: expected @address, got {:?}", i + 1, body))?;
        let mut parts = rest.split_whitespace();
        let (Some(a), Some(v)) = (parts.next(), parts.next()) else {
            return Err(anyhow!("line {}: expected @address value", i + 1));
        };
        let addr = Addr::from_str_radix(a.trim_end_matches(':'), 16)
            .map_err(|e| anyhow!("line {}: bad address {a}: {e}", i + 1))?;
        let val = u16::from_str_radix(v.trim_start_matches("0x"), 16)
            .map_err(|e| anyhow!("line {}: bad value {v}: {e}", i + 1))?;
        anyhow::ensure!(!mem.is_mapped(addr), "line {}: address {addr:04X} repeated", i + 1);
        mem.insert(addr, val);
    }
    Ok(mem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_lines_round_into_memory() {
        let text = "// Memory dump\n\n// .text\n@0000 7105  // main: ldi r1, 5\n@0001 F000  // quit\n// .data\n@0002 FFFF  // x: -1\n";
        let mem = parse_mem_dump(text).unwrap();
        assert_eq!(mem.len(), 3);
        assert_eq!(mem.get(0), Some(0x7105));
        assert_eq!(mem.get(2), Some(0xFFFF));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_mem_dump("0000 1234").is_err());
        assert!(parse_mem_dump("@0000").is_err());
        assert!(parse_mem_dump("@zz 0000").is_err());
        assert!(parse_mem_dump("@0000 1111\n@0000 2222").is_err());
    }

    #[test]
    fn loader_reads_file() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("_test_dump.mem");
        std::fs::write(&path, "@0010 ABCD  // st\n").unwrap();
        let mem = load_mem_dump(&path).unwrap();
        assert_eq!(mem.get(0x10), Some(0xABCD));
        let _ = std::fs::remove_file(&path);
    }
}
