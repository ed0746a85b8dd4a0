use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word address. The ISA is word-addressed: one address holds one 16-bit word.
pub type Addr = u32;

pub trait Bus {
    /// Instruction fetch. `None` means the address is not part of the image.
    fn fetch(&mut self, addr: Addr) -> Option<u16>;
    fn read_u16(&mut self, addr: Addr) -> Result<u16>;
    fn write_u16(&mut self, addr: Addr, val: u16) -> Result<()>;
}

/// Sparse word memory. Addresses never written stay absent and read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseMemory {
    pub words: BTreeMap<Addr, u16>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, addr: Addr) -> Option<u16> {
        self.words.get(&addr).copied()
    }

    pub fn insert(&mut self, addr: Addr, val: u16) {
        self.words.insert(addr, val);
    }

    pub fn is_mapped(&self, addr: Addr) -> bool {
        self.words.contains_key(&addr)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Addr, u16)> + '_ {
        self.words.iter().map(|(&a, &v)| (a, v))
    }
}

impl Bus for SparseMemory {
    fn fetch(&mut self, addr: Addr) -> Option<u16> {
        self.get(addr)
    }
    fn read_u16(&mut self, addr: Addr) -> Result<u16> {
        Ok(self.get(addr).unwrap_or(0))
    }
    fn write_u16(&mut self, addr: Addr, val: u16) -> Result<()> {
        self.insert(addr, val);
        Ok(())
    }
}
