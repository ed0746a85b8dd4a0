use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

use crate::memory::Addr;

/// Final label → address map. Only built once both segments are scanned, so
/// every lookup sees absolute addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelTable {
    map: BTreeMap<String, Addr>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<Addr> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Addr)> + '_ {
        self.map.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Place {
    Text(Addr),
    /// Offset from the start of the data segment.
    Data(Addr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateLabel {
    pub name: String,
    pub addr: Addr,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub labels: LabelTable,
    /// Address → `"name: "`, for listings.
    pub inverse: BTreeMap<Addr, String>,
    pub duplicates: Vec<DuplicateLabel>,
}

/// Collects label definitions during pass 1.
#[derive(Debug, Default)]
pub struct LabelResolver {
    defs: Vec<(String, Place, usize)>,
}

impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_text(&mut self, name: &str, addr: Addr, line: usize) {
        self.defs.push((name.to_string(), Place::Text(addr), line));
    }

    pub fn define_data(&mut self, name: &str, offset: Addr, line: usize) {
        self.defs.push((name.to_string(), Place::Data(offset), line));
    }

    /// Promotes data offsets by `data_base`. Definitions are visited in source
    /// order; a repeated name is reported at its later definition.
    pub fn resolve(self, data_base: Addr) -> Resolved {
        let mut out = Resolved::default();
        for (name, place, line) in self.defs {
            let addr = match place {
                Place::Text(a) => a,
                Place::Data(off) => data_base + off,
            };
            trace!(label = %name, addr, "resolved label");
            if out.labels.map.contains_key(&name) {
                out.duplicates.push(DuplicateLabel { name, addr, line });
                continue;
            }
            out.inverse.insert(addr, format!("{name}: "));
            out.labels.map.insert(name, addr);
        }
        out
    }
}
