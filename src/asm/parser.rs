use std::collections::BTreeMap;

use super::labels::{DuplicateLabel, LabelResolver, LabelTable};
use crate::memory::Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Text,
    Data,
}

/// Pass-1 output. `data` is keyed by absolute address.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub text: BTreeMap<Addr, String>,
    pub data: BTreeMap<Addr, String>,
    pub labels: LabelTable,
    pub inverse_labels: BTreeMap<Addr, String>,
    pub data_base: Addr,
    pub line_numbers: BTreeMap<Addr, usize>,
    pub duplicates: Vec<DuplicateLabel>,
}

fn strip_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or("").trim()
}

/// Splits a leading `label:` off a line.
fn split_label(line: &str) -> (Option<&str>, &str) {
    match line.split_once(':') {
        Some((label, rest)) => (Some(label.trim()), rest.trim()),
        None => (None, line),
    }
}

pub fn parse_source(src: &str) -> Parsed {
    parse_lines(src.lines())
}

/// Scans source lines into program and data words. Never fails: malformed
/// operands surface when the words are encoded.
pub fn parse_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Parsed {
    let mut segment = None;
    let mut text = BTreeMap::new();
    let mut data_rel: Vec<(Addr, String, usize)> = Vec::new();
    let mut line_numbers = BTreeMap::new();
    let mut resolver = LabelResolver::new();
    let mut address: Addr = 0;
    let mut data_address: Addr = 0;

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        match line {
            ".text" => {
                segment = Some(Segment::Text);
                continue;
            }
            ".data" => {
                segment = Some(Segment::Data);
                continue;
            }
            _ => {}
        }

        match segment {
            Some(Segment::Text) => {
                let (label, rest) = split_label(line);
                if let Some(name) = label {
                    resolver.define_text(name, address, line_no);
                }
                if rest.is_empty() {
                    continue;
                }
                text.insert(address, rest.to_string());
                line_numbers.insert(address, line_no);
                address += 1;
            }
            Some(Segment::Data) => {
                let (label, rest) = split_label(line);
                if let Some(name) = label {
                    resolver.define_data(name, data_address, line_no);
                }
                if rest.is_empty() {
                    continue;
                }
                if rest.starts_with(".word") {
                    let value = rest.split_whitespace().nth(1).unwrap_or("");
                    data_rel.push((data_address, value.to_string(), line_no));
                    data_address += 1;
                } else {
                    for value in rest.split(',') {
                        data_rel.push((data_address, value.trim().to_string(), line_no));
                        data_address += 1;
                    }
                }
            }
            // Outside any segment
            None => {}
        }
    }

    let data_base = address;
    let resolved = resolver.resolve(data_base);
    let mut data = BTreeMap::new();
    for (off, value, line_no) in data_rel {
        data.insert(data_base + off, value);
        line_numbers.insert(data_base + off, line_no);
    }

    Parsed {
        text,
        data,
        labels: resolved.labels,
        inverse_labels: resolved.inverse,
        data_base,
        line_numbers,
        duplicates: resolved.duplicates,
    }
}
