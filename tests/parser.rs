use albacore_rs::asm::parse_source;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn map<V: Clone>(items: &[(u32, V)]) -> BTreeMap<u32, V> {
    items.iter().cloned().collect()
}

const SRC: &str = "\
// header comment
.text
main:            // label only
  ldi r1, 1
  add r2, r1, r1
end: quit
.data
result: .word 0
table: 1, 2, 3
tail:
  .word 0x10 ignored
";

#[test]
fn segments_labels_and_lines() {
    let p = parse_source(SRC);

    assert_eq!(
        p.text,
        map(&[(0, "ldi r1, 1".to_string()), (1, "add r2, r1, r1".to_string()), (2, "quit".to_string())])
    );
    assert_eq!(p.data_base, 3);
    assert_eq!(
        p.data,
        map(&[
            (3, "0".to_string()),
            (4, "1".to_string()),
            (5, "2".to_string()),
            (6, "3".to_string()),
            (7, "0x10".to_string()),
        ])
    );

    let labels: Vec<(&str, u32)> = p.labels.iter().collect();
    assert_eq!(labels, vec![("end", 2), ("main", 0), ("result", 3), ("table", 4), ("tail", 7)]);

    assert_eq!(p.inverse_labels.get(&0).map(String::as_str), Some("main: "));
    assert_eq!(p.inverse_labels.get(&7).map(String::as_str), Some("tail: "));
    assert_eq!(
        p.line_numbers,
        map(&[(0, 4), (1, 5), (2, 6), (3, 8), (4, 9), (5, 9), (6, 9), (7, 11)])
    );
    assert!(p.duplicates.is_empty());
}

#[test]
fn data_label_resolves_after_program_length() {
    let p = parse_source(".text\nquit\n.data\nresult: .word 0\n");
    assert_eq!(p.labels.get("result"), Some(1));
}

#[test]
fn lines_outside_segments_are_ignored() {
    let p = parse_source("ldi r1, 1\nstray:\n.text\nquit\n");
    assert_eq!(p.text, map(&[(0, "quit".to_string())]));
    assert!(p.labels.is_empty());
}

#[test]
fn comment_only_and_blank_lines_consume_nothing() {
    let p = parse_source(".text\n\n   // nothing\nquit // bye\n  \n");
    assert_eq!(p.text, map(&[(0, "quit".to_string())]));
    assert_eq!(p.line_numbers, map(&[(0, 4)]));
}

#[test]
fn segments_can_interleave() {
    let p = parse_source(".text\nldi r1, 1\n.data\na: 7\n.text\nquit\n.data\nb: 8\n");
    assert_eq!(p.data_base, 2);
    assert_eq!(p.text.get(&1).map(String::as_str), Some("quit"));
    assert_eq!(p.labels.get("a"), Some(2));
    assert_eq!(p.labels.get("b"), Some(3));
}

#[test]
fn repeated_label_is_recorded() {
    let p = parse_source(".text\nx: quit\n.data\nx: 1\n");
    assert_eq!(p.labels.get("x"), Some(0));
    assert_eq!(p.duplicates.len(), 1);
    assert_eq!(p.duplicates[0].line, 4);
}
