use albacore_rs::asm::{encode_instruction, LabelTable};
use albacore_rs::decoder::Decoder;
use albacore_rs::disasm::fmt_decoded;
use albacore_rs::isa::albacore::AlbacoreDecoder;
use pretty_assertions::assert_eq;

fn dis(raw: u16) -> String {
    fmt_decoded(&AlbacoreDecoder::new().decode(raw).unwrap())
}

#[test]
fn renders_each_format() {
    assert_eq!(dis(0x0312), "add r3, r1, r2");
    assert_eq!(dis(0x4270), "not r2, r7");
    assert_eq!(dis(0x7080), "ldi r0, 128");
    assert_eq!(dis(0x8132), "ld r1, r2, 3");
    assert_eq!(dis(0x9F12), "st r1, r2, 15");
    assert_eq!(dis(0xAFF0), "br -1");
    assert_eq!(dis(0xB023), "bz r3, 2");
    assert_eq!(dis(0xC7F4), "bn r4, 127");
    assert_eq!(dis(0xD123), "jal 0x123");
    assert_eq!(dis(0xD005), "jal 0x005");
    assert_eq!(dis(0xE0F0), "jr r15");
    assert_eq!(dis(0xF000), "quit");
}

#[test]
fn output_reassembles_to_the_same_word() {
    let labels = LabelTable::default();
    for raw in [0x1FED, 0x609A, 0x71FF, 0x8F0E, 0x9001, 0xA800, 0xCFE4, 0xDFFF, 0xE030] {
        let text = dis(raw);
        assert_eq!(encode_instruction(0, &text, &labels).unwrap(), raw, "{text}");
    }
}
