use albacore_rs::exec::IntExecutor;
use albacore_rs::isa::albacore::AlbacoreDecoder;
use albacore_rs::{Bus, Cpu, Simulator, SparseMemory, StepTrace};
use pretty_assertions::assert_eq;

fn run(src: &str) -> (Simulator, Vec<StepTrace>) {
    let mut sim = Simulator::default();
    sim.compile(src).unwrap();
    let mut traces = Vec::new();
    let summary = sim.run_with(|t| traces.push(t.clone()));
    assert!(summary.fault.is_none(), "{:?}", summary.fault);
    (sim, traces)
}

#[test]
fn raw_words_step_through_cpu() {
    let mut mem = SparseMemory::new();
    let mut cpu = Cpu::new();
    // ldi r1, 10 ; ldi r2, 5 ; add r3, r1, r2
    mem.write_u16(0, 0x710A).unwrap();
    mem.write_u16(1, 0x7205).unwrap();
    mem.write_u16(2, 0x0312).unwrap();

    let dec = AlbacoreDecoder::new();
    let exec = IntExecutor;
    for _ in 0..3 {
        cpu.step(&mut mem, &dec, &exec).unwrap();
    }
    assert_eq!(cpu.regs[3], 15);
    assert_eq!(cpu.pc, 3);
}

#[test]
fn alu_results_wrap_to_16_bits() {
    let (sim, _) = run("\
.text
 ldi r1, 0
 ldi r2, 1
 sub r3, r1, r2
 not r4, r0
 add r5, r3, r3
 ldi r6, 0xF0
 ldi r7, 0x3C
 and r8, r6, r7
 or r9, r6, r7
 quit
");
    let r = sim.registers();
    assert_eq!(r[3], 0xFFFF);
    assert_eq!(r[4], 0xFFFF);
    assert_eq!(r[5], 0xFFFE);
    assert_eq!(r[8], 0x30);
    assert_eq!(r[9], 0xFC);
}

#[test]
fn ldi_zero_extends_its_byte() {
    let (sim, _) = run(".text\nldi r1, -1\nldi r2, -128\nquit\n");
    assert_eq!(sim.registers()[1], 0x00FF);
    assert_eq!(sim.registers()[2], 0x0080);
}

#[test]
fn shifts_are_logical_and_use_low_count_bits() {
    let (sim, _) = run("\
.text
 ldi r1, 1
 ldi r2, 15
 shl r3, r1, r2
 shr r4, r3, r2
 ldi r5, 16
 shl r6, r1, r5
 ldi r7, 33
 shr r8, r3, r7
 quit
");
    let r = sim.registers();
    assert_eq!(r[3], 0x8000);
    assert_eq!(r[4], 1);
    assert_eq!(r[6], 0);
    assert_eq!(r[8], 0x4000);
}

#[test]
fn load_and_store_use_base_plus_offset() {
    let (sim, traces) = run("\
.text
 ldi r1, low buf
 ld r2, r1, 0
 ld r3, r1, 1
 add r4, r2, r3
 st r4, r1, 2
 ld r5, r1, 15
 quit
.data
buf: 42, -1
 .word 0
");
    let r = sim.registers();
    assert_eq!(r[1], 7);
    assert_eq!(r[2], 42);
    assert_eq!(r[3], 0xFFFF);
    assert_eq!(r[4], 41);
    assert_eq!(r[5], 0);
    assert_eq!(sim.memory().get(9), Some(41));
    assert!(sim.memory().get(22).is_none());
    assert_eq!(traces[4].effect, "mem[0009] = 0x29 (41)");
}

#[test]
fn effects_describe_register_writes() {
    let (_, traces) = run(".text\nldi r1, 10\nsub r2, r0, r1\nquit\n");
    assert_eq!(traces[0].to_string(), "0000  710a  ldi r1, 10");
    assert_eq!(traces[0].effect, "r1 = 0xa (10)");
    assert_eq!(traces[1].effect, "r2 = 0xfff6 (-10)");
    assert_eq!(traces[2].effect, "Program terminated");
    assert!(!traces[2].running);
}

#[test]
fn quit_does_not_move_pc() {
    let (sim, _) = run(".text\nldi r1, 1\nquit\n");
    assert_eq!(sim.pc(), 1);
}
