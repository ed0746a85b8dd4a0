use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use albacore_rs::cpu::DEFAULT_STEP_LIMIT;
use albacore_rs::sim::DataLabel;
use albacore_rs::{SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble and run an Albacore program on the simulator"
)]
struct Opts {
    /// Stop after this many steps
    #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
    max_steps: usize,
    /// Do not print the per-step trace
    #[arg(short, long)]
    quiet: bool,
    /// Final state output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the memory dump after the run
    #[arg(long, value_name = "FILE")]
    dump: Option<String>,
    #[arg(value_name = "ASMFILE")]
    input: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Serialize)]
struct FinalState<'a> {
    steps: usize,
    pc: u32,
    registers: &'a [u16; 16],
    fault: Option<String>,
    data: Vec<DataLabel>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input))?;

    let mut sim = Simulator::new(SimConfig { step_limit: opts.max_steps });
    sim.compile(&source)?;
    println!("Compilation successful");

    let quiet = opts.quiet;
    let summary = sim.run_with(|t| {
        if !quiet {
            println!("Executing: {t}");
            println!("Effect: {}", t.effect);
        }
    });
    match &summary.fault {
        Some(trap) => eprintln!("{trap}"),
        None => println!("Program completed"),
    }

    match opts.format {
        OutputFormat::Text => {
            println!("steps: {}  pc: {:04x}", summary.steps, sim.pc());
            for (i, r) in sim.registers().iter().enumerate() {
                println!("r{i:<2} = 0x{r:04x} ({})", *r as i16);
            }
            for d in sim.data_labels() {
                println!("{}: @{:04x} = 0x{:04x} ({})", d.name, d.addr, d.value, d.value as i16);
            }
        }
        OutputFormat::Json => {
            let state = FinalState {
                steps: summary.steps,
                pc: sim.pc(),
                registers: sim.registers(),
                fault: summary.fault.as_ref().map(|t| t.to_string()),
                data: sim.data_labels(),
            };
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    if let (Some(path), Some(dump)) = (opts.dump, sim.mem_dump()) {
        std::fs::write(&path, dump)?;
    }
    Ok(())
}
