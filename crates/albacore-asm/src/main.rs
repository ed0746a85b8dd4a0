use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use albacore_rs::asm::numeric::parse_int;
use albacore_rs::decoder::Decoder;
use albacore_rs::disasm::fmt_decoded;
use albacore_rs::isa::albacore::AlbacoreDecoder;
use albacore_rs::{assemble, Addr};

use albacore_asm::model::{load_mem_dump, LabelKV};

#[derive(Parser, Debug)]
#[command(author, version, about = "Albacore assembler / disassembler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file into a .mem dump
    Build {
        #[arg(value_name = "ASMFILE")]
        input: String,
        /// Write the dump to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<String>,
        /// Export labels to JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        labels_out: Option<String>,
    },
    /// Disassemble the words of a .mem dump
    Disasm {
        #[arg(value_name = "MEMFILE")]
        input: String,
        /// First address (hex or dec)
        #[arg(long)]
        start: Option<String>,
        /// End address (hex or dec, exclusive)
        #[arg(long)]
        end: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Clone, serde::Serialize)]
struct InsnOut { addr: Addr, raw: u16, text: String }

fn parse_addr(s: &str) -> Result<Addr> {
    let v = parse_int(s).ok_or_else(|| anyhow!("bad address: {s}"))?;
    Addr::try_from(v).map_err(|_| anyhow!("address out of range: {s}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build { input, out, labels_out } => {
            let source = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
            let program = assemble(&source)?;
            info!(words = program.word_count(), labels = program.labels.len(), "assembled {input}");

            let dump = program.mem_dump(&program.memory);
            if let Some(path) = out { std::fs::write(path, dump)?; } else { print!("{dump}"); }

            if let Some(path) = labels_out {
                let mut arr: Vec<LabelKV> = program
                    .labels
                    .iter()
                    .map(|(name, addr)| LabelKV { addr, name: name.to_string() })
                    .collect();
                arr.sort_by_key(|kv| kv.addr);
                std::fs::write(path, serde_json::to_string_pretty(&arr)?)?;
            }
        }
        Command::Disasm { input, start, end, format } => {
            let mem = load_mem_dump(Path::new(&input))?;
            let start = start.as_deref().map(parse_addr).transpose()?.unwrap_or(0);
            let end = end.as_deref().map(parse_addr).transpose()?.unwrap_or(Addr::MAX);
            anyhow::ensure!(end >= start, "end must be >= start");

            let dec = AlbacoreDecoder::new();
            let insns: Vec<InsnOut> = mem
                .iter()
                .filter(|&(a, _)| a >= start && a < end)
                .map(|(addr, raw)| {
                    let text = dec.decode(raw).map(|d| fmt_decoded(&d)).unwrap_or_else(|| format!(".word {raw:#06x}"));
                    InsnOut { addr, raw, text }
                })
                .collect();
            match format {
                OutputFormat::Text => {
                    for i in &insns {
                        println!("{:04x}: {:04x}  {}", i.addr, i.raw, i.text);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&insns)?),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_addr_hex_and_dec() {
        assert_eq!(parse_addr("0x10").unwrap(), 0x10);
        assert_eq!(parse_addr("16").unwrap(), 16);
        assert!(parse_addr("zz").is_err());
        assert!(parse_addr("-1").is_err());
    }
}
