use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mips_rs::{bits, AsmConfig, Assembler, DATA_BASE, TEXT_BASE};
use mips_disasm::{artifact_paths, parse_u32, write_hex_words};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tiny MIPS assembler (subset)")]
struct Opts {
    /// Input assembly file; writes <INPUT>.text and <INPUT>.data
    #[arg(value_name = "INPUT", required_unless_present = "line")]
    input: Option<PathBuf>,
    /// Assemble a single instruction and print its word(s) instead
    #[arg(long, value_name = "INSTRUCTION", conflicts_with = "input")]
    line: Option<String>,
    /// Directory for the output files (default: next to the input)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Address of the first instruction
    #[arg(long, value_parser = parse_u32, default_value_t = TEXT_BASE)]
    text_base: u32,
    /// Address of the first data word
    #[arg(long, value_parser = parse_u32, default_value_t = DATA_BASE)]
    data_base: u32,
    /// Also dump the symbol table as JSON
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let asm = Assembler::new(AsmConfig { text_base: opts.text_base, data_base: opts.data_base });

    if let Some(line) = &opts.line {
        for w in asm.assemble_line(line)? {
            println!("{}", bits::to_hex(w));
        }
        return Ok(());
    }

    let Some(input) = opts.input else { anyhow::bail!("no input file") };
    let text = fs::read_to_string(&input).with_context(|| format!("reading {}", input.display()))?;
    let out = asm.assemble(&text).with_context(|| format!("assembling {}", input.display()))?;

    let (text_path, data_path) = artifact_paths(&input, opts.out_dir.as_deref());
    write_hex_words(&text_path, &out.text)?;
    write_hex_words(&data_path, &out.data)?;
    tracing::info!(
        text = out.text.len(),
        data = out.data.len(),
        "wrote {} and {}",
        text_path.display(),
        data_path.display()
    );

    if let Some(path) = &opts.symbols {
        fs::write(path, serde_json::to_string_pretty(&out.symbols)?)?;
    }
    Ok(())
}
