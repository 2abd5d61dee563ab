use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mips_rs::bits;
use mips_rs::disasm::{fmt_asm, fmt_decoded};
use mips_rs::{Decoder, Instruction, Mips32Decoder};
use mips_disasm::read_hex_words;

#[derive(Parser, Debug)]
#[command(author, version, about = "MIPS disassembler CLI", long_about = None)]
struct Cli {
    /// Instruction words, 8 hex digits each (e.g. 00221820)
    #[arg(value_name = "HEXWORD", required_unless_present = "file")]
    words: Vec<String>,
    /// Read words from a file with one hex word per line (e.g. an assembler `.text` file)
    #[arg(long, value_name = "FILE", conflicts_with = "words")]
    file: Option<PathBuf>,
    /// Print assembler syntax instead of the field listing (text format only)
    #[arg(long)]
    asm: bool,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Serialize)]
struct DecodedOut {
    word: String,
    instruction: Instruction,
    text: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let words = match &cli.file {
        Some(path) => read_hex_words(path)?,
        None => cli
            .words
            .iter()
            .map(|w| bits::parse_hex_word(w).with_context(|| format!("bad word `{w}`")))
            .collect::<Result<Vec<_>>>()?,
    };
    tracing::debug!(count = words.len(), "decoding");

    let dec = Mips32Decoder::new();
    let mut decoded = Vec::with_capacity(words.len());
    for &w in &words {
        let d = dec.decode(w).with_context(|| format!("cannot disassemble {}", bits::to_hex(w)))?;
        decoded.push((w, d));
    }

    let mut buf = String::new();
    match cli.format {
        OutputFormat::Text => {
            for (_, d) in &decoded {
                // words the assembler cannot reproduce keep the field listing
                let asm = if cli.asm { fmt_asm(d) } else { None };
                let line = asm.unwrap_or_else(|| fmt_decoded(d));
                let _ = writeln!(buf, "{line}");
            }
        }
        OutputFormat::Json => {
            let out: Vec<DecodedOut> = decoded
                .iter()
                .map(|&(w, d)| DecodedOut { word: bits::to_hex(w), instruction: d, text: fmt_decoded(&d) })
                .collect();
            buf = serde_json::to_string_pretty(&out)?;
            buf.push('\n');
        }
    }
    if let Some(path) = cli.out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
    Ok(())
}
