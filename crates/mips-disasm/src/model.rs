use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use mips_rs::bits;

/// Hex or decimal address, as accepted on the command line.
pub fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

/// `prog.asm` -> (`prog.asm.text`, `prog.asm.data`), placed in `out_dir` when given.
pub fn artifact_paths(input: &Path, out_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let with_ext = |ext: &str| {
        let mut name: OsString = input.file_name().map(OsString::from).unwrap_or_else(|| "out".into());
        name.push(ext);
        match out_dir {
            Some(dir) => dir.join(name),
            None => input.with_file_name(name),
        }
    };
    (with_ext(".text"), with_ext(".data"))
}

/// One lowercase 8-digit hex word per line.
pub fn write_hex_words(path: &Path, words: &[u32]) -> Result<()> {
    let mut buf = String::with_capacity(words.len() * 9);
    for &w in words {
        buf.push_str(&bits::to_hex(w));
        buf.push('\n');
    }
    std::fs::write(path, buf).with_context(|| format!("writing {}", path.display()))
}

pub fn read_hex_words(path: &Path) -> Result<Vec<u32>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            bits::parse_hex_word(l).with_context(|| format!("{}:{}", path.display(), i + 1))
        })
        .collect()
}
