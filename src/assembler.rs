//! Two-pass assembler.
//!
//! Pass 1 walks the classified source, expands pseudo-instructions, assigns
//! an address to every concrete instruction and binds labels. Pass 2 walks
//! the expanded stream with the frozen symbol table and encodes each word.
//! Any error aborts the whole assembly; there is no partial output.

use serde::Serialize;

use crate::bits;
use crate::config::AsmConfig;
use crate::decoder::Instruction;
use crate::error::{AsmError, Result};
use crate::instructions::{ImmKind, InstrTable, Mnemonic, Reg};
use crate::isa::mips32;
use crate::parse::{self, Imm, Inst, Target};
use crate::pseudo;
use crate::source::{self, Line, Section, SourceInst, Stmt};
use crate::symbols::{SymbolTable, SymbolTableBuilder};

/// Output of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    pub text: Vec<u32>,
    pub data: Vec<u32>,
    pub symbols: SymbolTable,
}

impl Assembly {
    pub fn text_hex(&self) -> Vec<String> {
        self.text.iter().map(|&w| bits::to_hex(w)).collect()
    }

    pub fn data_hex(&self) -> Vec<String> {
        self.data.iter().map(|&w| bits::to_hex(w)).collect()
    }
}

/// A concrete instruction with its final address.
#[derive(Debug, Clone)]
struct Placed {
    addr: u32,
    line: usize,
    text: String,
    inst: Inst,
}

/// Everything pass 1 produces.
#[derive(Debug)]
struct Layout {
    text: Vec<Placed>,
    data: Vec<u32>,
    symbols: SymbolTable,
}

pub struct Assembler {
    table: InstrTable,
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { table: InstrTable::new(), cfg }
    }

    pub fn assemble(&self, source: &str) -> Result<Assembly> {
        let lines = source::classify(source)?;
        let layout = self.first_pass(&lines)?;
        let text = self.second_pass(&layout)?;
        tracing::debug!(text = text.len(), data = layout.data.len(), "assembled");
        Ok(Assembly { text, data: layout.data, symbols: layout.symbols })
    }

    /// Assemble one instruction with no symbol table. Branch targets are
    /// word offsets and `j` takes an absolute address.
    pub fn assemble_line(&self, line: &str) -> Result<Vec<u32>> {
        let text = source::strip_comment(line).trim();
        let inst = SourceInst::parse(text)?;
        let symbols = SymbolTable::default();
        let mut addr = self.cfg.text_base;
        let mut out = Vec::new();
        for concrete in pseudo::expand(&inst)? {
            let parsed = parse::parse_inst(&self.table, &concrete)?;
            out.push(self.encode(&parsed, addr, &symbols)?);
            addr = addr.wrapping_add(4);
        }
        Ok(out)
    }

    fn first_pass(&self, lines: &[Line]) -> Result<Layout> {
        let mut section = Section::Text;
        let mut text_pc = self.cfg.text_base;
        let mut data_pc = self.cfg.data_base;
        let mut symbols = SymbolTableBuilder::new();
        let mut text = Vec::new();
        let mut data = Vec::new();

        for line in lines {
            let at = |e: AsmError| e.at_line(line.number, &line.text);
            if let Some(Stmt::Section(s)) = &line.stmt {
                if line.label.is_some() {
                    return Err(at(AsmError::MalformedOperand("label on a section directive".into())));
                }
                section = *s;
                continue;
            }
            if let Some(label) = &line.label {
                let addr = match section {
                    Section::Text => text_pc,
                    Section::Data => data_pc,
                };
                symbols.bind(section, label, addr).map_err(at)?;
            }
            match (&line.stmt, section) {
                (None, _) | (Some(Stmt::Section(_)), _) => {}
                (Some(Stmt::Asciiz(bytes)), Section::Data) => {
                    let words = asciiz_words(bytes);
                    data_pc = data_pc.wrapping_add(4 * words.len() as u32);
                    data.extend(words);
                }
                (Some(Stmt::Inst(inst)), Section::Text) => {
                    for concrete in pseudo::expand(inst).map_err(at)? {
                        let parsed = parse::parse_inst(&self.table, &concrete).map_err(at)?;
                        text.push(Placed {
                            addr: text_pc,
                            line: line.number,
                            text: line.text.clone(),
                            inst: parsed,
                        });
                        text_pc = text_pc.wrapping_add(4);
                    }
                }
                (Some(Stmt::Asciiz(_)), Section::Text) => {
                    return Err(at(AsmError::UnsupportedDirective(".asciiz in .text".into())));
                }
                (Some(Stmt::Inst(inst)), Section::Data) => {
                    return Err(at(AsmError::MalformedOperand(format!(
                        "instruction `{}` in .data",
                        inst.mnemonic
                    ))));
                }
            }
        }

        tracing::debug!(instructions = text.len(), data_words = data.len(), "first pass done");
        Ok(Layout { text, data, symbols: symbols.finish() })
    }

    fn second_pass(&self, layout: &Layout) -> Result<Vec<u32>> {
        let mut out = Vec::with_capacity(layout.text.len());
        for p in &layout.text {
            let word = self
                .encode(&p.inst, p.addr, &layout.symbols)
                .map_err(|e| e.at_line(p.line, &p.text))?;
            tracing::trace!("emit {:#010x}: {word:08x}", p.addr);
            out.push(word);
        }
        Ok(out)
    }

    fn encode(&self, inst: &Inst, addr: u32, symbols: &SymbolTable) -> Result<u32> {
        mips32::encode(&resolve(inst, addr, symbols)?)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AsmConfig::default())
    }
}

/// Turn a parsed instruction at `addr` into a concrete record.
pub fn resolve(inst: &Inst, addr: u32, symbols: &SymbolTable) -> Result<Instruction> {
    let r = |reg: Reg| reg.0;
    Ok(match inst {
        Inst::Syscall => Instruction::Syscall { code: 0 },
        Inst::R { mnemonic, rd, rs, rt } => Instruction::R {
            mnemonic: *mnemonic,
            rs: r(*rs),
            rt: r(*rt),
            rd: r(*rd),
            shamt: 0,
            funct: mnemonic.funct(),
        },
        Inst::I { mnemonic, rt, rs, imm } => {
            let value = match imm {
                Imm::Value(v) => {
                    parse::check_imm(*v, mnemonic.desc().imm)?;
                    bits::low16(*v as i32)
                }
                Imm::Hi(label) => symbols.data(label)? >> 16,
                Imm::Lo(label) => symbols.data(label)? & 0xFFFF,
            };
            Instruction::I { mnemonic: *mnemonic, rs: r(*rs), rt: r(*rt), imm: value as u16 }
        }
        Inst::Branch { mnemonic, rs, rt, target } => {
            let offset = match target {
                Target::Label(label) => branch_offset(addr, symbols.text(label)?),
                Target::Value(words) => *words,
            };
            parse::check_imm(offset, ImmKind::Signed)?;
            Instruction::I { mnemonic: *mnemonic, rs: r(*rs), rt: r(*rt), imm: bits::low16(offset as i32) as u16 }
        }
        Inst::Jump { mnemonic, target } => {
            let dest = match target {
                Target::Label(label) => symbols.text(label)?,
                Target::Value(v) => u32::try_from(*v)
                    .map_err(|_| AsmError::ImmediateOutOfRange { value: *v, bits: 32 })?,
            };
            if dest % 4 != 0 {
                return Err(AsmError::MalformedOperand(format!("jump target {dest:#010x} is not word aligned")));
            }
            debug_assert_eq!(*mnemonic, Mnemonic::J);
            Instruction::J { mnemonic: *mnemonic, index: jump_index(dest) }
        }
    })
}

/// Word offset from the instruction after the branch to `target`.
pub fn branch_offset(branch_addr: u32, target: u32) -> i64 {
    (target as i64 - (branch_addr as i64 + 4)) / 4
}

/// 26-bit word index of an absolute jump target (upper 4 bits dropped).
pub fn jump_index(target: u32) -> u32 {
    (target >> 2) & 0x03FF_FFFF
}

/// Null-terminate `bytes` and pack them little-endian, four to a word.
pub fn asciiz_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .iter()
        .copied()
        .chain(std::iter::once(0))
        .collect::<Vec<u8>>()
        .chunks(4)
        .map(|c| {
            let mut w = [0u8; 4];
            w[..c.len()].copy_from_slice(c);
            u32::from_le_bytes(w)
        })
        .collect()
}

/// Assemble with the default text/data base addresses.
pub fn assemble(source: &str) -> Result<Assembly> {
    Assembler::default().assemble(source)
}

pub fn assemble_line(line: &str) -> Result<Vec<u32>> {
    Assembler::default().assemble_line(line)
}
