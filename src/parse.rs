//! Typed, validated form of a concrete (non-pseudo) instruction line.
//!
//! Labels stay symbolic here; they are resolved once every address is known.

use crate::error::{AsmError, Result};
use crate::instructions::{ImmKind, InstrTable, Mnemonic, Reg, Shape};
use crate::source::{self, SourceInst};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Label(String),
    /// Branches: a word offset. Jumps: an absolute byte address.
    Value(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Value(i64),
    /// Upper half of a data label's address (`%hi(label)`).
    Hi(String),
    /// Lower half of a data label's address (`%lo(label)`).
    Lo(String),
}

impl Imm {
    pub fn hi(label: &str) -> String {
        format!("%hi({label})")
    }

    pub fn lo(label: &str) -> String {
        format!("%lo({label})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    R { mnemonic: Mnemonic, rd: Reg, rs: Reg, rt: Reg },
    Syscall,
    /// addiu, andi, ori, lui, lw, sw. `lui` always carries rs = $zero.
    I { mnemonic: Mnemonic, rt: Reg, rs: Reg, imm: Imm },
    Branch { mnemonic: Mnemonic, rs: Reg, rt: Reg, target: Target },
    Jump { mnemonic: Mnemonic, target: Target },
}

pub fn parse_inst(table: &InstrTable, line: &SourceInst) -> Result<Inst> {
    let desc = table.by_mnemonic(&line.mnemonic)?;
    let m = desc.mnemonic;
    let reg = |s: &str| table.register(s);
    let imm = |s: &str| {
        let imm = parse_imm_operand(s)?;
        if let Imm::Value(v) = imm {
            check_imm(v, desc.imm)?;
        }
        Ok::<_, AsmError>(imm)
    };

    Ok(match desc.shape {
        Shape::Empty => {
            line.expect::<0>("")?;
            Inst::Syscall
        }
        Shape::RdRsRt => {
            let [rd, rs, rt] = line.expect::<3>("rd, rs, rt")?;
            Inst::R { mnemonic: m, rd: reg(rd)?, rs: reg(rs)?, rt: reg(rt)? }
        }
        Shape::RtRsImm => {
            let [rt, rs, i] = line.expect::<3>("rt, rs, imm")?;
            Inst::I { mnemonic: m, rt: reg(rt)?, rs: reg(rs)?, imm: imm(i)? }
        }
        Shape::RtImm => {
            let [rt, i] = line.expect::<2>("rt, imm")?;
            Inst::I { mnemonic: m, rt: reg(rt)?, rs: Reg::ZERO, imm: imm(i)? }
        }
        Shape::RtOffsetBase => {
            let [rt, mem] = line.expect::<2>("rt, offset(base)")?;
            let (offset, base) = source::parse_mem(mem)?;
            Inst::I { mnemonic: m, rt: reg(rt)?, rs: reg(base)?, imm: imm(offset)? }
        }
        Shape::RsRtTarget => {
            let [rs, rt, t] = line.expect::<3>("rs, rt, target")?;
            Inst::Branch { mnemonic: m, rs: reg(rs)?, rt: reg(rt)?, target: parse_target(t)? }
        }
        Shape::Target => {
            let [t] = line.expect::<1>("target")?;
            Inst::Jump { mnemonic: m, target: parse_target(t)? }
        }
    })
}

fn parse_target(s: &str) -> Result<Target> {
    if source::is_identifier(s) {
        return Ok(Target::Label(s.to_string()));
    }
    source::parse_imm(s).map(Target::Value)
}

fn parse_imm_operand(s: &str) -> Result<Imm> {
    let placeholder = |prefix: &str| {
        s.strip_prefix(prefix)
            .and_then(|r| r.strip_suffix(')'))
            .map(str::trim)
            .filter(|l| source::is_identifier(l))
            .map(str::to_string)
    };
    if let Some(label) = placeholder("%hi(") {
        return Ok(Imm::Hi(label));
    }
    if let Some(label) = placeholder("%lo(") {
        return Ok(Imm::Lo(label));
    }
    source::parse_imm(s).map(Imm::Value)
}

/// Range check for a 16-bit immediate.
pub fn check_imm(v: i64, kind: ImmKind) -> Result<()> {
    let ok = match kind {
        ImmKind::Signed => (i16::MIN as i64..=i16::MAX as i64).contains(&v),
        ImmKind::Unsigned => (0..=u16::MAX as i64).contains(&v),
    };
    if ok { Ok(()) } else { Err(AsmError::ImmediateOutOfRange { value: v, bits: 16 }) }
}
