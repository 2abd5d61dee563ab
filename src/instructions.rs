use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{AsmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mnemonic {
    Add,
    Sub,
    And,
    Or,
    Slt,
    Syscall,
    Addiu,
    Andi,
    Beq,
    Bne,
    Lui,
    Lw,
    Ori,
    Sw,
    J,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Class {
    R,
    I,
    J,
    Syscall,
}

/// Operand order as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `rd, rs, rt`
    RdRsRt,
    /// no operands
    Empty,
    /// `rt, rs, imm` (destination first, encoded in rt)
    RtRsImm,
    /// `rs, rt, target`
    RsRtTarget,
    /// `rt, imm`
    RtImm,
    /// `rt, offset(base)`
    RtOffsetBase,
    /// `target`
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmKind {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub name: &'static str,
    pub class: Class,
    pub opcode: u8,
    pub funct: u8,
    pub shape: Shape,
    pub imm: ImmKind,
}

const fn r(mnemonic: Mnemonic, name: &'static str, funct: u8) -> InstrDesc {
    InstrDesc { mnemonic, name, class: Class::R, opcode: 0x00, funct, shape: Shape::RdRsRt, imm: ImmKind::Unsigned }
}

const fn i(mnemonic: Mnemonic, name: &'static str, opcode: u8, shape: Shape, imm: ImmKind) -> InstrDesc {
    InstrDesc { mnemonic, name, class: Class::I, opcode, funct: 0, shape, imm }
}

pub const TABLE: &[InstrDesc] = &[
    r(Mnemonic::Add, "add", 0x20),
    r(Mnemonic::Sub, "sub", 0x22),
    r(Mnemonic::And, "and", 0x24),
    r(Mnemonic::Or, "or", 0x25),
    r(Mnemonic::Slt, "slt", 0x2A),
    InstrDesc {
        mnemonic: Mnemonic::Syscall,
        name: "syscall",
        class: Class::Syscall,
        opcode: 0x00,
        funct: 0x0C,
        shape: Shape::Empty,
        imm: ImmKind::Unsigned,
    },
    i(Mnemonic::Addiu, "addiu", 0x09, Shape::RtRsImm, ImmKind::Signed),
    i(Mnemonic::Andi, "andi", 0x0C, Shape::RtRsImm, ImmKind::Unsigned),
    i(Mnemonic::Beq, "beq", 0x04, Shape::RsRtTarget, ImmKind::Signed),
    i(Mnemonic::Bne, "bne", 0x05, Shape::RsRtTarget, ImmKind::Signed),
    i(Mnemonic::Lui, "lui", 0x0F, Shape::RtImm, ImmKind::Unsigned),
    i(Mnemonic::Lw, "lw", 0x23, Shape::RtOffsetBase, ImmKind::Signed),
    i(Mnemonic::Ori, "ori", 0x0D, Shape::RtRsImm, ImmKind::Unsigned),
    i(Mnemonic::Sw, "sw", 0x2B, Shape::RtOffsetBase, ImmKind::Signed),
    InstrDesc {
        mnemonic: Mnemonic::J,
        name: "j",
        class: Class::J,
        opcode: 0x02,
        funct: 0,
        shape: Shape::Target,
        imm: ImmKind::Unsigned,
    },
];

pub const REGISTERS: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3",
    "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7",
    "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7",
    "$t8", "$t9", "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// A 5-bit register number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reg(pub u8);

impl Reg {
    pub const ZERO: Reg = Reg(0);

    pub fn name(self) -> &'static str {
        REGISTERS.get(self.0 as usize).copied().unwrap_or("$?")
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Mnemonic {
    pub fn desc(self) -> &'static InstrDesc {
        // TABLE rows are in declaration order
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name
    }

    pub fn class(self) -> Class {
        self.desc().class
    }

    pub fn opcode(self) -> u8 {
        self.desc().opcode
    }

    pub fn funct(self) -> u8 {
        self.desc().funct
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup tables built once from [`TABLE`] and [`REGISTERS`] and then only read.
#[derive(Debug, Clone)]
pub struct InstrTable {
    by_name: HashMap<&'static str, &'static InstrDesc>,
    by_code: HashMap<(u8, u8), &'static InstrDesc>,
    regs: HashMap<&'static str, Reg>,
}

impl InstrTable {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        let mut by_code = HashMap::new();
        for d in TABLE {
            by_name.insert(d.name, d);
            // only opcode 0 is disambiguated by funct
            let funct = if d.opcode == 0 { d.funct } else { 0 };
            by_code.insert((d.opcode, funct), d);
        }
        let regs = REGISTERS.iter().enumerate().map(|(n, &name)| (name, Reg(n as u8))).collect();
        Self { by_name, by_code, regs }
    }

    pub fn by_mnemonic(&self, name: &str) -> Result<&'static InstrDesc> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| AsmError::UnknownMnemonic(name.to_string()))
    }

    pub fn by_opcode(&self, opcode: u8, funct: u8) -> Result<&'static InstrDesc> {
        let key = if opcode == 0 { (0, funct) } else { (opcode, 0) };
        self.by_code
            .get(&key)
            .copied()
            .ok_or(AsmError::UnknownOpcodeOrFunct { opcode, funct })
    }

    /// Symbolic names (`$t0`) and numeric forms (`$8`).
    pub fn register(&self, s: &str) -> Result<Reg> {
        let t = s.trim();
        if let Some(&r) = self.regs.get(t) {
            return Ok(r);
        }
        match t.strip_prefix('$').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if n < 32 => Ok(Reg(n)),
            _ => Err(AsmError::UnknownRegister(t.to_string())),
        }
    }
}

impl Default for InstrTable {
    fn default() -> Self {
        Self::new()
    }
}
