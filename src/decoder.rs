use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instructions::{Class, Mnemonic};

/// One decoded (or fully resolved) machine instruction.
///
/// Each variant holds only the fields its encoding uses. `opcode` is implied
/// by the mnemonic and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    R { mnemonic: Mnemonic, rs: u8, rt: u8, rd: u8, shamt: u8, funct: u8 },
    I { mnemonic: Mnemonic, rs: u8, rt: u8, imm: u16 },
    J { mnemonic: Mnemonic, index: u32 },
    Syscall { code: u32 },
}

impl Instruction {
    pub fn mnemonic(&self) -> Mnemonic {
        match *self {
            Instruction::R { mnemonic, .. }
            | Instruction::I { mnemonic, .. }
            | Instruction::J { mnemonic, .. } => mnemonic,
            Instruction::Syscall { .. } => Mnemonic::Syscall,
        }
    }

    pub fn opcode(&self) -> u8 {
        self.mnemonic().opcode()
    }

    pub fn class(&self) -> Class {
        self.mnemonic().class()
    }
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Result<Instruction>;
}

pub trait Encoder {
    fn encode(&self, inst: &Instruction) -> Result<u32>;
}
