use crate::bits::{self, CODE, FUNCT, IMM, INDEX, OPCODE, RD, RS, RT, SHAMT};
use crate::decoder::{Decoder, Encoder, Instruction};
use crate::error::{AsmError, Result};
use crate::instructions::{Class, InstrTable, Mnemonic};

/// MIPS32 decoder/encoder for the supported subset:
/// add, sub, and, or, slt, syscall, addiu, andi, beq, bne, lui, lw, ori, sw, j.
pub struct Mips32Decoder {
    table: InstrTable,
}

impl Mips32Decoder {
    pub fn new() -> Self {
        Self { table: InstrTable::new() }
    }
}

impl Default for Mips32Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Mips32Decoder {
    fn decode(&self, raw32: u32) -> Result<Instruction> {
        let opcode = bits::extract(raw32, OPCODE) as u8;
        let funct = bits::extract(raw32, FUNCT) as u8;
        let desc = self.table.by_opcode(opcode, funct)?;

        let rs = bits::extract(raw32, RS) as u8;
        let rt = bits::extract(raw32, RT) as u8;
        Ok(match desc.class {
            Class::Syscall => Instruction::Syscall { code: bits::extract(raw32, CODE) },
            Class::R => Instruction::R {
                mnemonic: desc.mnemonic,
                rs,
                rt,
                rd: bits::extract(raw32, RD) as u8,
                shamt: bits::extract(raw32, SHAMT) as u8,
                funct,
            },
            Class::J => Instruction::J { mnemonic: desc.mnemonic, index: bits::extract(raw32, INDEX) },
            Class::I => Instruction::I {
                mnemonic: desc.mnemonic,
                // lui has no source register
                rs: if desc.mnemonic == Mnemonic::Lui { 0 } else { rs },
                rt,
                imm: bits::extract(raw32, IMM) as u16,
            },
        })
    }
}

impl Encoder for Mips32Decoder {
    fn encode(&self, inst: &Instruction) -> Result<u32> {
        encode(inst)
    }
}

/// Pack a record into its word. The record's class must match its mnemonic.
pub fn encode(inst: &Instruction) -> Result<u32> {
    let m = inst.mnemonic();
    let mismatch = || AsmError::MalformedOperand(format!("`{m}` cannot be encoded as {inst:?}"));
    match *inst {
        Instruction::Syscall { code } => bits::pack(&[(CODE, code), (FUNCT, Mnemonic::Syscall.funct() as u32)]),
        Instruction::R { mnemonic, rs, rt, rd, shamt, funct } => {
            if mnemonic.class() != Class::R || funct != mnemonic.funct() {
                return Err(mismatch());
            }
            bits::pack(&[
                (OPCODE, 0),
                (RS, rs as u32),
                (RT, rt as u32),
                (RD, rd as u32),
                (SHAMT, shamt as u32),
                (FUNCT, funct as u32),
            ])
        }
        Instruction::I { mnemonic, rs, rt, imm } => {
            if mnemonic.class() != Class::I {
                return Err(mismatch());
            }
            let rs = if mnemonic == Mnemonic::Lui { 0 } else { rs };
            bits::pack(&[
                (OPCODE, mnemonic.opcode() as u32),
                (RS, rs as u32),
                (RT, rt as u32),
                (IMM, imm as u32),
            ])
        }
        Instruction::J { mnemonic, index } => {
            if mnemonic.class() != Class::J {
                return Err(mismatch());
            }
            bits::pack(&[(OPCODE, mnemonic.opcode() as u32), (INDEX, index)])
        }
    }
}
