//! 32-bit instruction word bit-field codec.
//!
//! Fields are described by their least significant bit and width. Packing
//! refuses to truncate: a value wider than its field is a
//! [`AsmError::FieldOverflow`], so callers must mask or range-check first.

use bitvec::prelude::*;
use std::ops::Range;

use crate::error::{AsmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub lsb: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(name: &'static str, lsb: u32, width: u32) -> Self {
        Self { name, lsb, width }
    }

    pub const fn max(&self) -> u32 {
        if self.width >= 32 { u32::MAX } else { (1u32 << self.width) - 1 }
    }

    fn range(&self) -> Range<usize> {
        self.lsb as usize..(self.lsb + self.width) as usize
    }
}

pub const OPCODE: Field = Field::new("opcode", 26, 6);
pub const RS: Field = Field::new("rs", 21, 5);
pub const RT: Field = Field::new("rt", 16, 5);
pub const RD: Field = Field::new("rd", 11, 5);
pub const SHAMT: Field = Field::new("shamt", 6, 5);
pub const FUNCT: Field = Field::new("funct", 0, 6);
pub const IMM: Field = Field::new("immediate", 0, 16);
pub const INDEX: Field = Field::new("index", 0, 26);
/// `syscall` code, bits 25..6.
pub const CODE: Field = Field::new("code", 6, 20);

pub const R_LAYOUT: [Field; 6] = [OPCODE, RS, RT, RD, SHAMT, FUNCT];
pub const I_LAYOUT: [Field; 4] = [OPCODE, RS, RT, IMM];
pub const J_LAYOUT: [Field; 2] = [OPCODE, INDEX];

/// Pack `(field, value)` pairs into one word. Unlisted bits stay zero.
pub fn pack(fields: &[(Field, u32)]) -> Result<u32> {
    let mut word = 0u32;
    let bits = word.view_bits_mut::<Lsb0>();
    for &(field, value) in fields {
        if value > field.max() {
            return Err(AsmError::FieldOverflow { field: field.name, value, width: field.width });
        }
        bits[field.range()].store_le::<u32>(value);
    }
    Ok(word)
}

pub fn extract(word: u32, field: Field) -> u32 {
    word.view_bits::<Lsb0>()[field.range()].load_le::<u32>()
}

/// Unpack `word` according to `layout`, one value per field, in layout order.
pub fn unpack(word: u32, layout: &[Field]) -> Vec<u32> {
    layout.iter().map(|&f| extract(word, f)).collect()
}

pub fn to_hex(word: u32) -> String {
    format!("{word:08x}")
}

/// Parse an 8-digit hex word, with or without a `0x` prefix.
pub fn parse_hex_word(s: &str) -> Result<u32> {
    let t = s.trim();
    let digits = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AsmError::MalformedOperand(format!("expected 8 hex digits, got `{s}`")));
    }
    u32::from_str_radix(digits, 16).map_err(|e| AsmError::MalformedOperand(e.to_string()))
}

pub fn sign_extend16(value: u16) -> i32 {
    value as i16 as i32
}

/// Two's-complement low 16 bits of a value already known to fit.
pub fn low16(value: i32) -> u32 {
    (value as u32) & 0xFFFF
}
