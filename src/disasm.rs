use crate::bits;
use crate::decoder::{Decoder, Instruction};
use crate::error::Result;
use crate::instructions::{Mnemonic, Reg};
use crate::isa::mips32::Mips32Decoder;

/// Field listing, e.g. `add {opcode: 00, rs: 01, rt: 02, rd: 03, shmt: 00, funct: 20}`.
pub fn fmt_decoded(d: &Instruction) -> String {
    match *d {
        Instruction::R { mnemonic, rs, rt, rd, shamt, funct } => format!(
            "{mnemonic} {{opcode: {:02x}, rs: {rs:02x}, rt: {rt:02x}, rd: {rd:02x}, shmt: {shamt:02x}, funct: {funct:02x}}}",
            d.opcode()
        ),
        Instruction::I { mnemonic, rs, rt, imm } => format!(
            "{mnemonic} {{opcode: {:02x}, rs(base): {rs:02x}, rt: {rt:02x}, immediate(offset): {imm:04x}}}",
            d.opcode()
        ),
        Instruction::J { mnemonic, index } => {
            format!("{mnemonic} {{opcode: {:02x}, index: {index:07x}}}", d.opcode())
        }
        Instruction::Syscall { code } => format!(
            "syscall {{opcode: {:02x}, code: {code:06x}, funct: {:02x}}}",
            d.opcode(),
            Mnemonic::Syscall.funct()
        ),
    }
}

/// Assembler syntax, accepted back by [`crate::assembler::assemble_line`].
///
/// `None` for words with a non-zero `shamt` or syscall code; the assembler
/// has no syntax for either.
pub fn fmt_asm(d: &Instruction) -> Option<String> {
    let reg = |n: u8| Reg(n);
    Some(match *d {
        Instruction::R { shamt: 1.., .. } | Instruction::Syscall { code: 1.. } => return None,
        Instruction::R { mnemonic, rs, rt, rd, .. } => {
            format!("{mnemonic} {}, {}, {}", reg(rd), reg(rs), reg(rt))
        }
        Instruction::I { mnemonic, rs, rt, imm } => match mnemonic {
            Mnemonic::Lui => format!("lui {}, {imm:#x}", reg(rt)),
            Mnemonic::Lw | Mnemonic::Sw => {
                format!("{mnemonic} {}, {}({})", reg(rt), bits::sign_extend16(imm), reg(rs))
            }
            Mnemonic::Beq | Mnemonic::Bne => {
                format!("{mnemonic} {}, {}, {}", reg(rs), reg(rt), bits::sign_extend16(imm))
            }
            Mnemonic::Addiu => format!("addiu {}, {}, {}", reg(rt), reg(rs), bits::sign_extend16(imm)),
            _ => format!("{mnemonic} {}, {}, {imm:#x}", reg(rt), reg(rs)),
        },
        Instruction::J { mnemonic, index } => format!("{mnemonic} {:#010x}", index << 2),
        Instruction::Syscall { .. } => "syscall".to_string(),
    })
}

/// Decode an 8-hex-digit word and render its field listing.
pub fn disassemble_hex(hex: &str) -> Result<String> {
    let word = bits::parse_hex_word(hex)?;
    let d = Mips32Decoder::new().decode(word)?;
    Ok(fmt_decoded(&d))
}
