pub mod assembler;
pub mod bits;
pub mod config;
pub mod decoder;
pub mod disasm;
pub mod error;
pub mod instructions;
pub mod parse;
pub mod pseudo;
pub mod source;
pub mod symbols;

pub mod isa {
    pub mod mips32; // MIPS32 integer subset
}

pub use assembler::{assemble, assemble_line, Assembler, Assembly};
pub use config::{AsmConfig, DATA_BASE, TEXT_BASE};
pub use decoder::{Decoder, Encoder, Instruction};
pub use error::AsmError;
pub use isa::mips32::Mips32Decoder;
