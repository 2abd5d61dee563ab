use mips_rs::disasm::{fmt_asm, fmt_decoded};
use mips_rs::instructions::{Class, Mnemonic, TABLE};
use mips_rs::{assemble_line, Decoder, Encoder, Instruction, Mips32Decoder};
use pretty_assertions::assert_eq;

#[test]
fn encode_decode_every_mnemonic() {
    let dec = Mips32Decoder::new();
    for desc in TABLE {
        for (rs, rt, rd, imm) in [(0u8, 0u8, 0u8, 0u16), (1, 2, 3, 0x7FFF), (31, 17, 8, 0x8000), (29, 31, 30, 0xFFFF)] {
            let m = desc.mnemonic;
            let inst = match desc.class {
                Class::R => Instruction::R { mnemonic: m, rs, rt, rd, shamt: rd % 32, funct: m.funct() },
                Class::I => Instruction::I { mnemonic: m, rs: if m.name() == "lui" { 0 } else { rs }, rt, imm },
                Class::J => Instruction::J { mnemonic: m, index: (imm as u32) << 10 | rs as u32 },
                Class::Syscall => Instruction::Syscall { code: imm as u32 },
            };
            let word = dec.encode(&inst).unwrap();
            assert_eq!(dec.decode(word).unwrap(), inst, "{} {word:08x}", desc.name);
        }
    }
}

#[test]
fn oversized_fields_are_rejected() {
    let dec = Mips32Decoder::new();
    let inst = Instruction::I { mnemonic: Mnemonic::Ori, rs: 40, rt: 0, imm: 0 };
    assert!(dec.encode(&inst).is_err());
    let j = Instruction::J { mnemonic: Mnemonic::J, index: 1 << 26 };
    assert!(dec.encode(&j).is_err());
}

#[test]
fn assembler_syntax_reassembles() {
    let dec = Mips32Decoder::new();
    let words = [
        0x0022_1820u32, // add $v1, $at, $v0
        0x0009_082A,    // slt $at, $zero, $t1
        0x2529_FFFF,    // addiu $t1, $t1, -1
        0x3128_00FF,    // andi $t0, $t1, 0xff
        0x3428_0000,    // ori $t0, $at, 0x0
        0x3C01_1001,    // lui $at, 0x1001
        0x1420_FFFD,    // bne $at, $zero, -3
        0x8FA8_FFFC,    // lw $t0, -4($sp)
        0xAFBF_0000,    // sw $ra, 0($sp)
        0x0810_0000,    // j 0x00400000
        0x0000_000C,    // syscall
    ];
    for w in words {
        let text = fmt_asm(&dec.decode(w).unwrap()).unwrap();
        assert_eq!(assemble_line(&text).unwrap(), vec![w], "{text}");
    }
}

#[test]
fn fields_without_syntax_are_not_rendered() {
    let dec = Mips32Decoder::new();
    // add $v1, $at, $v0 with shamt = 1
    let d = dec.decode(0x0022_1860).unwrap();
    assert_eq!(d, Instruction::R { mnemonic: Mnemonic::Add, rs: 1, rt: 2, rd: 3, shamt: 1, funct: 0x20 });
    assert_eq!(fmt_asm(&d), None);
    assert_eq!(
        fmt_decoded(&d),
        "add {opcode: 00, rs: 01, rt: 02, rd: 03, shmt: 01, funct: 20}"
    );

    // syscall with code 1
    let d = dec.decode(0x0000_004C).unwrap();
    assert_eq!(d, Instruction::Syscall { code: 1 });
    assert_eq!(fmt_asm(&d), None);
    assert_eq!(dec.encode(&d).unwrap(), 0x0000_004C);
}
