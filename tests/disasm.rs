use mips_rs::disasm::{disassemble_hex, fmt_decoded};
use mips_rs::{AsmError, Decoder, Mips32Decoder};
use pretty_assertions::assert_eq;

#[test]
fn r_type_fields() {
    assert_eq!(
        disassemble_hex("00221820").unwrap(),
        "add {opcode: 00, rs: 01, rt: 02, rd: 03, shmt: 00, funct: 20}"
    );
    assert_eq!(
        disassemble_hex("0009082a").unwrap(),
        "slt {opcode: 00, rs: 00, rt: 09, rd: 01, shmt: 00, funct: 2a}"
    );
}

#[test]
fn i_type_fields() {
    assert_eq!(
        disassemble_hex("24080064").unwrap(),
        "addiu {opcode: 09, rs(base): 00, rt: 08, immediate(offset): 0064}"
    );
    assert_eq!(
        disassemble_hex("1420fffd").unwrap(),
        "bne {opcode: 05, rs(base): 01, rt: 00, immediate(offset): fffd}"
    );
}

#[test]
fn lui_hides_rs() {
    // rs bits set to 1 in the word
    assert_eq!(
        disassemble_hex("3c2a1001").unwrap(),
        "lui {opcode: 0f, rs(base): 00, rt: 0a, immediate(offset): 1001}"
    );
}

#[test]
fn j_and_syscall() {
    assert_eq!(disassemble_hex("08100000").unwrap(), "j {opcode: 02, index: 0100000}");
    assert_eq!(disassemble_hex("0000000c").unwrap(), "syscall {opcode: 00, code: 000000, funct: 0c}");
}

#[test]
fn unknown_encodings_are_errors() {
    let dec = Mips32Decoder::new();
    assert_eq!(dec.decode(0x0000_0021).unwrap_err(), AsmError::UnknownOpcodeOrFunct { opcode: 0, funct: 0x21 });
    assert_eq!(dec.decode(0xFC00_0000).unwrap_err(), AsmError::UnknownOpcodeOrFunct { opcode: 0x3F, funct: 0 });
    assert!(disassemble_hex("0022182").is_err());
}

#[test]
fn decode_then_format() {
    let dec = Mips32Decoder::new();
    let d = dec.decode(0x8FA8_FFFC).unwrap();
    assert_eq!(fmt_decoded(&d), "lw {opcode: 23, rs(base): 1d, rt: 08, immediate(offset): fffc}");
}
