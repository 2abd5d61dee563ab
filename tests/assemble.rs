use mips_rs::{assemble, assemble_line, AsmConfig, Assembler};
use pretty_assertions::assert_eq;

const PROGRAM: &str = r#"
# count down from 100
.data
str: .asciiz "AB"

.text
main:
    la   $t0, str        # two words
    li   $t1, 100
loop:
    addiu $t1, $t1, -1
    blt  $zero, $t1, loop
    j    main
    syscall
"#;

#[test]
fn full_program() {
    let out = assemble(PROGRAM).unwrap();
    assert_eq!(
        out.text_hex(),
        vec![
            "3c011001", // lui  $at, 0x1001
            "34280000", // ori  $t0, $at, 0x0000
            "24090064", // addiu $t1, $zero, 100
            "2529ffff", // addiu $t1, $t1, -1
            "0009082a", // slt  $at, $zero, $t1
            "1420fffd", // bne  $at, $zero, -3
            "08100000", // j    0x00400000
            "0000000c", // syscall
        ]
    );
    assert_eq!(out.data_hex(), vec!["00004241"]);
    assert_eq!(out.symbols.text("main").unwrap(), 0x0040_0000);
    assert_eq!(out.symbols.text("loop").unwrap(), 0x0040_000C);
    assert_eq!(out.symbols.data("str").unwrap(), 0x1001_0000);
}

#[test]
fn li_matches_addiu() {
    assert_eq!(assemble_line("li $t0, 100").unwrap(), vec![0x2408_0064]);
    assert_eq!(assemble_line("addiu $t0, $zero, 100").unwrap(), vec![0x2408_0064]);
}

#[test]
fn li_wide_uses_at() {
    assert_eq!(assemble_line("li $t0, 0x12345678").unwrap(), vec![0x3C01_1234, 0x3428_5678]);
}

#[test]
fn move_is_add_from_zero() {
    assert_eq!(assemble_line("move $t1, $t2").unwrap(), vec![0x000A_4820]);
}

#[test]
fn backward_branch_offset_is_negative() {
    let src = "top: add $t0, $t1, $t2\n sub $t0, $t0, $t1\n beq $t0, $zero, top\n";
    let out = assemble(src).unwrap();
    let beq = out.text[2];
    let offset = (beq & 0xFFFF) as u16 as i16;
    // (0x00400000 - (0x00400008 + 4)) / 4
    assert_eq!(offset, -3);
    assert_eq!(beq, 0x1100_FFFD);
}

#[test]
fn forward_branch_and_jump() {
    let src = ".text\n beq $t0, $t1, done\n add $t0, $t0, $t0\n j done\ndone: syscall\n";
    let out = assemble(src).unwrap();
    assert_eq!(out.text[0], 0x1109_0002);
    assert_eq!(out.text[2], 0x0810_0003);
}

#[test]
fn data_labels_follow_word_count() {
    let src = r#"
.data
a: .asciiz "ABCD"
b:
   .asciiz "x"
.text
   la $t0, b
"#;
    let out = assemble(src).unwrap();
    assert_eq!(out.data, vec![0x4443_4241, 0x0000_0000, 0x0000_0078]);
    assert_eq!(out.symbols.data("a").unwrap(), 0x1001_0000);
    assert_eq!(out.symbols.data("b").unwrap(), 0x1001_0008);
    assert_eq!(out.text, vec![0x3C01_1001, 0x3428_0008]);
}

#[test]
fn text_is_the_default_section() {
    let out = assemble("add $v1, $at, $v0\n").unwrap();
    assert_eq!(out.text, vec![0x0022_1820]);
    assert!(out.data.is_empty());
}

#[test]
fn loads_and_stores() {
    let out = assemble("lw $t0, -4($sp)\nsw $ra, ($sp)\nlui $t2, 0xffff\nandi $t0, $t1, 0xff\n").unwrap();
    assert_eq!(out.text, vec![0x8FA8_FFFC, 0xAFBF_0000, 0x3C0A_FFFF, 0x3128_00FF]);
}

#[test]
fn custom_bases() {
    let asm = Assembler::new(AsmConfig { text_base: 0, data_base: 0x2000 });
    let out = asm.assemble(".data\nm: .asciiz \"\"\n.text\nmain: la $a0, m\n j main\n").unwrap();
    assert_eq!(out.text, vec![0x3C01_0000, 0x3424_2000, 0x0800_0000]);
    assert_eq!(out.data, vec![0]);
}

#[test]
fn andi_writes_its_first_operand() {
    // andi reads like ori: destination first, encoded in rt
    assert_eq!(assemble_line("andi $t0, $t1, 0xff").unwrap(), vec![0x3128_00FF]);
    assert_eq!(assemble_line("ori $t0, $t1, 0xff").unwrap(), vec![0x3528_00FF]);
    assert_eq!(assemble_line("addiu $t0, $t1, 255").unwrap(), vec![0x2528_00FF]);
}
