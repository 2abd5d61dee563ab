use mips_rs::{assemble, assemble_line, AsmError};

fn kind(src: &str) -> AsmError {
    assemble(src).unwrap_err().kind().clone()
}

#[test]
fn undefined_label_fails_whole_assembly() {
    let err = assemble(".text\nadd $t0, $t0, $t0\n  j nowhere\n").unwrap_err();
    match err {
        AsmError::AtLine { line, text, source } => {
            assert_eq!(line, 3);
            assert_eq!(text, "j nowhere");
            assert_eq!(*source, AsmError::UndefinedLabel("nowhere".into()));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn la_resolves_against_data_only() {
    assert_eq!(kind("main: la $t0, main\n"), AsmError::UndefinedLabel("main".into()));
    assert_eq!(
        kind(".data\ns: .asciiz \"x\"\n.text\n beq $t0, $t0, s\n"),
        AsmError::UndefinedLabel("s".into())
    );
}

#[test]
fn duplicate_labels() {
    assert_eq!(kind("a: add $t0, $t0, $t0\na: syscall\n"), AsmError::DuplicateLabel("a".into()));
    assert_eq!(
        kind(".data\nx: .asciiz \"1\"\nx: .asciiz \"2\"\n"),
        AsmError::DuplicateLabel("x".into())
    );
}

#[test]
fn unknown_mnemonic_is_not_a_zero_word() {
    assert_eq!(kind("addu $t0, $t1, $t2\n"), AsmError::UnknownMnemonic("addu".into()));
}

#[test]
fn malformed_operands() {
    assert!(matches!(kind("add $t0, $t1\n"), AsmError::MalformedOperand(_)));
    assert!(matches!(kind("lw $t0, 4\n"), AsmError::MalformedOperand(_)));
    assert!(matches!(kind(".data\nadd $t0, $t0, $t0\n"), AsmError::MalformedOperand(_)));
    assert!(matches!(kind(".text\n.asciiz \"no\"\n"), AsmError::UnsupportedDirective(_)));
    assert!(matches!(kind(".globl main\n"), AsmError::UnsupportedDirective(_)));
    assert!(matches!(kind("add $t0, $t1, $q1\n"), AsmError::UnknownRegister(_)));
}

#[test]
fn immediate_ranges() {
    assert_eq!(
        assemble_line("beq $t0, $t1, 40000").unwrap_err(),
        AsmError::ImmediateOutOfRange { value: 40000, bits: 16 }
    );
    assert_eq!(
        assemble_line("addiu $t0, $t0, 40000").unwrap_err(),
        AsmError::ImmediateOutOfRange { value: 40000, bits: 16 }
    );
    assert!(assemble_line("j 0x00400002").is_err());
}

#[test]
fn doubled_signs_are_malformed() {
    for line in ["addiu $t0, $zero, --5", "li $t0, 0x-10", "ori $t0, $t0, 0x+10", "li $t0, --9223372036854775808"] {
        assert!(matches!(assemble_line(line), Err(AsmError::MalformedOperand(_))), "{line}");
    }
}
