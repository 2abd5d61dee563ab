/// Everything that can go wrong while assembling or decoding.
///
/// None of these are recoverable at the word level: the assembler never
/// emits a placeholder word for a line it could not encode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("unknown opcode {opcode:#04x} / funct {funct:#04x}")]
    UnknownOpcodeOrFunct { opcode: u8, funct: u8 },
    #[error("undefined label `{0}`")]
    UndefinedLabel(String),
    #[error("label `{0}` is already defined in this section")]
    DuplicateLabel(String),
    #[error("malformed operand: {0}")]
    MalformedOperand(String),
    #[error("immediate {value} does not fit in {bits} bits")]
    ImmediateOutOfRange { value: i64, bits: u32 },
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    #[error("unsupported directive `{0}`")]
    UnsupportedDirective(String),
    #[error("value {value:#x} overflows the {width}-bit `{field}` field")]
    FieldOverflow { field: &'static str, value: u32, width: u32 },
    #[error("line {line}: `{text}`: {source}")]
    AtLine {
        line: usize,
        text: String,
        #[source]
        source: Box<AsmError>,
    },
}

impl AsmError {
    pub fn at_line(self, line: usize, text: &str) -> Self {
        match self {
            // keep the innermost location
            e @ AsmError::AtLine { .. } => e,
            e => AsmError::AtLine { line, text: text.to_string(), source: Box::new(e) },
        }
    }

    /// The error with any line information peeled off.
    pub fn kind(&self) -> &AsmError {
        match self {
            AsmError::AtLine { source, .. } => source.kind(),
            e => e,
        }
    }
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
