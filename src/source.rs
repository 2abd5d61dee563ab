//! Raw source handling: comment stripping, label/directive classification
//! and operand tokenizing. Nothing here knows about encodings.

use std::fmt;

use crate::error::{AsmError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Text,
    Data,
}

/// An instruction line split into mnemonic and comma separated operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInst {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl SourceInst {
    pub fn new<I, S>(mnemonic: &str, operands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { mnemonic: mnemonic.to_string(), operands: operands.into_iter().map(Into::into).collect() }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (mnemonic, rest) = match s.split_once(char::is_whitespace) {
            Some((m, r)) => (m, r.trim()),
            None => (s, ""),
        };
        if mnemonic.is_empty() {
            return Err(AsmError::MalformedOperand("empty instruction".into()));
        }
        let mut operands = Vec::new();
        if !rest.is_empty() {
            for op in rest.split(',') {
                let op = op.trim();
                if op.is_empty() {
                    return Err(AsmError::MalformedOperand(format!("empty operand in `{s}`")));
                }
                operands.push(op.to_string());
            }
        }
        Ok(Self { mnemonic: mnemonic.to_string(), operands })
    }

    /// Operands as a fixed-size array, or `MalformedOperand` naming the expected form.
    pub fn expect<const N: usize>(&self, form: &str) -> Result<[&str; N]> {
        let ops: Vec<&str> = self.operands.iter().map(String::as_str).collect();
        ops.try_into().map_err(|_| {
            AsmError::MalformedOperand(format!(
                "`{}` expects {} operand(s): {} {form}",
                self.mnemonic, N, self.mnemonic
            ))
        })
    }
}

impl fmt::Display for SourceInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Section(Section),
    /// String bytes, without the terminating null.
    Asciiz(Vec<u8>),
    Inst(SourceInst),
}

/// One non-empty source line after comment stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the input.
    pub number: usize,
    pub text: String,
    pub label: Option<String>,
    pub stmt: Option<Stmt>,
}

/// Strip comments, drop empty lines and classify the rest.
pub fn classify(source: &str) -> Result<Vec<Line>> {
    let mut out = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let number = i + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let line = classify_line(number, text).map_err(|e| e.at_line(number, text))?;
        out.push(line);
    }
    Ok(out)
}

fn classify_line(number: usize, text: &str) -> Result<Line> {
    let (label, body) = split_label(text)?;
    let stmt = if body.is_empty() { None } else { Some(parse_stmt(body)?) };
    Ok(Line { number, text: text.to_string(), label, stmt })
}

fn split_label(text: &str) -> Result<(Option<String>, &str)> {
    // a colon inside a string literal is not a label separator
    let quote = text.find('"').unwrap_or(text.len());
    match text.find(':') {
        Some(p) if p < quote => {
            let name = text[..p].trim();
            if !is_identifier(name) {
                return Err(AsmError::MalformedOperand(format!("invalid label name `{name}`")));
            }
            Ok((Some(name.to_string()), text[p + 1..].trim()))
        }
        _ => Ok((None, text)),
    }
}

fn parse_stmt(body: &str) -> Result<Stmt> {
    if !body.starts_with('.') {
        return SourceInst::parse(body).map(Stmt::Inst);
    }
    let (dir, rest) = match body.split_once(char::is_whitespace) {
        Some((d, r)) => (d, r.trim()),
        None => (body, ""),
    };
    match dir {
        ".text" => Ok(Stmt::Section(Section::Text)),
        ".data" => Ok(Stmt::Section(Section::Data)),
        ".asciiz" => parse_string_literal(rest).map(Stmt::Asciiz),
        other => Err(AsmError::UnsupportedDirective(other.to_string())),
    }
}

/// Everything before the first `#` that is not inside a string literal.
pub fn strip_comment(line: &str) -> &str {
    let mut in_str = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_str => escaped = true,
            '"' => in_str = !in_str,
            '#' if !in_str => return &line[..i],
            _ => {}
        }
    }
    line
}

pub fn parse_string_literal(s: &str) -> Result<Vec<u8>> {
    let bad = || AsmError::MalformedOperand(format!("expected a quoted string, got `{s}`"));
    let inner = s.strip_prefix('"').and_then(|r| r.strip_suffix('"')).ok_or_else(bad)?;
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        let c = match c {
            '"' => return Err(bad()),
            '\\' => match chars.next() {
                Some('n') => '\n',
                Some('t') => '\t',
                Some('r') => '\r',
                Some('0') => '\0',
                Some('\\') => '\\',
                Some('"') => '"',
                Some(other) => {
                    return Err(AsmError::MalformedOperand(format!("unknown escape `\\{other}`")))
                }
                None => return Err(bad()),
            },
            c => c,
        };
        let mut buf = [0u8; 4];
        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
    Ok(bytes)
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Decimal or `0x` hex, optionally negative.
pub fn parse_imm(s: &str) -> Result<i64> {
    let bad = || AsmError::MalformedOperand(format!("bad immediate `{s}`"));
    let t = s.trim();
    let (neg, body) = match t.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (radix, digits) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, body),
    };
    // from_str_radix takes its own sign; only one is allowed, and only up front
    if !digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let v = i64::from_str_radix(digits, radix).map_err(|_| bad())?;
    if neg { v.checked_neg().ok_or_else(bad) } else { Ok(v) }
}

/// Split `offset(base)` into its parts; a missing offset reads as `0`.
pub fn parse_mem(s: &str) -> Result<(&str, &str)> {
    let t = s.trim();
    let bad = || AsmError::MalformedOperand(format!("expected offset(base), got `{s}`"));
    let open = t.find('(').ok_or_else(bad)?;
    let base = t[open + 1..].strip_suffix(')').ok_or_else(bad)?.trim();
    let offset = t[..open].trim();
    Ok((if offset.is_empty() { "0" } else { offset }, base))
}
