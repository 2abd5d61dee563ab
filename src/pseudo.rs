//! Pseudo-instruction expansion.
//!
//! Runs before any address is assigned, so the number of lines produced for
//! a source line depends only on that line's text.

use crate::error::{AsmError, Result};
use crate::parse::Imm;
use crate::source::{self, SourceInst};

/// Expand one line into 1..=2 concrete lines. Non-pseudo lines come back unchanged.
pub fn expand(line: &SourceInst) -> Result<Vec<SourceInst>> {
    let out = match line.mnemonic.as_str() {
        "li" => {
            let [rd, imm] = line.expect::<2>("rd, imm")?;
            let v = source::parse_imm(imm)?;
            if !(i32::MIN as i64..=u32::MAX as i64).contains(&v) {
                return Err(AsmError::ImmediateOutOfRange { value: v, bits: 32 });
            }
            if (i16::MIN as i64..=i16::MAX as i64).contains(&v) {
                vec![SourceInst::new("addiu", [rd, "$zero", imm])]
            } else {
                let word = v as u32;
                vec![
                    SourceInst::new("lui", ["$at".to_string(), format!("{:#06x}", word >> 16)]),
                    SourceInst::new("ori", [rd.to_string(), "$at".into(), format!("{:#06x}", word & 0xFFFF)]),
                ]
            }
        }
        "la" => {
            let [rd, label] = line.expect::<2>("rd, label")?;
            if !source::is_identifier(label) {
                return Err(AsmError::MalformedOperand(format!("`la` needs a label, got `{label}`")));
            }
            vec![
                SourceInst::new("lui", ["$at".to_string(), Imm::hi(label)]),
                SourceInst::new("ori", [rd.to_string(), "$at".into(), Imm::lo(label)]),
            ]
        }
        "move" => {
            let [rd, rs] = line.expect::<2>("rd, rs")?;
            vec![SourceInst::new("add", [rd, "$zero", rs])]
        }
        "blt" => {
            let [rs, rt, target] = line.expect::<3>("rs, rt, label")?;
            vec![
                SourceInst::new("slt", ["$at", rs, rt]),
                SourceInst::new("bne", ["$at", "$zero", target]),
            ]
        }
        _ => vec![line.clone()],
    };
    tracing::trace!(from = %line, to = out.len(), "expanded");
    Ok(out)
}
