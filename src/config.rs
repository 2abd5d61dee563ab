use serde::{Deserialize, Serialize};

pub const TEXT_BASE: u32 = 0x0040_0000;
pub const DATA_BASE: u32 = 0x1001_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    pub text_base: u32, // first instruction address
    pub data_base: u32, // first .data word address
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            text_base: TEXT_BASE,
            data_base: DATA_BASE,
        }
    }
}
