use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{AsmError, Result};
use crate::source::Section;

/// Label bindings collected during the first pass.
///
/// Only the builder can add bindings; [`SymbolTableBuilder::finish`] hands
/// out the read-only [`SymbolTable`] used by the second pass.
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, section: Section, name: &str, addr: u32) -> Result<()> {
        let map = match section {
            Section::Text => &mut self.table.text,
            Section::Data => &mut self.table.data,
        };
        if map.contains_key(name) {
            return Err(AsmError::DuplicateLabel(name.to_string()));
        }
        tracing::debug!(?section, "bind {name} = {addr:#010x}");
        map.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn finish(self) -> SymbolTable {
        self.table
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    text: BTreeMap<String, u32>,
    data: BTreeMap<String, u32>,
}

impl SymbolTable {
    pub fn lookup(&self, section: Section, name: &str) -> Result<u32> {
        let map = match section {
            Section::Text => &self.text,
            Section::Data => &self.data,
        };
        map.get(name).copied().ok_or_else(|| AsmError::UndefinedLabel(name.to_string()))
    }

    pub fn text(&self, name: &str) -> Result<u32> {
        self.lookup(Section::Text, name)
    }

    pub fn data(&self, name: &str) -> Result<u32> {
        self.lookup(Section::Data, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_separate_namespaces() {
        let mut b = SymbolTableBuilder::new();
        b.bind(Section::Text, "main", 0x0040_0000).unwrap();
        b.bind(Section::Data, "main", 0x1001_0000).unwrap();
        assert_eq!(
            b.bind(Section::Text, "main", 0x0040_0004).unwrap_err(),
            AsmError::DuplicateLabel("main".into())
        );
        let t = b.finish();
        assert_eq!(t.text("main").unwrap(), 0x0040_0000);
        assert_eq!(t.data("main").unwrap(), 0x1001_0000);
        assert_eq!(t.data("Main").unwrap_err(), AsmError::UndefinedLabel("Main".into()));
        assert_eq!(t.lookup(Section::Text, "main").unwrap(), 0x0040_0000);
    }
}
