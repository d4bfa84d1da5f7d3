//! Identifier table builder.
//!
//! Remaps interner symbols to module-local identifier IDs.

use std::collections::HashMap;

use declpack_core::{Interner, Symbol};
use declpack_format::IdentId;

use crate::WriteError;

/// Builds the identifier section, minting IDs on first reference.
///
/// The module only carries identifiers that some record actually uses.
/// `IdentId(0)` means "no identifier"; real identifiers start at 1.
#[derive(Debug, Default)]
pub struct IdentifierTable {
    mapping: HashMap<Symbol, IdentId>,
    strings: Vec<String>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the IdentId for a Symbol.
    pub fn get_or_intern(
        &mut self,
        sym: Symbol,
        interner: &Interner,
    ) -> Result<IdentId, WriteError> {
        if let Some(&id) = self.mapping.get(&sym) {
            return Ok(id);
        }

        let text = interner
            .try_resolve(sym)
            .ok_or(WriteError::UnknownSymbol(sym))?;

        self.strings.push(text.to_owned());
        let id = IdentId(self.strings.len() as u32);
        self.mapping.insert(sym, id);
        Ok(id)
    }

    /// Like [`get_or_intern`](Self::get_or_intern); `None` maps to [`IdentId::NONE`].
    pub fn get_or_intern_opt(
        &mut self,
        sym: Option<Symbol>,
        interner: &Interner,
    ) -> Result<IdentId, WriteError> {
        match sym {
            Some(sym) => self.get_or_intern(sym, interner),
            None => Ok(IdentId::NONE),
        }
    }

    pub fn get(&self, sym: Symbol) -> Option<IdentId> {
        self.mapping.get(&sym).copied()
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Emit the identifier blob and offset table.
    ///
    /// The table holds the start of every identifier plus a trailing
    /// sentinel, so it always has `len() + 1` entries.
    pub fn emit(&self) -> (Vec<u8>, Vec<u32>) {
        let mut blob = Vec::new();
        let mut offsets = Vec::with_capacity(self.strings.len() + 1);

        for s in &self.strings {
            offsets.push(blob.len() as u32);
            blob.extend_from_slice(s.as_bytes());
        }
        offsets.push(blob.len() as u32);

        (blob, offsets)
    }
}
