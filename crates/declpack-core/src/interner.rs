//! Identifier interning for declaration names.
//!
//! Every identifier that appears in the declaration graph (declaration names,
//! selector pieces, alias targets, nested-name components) is interned once
//! and referred to by a `Symbol`. The module writer later remaps the symbols it
//! actually touches to dense, module-local identifier IDs.

use std::collections::HashMap;
use std::ops::Range;

/// Handle to an interned identifier.
///
/// Symbols order by first interning, not by spelling.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Identifier arena shared by everything that builds a declaration graph.
///
/// All spellings live back to back in one buffer; a symbol indexes its span.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    text: String,
    spans: Vec<Range<u32>>,
    lookup: HashMap<Box<str>, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol for `ident`, adding it on first sight.
    pub fn intern(&mut self, ident: &str) -> Symbol {
        if let Some(sym) = self.get(ident) {
            return sym;
        }

        let start = self.text.len() as u32;
        self.text.push_str(ident);
        let sym = Symbol(self.spans.len() as u32);
        self.spans.push(start..self.text.len() as u32);
        self.lookup.insert(ident.into(), sym);
        sym
    }

    pub fn get(&self, ident: &str) -> Option<Symbol> {
        self.lookup.get(ident).copied()
    }

    /// Spelling of `sym`.
    ///
    /// # Panics
    /// Panics if `sym` came from another interner.
    pub fn resolve(&self, sym: Symbol) -> &str {
        match self.try_resolve(sym) {
            Some(ident) => ident,
            None => panic!("Interner: unknown symbol {}", sym.0),
        }
    }

    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        let span = self.spans.get(sym.0 as usize)?;
        self.text.get(span.start as usize..span.end as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
