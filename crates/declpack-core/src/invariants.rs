//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Decl, DeclArena, DeclIdx, DeclScope};

impl DeclArena {
    pub(crate) fn ensure_decl(&self, idx: DeclIdx) -> &Decl {
        self.decls.get(idx.index()).unwrap_or_else(|| {
            panic!(
                "DeclArena: decl index {} out of range (arena holds {})",
                idx.index(),
                self.decls.len()
            )
        })
    }

    pub(crate) fn ensure_decl_mut(&mut self, idx: DeclIdx) -> &mut Decl {
        let len = self.decls.len();
        self.decls.get_mut(idx.index()).unwrap_or_else(|| {
            panic!(
                "DeclArena: decl index {} out of range (arena holds {len})",
                idx.index()
            )
        })
    }

    pub(crate) fn ensure_scope_mut(&mut self, idx: DeclIdx) -> &mut DeclScope {
        let decl = self.ensure_decl_mut(idx);
        let kind = decl.kind.name();
        decl.scope
            .as_mut()
            .unwrap_or_else(|| panic!("DeclArena: {kind} declaration is not a scope"))
    }
}
