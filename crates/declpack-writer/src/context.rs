//! Context blocks.
//!
//! A scope declaration is preceded by up to two blocks: the lexical block
//! lists its members in source order, the visible block maps each name to
//! the declarations it finds. The declaration record ends with the offsets
//! of both, 0 for a block that was not written.

use declpack_core::{Decl, DeclIdx, DeclScope};
use declpack_format::{Record, RecordCode};
use tracing::trace;

use crate::WriteError;
use crate::writer::DeclWriter;

impl DeclWriter<'_> {
    /// Write the lexical block of `scope`. Returns 0 for an empty scope.
    pub(crate) fn write_lexical_block(&mut self, scope: &DeclScope) -> u64 {
        if scope.decls.is_empty() {
            return 0;
        }

        let fields = scope
            .decls
            .iter()
            .map(|&d| u64::from(self.registry.resolve(d).0))
            .collect();
        let offset = self
            .stream
            .emit(&Record::with_fields(RecordCode::DeclContextLexical, fields));
        trace!(offset, members = scope.decls.len(), "lexical block");
        offset
    }

    /// Write the visible block of `decl`. Returns 0 when nothing is written.
    ///
    /// Only primary contexts carry one, and function-like scopes never do:
    /// their names are not reachable by lookup from outside.
    pub(crate) fn write_visible_block(
        &mut self,
        idx: DeclIdx,
        decl: &Decl,
        scope: &DeclScope,
    ) -> Result<u64, WriteError> {
        if decl.kind.is_function_or_method()
            || self.arena.primary_context(idx) != idx
            || scope.lookup.is_empty()
        {
            return Ok(0);
        }

        let mut visitor = self.visitor();
        for (name, decls) in &scope.lookup {
            visitor.push_name(name)?;
            visitor.push(decls.len() as u64);
            for &d in decls {
                visitor.push_decl(Some(d));
            }
        }
        let (_, fields) = visitor.into_parts();

        let offset = self
            .stream
            .emit(&Record::with_fields(RecordCode::DeclContextVisible, fields));
        trace!(offset, names = scope.lookup.len(), "visible block");
        Ok(offset)
    }
}
