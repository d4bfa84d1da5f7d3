//! Arena owning every declaration of a translation unit.

use crate::{Decl, DeclIdx, DeclKind, SourceLocation};

/// Owner of all declarations. Cross-references are [`DeclIdx`] values.
#[derive(Clone, Debug, Default)]
pub struct DeclArena {
    pub(crate) decls: Vec<Decl>,
}

impl DeclArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, decl: Decl) -> DeclIdx {
        let idx = DeclIdx(self.decls.len() as u32);
        self.decls.push(decl);
        idx
    }

    /// Shorthand for `alloc(Decl::new(kind, loc))`.
    pub fn alloc_kind(&mut self, kind: DeclKind, loc: SourceLocation) -> DeclIdx {
        self.alloc(Decl::new(kind, loc))
    }

    /// # Panics
    /// Panics if `idx` was not allocated by this arena.
    #[inline]
    pub fn get(&self, idx: DeclIdx) -> &Decl {
        self.ensure_decl(idx)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: DeclIdx) -> &mut Decl {
        self.ensure_decl_mut(idx)
    }

    #[inline]
    pub fn try_get(&self, idx: DeclIdx) -> Option<&Decl> {
        self.decls.get(idx.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclIdx, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclIdx(i as u32), d))
    }

    /// Place `child` lexically inside `parent` and register its name.
    ///
    /// The semantic owner defaults to `parent` when not already set. Named
    /// children become visible through the primary context of the nearest
    /// non-transparent enclosing scope.
    ///
    /// # Panics
    /// Panics if `parent` is not a scope.
    pub fn add_to_context(&mut self, parent: DeclIdx, child: DeclIdx) {
        let child_decl = self.ensure_decl_mut(child);
        child_decl.lexical_dc = Some(parent);
        if child_decl.semantic_dc.is_none() {
            child_decl.semantic_dc = Some(parent);
        }
        let name = child_decl.name().copied();

        self.ensure_scope_mut(parent).decls.push(child);

        if let Some(name) = name
            && !name.is_empty()
        {
            let owner = self.primary_context(self.lookup_context(parent));
            self.ensure_scope_mut(owner)
                .lookup
                .entry(name)
                .or_default()
                .push(child);
        }
    }

    /// The declaration that owns the lookup table for this scope.
    ///
    /// Reopened namespaces share their original's table; a forward-declared
    /// tag defers to its definition.
    pub fn primary_context(&self, idx: DeclIdx) -> DeclIdx {
        match &self.get(idx).kind {
            DeclKind::Namespace(ns) => ns.original_namespace.unwrap_or(idx),
            kind => match kind.as_tag() {
                Some(tag) if !tag.is_definition => tag.definition.unwrap_or(idx),
                _ => idx,
            },
        }
    }

    /// Nearest enclosing scope that is not transparent to lookup.
    pub fn lookup_context(&self, mut idx: DeclIdx) -> DeclIdx {
        while self.get(idx).kind.is_transparent_context()
            && let Some(parent) = self.get(idx).semantic_dc
        {
            idx = parent;
        }
        idx
    }
}
