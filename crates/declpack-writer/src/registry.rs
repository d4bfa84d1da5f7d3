//! Declaration identity bookkeeping.

use std::collections::HashMap;

use declpack_core::DeclIdx;
use declpack_format::DeclId;
use tracing::trace;

/// Assigns stable module IDs to declarations on first reference.
///
/// IDs are dense and 1-based, handed out in the order declarations are first
/// referenced, which is not the order they are written. Resolving never
/// writes anything.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    ids: HashMap<DeclIdx, DeclId>,
    by_id: Vec<DeclIdx>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ID of `decl`, minting the next one if it has none yet.
    pub fn resolve(&mut self, decl: DeclIdx) -> DeclId {
        if let Some(&id) = self.ids.get(&decl) {
            return id;
        }

        self.by_id.push(decl);
        let id = DeclId(self.by_id.len() as u32);
        self.ids.insert(decl, id);
        trace!(decl = decl.index(), %id, "minted decl id");
        id
    }

    /// Like [`resolve`](Self::resolve); an absent declaration is [`DeclId::NONE`].
    pub fn resolve_opt(&mut self, decl: Option<DeclIdx>) -> DeclId {
        decl.map_or(DeclId::NONE, |d| self.resolve(d))
    }

    /// The ID of `decl` without minting.
    pub fn get(&self, decl: DeclIdx) -> Option<DeclId> {
        self.ids.get(&decl).copied()
    }

    /// The declaration that was given `id`.
    pub fn decl(&self, id: DeclId) -> Option<DeclIdx> {
        id.slot().and_then(|slot| self.by_id.get(slot).copied())
    }

    /// Number of IDs minted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Declarations in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, DeclIdx)> + '_ {
        self.by_id
            .iter()
            .enumerate()
            .map(|(slot, &decl)| (DeclId::from_slot(slot), decl))
    }
}
