//! Persistent ID newtypes.
//!
//! These are the values that appear inside records. All three reserve 0 as
//! "nothing".

use super::constants::NUM_PREDEF_TYPE_IDS;

/// 1-based declaration ID, unique within a module.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Slot in the offset table, `None` for the sentinel.
    #[inline]
    pub fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    #[inline]
    pub fn from_slot(slot: usize) -> Self {
        Self(slot as u32 + 1)
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// Persistent type ID as assigned by the type table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NULL: Self = Self(0);

    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0 < NUM_PREDEF_TYPE_IDS
    }
}

/// 1-based index into the identifier section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct IdentId(pub u32);

impl IdentId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}
