//! Index and handle newtypes.

/// Index of a declaration inside a [`DeclArena`](crate::DeclArena).
///
/// This is an arena slot, not the persisted declaration ID: the writer mints
/// module IDs on first reference, in whatever order references appear.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct DeclIdx(pub(crate) u32);

impl DeclIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// Opaque handle to a type owned by the type table.
///
/// The writer never inspects types; it asks its `TypeResolver` collaborator
/// for the persistent type ID.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct TypeHandle(pub u32);

/// Opaque handle to a statement or expression tree root.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct StmtHandle(pub u32);

/// Type as written in source, with its location info.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeSourceInfo {
    pub ty: TypeHandle,
}

impl TypeSourceInfo {
    pub fn new(ty: TypeHandle) -> Self {
        Self { ty }
    }
}

/// Raw encoded source location. Zero is the invalid location.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct SourceLocation(pub u32);

impl SourceLocation {
    pub const INVALID: Self = Self(0);

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    pub fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        Self { begin, end }
    }
}
