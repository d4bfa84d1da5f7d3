//! Declaration attributes.

use crate::Symbol;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AttrKind {
    /// `alias("target")`: the declaration is emitted as an alias of `target`.
    Alias { target: Symbol },
    Aligned { alignment: u32 },
    /// Runs before `main`.
    Constructor { priority: u32 },
    Deprecated,
    /// Runs after `main` returns.
    Destructor { priority: u32 },
    Packed,
    Unused,
    Used,
}

impl AttrKind {
    /// Stable attribute code for the attribute record.
    pub fn code(&self) -> u64 {
        match self {
            Self::Alias { .. } => 1,
            Self::Aligned { .. } => 2,
            Self::Constructor { .. } => 3,
            Self::Deprecated => 4,
            Self::Destructor { .. } => 5,
            Self::Packed => 6,
            Self::Unused => 7,
            Self::Used => 8,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Attr {
    pub kind: AttrKind,
    /// Inherited from a previous declaration rather than written here.
    pub inherited: bool,
}

impl Attr {
    pub fn new(kind: AttrKind) -> Self {
        Self {
            kind,
            inherited: false,
        }
    }
}
