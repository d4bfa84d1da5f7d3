//! Declaration names and nested-name qualifiers.

use crate::{DeclIdx, Symbol, TypeHandle};

/// The name of a named declaration.
///
/// Ordinary identifiers are the common case; the special forms cover
/// constructors, operators and Objective-C selectors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeclName {
    /// Plain identifier. `None` is the empty name of an unnamed declaration.
    Identifier(Option<Symbol>),
    /// Objective-C selector, identified by its first piece and its arity.
    ObjcSelector { first: Option<Symbol>, arity: u32 },
    Constructor(TypeHandle),
    Destructor(TypeHandle),
    Conversion(TypeHandle),
    /// Overloaded operator, numbered by the front end.
    Operator(u8),
    LiteralOperator(Symbol),
    UsingDirective,
}

impl Default for DeclName {
    fn default() -> Self {
        Self::empty()
    }
}

impl DeclName {
    pub fn ident(sym: Symbol) -> Self {
        Self::Identifier(Some(sym))
    }

    pub const fn empty() -> Self {
        Self::Identifier(None)
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Whether lookup tables should index this name.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Identifier(None))
    }

    /// Stable name-kind tag written ahead of the payload.
    pub fn kind_tag(&self) -> u64 {
        match self {
            Self::Identifier(_) => 0,
            Self::ObjcSelector { arity: 0, .. } => 1,
            Self::ObjcSelector { arity: 1, .. } => 2,
            Self::ObjcSelector { .. } => 3,
            Self::Constructor(_) => 4,
            Self::Destructor(_) => 5,
            Self::Conversion(_) => 6,
            Self::Operator(_) => 7,
            Self::LiteralOperator(_) => 8,
            Self::UsingDirective => 9,
        }
    }
}

/// One component of a `a::b::` style qualifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NestedNamePart {
    Identifier(Symbol),
    Namespace(DeclIdx),
    TypeSpec(TypeHandle),
    TypeSpecWithTemplate(TypeHandle),
    Global,
}

impl NestedNamePart {
    pub fn kind_tag(&self) -> u64 {
        match self {
            Self::Identifier(_) => 0,
            Self::Namespace(_) => 1,
            Self::TypeSpec(_) => 2,
            Self::TypeSpecWithTemplate(_) => 3,
            Self::Global => 4,
        }
    }
}

/// Qualifier as written, outermost component first.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NestedNameSpecifier {
    pub parts: Vec<NestedNamePart>,
}

impl NestedNameSpecifier {
    pub fn new(parts: Vec<NestedNamePart>) -> Self {
        Self { parts }
    }
}
