//! The declaration node and its common attributes.

use indexmap::IndexMap;

use crate::{Attr, AttrKind, DeclIdx, DeclKind, DeclName, SourceLocation};

/// C++ access specifier. `None` is the default for non-member declarations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum AccessSpecifier {
    Public = 0,
    Protected = 1,
    Private = 2,
    #[default]
    None = 3,
}

/// Storage class of a variable or function, as resolved or as written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum StorageClass {
    #[default]
    None = 0,
    Extern = 1,
    Static = 2,
    PrivateExtern = 3,
    Auto = 4,
    Register = 5,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum TagKind {
    #[default]
    Struct = 0,
    Union = 1,
    Class = 2,
    Enum = 3,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum TemplateSpecializationKind {
    #[default]
    Undeclared = 0,
    ImplicitInstantiation = 1,
    ExplicitSpecialization = 2,
    ExplicitInstantiationDeclaration = 3,
    ExplicitInstantiationDefinition = 4,
}

/// Language named by an `extern "..."` linkage specification.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum LinkageLanguage {
    #[default]
    C = 2,
    Cxx = 4,
}

/// Contents of a declaration that is also a scope.
///
/// `decls` is the lexical view in source order; `lookup` is the name-lookup
/// view. Either may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclScope {
    pub decls: Vec<DeclIdx>,
    pub lookup: IndexMap<DeclName, Vec<DeclIdx>>,
}

impl DeclScope {
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.lookup.is_empty()
    }
}

/// A declaration node owned by a [`DeclArena`](crate::DeclArena).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    /// Semantic owner (e.g. the class of an out-of-line member definition).
    pub semantic_dc: Option<DeclIdx>,
    /// Lexical owner: the scope the declaration physically appears in.
    pub lexical_dc: Option<DeclIdx>,
    pub loc: SourceLocation,
    pub invalid: bool,
    pub implicit: bool,
    pub used: bool,
    pub access: AccessSpecifier,
    /// Visibility level: 0 for declarations of this module, N for chained modules.
    pub level: u32,
    pub attrs: Vec<Attr>,
    pub(crate) scope: Option<DeclScope>,
}

impl Decl {
    /// New declaration with default common attributes.
    ///
    /// Scope-bearing kinds get an empty [`DeclScope`].
    pub fn new(kind: DeclKind, loc: SourceLocation) -> Self {
        let scope = kind.is_decl_context().then(DeclScope::default);
        Self {
            kind,
            semantic_dc: None,
            lexical_dc: None,
            loc,
            invalid: false,
            implicit: false,
            used: false,
            access: AccessSpecifier::None,
            level: 0,
            attrs: Vec::new(),
            scope,
        }
    }

    pub fn with_attr(mut self, kind: AttrKind) -> Self {
        self.attrs.push(Attr::new(kind));
        self
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn scope(&self) -> Option<&DeclScope> {
        self.scope.as_ref()
    }

    #[inline]
    pub fn has_attrs(&self) -> bool {
        !self.attrs.is_empty()
    }

    pub fn has_attr(&self, pred: impl Fn(&AttrKind) -> bool) -> bool {
        self.attrs.iter().any(|a| pred(&a.kind))
    }

    pub fn name(&self) -> Option<&DeclName> {
        self.kind.named().map(|n| &n.name)
    }
}
