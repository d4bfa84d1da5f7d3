#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the declpack declaration graph.
//!
//! Three layers:
//! - **Handles**: cheap `Copy` indices for declarations, types, statements and
//!   source locations. Every cross-reference in the graph is one of these.
//! - **Kinds**: the closed set of declaration kinds, each carrying the fields
//!   introduced at its level of the hierarchy (Named → Value → Declarator → …).
//! - **Arena**: owner of all declarations. Cycles (redeclaration chains,
//!   scope back-links) are plain indices, never ownership edges.

mod arena;
mod attr;
mod decl;
mod handles;
mod interner;
mod invariants;
mod kinds;
mod lang;
mod name;
mod template;

#[cfg(test)]
mod arena_tests;
#[cfg(test)]
mod lang_tests;

pub use arena::DeclArena;
pub use attr::{Attr, AttrKind};
pub use decl::{
    AccessSpecifier, Decl, DeclScope, LinkageLanguage, StorageClass, TagKind,
    TemplateSpecializationKind,
};
pub use handles::{DeclIdx, SourceLocation, SourceRange, StmtHandle, TypeHandle, TypeSourceInfo};
pub use interner::{Interner, Symbol};
pub use kinds::*;
pub use lang::LangOptions;
pub use name::{DeclName, NestedNamePart, NestedNameSpecifier};
pub use template::{
    ApsInt, DependentSpecializationInfo, FunctionSpecializationInfo, FunctionTemplateKind,
    MemberSpecializationInfo, TemplateArgument, TemplateArgumentListInfo, TemplateArgumentLoc,
    TemplateArgumentLocInfo, TemplateParameterList,
};
