#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Declaration serializer for declpack modules.
//!
//! The writer walks a [`DeclArena`](declpack_core::DeclArena) and produces one
//! binary module:
//! - `registry` / `offsets` - declaration IDs and where each one landed
//! - `visitor` - per-kind field emission, parent level first
//! - `context` - lexical and visible blocks for scope declarations
//! - `abbrev` - compact shapes for common declarations
//! - `required` - which declarations a reader must load eagerly
//! - `collab` - type, statement and attribute seams
//! - `writer` - the session tying it all together

mod abbrev;
mod collab;
mod context;
mod error;
mod ident_table;
mod offsets;
mod options;
mod registry;
mod required;
mod stmt_queue;
mod visitor;
mod writer;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod abbrev_tests;
#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod writer_tests;

pub use abbrev::AbbrevCatalog;
pub use collab::{
    AttrRecordWriter, AttrSerializer, EmitContext, IdentityTypeResolver, OpaqueStmtWriter,
    StmtSerializer, TypeResolver,
};
pub use error::{CollaboratorError, WriteError};
pub use ident_table::IdentifierTable;
pub use offsets::OffsetTable;
pub use options::WriterOptions;
pub use registry::IdentityRegistry;
pub use required::{is_file_var, is_required};
pub use stmt_queue::StmtQueue;
pub use writer::{DeclWriter, WrittenModule};
