//! Collaborator seams and their reference implementations.
//!
//! The writer owns declarations only. Types, statements and attributes are
//! serialized by collaborators; the reference implementations here are
//! enough to produce complete, loadable modules.

use declpack_core::{Attr, AttrKind, DeclIdx, Interner, StmtHandle, Symbol, TypeHandle};
use declpack_format::{
    DeclId, IdentId, NUM_PREDEF_TYPE_IDS, Record, RecordCode, RecordStream, TypeId,
};

use crate::WriteError;
use crate::ident_table::IdentifierTable;
use crate::registry::IdentityRegistry;

/// Maps type handles to persistent type IDs.
pub trait TypeResolver {
    fn type_id(&mut self, ty: TypeHandle) -> TypeId;
}

/// Serializes one statement tree into the record stream.
///
/// The writer follows each tree with a `STMT_STOP` record.
pub trait StmtSerializer {
    fn write_stmt(&mut self, stmt: StmtHandle, cx: &mut EmitContext<'_>) -> Result<(), WriteError>;
}

/// Serializes a non-empty attribute list right after its declaration.
pub trait AttrSerializer {
    fn write_attrs(&mut self, attrs: &[Attr], cx: &mut EmitContext<'_>) -> Result<(), WriteError>;
}

/// Access to the stream and ID spaces for collaborators.
pub struct EmitContext<'w> {
    stream: &'w mut RecordStream,
    registry: &'w mut IdentityRegistry,
    idents: &'w mut IdentifierTable,
    interner: &'w Interner,
}

impl<'w> EmitContext<'w> {
    pub(crate) fn new(
        stream: &'w mut RecordStream,
        registry: &'w mut IdentityRegistry,
        idents: &'w mut IdentifierTable,
        interner: &'w Interner,
    ) -> Self {
        Self {
            stream,
            registry,
            idents,
            interner,
        }
    }

    /// ID of a referenced declaration, minting it if needed.
    pub fn decl_id(&mut self, decl: Option<DeclIdx>) -> DeclId {
        self.registry.resolve_opt(decl)
    }

    pub fn ident_id(&mut self, sym: Symbol) -> Result<IdentId, WriteError> {
        self.idents.get_or_intern(sym, self.interner)
    }

    /// Append a record in the generic encoding. Returns its offset.
    pub fn emit(&mut self, record: &Record) -> u64 {
        self.stream.emit(record)
    }

    pub fn position(&self) -> u64 {
        self.stream.position()
    }
}

/// Type handle `n` becomes type ID `n + NUM_PREDEF_TYPE_IDS`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTypeResolver;

impl TypeResolver for IdentityTypeResolver {
    fn type_id(&mut self, ty: TypeHandle) -> TypeId {
        TypeId(ty.0 + NUM_PREDEF_TYPE_IDS)
    }
}

/// Writes each statement as a single `STMT_OPAQUE` record holding its handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpaqueStmtWriter;

impl StmtSerializer for OpaqueStmtWriter {
    fn write_stmt(&mut self, stmt: StmtHandle, cx: &mut EmitContext<'_>) -> Result<(), WriteError> {
        cx.emit(&Record::with_fields(
            RecordCode::StmtOpaque,
            vec![u64::from(stmt.0)],
        ));
        Ok(())
    }
}

/// Writes one `DECL_ATTR` record: count, then kind code, inherited flag and
/// payload for each attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttrRecordWriter;

impl AttrSerializer for AttrRecordWriter {
    fn write_attrs(&mut self, attrs: &[Attr], cx: &mut EmitContext<'_>) -> Result<(), WriteError> {
        let mut record = Record::new(RecordCode::DeclAttr);
        record.push(attrs.len() as u64);
        for attr in attrs {
            record.push(attr.kind.code());
            record.push(u64::from(attr.inherited));
            match attr.kind {
                AttrKind::Alias { target } => record.push(u64::from(cx.ident_id(target)?.0)),
                AttrKind::Aligned { alignment } => record.push(u64::from(alignment)),
                AttrKind::Constructor { priority } | AttrKind::Destructor { priority } => {
                    record.push(u64::from(priority))
                }
                AttrKind::Deprecated | AttrKind::Packed | AttrKind::Unused | AttrKind::Used => {}
            }
        }
        cx.emit(&record);
        Ok(())
    }
}
