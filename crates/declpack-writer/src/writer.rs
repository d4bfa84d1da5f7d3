//! Serialization session.
//!
//! A [`DeclWriter`] owns everything that lives for one module: the record
//! stream, the ID and identifier spaces, the offset table and the list of
//! required declarations. The driver calls [`DeclWriter::write_decl`] for
//! every declaration that must appear (or [`DeclWriter::write_reachable`]
//! to follow references from a root), then [`DeclWriter::finish`].

use declpack_core::{DeclArena, DeclIdx, Interner};
use declpack_format::{
    DeclId, Module, ModuleError, Record, RecordCode, RecordStream, Trailer,
};
use tracing::{debug, trace};

use crate::WriteError;
use crate::abbrev::AbbrevCatalog;
use crate::collab::{
    AttrRecordWriter, AttrSerializer, EmitContext, IdentityTypeResolver, OpaqueStmtWriter,
    StmtSerializer, TypeResolver,
};
use crate::ident_table::IdentifierTable;
use crate::offsets::OffsetTable;
use crate::options::WriterOptions;
use crate::registry::IdentityRegistry;
use crate::required::is_required;
use crate::stmt_queue::StmtQueue;
use crate::visitor::DeclVisitor;

/// Writes declarations from one arena into one module.
pub struct DeclWriter<'a> {
    pub(crate) arena: &'a DeclArena,
    interner: &'a Interner,
    options: WriterOptions,
    types: Box<dyn TypeResolver + 'a>,
    stmts: Box<dyn StmtSerializer + 'a>,
    attrs: Box<dyn AttrSerializer + 'a>,
    pub(crate) stream: RecordStream,
    pub(crate) registry: IdentityRegistry,
    offsets: OffsetTable,
    idents: IdentifierTable,
    abbrevs: AbbrevCatalog,
    queue: StmtQueue,
    required: Vec<DeclId>,
}

impl<'a> DeclWriter<'a> {
    /// Start a session. Abbreviations, when enabled, are defined immediately
    /// so they precede every record that uses them.
    pub fn new(arena: &'a DeclArena, interner: &'a Interner, options: WriterOptions) -> Self {
        let mut stream = RecordStream::new();
        let abbrevs = if options.abbreviations {
            AbbrevCatalog::register(&mut stream)
        } else {
            AbbrevCatalog::disabled()
        };

        Self {
            arena,
            interner,
            options,
            types: Box::new(IdentityTypeResolver),
            stmts: Box::new(OpaqueStmtWriter),
            attrs: Box::new(AttrRecordWriter),
            stream,
            registry: IdentityRegistry::new(),
            offsets: OffsetTable::new(),
            idents: IdentifierTable::new(),
            abbrevs,
            queue: StmtQueue::new(),
            required: Vec::new(),
        }
    }

    pub fn with_type_resolver(mut self, types: impl TypeResolver + 'a) -> Self {
        self.types = Box::new(types);
        self
    }

    pub fn with_stmt_serializer(mut self, stmts: impl StmtSerializer + 'a) -> Self {
        self.stmts = Box::new(stmts);
        self
    }

    pub fn with_attr_serializer(mut self, attrs: impl AttrSerializer + 'a) -> Self {
        self.attrs = Box::new(attrs);
        self
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// The ID of `decl`, minting it if needed. Writes nothing.
    pub fn decl_id(&mut self, decl: DeclIdx) -> DeclId {
        self.registry.resolve(decl)
    }

    /// Whether `id` already has a primary record.
    pub fn is_written(&self, id: DeclId) -> bool {
        self.offsets.is_written(id)
    }

    /// Number of IDs minted so far, written or not.
    pub fn minted(&self) -> usize {
        self.registry.len()
    }

    /// Current stream position.
    pub fn position(&self) -> u64 {
        self.stream.position()
    }

    pub(crate) fn visitor(&mut self) -> DeclVisitor<'_> {
        DeclVisitor::new(
            self.interner,
            &mut *self.types,
            &mut self.registry,
            &mut self.idents,
            &mut self.queue,
        )
    }

    /// Serialize one declaration.
    ///
    /// Writes, in order: its context blocks, its primary record, its
    /// attribute record, then every statement tree the record referenced.
    /// A declaration that was already written is not written again.
    pub fn write_decl(&mut self, idx: DeclIdx) -> Result<DeclId, WriteError> {
        let id = self.registry.resolve(idx);
        if self.offsets.is_written(id) {
            return Ok(id);
        }

        let arena = self.arena;
        let decl = arena.get(idx);

        let (lexical, visible) = match decl.scope() {
            Some(scope) => {
                let lexical = self.write_lexical_block(scope);
                let visible = self.write_visible_block(idx, decl, scope)?;
                (lexical, visible)
            }
            None => (0, 0),
        };

        let mut visitor = self.visitor();
        visitor.visit(decl)?;
        if decl.scope().is_some() {
            visitor.push(lexical);
            visitor.push(visible);
        }
        let (code, fields) = visitor.into_parts();
        let code = code.ok_or(WriteError::MissingRecordCode {
            kind: decl.kind.name(),
        })?;
        let record = Record::with_fields(code, fields);

        let abbrev = self.abbrevs.select(decl);
        let offset = match abbrev {
            Some(abbrev) => self.stream.emit_abbreviated(abbrev, &record)?,
            None => self.stream.emit(&record),
        };
        self.offsets.record(id, offset);
        debug!(
            kind = decl.kind.name(),
            %id,
            offset,
            fields = record.fields.len(),
            abbreviated = abbrev.is_some(),
            "wrote decl"
        );

        if decl.has_attrs() {
            let mut cx = EmitContext::new(
                &mut self.stream,
                &mut self.registry,
                &mut self.idents,
                self.interner,
            );
            self.attrs.write_attrs(&decl.attrs, &mut cx)?;
        }

        self.flush_stmts()?;

        if is_required(arena, idx, &self.options.lang) {
            trace!(%id, "required");
            self.required.push(id);
        }

        Ok(id)
    }

    /// Write `root`, then every declaration it references, transitively.
    ///
    /// Declarations are written in ID order, so the stream order matches
    /// the order of first reference.
    pub fn write_reachable(&mut self, root: DeclIdx) -> Result<(), WriteError> {
        self.write_decl(root)?;

        let mut next = 0;
        while next < self.registry.len() {
            let id = DeclId::from_slot(next);
            if !self.offsets.is_written(id)
                && let Some(decl) = self.registry.decl(id)
            {
                self.write_decl(decl)?;
            }
            next += 1;
        }
        Ok(())
    }

    fn flush_stmts(&mut self) -> Result<(), WriteError> {
        while let Some(stmt) = self.queue.pop() {
            let mut cx = EmitContext::new(
                &mut self.stream,
                &mut self.registry,
                &mut self.idents,
                self.interner,
            );
            self.stmts.write_stmt(stmt, &mut cx)?;
            cx.emit(&Record::new(RecordCode::StmtStop));
        }
        Ok(())
    }

    /// Close the session and produce the module bytes.
    ///
    /// Fails if any minted ID was never written.
    pub fn finish(self) -> Result<WrittenModule, WriteError> {
        let minted = self.registry.len();
        self.offsets
            .verify(minted)
            .map_err(|id| WriteError::UnwrittenDecl { id })?;

        let decl_offsets = self.offsets.into_table(minted);
        let (ident_blob, ident_table) = self.idents.emit();
        let bytes = self.stream.seal(Trailer {
            decl_offsets: &decl_offsets,
            required: &self.required,
            ident_blob: &ident_blob,
            ident_table: &ident_table,
        })?;

        debug!(
            decls = minted,
            required = self.required.len(),
            identifiers = self.idents.len(),
            size = bytes.len(),
            "module sealed"
        );

        Ok(WrittenModule {
            bytes,
            decl_offsets,
            required: self.required,
            registry: self.registry,
        })
    }
}

/// Output of a finished session.
#[derive(Debug)]
pub struct WrittenModule {
    bytes: Vec<u8>,
    decl_offsets: Vec<u64>,
    required: Vec<DeclId>,
    registry: IdentityRegistry,
}

impl WrittenModule {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Offset of every declaration, indexed by ID - 1.
    pub fn decl_offsets(&self) -> &[u64] {
        &self.decl_offsets
    }

    pub fn required(&self) -> &[DeclId] {
        &self.required
    }

    pub fn decl_id(&self, decl: DeclIdx) -> Option<DeclId> {
        self.registry.get(decl)
    }

    pub fn decl(&self, id: DeclId) -> Option<DeclIdx> {
        self.registry.decl(id)
    }

    /// Load the bytes back through the reader.
    pub fn to_module(&self) -> Result<Module, ModuleError> {
        Module::from_bytes(self.bytes.clone())
    }
}
