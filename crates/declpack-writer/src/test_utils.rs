//! Test fixture for building small declaration graphs.

use declpack_core::{
    Decl, DeclArena, DeclIdx, DeclKind, DeclName, FunctionDecl, Interner, NamedDecl,
    ParmVarDecl, SourceLocation, StmtHandle, TranslationUnitDecl, TypeHandle, VarDecl,
};
use declpack_format::{DecodedRecord, Module};

use crate::{DeclWriter, WrittenModule, WriterOptions};

/// Arena with a translation unit at index 0.
pub struct Fixture {
    pub arena: DeclArena,
    pub interner: Interner,
    pub tu: DeclIdx,
}

impl Fixture {
    pub fn new() -> Self {
        let mut arena = DeclArena::new();
        let tu = arena.alloc_kind(
            DeclKind::TranslationUnit(TranslationUnitDecl::default()),
            SourceLocation(1),
        );
        Self {
            arena,
            interner: Interner::new(),
            tu,
        }
    }

    pub fn name(&mut self, s: &str) -> DeclName {
        DeclName::ident(self.interner.intern(s))
    }

    /// Allocate a declaration without placing it in any scope.
    pub fn alloc(&mut self, kind: DeclKind) -> DeclIdx {
        let loc = self.next_loc();
        self.arena.alloc_kind(kind, loc)
    }

    /// Allocate a declaration and add it to `parent`.
    pub fn add(&mut self, parent: DeclIdx, kind: DeclKind) -> DeclIdx {
        let loc = self.next_loc();
        self.add_decl(parent, Decl::new(kind, loc))
    }

    pub fn add_decl(&mut self, parent: DeclIdx, decl: Decl) -> DeclIdx {
        let idx = self.arena.alloc(decl);
        self.arena.add_to_context(parent, idx);
        idx
    }

    pub fn var(&mut self, name: &str, ty: u32) -> VarDecl {
        let mut var = VarDecl::default();
        var.declarator.value.named = NamedDecl::new(self.name(name));
        var.declarator.value.ty = Some(TypeHandle(ty));
        var
    }

    pub fn function(&mut self, name: &str, body: Option<u32>) -> FunctionDecl {
        let mut function = FunctionDecl::default();
        function.declarator.value.named = NamedDecl::new(self.name(name));
        function.body = body.map(StmtHandle);
        function
    }

    pub fn parm(&mut self, name: &str, ty: u32) -> ParmVarDecl {
        ParmVarDecl {
            var: self.var(name, ty),
            ..Default::default()
        }
    }

    pub fn writer(&self, options: WriterOptions) -> DeclWriter<'_> {
        DeclWriter::new(&self.arena, &self.interner, options)
    }

    /// Write everything reachable from the translation unit.
    pub fn write_all(&self, options: WriterOptions) -> WrittenModule {
        let mut writer = self.writer(options);
        writer.write_reachable(self.tu).unwrap();
        writer.finish().unwrap()
    }

    fn next_loc(&self) -> SourceLocation {
        SourceLocation(self.arena.len() as u32 + 1)
    }
}

/// Primary record of `decl`, decoded from the finished module.
pub fn decl_record(written: &WrittenModule, module: &Module, decl: DeclIdx) -> DecodedRecord {
    let id = written.decl_id(decl).unwrap();
    module.decl_record(id).unwrap()
}
