use crate::{
    Decl, DeclArena, DeclKind, DeclName, Interner, LinkageSpecDecl, NamedDecl, NamespaceDecl,
    RecordDecl, SourceLocation, TagDecl, TranslationUnitDecl, TypeDecl, VarDecl,
};

fn loc() -> SourceLocation {
    SourceLocation(1)
}

fn var(name: DeclName) -> DeclKind {
    let mut v = VarDecl::default();
    v.declarator.value.named = NamedDecl::new(name);
    DeclKind::Var(v)
}

fn namespace(name: DeclName) -> NamespaceDecl {
    NamespaceDecl {
        named: NamedDecl::new(name),
        ..Default::default()
    }
}

#[test]
fn alloc_returns_sequential_indices() {
    let mut arena = DeclArena::new();
    let a = arena.alloc_kind(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let b = arena.alloc_kind(var(DeclName::empty()), loc());

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
}

#[test]
fn scopes_only_for_context_kinds() {
    let tu = Decl::new(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let v = Decl::new(var(DeclName::empty()), loc());

    assert!(tu.scope().is_some());
    assert!(v.scope().is_none());
}

#[test]
fn add_to_context_registers_lexical_and_lookup() {
    let mut interner = Interner::new();
    let x = DeclName::ident(interner.intern("x"));
    let mut arena = DeclArena::new();
    let tu = arena.alloc_kind(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let v = arena.alloc_kind(var(x), loc());

    arena.add_to_context(tu, v);

    let scope = arena.get(tu).scope().unwrap();
    assert_eq!(scope.decls, vec![v]);
    assert_eq!(scope.lookup.get(&x), Some(&vec![v]));
    assert_eq!(arena.get(v).semantic_dc, Some(tu));
    assert_eq!(arena.get(v).lexical_dc, Some(tu));
}

#[test]
fn unnamed_children_skip_lookup() {
    let mut arena = DeclArena::new();
    let tu = arena.alloc_kind(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let v = arena.alloc_kind(var(DeclName::empty()), loc());

    arena.add_to_context(tu, v);

    let scope = arena.get(tu).scope().unwrap();
    assert_eq!(scope.decls.len(), 1);
    assert!(scope.lookup.is_empty());
}

#[test]
fn linkage_spec_is_transparent_to_lookup() {
    let mut interner = Interner::new();
    let f = DeclName::ident(interner.intern("f"));
    let mut arena = DeclArena::new();
    let tu = arena.alloc_kind(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let ls = arena.alloc_kind(DeclKind::LinkageSpec(LinkageSpecDecl::default()), loc());
    arena.add_to_context(tu, ls);
    let v = arena.alloc_kind(var(f), loc());

    arena.add_to_context(ls, v);

    assert_eq!(arena.get(ls).scope().unwrap().decls, vec![v]);
    assert!(arena.get(ls).scope().unwrap().lookup.is_empty());
    assert_eq!(arena.get(tu).scope().unwrap().lookup.get(&f), Some(&vec![v]));
    assert_eq!(arena.lookup_context(ls), tu);
}

#[test]
fn reopened_namespace_shares_original_lookup() {
    let mut interner = Interner::new();
    let n = DeclName::ident(interner.intern("n"));
    let y = DeclName::ident(interner.intern("y"));
    let mut arena = DeclArena::new();
    let tu = arena.alloc_kind(DeclKind::TranslationUnit(TranslationUnitDecl::default()), loc());
    let first = arena.alloc_kind(DeclKind::Namespace(namespace(n)), loc());
    let mut reopened = namespace(n);
    reopened.original_namespace = Some(first);
    let second = arena.alloc_kind(DeclKind::Namespace(reopened), loc());
    arena.add_to_context(tu, first);
    arena.add_to_context(tu, second);
    let v = arena.alloc_kind(var(y), loc());

    arena.add_to_context(second, v);

    assert_eq!(arena.primary_context(second), first);
    assert_eq!(arena.get(second).scope().unwrap().decls, vec![v]);
    assert_eq!(arena.get(first).scope().unwrap().lookup.get(&y), Some(&vec![v]));
}

#[test]
fn forward_tag_defers_to_definition() {
    let mut arena = DeclArena::new();
    let def = arena.alloc_kind(
        DeclKind::Record(RecordDecl {
            tag: TagDecl {
                is_definition: true,
                ..Default::default()
            },
            ..Default::default()
        }),
        loc(),
    );
    let fwd = arena.alloc_kind(
        DeclKind::Record(RecordDecl {
            tag: TagDecl {
                ty: TypeDecl::default(),
                definition: Some(def),
                ..Default::default()
            },
            ..Default::default()
        }),
        loc(),
    );

    assert_eq!(arena.primary_context(fwd), def);
    assert_eq!(arena.primary_context(def), def);
}

#[test]
#[should_panic(expected = "out of range")]
fn get_foreign_index_panics() {
    let arena = DeclArena::new();
    arena.get(crate::DeclIdx::from_raw(3));
}

#[test]
#[should_panic(expected = "is not a scope")]
fn add_to_non_scope_panics() {
    let mut arena = DeclArena::new();
    let a = arena.alloc_kind(var(DeclName::empty()), loc());
    let b = arena.alloc_kind(var(DeclName::empty()), loc());
    arena.add_to_context(a, b);
}
