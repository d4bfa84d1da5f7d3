use declpack_core::{
    AttrKind, Decl, DeclKind, DeclName, FieldDecl, Interner, NamedDecl, ParmVarDecl,
    SourceLocation, StmtHandle, TypeHandle, TypeSourceInfo, TypedefDecl,
};
use declpack_format::{AbbrevId, RecordCode, RecordStream};

use crate::AbbrevCatalog;
use crate::abbrev::{field_abbrev, parm_var_abbrev, typedef_abbrev};

fn named(interner: &mut Interner, s: &str) -> NamedDecl {
    NamedDecl::new(DeclName::ident(interner.intern(s)))
}

fn parm(interner: &mut Interner) -> ParmVarDecl {
    let mut parm = ParmVarDecl::default();
    parm.var.declarator.value.named = named(interner, "p");
    parm
}

fn field(interner: &mut Interner) -> FieldDecl {
    let mut field = FieldDecl::default();
    field.declarator.value.named = named(interner, "f");
    field
}

fn decl(kind: DeclKind) -> Decl {
    Decl::new(kind, SourceLocation(1))
}

#[test]
fn shapes_cover_every_field() {
    assert_eq!(parm_var_abbrev().code(), Some(RecordCode::DeclParmVar));
    assert_eq!(parm_var_abbrev().num_fields(), 24);
    assert_eq!(field_abbrev().code(), Some(RecordCode::DeclField));
    assert_eq!(field_abbrev().num_fields(), 15);
    assert_eq!(typedef_abbrev().code(), Some(RecordCode::DeclTypedef));
    assert_eq!(typedef_abbrev().num_fields(), 13);
}

#[test]
fn register_assigns_user_ids() {
    let mut interner = Interner::new();
    let mut stream = RecordStream::new();
    let catalog = AbbrevCatalog::register(&mut stream);

    let mut typedef = TypedefDecl::default();
    typedef.ty.named = named(&mut interner, "t");

    assert_eq!(
        catalog.select(&decl(DeclKind::ParmVar(parm(&mut interner)))),
        Some(AbbrevId(4))
    );
    assert_eq!(
        catalog.select(&decl(DeclKind::Field(field(&mut interner)))),
        Some(AbbrevId(5))
    );
    assert_eq!(
        catalog.select(&decl(DeclKind::Typedef(typedef))),
        Some(AbbrevId(6))
    );
    assert!(stream.abbrev(AbbrevId(6)).is_some());
}

#[test]
fn disabled_catalog_selects_nothing() {
    let mut interner = Interner::new();
    let catalog = AbbrevCatalog::disabled();

    assert_eq!(
        catalog.select(&decl(DeclKind::ParmVar(parm(&mut interner)))),
        None
    );
}

#[test]
fn non_default_fields_fall_back() {
    let mut interner = Interner::new();
    let mut stream = RecordStream::new();
    let catalog = AbbrevCatalog::register(&mut stream);

    let mut direct = parm(&mut interner);
    direct.var.direct_initializer = true;
    let mut bitfield = field(&mut interner);
    bitfield.bit_width = Some(StmtHandle(1));
    let mut typedef = TypedefDecl::default();
    typedef.ty.named = named(&mut interner, "t");
    let used = decl(DeclKind::Typedef(typedef)).with_attr(AttrKind::Used);
    let mut implicit = decl(DeclKind::ParmVar(parm(&mut interner)));
    implicit.implicit = true;
    let mut defaulted = parm(&mut interner);
    defaulted.var.init = Some(StmtHandle(9));
    let mut written_type = parm(&mut interner);
    written_type.var.declarator.type_info = Some(TypeSourceInfo::new(TypeHandle(3)));

    assert_eq!(catalog.select(&decl(DeclKind::ParmVar(direct))), None);
    assert_eq!(catalog.select(&decl(DeclKind::Field(bitfield))), None);
    assert_eq!(catalog.select(&used), None);
    assert_eq!(catalog.select(&implicit), None);
    assert_eq!(catalog.select(&decl(DeclKind::ParmVar(defaulted))), None);
    assert_eq!(catalog.select(&decl(DeclKind::ParmVar(written_type))), None);
}

#[test]
fn special_names_fall_back() {
    let mut interner = Interner::new();
    let mut stream = RecordStream::new();
    let catalog = AbbrevCatalog::register(&mut stream);

    let mut operator = field(&mut interner);
    operator.declarator.value.named = NamedDecl::new(DeclName::Operator(1));

    assert_eq!(catalog.select(&decl(DeclKind::Field(operator))), None);
}
