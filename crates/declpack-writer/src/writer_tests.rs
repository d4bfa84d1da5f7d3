use declpack_core::{
    AccessSpecifier, AttrKind, Decl, DeclKind, DeclName, FieldDecl, LangOptions, NamedDecl,
    NamespaceDecl, RecordDecl, SourceLocation, StmtHandle, StorageClass, Symbol, TypeHandle,
    TypeSourceInfo,
};
use declpack_format::{AbbrevId, DeclId, Entry, IdentId, RecordCode};

use crate::test_utils::{Fixture, decl_record};
use crate::{WriteError, WriterOptions};

fn c() -> WriterOptions {
    WriterOptions::new(LangOptions::c())
}

#[test]
fn decl_ids_are_stable() {
    let mut fx = Fixture::new();
    let v = fx.var("x", 1);
    let x = fx.add(fx.tu, DeclKind::Var(v));

    let mut writer = fx.writer(c());

    assert_eq!(writer.decl_id(x), DeclId(1));
    assert_eq!(writer.decl_id(fx.tu), DeclId(2));
    assert_eq!(writer.decl_id(x), DeclId(1));
    assert_eq!(writer.minted(), 2);
    assert_eq!(writer.write_decl(x).unwrap(), DeclId(1));
}

#[test]
fn ids_follow_first_reference_order() {
    let mut fx = Fixture::new();
    let mut members = Vec::new();
    for name in ["a", "b", "c"] {
        let v = fx.var(name, 1);
        members.push(fx.add(fx.tu, DeclKind::Var(v)));
    }

    let written = fx.write_all(c());

    assert_eq!(written.decl_id(fx.tu), Some(DeclId(1)));
    let ids: Vec<_> = members.iter().map(|&m| written.decl_id(m).unwrap()).collect();
    assert_eq!(ids, vec![DeclId(2), DeclId(3), DeclId(4)]);
    assert_eq!(written.decl(DeclId(3)), Some(members[1]));
}

#[test]
fn forward_reference_resolves_after_later_write() {
    let mut fx = Fixture::new();
    let first = fx.var("a", 1);
    let a = fx.add(fx.tu, DeclKind::Var(first));
    let mut second = fx.var("a", 1);
    second.previous = Some(a);
    let b = fx.add(fx.tu, DeclKind::Var(second));

    let mut writer = fx.writer(c());
    assert_eq!(writer.write_decl(b).unwrap(), DeclId(1));
    assert!(!writer.is_written(DeclId(3)));
    assert_eq!(writer.write_decl(a).unwrap(), DeclId(3));
    writer.write_decl(fx.tu).unwrap();
    let written = writer.finish().unwrap();

    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, b);
    assert_eq!(record.fields[20], 3);
    assert!(module.decl_offset(DeclId(3)).is_some());
}

#[test]
fn finish_rejects_unwritten_ids() {
    let mut fx = Fixture::new();
    let v = fx.var("x", 1);
    let x = fx.add(fx.tu, DeclKind::Var(v));

    let mut writer = fx.writer(c());
    writer.write_decl(x).unwrap();
    let err = writer.finish().unwrap_err();

    assert!(matches!(err, WriteError::UnwrittenDecl { id } if id == DeclId(2)));
}

#[test]
fn write_reachable_follows_references_outside_scopes() {
    let mut fx = Fixture::new();
    let detached = fx.var("z", 1);
    let z = fx.alloc(DeclKind::Var(detached));
    let mut v = fx.var("a", 1);
    v.previous = Some(z);
    fx.add(fx.tu, DeclKind::Var(v));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();

    assert_eq!(module.decl_count(), 3);
    assert_eq!(module.header().decl_count, 3);
    let record = decl_record(&written, &module, z);
    assert_eq!(record.fields[0], 0);
}

#[test]
fn var_round_trips_with_initializer() {
    let mut fx = Fixture::new();
    let mut v = fx.var("g", 3);
    v.init = Some(StmtHandle(42));
    let g = fx.add(fx.tu, DeclKind::Var(v));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, g);

    assert_eq!(record.code, RecordCode::DeclVar);
    assert_eq!(record.abbrev, None);
    assert_eq!(record.fields.len(), 22);
    assert_eq!(record.fields[0], u64::from(written.decl_id(fx.tu).unwrap().0));
    assert_eq!(record.fields[9], 0);
    assert_eq!(module.identifier(IdentId(record.fields[10] as u32)), Some("g"));
    assert_eq!(record.fields[11], 3 + 64);
    assert_eq!(record.fields[21], 1);

    let records = module.records_from(record.offset).unwrap();
    let codes: Vec<_> = records.iter().map(|r| r.code).collect();
    assert_eq!(
        codes,
        vec![RecordCode::DeclVar, RecordCode::StmtOpaque, RecordCode::StmtStop]
    );
    assert_eq!(records[1].fields, vec![42]);
}

#[test]
fn function_body_follows_its_record() {
    let mut fx = Fixture::new();
    let function = fx.function("f", Some(7));
    let f = fx.add(fx.tu, DeclKind::Function(function));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, f);
    let records = module.records_from(record.offset).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].code, RecordCode::StmtOpaque);
    assert_eq!(records[1].fields, vec![7]);
    assert_eq!(records[2].code, RecordCode::StmtStop);
}

#[test]
fn required_list_in_c() {
    let mut fx = Fixture::new();
    let mut local = fx.function("f", Some(1));
    local.storage_class = StorageClass::Static;
    fx.add(fx.tu, DeclKind::Function(local));
    let mut global = fx.var("g", 1);
    global.init = Some(StmtHandle(2));
    let g = fx.add(fx.tu, DeclKind::Var(global));
    let prototype = fx.function("h", None);
    fx.add(fx.tu, DeclKind::Function(prototype));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let expected = [written.decl_id(g).unwrap()];

    assert_eq!(written.required(), &expected);
    assert_eq!(module.required(), &expected);
}

#[test]
fn used_attribute_forces_required_and_writes_attr_record() {
    let mut fx = Fixture::new();
    let mut v = fx.var("u", 1);
    v.storage_class = StorageClass::Static;
    let u = fx.add_decl(
        fx.tu,
        Decl::new(DeclKind::Var(v), SourceLocation(9)).with_attr(AttrKind::Used),
    );

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, u);
    let records = module.records_from(record.offset).unwrap();

    assert_eq!(record.fields[4], 1);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].code, RecordCode::DeclAttr);
    assert_eq!(records[1].fields, vec![1, 8, 0]);
    assert_eq!(written.required(), &[written.decl_id(u).unwrap()]);
}

#[test]
fn empty_namespace_has_no_context_blocks() {
    let mut fx = Fixture::new();
    let name = fx.name("n");
    let ns = fx.add(
        fx.tu,
        DeclKind::Namespace(NamespaceDecl {
            named: NamedDecl::new(name),
            ..Default::default()
        }),
    );

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, ns);

    assert_eq!(record.code, RecordCode::DeclNamespace);
    assert_eq!(record.fields.len(), 18);
    assert_eq!(record.fields[16..], [0, 0]);
}

#[test]
fn context_blocks_precede_their_declaration() {
    let mut fx = Fixture::new();
    let v = fx.var("x", 1);
    let x = fx.add(fx.tu, DeclKind::Var(v));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let tu = decl_record(&written, &module, fx.tu);
    let x_id = u64::from(written.decl_id(x).unwrap().0);

    let lexical = tu.fields[tu.fields.len() - 2];
    let visible = tu.fields[tu.fields.len() - 1];
    assert!(lexical < visible && visible < tu.offset);

    let lexical = module.record_at(lexical).unwrap();
    assert_eq!(lexical.code, RecordCode::DeclContextLexical);
    assert_eq!(lexical.fields, vec![x_id]);

    let visible = module.record_at(visible).unwrap();
    assert_eq!(visible.code, RecordCode::DeclContextVisible);
    assert_eq!(visible.fields.len(), 4);
    assert_eq!(visible.fields[0], 0);
    assert_eq!(module.identifier(IdentId(visible.fields[1] as u32)), Some("x"));
    assert_eq!(visible.fields[2..], [1, x_id]);
}

#[test]
fn reopened_namespace_defers_lookup_to_original() {
    let mut fx = Fixture::new();
    let name = fx.name("n");
    let original = fx.add(
        fx.tu,
        DeclKind::Namespace(NamespaceDecl {
            named: NamedDecl::new(name),
            ..Default::default()
        }),
    );
    let reopened = fx.add(
        fx.tu,
        DeclKind::Namespace(NamespaceDecl {
            named: NamedDecl::new(name),
            original_namespace: Some(original),
            ..Default::default()
        }),
    );
    let a = fx.var("a", 1);
    let a = fx.add(original, DeclKind::Var(a));
    let b = fx.var("b", 1);
    let b = fx.add(reopened, DeclKind::Var(b));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let id_of = |d| u64::from(written.decl_id(d).unwrap().0);

    let reopened_record = decl_record(&written, &module, reopened);
    assert_eq!(reopened_record.fields[14], 0);
    assert_eq!(reopened_record.fields[15], id_of(original));
    assert_ne!(reopened_record.fields[16], 0);
    assert_eq!(reopened_record.fields[17], 0);

    let original_record = decl_record(&written, &module, original);
    assert_eq!(original_record.fields[14], 1);
    let visible = module.record_at(original_record.fields[17]).unwrap();
    assert_eq!(visible.fields.len(), 8);
    assert_eq!(visible.fields[3], id_of(a));
    assert_eq!(visible.fields[7], id_of(b));
}

#[test]
fn function_scope_has_lexical_block_only() {
    let mut fx = Fixture::new();
    let function = fx.function("f", Some(1));
    let f = fx.add(fx.tu, DeclKind::Function(function));
    let parm = fx.parm("p", 2);
    let p = fx.add(f, DeclKind::ParmVar(parm));
    if let DeclKind::Function(function) = &mut fx.arena.get_mut(f).kind {
        function.params.push(p);
    }

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let record = decl_record(&written, &module, f);
    let n = record.fields.len();

    assert_ne!(record.fields[n - 2], 0);
    assert_eq!(record.fields[n - 1], 0);
    let lexical = module.record_at(record.fields[n - 2]).unwrap();
    assert_eq!(lexical.fields, vec![u64::from(written.decl_id(p).unwrap().0)]);
}

#[test]
fn bit_width_follows_field_record() {
    let mut fx = Fixture::new();
    let mut record = RecordDecl::default();
    record.tag.ty.named = NamedDecl::new(fx.name("s"));
    record.tag.is_definition = true;
    let s = fx.add(fx.tu, DeclKind::Record(record));
    let mut field = FieldDecl::default();
    field.declarator.value.named = NamedDecl::new(fx.name("b"));
    field.declarator.value.ty = Some(TypeHandle(1));
    field.bit_width = Some(StmtHandle(6));
    let b = fx.add(s, DeclKind::Field(field));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let offset = module.decl_offset(written.decl_id(b).unwrap()).unwrap();
    let tail: Vec<_> = module
        .entries()
        .filter_map(|entry| match entry.unwrap() {
            Entry::Record(record) if record.offset >= offset => Some(record),
            _ => None,
        })
        .take(3)
        .collect();

    assert_eq!(tail[0].code, RecordCode::DeclField);
    assert_eq!(tail[0].abbrev, None);
    assert_eq!(tail[0].fields[13..], [0, 1]);
    assert_eq!(tail[1].code, RecordCode::StmtOpaque);
    assert_eq!(tail[1].fields, vec![6]);
    assert_eq!(tail[2].code, RecordCode::StmtStop);
}

#[test]
fn plain_parameter_uses_abbreviation() {
    let mut fx = Fixture::new();
    let function = fx.function("f", None);
    let f = fx.add(fx.tu, DeclKind::Function(function));
    let plain = fx.parm("p", 2);
    let p = fx.add(f, DeclKind::ParmVar(plain));
    let flagged = fx.parm("q", 2);
    let q = fx.add_decl(
        f,
        Decl::new(DeclKind::ParmVar(flagged), SourceLocation(20)).with_attr(AttrKind::Unused),
    );

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let plain = decl_record(&written, &module, p);
    let flagged = decl_record(&written, &module, q);

    assert_eq!(plain.abbrev, Some(AbbrevId(4)));
    assert_eq!(plain.code, RecordCode::DeclParmVar);
    assert_eq!(plain.fields.len(), 24);
    assert_eq!(flagged.abbrev, None);
    assert_eq!(flagged.fields.len(), 24);
    assert_eq!(flagged.fields[4], 1);
    assert!(plain.len < flagged.len);
}

#[test]
fn default_argument_and_written_type_use_generic_parameter_shape() {
    let mut fx = Fixture::new();
    let function = fx.function("f", None);
    let f = fx.add(fx.tu, DeclKind::Function(function));
    let mut defaulted = fx.parm("p", 2);
    defaulted.var.init = Some(StmtHandle(9));
    let p = fx.add(f, DeclKind::ParmVar(defaulted));
    let mut written_type = fx.parm("q", 2);
    written_type.var.declarator.type_info = Some(TypeSourceInfo::new(TypeHandle(3)));
    let q = fx.add(f, DeclKind::ParmVar(written_type));

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();
    let defaulted = decl_record(&written, &module, p);
    let written_type = decl_record(&written, &module, q);

    assert_eq!(defaulted.abbrev, None);
    assert_eq!(defaulted.fields[21], 1);
    assert_eq!(written_type.abbrev, None);
    assert_eq!(written_type.fields[12], 67);
}

#[test]
fn abbreviations_do_not_change_decoded_fields() {
    let mut fx = Fixture::new();
    let function = fx.function("f", None);
    let f = fx.add(fx.tu, DeclKind::Function(function));
    let parm = fx.parm("p", 2);
    let p = fx.add(f, DeclKind::ParmVar(parm));

    let compact = fx.write_all(c());
    let generic = fx.write_all(c().without_abbreviations());
    let compact_module = compact.to_module().unwrap();
    let generic_module = generic.to_module().unwrap();

    assert_eq!(compact_module.abbrevs().len(), 3);
    assert!(generic_module.abbrevs().is_empty());

    let a = decl_record(&compact, &compact_module, p);
    let b = decl_record(&generic, &generic_module, p);
    assert!(a.abbrev.is_some());
    assert_eq!(b.abbrev, None);
    assert_eq!(a.fields, b.fields);
}

#[test]
fn writing_twice_is_a_no_op() {
    let mut fx = Fixture::new();
    let v = fx.var("x", 1);
    let x = fx.add(fx.tu, DeclKind::Var(v));

    let mut writer = fx.writer(c());
    let first = writer.write_decl(x).unwrap();
    let position = writer.position();

    assert_eq!(writer.write_decl(x).unwrap(), first);
    assert_eq!(writer.position(), position);
}

#[test]
fn unsupported_kind_is_fatal() {
    let mut fx = Fixture::new();
    let s = fx.add(fx.tu, DeclKind::StaticAssert);

    let mut writer = fx.writer(c());
    let err = writer.write_decl(s).unwrap_err();

    assert!(matches!(err, WriteError::UnsupportedKind { kind: "StaticAssert" }));
    assert_eq!(err.to_string(), "StaticAssert declarations cannot be serialized");
}

#[test]
fn thread_local_parameter_is_fatal() {
    let mut fx = Fixture::new();
    let mut parm = fx.parm("p", 1);
    parm.var.thread_specified = true;
    let p = fx.alloc(DeclKind::ParmVar(parm));

    let mut writer = fx.writer(c());
    let err = writer.write_decl(p).unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid ParmVar declaration: parameter is thread-specified"
    );
}

#[test]
fn parameter_with_access_is_fatal() {
    let mut fx = Fixture::new();
    let parm = fx.parm("p", 1);
    let p = fx.arena.alloc(
        Decl::new(DeclKind::ParmVar(parm), SourceLocation(3)).with_access(AccessSpecifier::Public),
    );

    let mut writer = fx.writer(c());
    let err = writer.write_decl(p).unwrap_err();

    assert!(matches!(
        err,
        WriteError::InvariantViolation {
            kind: "ParmVar",
            reason: "parameter has an access specifier"
        }
    ));
}

#[test]
fn unknown_symbol_is_fatal() {
    let mut fx = Fixture::new();
    let mut v = fx.var("x", 1);
    let foreign = Symbol::from_raw(99);
    v.declarator.value.named = NamedDecl::new(DeclName::ident(foreign));
    let x = fx.alloc(DeclKind::Var(v));

    let mut writer = fx.writer(c());
    let err = writer.write_decl(x).unwrap_err();

    assert!(matches!(err, WriteError::UnknownSymbol(sym) if sym == foreign));
}

#[test]
fn module_tables_match_session_output() {
    let mut fx = Fixture::new();
    for name in ["a", "b"] {
        let v = fx.var(name, 1);
        fx.add(fx.tu, DeclKind::Var(v));
    }

    let written = fx.write_all(c());
    let module = written.to_module().unwrap();

    assert_eq!(module.decl_offsets(), written.decl_offsets());
    let names: Vec<_> = module.identifiers().map(|(_, s)| s).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn dump_without_abbreviations() {
    let mut fx = Fixture::new();
    let v = fx.var("x", 1);
    fx.add(fx.tu, DeclKind::Var(v));

    let written = fx.write_all(c().without_abbreviations());
    let module = written.to_module().unwrap();

    insta::assert_snapshot!(declpack_format::dump(&module), @r"
    [header]
    decls: 2
    identifiers: 1
    required: 0

    [identifiers]
    I1   x

    [decls]
    D1   @75
    D2   @90

    [stream]
        64  DECL_CONTEXT_LEXICAL [2]
        68  DECL_CONTEXT_VISIBLE [0 1 1 2]
        75  DECL_TRANSLATION_UNIT [0 0 1 0 0 0 0 3 0 0 64 68]
        90  DECL_VAR [1 1 2 0 0 0 0 3 0 0 1 65 0 0 0 0 0 0 0 0 0 0]
       115  DECL_OFFSETS [75 90]
       120  REQUIRED_DECLS []
    ");
}
