use crate::stream::header_field;
use crate::{
    Abbrev, AbbrevId, DeclId, HEADER_SIZE, Module, Record, RecordCode, RecordStream, StreamError,
    Trailer,
};

fn var_abbrev() -> Abbrev {
    Abbrev::for_code(RecordCode::DeclVar).literal(0).varint()
}

#[test]
fn stream_starts_after_header_placeholder() {
    let stream = RecordStream::new();

    assert_eq!(stream.position(), HEADER_SIZE as u64);
    assert!(stream.bytes().iter().all(|&b| b == 0));
}

#[test]
fn abbrev_ids_start_at_four() {
    let mut stream = RecordStream::new();

    assert_eq!(stream.define_abbrev(var_abbrev()), AbbrevId(4));
    assert_eq!(stream.define_abbrev(var_abbrev()), AbbrevId(5));
    assert!(stream.abbrev(AbbrevId(3)).is_none());
}

#[test]
fn generic_record_layout() {
    let mut stream = RecordStream::new();
    let offset = stream.emit(&Record::with_fields(RecordCode::DeclVar, vec![1, 300]));

    assert_eq!(offset, 64);
    assert_eq!(&stream.bytes()[64..], &[3, 22, 2, 1, 0xAC, 0x02]);
}

#[test]
fn abbreviated_record_omits_literals() {
    let mut stream = RecordStream::new();
    let id = stream.define_abbrev(var_abbrev());
    let start = stream.position();

    let offset = stream
        .emit_abbreviated(id, &Record::with_fields(RecordCode::DeclVar, vec![0, 5]))
        .unwrap();

    assert_eq!(offset, start);
    assert_eq!(&stream.bytes()[start as usize..], &[4, 5]);
}

#[test]
fn abbreviated_literal_mismatch_is_error() {
    let mut stream = RecordStream::new();
    let id = stream.define_abbrev(var_abbrev());
    let before = stream.position();

    let err = stream
        .emit_abbreviated(id, &Record::with_fields(RecordCode::DeclVar, vec![1, 5]))
        .unwrap_err();

    assert_eq!(
        err,
        StreamError::LiteralMismatch {
            abbrev: id,
            field: 0,
            expected: 0,
            actual: 1
        }
    );
    assert_eq!(stream.position(), before);
}

#[test]
fn abbreviated_shape_errors() {
    let mut stream = RecordStream::new();
    let id = stream.define_abbrev(var_abbrev());

    let err = stream
        .emit_abbreviated(id, &Record::with_fields(RecordCode::DeclField, vec![0, 5]))
        .unwrap_err();
    assert!(matches!(err, StreamError::CodeMismatch { .. }));

    let err = stream
        .emit_abbreviated(id, &Record::with_fields(RecordCode::DeclVar, vec![0]))
        .unwrap_err();
    assert!(matches!(err, StreamError::FieldCount { expected: 2, actual: 1, .. }));

    let err = stream
        .emit_abbreviated(AbbrevId(9), &Record::new(RecordCode::DeclVar))
        .unwrap_err();
    assert_eq!(err, StreamError::UnknownAbbrev(AbbrevId(9)));
}

#[test]
fn seal_produces_loadable_module() {
    let mut stream = RecordStream::new();
    let offset = stream.emit(&Record::with_fields(RecordCode::DeclVar, vec![7]));

    let bytes = stream.seal(Trailer {
        decl_offsets: &[offset],
        required: &[DeclId(1)],
        ident_blob: b"ab",
        ident_table: &[0, 1, 2],
    })
    .unwrap();
    let module = Module::from_bytes(bytes).unwrap();

    assert_eq!(module.decl_offsets(), &[64]);
    assert_eq!(module.required(), &[DeclId(1)]);
    assert_eq!(module.identifier(crate::IdentId(2)), Some("b"));
    assert_eq!(module.decl_record(DeclId(1)).unwrap().fields, vec![7]);
}

#[test]
fn header_fields_reject_values_past_u32() {
    assert_eq!(header_field("total size", u64::from(u32::MAX)), Ok(u32::MAX));

    let err = header_field("total size", u64::from(u32::MAX) + 1).unwrap_err();
    assert_eq!(
        err,
        StreamError::HeaderOverflow {
            field: "total size",
            value: 1 << 32,
        }
    );
    assert_eq!(
        err.to_string(),
        "total size of 4294967296 does not fit the 32-bit header"
    );
}
