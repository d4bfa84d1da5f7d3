use crate::{Abbrev, AbbrevOp, RecordCode};

#[test]
fn first_operand_is_code() {
    let abbrev = Abbrev::for_code(RecordCode::DeclField).varint().literal(0);

    assert_eq!(abbrev.code(), Some(RecordCode::DeclField));
    assert_eq!(abbrev.num_fields(), 2);
    assert_eq!(abbrev.field_ops(), &[AbbrevOp::Varint, AbbrevOp::Literal(0)]);
}

#[test]
fn matching_fields_have_no_mismatch() {
    let abbrev = Abbrev::for_code(RecordCode::DeclField).varint().literal(0);

    assert_eq!(abbrev.first_mismatch(&[9, 0]), None);
    assert_eq!(abbrev.first_mismatch(&[9, 1]), Some(1));
}

#[test]
fn first_mismatch_reports_position() {
    let abbrev = Abbrev::for_code(RecordCode::DeclVar)
        .literal(1)
        .varints(2)
        .literal(3);

    assert_eq!(abbrev.first_mismatch(&[1, 5, 6, 3]), None);
    assert_eq!(abbrev.first_mismatch(&[1, 5, 6, 4]), Some(3));
    assert_eq!(abbrev.first_mismatch(&[1, 5]), Some(2));
}
