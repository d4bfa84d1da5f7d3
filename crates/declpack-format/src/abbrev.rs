//! Abbreviation shapes.
//!
//! An abbreviation fixes the code and any constant fields of a record so the
//! stream only carries the fields that vary. The first operand is always the
//! record code as a literal; the remaining operands map one-to-one onto the
//! record's fields.

use std::fmt;

use crate::RecordCode;

/// Abbreviation id as written in front of an entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct AbbrevId(pub u32);

impl fmt::Display for AbbrevId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One operand of an abbreviation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AbbrevOp {
    /// Field always has this value and is not written.
    Literal(u64),
    /// Field is written as a varint.
    Varint,
}

impl AbbrevOp {
    pub(crate) const TAG_LITERAL: u8 = 0;
    pub(crate) const TAG_VARINT: u8 = 1;
}

impl fmt::Display for AbbrevOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "L{v}"),
            Self::Varint => f.write_str("V"),
        }
    }
}

/// Record shape: code literal followed by one operand per field.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Abbrev {
    ops: Vec<AbbrevOp>,
}

impl Abbrev {
    /// Start a shape for records with the given code.
    pub fn for_code(code: RecordCode) -> Self {
        Self {
            ops: vec![AbbrevOp::Literal(code.as_u64())],
        }
    }

    /// Rebuild a shape from decoded operands.
    pub(crate) fn from_ops(ops: Vec<AbbrevOp>) -> Self {
        Self { ops }
    }

    pub fn literal(mut self, value: u64) -> Self {
        self.ops.push(AbbrevOp::Literal(value));
        self
    }

    pub fn varint(mut self) -> Self {
        self.ops.push(AbbrevOp::Varint);
        self
    }

    /// `count` consecutive varint fields.
    pub fn varints(mut self, count: usize) -> Self {
        self.ops.extend(std::iter::repeat_n(AbbrevOp::Varint, count));
        self
    }

    pub fn ops(&self) -> &[AbbrevOp] {
        &self.ops
    }

    /// The literal record code, if the shape is well formed.
    pub fn code(&self) -> Option<RecordCode> {
        match self.ops.first() {
            Some(AbbrevOp::Literal(v)) => RecordCode::from_u64(*v),
            _ => None,
        }
    }

    /// Operands describing record fields (everything after the code).
    pub fn field_ops(&self) -> &[AbbrevOp] {
        self.ops.get(1..).unwrap_or(&[])
    }

    #[inline]
    pub fn num_fields(&self) -> usize {
        self.field_ops().len()
    }

    /// Index of the first field that contradicts a literal operand, or the
    /// field count itself when the lengths differ.
    pub fn first_mismatch(&self, fields: &[u64]) -> Option<usize> {
        let ops = self.field_ops();
        if ops.len() != fields.len() {
            return Some(ops.len().min(fields.len()));
        }
        ops.iter()
            .zip(fields)
            .position(|(op, &field)| matches!(op, AbbrevOp::Literal(v) if *v != field))
    }
}
