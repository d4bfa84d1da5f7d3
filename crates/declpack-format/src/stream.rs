//! Record stream sink.
//!
//! The stream reserves [`HEADER_SIZE`] bytes up front; [`RecordStream::seal`]
//! appends the module tables and patches the header once everything else is
//! written.

use crate::abbrev::{Abbrev, AbbrevId, AbbrevOp};
use crate::constants::{ABBREV_DEFINE, ABBREV_UNABBREVIATED, FIRST_USER_ABBREV, HEADER_SIZE};
use crate::header::Header;
use crate::varint::write_varint;
use crate::{DeclId, RecordCode};

/// Error raised while appending to a [`RecordStream`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("abbreviation {0} is not defined")]
    UnknownAbbrev(AbbrevId),
    #[error("abbreviation {abbrev} encodes {expected:?}, record is {actual:?}")]
    CodeMismatch {
        abbrev: AbbrevId,
        expected: Option<RecordCode>,
        actual: RecordCode,
    },
    #[error("abbreviation {abbrev} has {expected} fields, record has {actual}")]
    FieldCount {
        abbrev: AbbrevId,
        expected: usize,
        actual: usize,
    },
    #[error("abbreviation {abbrev} fixes field {field} to {expected}, record has {actual}")]
    LiteralMismatch {
        abbrev: AbbrevId,
        field: usize,
        expected: u64,
        actual: u64,
    },
    #[error("{field} of {value} does not fit the 32-bit header")]
    HeaderOverflow { field: &'static str, value: u64 },
}

/// A record: code plus ordered unsigned fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub code: RecordCode,
    pub fields: Vec<u64>,
}

impl Record {
    pub fn new(code: RecordCode) -> Self {
        Self {
            code,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(code: RecordCode, fields: Vec<u64>) -> Self {
        Self { code, fields }
    }

    #[inline]
    pub fn push(&mut self, value: u64) {
        self.fields.push(value);
    }
}

/// Module tables appended after the last declaration.
#[derive(Clone, Copy, Debug)]
pub struct Trailer<'a> {
    /// Offset of every declaration, indexed by ID - 1.
    pub decl_offsets: &'a [u64],
    pub required: &'a [DeclId],
    /// Concatenated identifier bytes.
    pub ident_blob: &'a [u8],
    /// Start offset of each identifier in the blob, plus a trailing sentinel.
    pub ident_table: &'a [u32],
}

/// Append-only record stream.
#[derive(Debug)]
pub struct RecordStream {
    bytes: Vec<u8>,
    abbrevs: Vec<Abbrev>,
}

impl Default for RecordStream {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStream {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; HEADER_SIZE],
            abbrevs: Vec::new(),
        }
    }

    /// Current byte offset; the next entry starts here.
    #[inline]
    pub fn position(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Bytes written so far, header placeholder included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn abbrev(&self, id: AbbrevId) -> Option<&Abbrev> {
        let index = id.0.checked_sub(FIRST_USER_ABBREV)?;
        self.abbrevs.get(index as usize)
    }

    /// Write an abbreviation definition and return its id.
    pub fn define_abbrev(&mut self, abbrev: Abbrev) -> AbbrevId {
        write_varint(&mut self.bytes, u64::from(ABBREV_DEFINE));
        write_varint(&mut self.bytes, abbrev.ops().len() as u64);
        for op in abbrev.ops() {
            match *op {
                AbbrevOp::Literal(v) => {
                    self.bytes.push(AbbrevOp::TAG_LITERAL);
                    write_varint(&mut self.bytes, v);
                }
                AbbrevOp::Varint => self.bytes.push(AbbrevOp::TAG_VARINT),
            }
        }

        let id = AbbrevId(FIRST_USER_ABBREV + self.abbrevs.len() as u32);
        self.abbrevs.push(abbrev);
        id
    }

    /// Write a record in the generic encoding. Returns its offset.
    pub fn emit(&mut self, record: &Record) -> u64 {
        let offset = self.position();
        write_varint(&mut self.bytes, u64::from(ABBREV_UNABBREVIATED));
        write_varint(&mut self.bytes, record.code.as_u64());
        write_varint(&mut self.bytes, record.fields.len() as u64);
        for &field in &record.fields {
            write_varint(&mut self.bytes, field);
        }
        offset
    }

    /// Write a record through an abbreviation. Returns its offset.
    ///
    /// The record must match the shape exactly: same code, same field
    /// count, and every literal operand equal to the corresponding field.
    pub fn emit_abbreviated(&mut self, id: AbbrevId, record: &Record) -> Result<u64, StreamError> {
        let abbrev = self.abbrev(id).ok_or(StreamError::UnknownAbbrev(id))?;

        if abbrev.code() != Some(record.code) {
            return Err(StreamError::CodeMismatch {
                abbrev: id,
                expected: abbrev.code(),
                actual: record.code,
            });
        }
        let ops = abbrev.field_ops();
        if ops.len() != record.fields.len() {
            return Err(StreamError::FieldCount {
                abbrev: id,
                expected: ops.len(),
                actual: record.fields.len(),
            });
        }
        if let Some(field) = abbrev.first_mismatch(&record.fields)
            && let AbbrevOp::Literal(expected) = ops[field]
        {
            return Err(StreamError::LiteralMismatch {
                abbrev: id,
                field,
                expected,
                actual: record.fields[field],
            });
        }

        let mut payload = Vec::with_capacity(record.fields.len() + 1);
        write_varint(&mut payload, u64::from(id.0));
        for (op, &value) in ops.iter().zip(&record.fields) {
            if *op == AbbrevOp::Varint {
                write_varint(&mut payload, value);
            }
        }

        let offset = self.position();
        self.bytes.extend_from_slice(&payload);
        Ok(offset)
    }

    /// Append the module tables, then fill in the header.
    ///
    /// Fails if the module outgrows the header's 32-bit fields.
    pub fn seal(mut self, trailer: Trailer<'_>) -> Result<Vec<u8>, StreamError> {
        let decl_offsets_pos = self.position();
        self.emit(&Record::with_fields(
            RecordCode::DeclOffsets,
            trailer.decl_offsets.to_vec(),
        ));

        let required_pos = self.position();
        self.emit(&Record::with_fields(
            RecordCode::RequiredDecls,
            trailer.required.iter().map(|id| u64::from(id.0)).collect(),
        ));

        let ident_blob_pos = self.position();
        self.bytes.extend_from_slice(trailer.ident_blob);
        for &entry in trailer.ident_table {
            self.bytes.extend_from_slice(&entry.to_le_bytes());
        }

        let header = Header {
            checksum: crc32fast::hash(&self.bytes[HEADER_SIZE..]),
            total_size: header_field("total size", self.bytes.len() as u64)?,
            decl_count: header_field("decl count", trailer.decl_offsets.len() as u64)?,
            ident_count: header_field(
                "identifier count",
                trailer.ident_table.len().saturating_sub(1) as u64,
            )?,
            required_count: header_field("required count", trailer.required.len() as u64)?,
            decl_offsets_pos: header_field("decl offsets position", decl_offsets_pos)?,
            required_pos: header_field("required position", required_pos)?,
            ident_blob_pos: header_field("identifier blob position", ident_blob_pos)?,
            ident_blob_size: header_field("identifier blob size", trailer.ident_blob.len() as u64)?,
            ..Header::default()
        };
        self.bytes[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
        Ok(self.bytes)
    }
}

/// Narrow a size or position to its 32-bit header slot.
pub(crate) fn header_field(field: &'static str, value: u64) -> Result<u32, StreamError> {
    u32::try_from(value).map_err(|_| StreamError::HeaderOverflow { field, value })
}
