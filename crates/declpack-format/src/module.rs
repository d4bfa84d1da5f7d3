//! Read-only view over a finished module.
//!
//! [`Module`] validates the container and decodes the module tables eagerly;
//! individual records are decoded on request. It never rebuilds declarations.

use std::io;
use std::path::Path;

use crate::abbrev::Abbrev;
use crate::constants::{HEADER_SIZE, VERSION};
use crate::header::Header;
use crate::reader::{DecodedRecord, Entry, EntryReader, decode_entry};
use crate::varint::VarintError;
use crate::{DeclId, IdentId, RecordCode};

/// Module load or decode error.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid magic: expected DCLM")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum 64)")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, body hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("truncated entry at offset {offset}")]
    Truncated { offset: u64 },
    #[error("bad varint at offset {offset}: {source}")]
    Varint { offset: u64, source: VarintError },
    #[error("unknown abbreviation {id} at offset {offset}")]
    UnknownAbbrev { id: u32, offset: u64 },
    #[error("abbreviation at offset {offset} does not start with a record code")]
    MalformedAbbrev { offset: u64 },
    #[error("invalid abbreviation operand tag {tag} at offset {offset}")]
    InvalidAbbrevOp { tag: u8, offset: u64 },
    #[error("unknown record code {code} at offset {offset}")]
    UnknownCode { code: u64, offset: u64 },
    #[error("offset {offset} is outside the record stream")]
    OffsetOutOfRange { offset: u64 },
    #[error("offset {offset} holds an abbreviation definition, not a record")]
    NotARecord { offset: u64 },
    #[error("expected {expected} at offset {offset}, found {actual}")]
    UnexpectedRecord {
        offset: u64,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{table}: header says {header} entries, record has {actual}")]
    CountMismatch {
        table: &'static str,
        header: u32,
        actual: usize,
    },
    #[error("identifier {0} is not valid UTF-8 or lies outside the blob")]
    InvalidIdentifier(u32),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A finished declaration module.
#[derive(Debug)]
pub struct Module {
    bytes: Vec<u8>,
    header: Header,
    abbrevs: Vec<Abbrev>,
    decl_offsets: Vec<u64>,
    required: Vec<DeclId>,
    identifiers: Vec<String>,
}

impl Module {
    /// Load a module from owned bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ModuleError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ModuleError::FileTooSmall(bytes.len()));
        }

        let header = Header::from_bytes(&bytes[..HEADER_SIZE]);

        if !header.validate_magic() {
            return Err(ModuleError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ModuleError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len() {
            return Err(ModuleError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }
        let actual = crc32fast::hash(&bytes[HEADER_SIZE..]);
        if actual != header.checksum {
            return Err(ModuleError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let stream_end = header.ident_blob_pos as usize;
        if stream_end < HEADER_SIZE || stream_end > bytes.len() {
            return Err(ModuleError::OffsetOutOfRange {
                offset: stream_end as u64,
            });
        }

        // One pass over the stream validates framing and collects abbreviations.
        let mut reader = EntryReader::new(&bytes, HEADER_SIZE, stream_end);
        while reader.next_entry()?.is_some() {}
        let abbrevs = reader.into_abbrevs();

        let offsets = table_record(
            &bytes,
            &abbrevs,
            stream_end,
            header.decl_offsets_pos,
            RecordCode::DeclOffsets,
        )?;
        check_count("decl offsets", header.decl_count, offsets.fields.len())?;

        let required = table_record(
            &bytes,
            &abbrevs,
            stream_end,
            header.required_pos,
            RecordCode::RequiredDecls,
        )?;
        check_count("required decls", header.required_count, required.fields.len())?;

        let identifiers = read_identifiers(&bytes, &header)?;

        Ok(Self {
            header,
            abbrevs,
            decl_offsets: offsets.fields,
            required: required
                .fields
                .into_iter()
                .map(|id| DeclId(id as u32))
                .collect(),
            identifiers,
            bytes,
        })
    }

    /// Load a module from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn abbrevs(&self) -> &[Abbrev] {
        &self.abbrevs
    }

    /// Offset of every declaration, indexed by ID - 1.
    pub fn decl_offsets(&self) -> &[u64] {
        &self.decl_offsets
    }

    #[inline]
    pub fn decl_count(&self) -> usize {
        self.decl_offsets.len()
    }

    pub fn decl_offset(&self, id: DeclId) -> Option<u64> {
        id.slot().and_then(|slot| self.decl_offsets.get(slot).copied())
    }

    pub fn required(&self) -> &[DeclId] {
        &self.required
    }

    pub fn identifier(&self, id: IdentId) -> Option<&str> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.identifiers.get(slot).map(String::as_str)
    }

    /// Identifiers in ID order, starting at ID 1.
    pub fn identifiers(&self) -> impl Iterator<Item = (IdentId, &str)> {
        self.identifiers
            .iter()
            .enumerate()
            .map(|(i, s)| (IdentId(i as u32 + 1), s.as_str()))
    }

    /// End of the record stream (start of the identifier section).
    #[inline]
    pub fn stream_end(&self) -> usize {
        self.header.ident_blob_pos as usize
    }

    /// Iterate over every stream entry in order.
    pub fn entries(&self) -> EntryReader<'_> {
        EntryReader::new(&self.bytes, HEADER_SIZE, self.stream_end())
    }

    /// Decode the record starting at `offset`.
    pub fn record_at(&self, offset: u64) -> Result<DecodedRecord, ModuleError> {
        record_at(&self.bytes, &self.abbrevs, self.stream_end(), offset)
    }

    /// Decode the primary record of a declaration.
    pub fn decl_record(&self, id: DeclId) -> Result<DecodedRecord, ModuleError> {
        let offset = self
            .decl_offset(id)
            .ok_or(ModuleError::OffsetOutOfRange { offset: 0 })?;
        self.record_at(offset)
    }

    /// Decode the record at `offset` and every record up to the next
    /// declaration or context block.
    ///
    /// Useful for reading a declaration together with its attribute and
    /// statement records.
    pub fn records_from(&self, offset: u64) -> Result<Vec<DecodedRecord>, ModuleError> {
        let first = self.record_at(offset)?;
        let mut pos = (first.offset as usize) + first.len;
        let mut out = vec![first];
        while pos < self.stream_end() {
            let next = self.record_at(pos as u64)?;
            if next.code.is_decl()
                || next.code.is_context_block()
                || matches!(next.code, RecordCode::DeclOffsets | RecordCode::RequiredDecls)
            {
                break;
            }
            pos += next.len;
            out.push(next);
        }
        Ok(out)
    }
}

fn record_at(
    bytes: &[u8],
    abbrevs: &[Abbrev],
    stream_end: usize,
    offset: u64,
) -> Result<DecodedRecord, ModuleError> {
    if offset < HEADER_SIZE as u64 {
        return Err(ModuleError::OffsetOutOfRange { offset });
    }
    match decode_entry(bytes, offset as usize, stream_end, abbrevs)? {
        (Entry::Record(record), _) => Ok(record),
        (Entry::DefineAbbrev { .. }, _) => Err(ModuleError::NotARecord { offset }),
    }
}

fn table_record(
    bytes: &[u8],
    abbrevs: &[Abbrev],
    stream_end: usize,
    pos: u32,
    expected: RecordCode,
) -> Result<DecodedRecord, ModuleError> {
    let record = record_at(bytes, abbrevs, stream_end, u64::from(pos))?;
    if record.code != expected {
        return Err(ModuleError::UnexpectedRecord {
            offset: u64::from(pos),
            expected: expected.name(),
            actual: record.code.name(),
        });
    }
    Ok(record)
}

fn check_count(table: &'static str, header: u32, actual: usize) -> Result<(), ModuleError> {
    if header as usize != actual {
        return Err(ModuleError::CountMismatch {
            table,
            header,
            actual,
        });
    }
    Ok(())
}

fn read_identifiers(bytes: &[u8], header: &Header) -> Result<Vec<String>, ModuleError> {
    let count = header.ident_count as usize;
    let blob_start = header.ident_blob_pos as usize;
    let blob_end = blob_start + header.ident_blob_size as usize;
    let table_start = header.ident_table_pos() as usize;
    if count == 0 && table_start >= bytes.len() {
        return Ok(Vec::new());
    }
    let table_end = table_start + (count + 1) * 4;
    if blob_end > bytes.len() || table_end > bytes.len() {
        return Err(ModuleError::Truncated {
            offset: table_start as u64,
        });
    }

    let blob = &bytes[blob_start..blob_end];
    let entry = |i: usize| {
        let at = table_start + i * 4;
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as usize
    };

    (0..count)
        .map(|i| {
            let (start, end) = (entry(i), entry(i + 1));
            blob.get(start..end)
                .and_then(|s| std::str::from_utf8(s).ok())
                .map(str::to_owned)
                .ok_or(ModuleError::InvalidIdentifier(i as u32 + 1))
        })
        .collect()
}
