//! Sequential and random-access decoding of stream entries.

use crate::abbrev::{Abbrev, AbbrevId, AbbrevOp};
use crate::constants::{ABBREV_DEFINE, ABBREV_UNABBREVIATED, FIRST_USER_ABBREV};
use crate::module::ModuleError;
use crate::varint::read_varint;
use crate::RecordCode;

/// A decoded record with its position and encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRecord {
    pub offset: u64,
    /// Abbreviation used, `None` for the generic encoding.
    pub abbrev: Option<AbbrevId>,
    pub code: RecordCode,
    pub fields: Vec<u64>,
    /// Encoded size in bytes.
    pub len: usize,
}

/// One entry of the record stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    DefineAbbrev {
        offset: u64,
        id: AbbrevId,
        abbrev: Abbrev,
    },
    Record(DecodedRecord),
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl Cursor<'_> {
    fn byte(&mut self) -> Result<u8, ModuleError> {
        if self.pos >= self.end {
            return Err(ModuleError::Truncated {
                offset: self.pos as u64,
            });
        }
        let b = self.bytes[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn varint(&mut self) -> Result<u64, ModuleError> {
        let (value, used) = read_varint(&self.bytes[self.pos..self.end]).map_err(|source| {
            ModuleError::Varint {
                offset: self.pos as u64,
                source,
            }
        })?;
        self.pos += used;
        Ok(value)
    }
}

/// Decode the entry at `pos`, with `abbrevs` as the abbreviations defined so far.
///
/// Returns the entry and the position right after it.
pub(crate) fn decode_entry(
    bytes: &[u8],
    pos: usize,
    end: usize,
    abbrevs: &[Abbrev],
) -> Result<(Entry, usize), ModuleError> {
    if pos >= end || end > bytes.len() {
        return Err(ModuleError::OffsetOutOfRange { offset: pos as u64 });
    }
    let offset = pos as u64;
    let mut cur = Cursor { bytes, pos, end };
    let id = cur.varint()?;

    let entry = match u32::try_from(id) {
        Ok(ABBREV_DEFINE) => {
            let count = cur.varint()?;
            let mut ops = Vec::new();
            for _ in 0..count {
                let tag = cur.byte()?;
                let op = match tag {
                    AbbrevOp::TAG_LITERAL => AbbrevOp::Literal(cur.varint()?),
                    AbbrevOp::TAG_VARINT => AbbrevOp::Varint,
                    _ => {
                        return Err(ModuleError::InvalidAbbrevOp {
                            tag,
                            offset: (cur.pos - 1) as u64,
                        });
                    }
                };
                ops.push(op);
            }
            let abbrev = Abbrev::from_ops(ops);
            if abbrev.code().is_none() {
                return Err(ModuleError::MalformedAbbrev { offset });
            }
            Entry::DefineAbbrev {
                offset,
                id: AbbrevId(FIRST_USER_ABBREV + abbrevs.len() as u32),
                abbrev,
            }
        }
        Ok(ABBREV_UNABBREVIATED) => {
            let raw = cur.varint()?;
            let code = RecordCode::from_u64(raw)
                .ok_or(ModuleError::UnknownCode { code: raw, offset })?;
            let count = cur.varint()?;
            let mut fields = Vec::new();
            for _ in 0..count {
                fields.push(cur.varint()?);
            }
            Entry::Record(DecodedRecord {
                offset,
                abbrev: None,
                code,
                fields,
                len: cur.pos - pos,
            })
        }
        Ok(user) if user >= FIRST_USER_ABBREV => {
            let abbrev = abbrevs
                .get((user - FIRST_USER_ABBREV) as usize)
                .ok_or(ModuleError::UnknownAbbrev { id: user, offset })?;
            let code = abbrev
                .code()
                .ok_or(ModuleError::MalformedAbbrev { offset })?;
            let mut fields = Vec::with_capacity(abbrev.num_fields());
            for op in abbrev.field_ops() {
                fields.push(match *op {
                    AbbrevOp::Literal(v) => v,
                    AbbrevOp::Varint => cur.varint()?,
                });
            }
            Entry::Record(DecodedRecord {
                offset,
                abbrev: Some(AbbrevId(user)),
                code,
                fields,
                len: cur.pos - pos,
            })
        }
        _ => {
            return Err(ModuleError::UnknownAbbrev {
                id: u32::try_from(id).unwrap_or(u32::MAX),
                offset,
            });
        }
    };

    Ok((entry, cur.pos))
}

/// Sequential reader over a range of the stream.
///
/// Abbreviation definitions are collected as they are passed, so records
/// that use them decode correctly.
pub struct EntryReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    abbrevs: Vec<Abbrev>,
}

impl<'a> EntryReader<'a> {
    pub fn new(bytes: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            bytes,
            pos: start,
            end,
            abbrevs: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Abbreviations defined so far.
    pub fn abbrevs(&self) -> &[Abbrev] {
        &self.abbrevs
    }

    pub fn into_abbrevs(self) -> Vec<Abbrev> {
        self.abbrevs
    }

    pub fn next_entry(&mut self) -> Result<Option<Entry>, ModuleError> {
        if self.pos >= self.end {
            return Ok(None);
        }
        let (entry, next) = decode_entry(self.bytes, self.pos, self.end, &self.abbrevs)?;
        self.pos = next;
        if let Entry::DefineAbbrev { abbrev, .. } = &entry {
            self.abbrevs.push(abbrev.clone());
        }
        Ok(Some(entry))
    }
}

impl Iterator for EntryReader<'_> {
    type Item = Result<Entry, ModuleError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_entry() {
            Ok(entry) => entry.map(Ok),
            Err(e) => {
                self.pos = self.end;
                Some(Err(e))
            }
        }
    }
}
