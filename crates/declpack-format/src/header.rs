//! Module header (64 bytes).
//!
//! Layout:
//! - 0-15: identity and size (magic, version, checksum, total_size)
//! - 16-27: counts (decls, identifiers, required)
//! - 28-43: section positions (decl offsets record, required record,
//!   identifier blob start, identifier blob size)
//! - 44-63: reserved

use super::constants::{HEADER_SIZE, MAGIC, VERSION};

/// Module header - first 64 bytes of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"DCLM"
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 checksum of everything after the header.
    pub checksum: u32,
    /// Total module size in bytes.
    pub total_size: u32,

    /// Number of declaration IDs (length of the offset table).
    pub decl_count: u32,
    pub ident_count: u32,
    pub required_count: u32,

    /// Offset of the `DECL_OFFSETS` record.
    pub decl_offsets_pos: u32,
    /// Offset of the `REQUIRED_DECLS` record.
    pub required_pos: u32,
    /// Start of the identifier section; the record stream ends here.
    pub ident_blob_pos: u32,
    pub ident_blob_size: u32,

    pub _reserved: [u8; 20],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            decl_count: 0,
            ident_count: 0,
            required_count: 0,
            decl_offsets_pos: 0,
            required_pos: 0,
            ident_blob_pos: 0,
            ident_blob_size: 0,
            _reserved: [0; 20],
        }
    }
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl Header {
    /// Decode header from 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let mut reserved = [0u8; 20];
        reserved.copy_from_slice(&bytes[44..64]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: read_u32_le(bytes, 4),
            checksum: read_u32_le(bytes, 8),
            total_size: read_u32_le(bytes, 12),
            decl_count: read_u32_le(bytes, 16),
            ident_count: read_u32_le(bytes, 20),
            required_count: read_u32_le(bytes, 24),
            decl_offsets_pos: read_u32_le(bytes, 28),
            required_pos: read_u32_le(bytes, 32),
            ident_blob_pos: read_u32_le(bytes, 36),
            ident_blob_size: read_u32_le(bytes, 40),
            _reserved: reserved,
        }
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.decl_count.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.ident_count.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.required_count.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.decl_offsets_pos.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.required_pos.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.ident_blob_pos.to_le_bytes());
        bytes[40..44].copy_from_slice(&self.ident_blob_size.to_le_bytes());
        bytes[44..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Start of the identifier offset table.
    pub fn ident_table_pos(&self) -> u32 {
        self.ident_blob_pos + self.ident_blob_size
    }
}
