//! Module format constants.

/// Magic bytes identifying a declpack module.
pub const MAGIC: [u8; 4] = *b"DCLM";

/// Current module format version.
pub const VERSION: u32 = 1;

/// Header size in bytes. The record stream starts right after it, so no
/// record ever sits at offset 0.
pub const HEADER_SIZE: usize = 64;

/// Entry id introducing an abbreviation definition.
pub const ABBREV_DEFINE: u32 = 2;

/// Entry id introducing a record with explicit code and field count.
pub const ABBREV_UNABBREVIATED: u32 = 3;

/// First id handed out to user-defined abbreviations.
pub const FIRST_USER_ABBREV: u32 = 4;

/// Type IDs below this value are reserved for builtin types; 0 is the null type.
pub const NUM_PREDEF_TYPE_IDS: u32 = 64;
