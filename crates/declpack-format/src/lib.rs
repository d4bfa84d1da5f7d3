#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Binary module format for declpack.
//!
//! This crate contains:
//! - Format definitions (header, record codes, persistent ID newtypes)
//! - The record stream sink with abbreviation support
//! - A read-only [`Module`] view that validates the container and decodes
//!   records for dumps and tests

mod abbrev;
mod codes;
mod constants;
mod dump;
mod header;
mod ids;
mod module;
mod reader;
mod stream;
mod varint;

#[cfg(test)]
mod abbrev_tests;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod varint_tests;

pub use abbrev::{Abbrev, AbbrevId, AbbrevOp};
pub use codes::RecordCode;
pub use constants::{
    ABBREV_DEFINE, ABBREV_UNABBREVIATED, FIRST_USER_ABBREV, HEADER_SIZE, MAGIC,
    NUM_PREDEF_TYPE_IDS, VERSION,
};
pub use dump::dump;
pub use header::Header;
pub use ids::{DeclId, IdentId, TypeId};
pub use module::{Module, ModuleError};
pub use reader::{DecodedRecord, Entry, EntryReader};
pub use stream::{Record, RecordStream, StreamError, Trailer};
pub use varint::{MAX_VARINT_BYTES, VarintError, read_varint, varint_size, write_varint};
