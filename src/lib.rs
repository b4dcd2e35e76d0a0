//! Reads and writes seekable binary asset streams whose multi-byte fields may be stored in
//! either byte order.
//!
//! The asset format served by this crate stores scalars in a byte order chosen per file (and
//! occasionally per section), frames strings either as a length-prefixed, 4-byte-aligned block
//! or as a plain null-terminated run, and pads between records to 4-byte boundaries. This crate
//! is only the byte-level codec for that layout: [`EndianReader`] turns on-stream bytes into
//! values and [`EndianWriter`] turns values back into on-stream bytes. What the decoded values
//! *mean* is the business of the format parsers layered on top.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod reader;
mod writer;


pub use reader::EndianReader;
pub use writer::EndianWriter;

/// The byte order applied to multi-byte scalars on the stream.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the running platform's in-memory value representation.
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
}
