use std::io::{Error, ErrorKind, Result, Seek, SeekFrom, Write};

use crate::ByteOrder;

/// Writes typed values to a seekable stream, correcting multi-byte scalars for byte order.
///
/// The mirror image of [`EndianReader`](crate::EndianReader): each multi-byte write takes the
/// value's native fixed-width bytes, reverses them when [`byte_order`](Self::byte_order)
/// differs from the platform's own, and writes the result verbatim. The byte order is a public
/// field and may be flipped between writes.
pub struct EndianWriter<W> {
    /// The underlying stream. Writes land at its current position.
    pub stream: W,
    /// The byte order applied to multi-byte writes.
    pub byte_order: ByteOrder,
}

impl<W: Write + Seek> EndianWriter<W> {
    /// Constructor
    pub fn new(stream: W, byte_order: ByteOrder) -> Self {
        Self { stream, byte_order }
    }

    /// Extracts the inner stream
    pub fn into_inner(self) -> W {
        self.stream
    }

    /// Accesses the inner stream
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.stream
    }

    /// Returns the current position of the underlying stream.
    pub fn position(&mut self) -> Result<u64> {
        self.stream.stream_position()
    }

    /// Moves the underlying stream to `position`.
    pub fn set_position(&mut self, position: u64) -> Result<()> {
        self.stream.seek(SeekFrom::Start(position)).map(|_| ())
    }

    /// Writes `bytes` to the stream
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes)
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_bytes(&[value as u8])
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes `N` native-order bytes, reversed in place when the configured byte order differs
    /// from the platform's.
    fn write_corrected<const N: usize>(&mut self, mut bytes: [u8; N]) -> Result<()> {
        if self.byte_order != ByteOrder::NATIVE {
            bytes.reverse();
        }
        self.stream.write_all(&bytes)
    }

    /// Writes a single `u16` value in the configured byte order
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes a single `u32` value in the configured byte order
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes a single `u64` value in the configured byte order
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes a single `i16` value in the configured byte order
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes a single `i32` value in the configured byte order
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes a single `i64` value in the configured byte order
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes an `f32` value in the configured byte order
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Writes an `f64` value in the configured byte order
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_corrected(value.to_ne_bytes())
    }

    /// Pads with zero bytes to the next 4-byte boundary. The format pads records to 4-byte
    /// blocks.
    pub fn align_stream(&mut self) -> Result<()> {
        self.align_stream_to(4)
    }

    /// Pads with zero bytes to the next multiple of `alignment`, measured from the start of
    /// the stream. `alignment` must be nonzero.
    pub fn align_stream_to(&mut self, alignment: u64) -> Result<()> {
        let position = self.position()?;
        let remainder = position % alignment;
        if remainder != 0 {
            self.write_bytes(&vec![0u8; (alignment - remainder) as usize])?;
        }
        Ok(())
    }

    /// Writes raw bytes in length-prefixed, 4-byte-aligned framing.
    ///
    /// The byte count goes out first as a 32-bit signed integer in the configured byte order,
    /// then the bytes themselves, then zero padding up to the next multiple of 4 of the
    /// absolute stream position. A buffer longer than `i32::MAX` cannot be framed and fails
    /// with [`ErrorKind::InvalidInput`] before anything is written.
    pub fn write_aligned_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let length = i32::try_from(bytes.len())
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "length prefix does not fit in an i32"))?;
        self.write_i32(length)?;
        self.write_bytes(bytes)?;
        self.align_stream()
    }

    /// Writes a string in length-prefixed, 4-byte-aligned framing.
    ///
    /// The prefix counts UTF-8 bytes, not characters. See
    /// [`write_aligned_bytes`](Self::write_aligned_bytes).
    pub fn write_aligned_string(&mut self, text: &str) -> Result<()> {
        self.write_aligned_bytes(text.as_bytes())
    }

    /// Writes raw bytes followed by a single zero terminator. No length prefix, no alignment.
    pub fn write_null_terminated_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(bytes)?;
        self.write_u8(0)
    }

    /// Writes a string's UTF-8 bytes followed by a single zero terminator. No length prefix,
    /// no alignment.
    pub fn write_null_terminated_string(&mut self, text: &str) -> Result<()> {
        self.write_null_terminated_bytes(text.as_bytes())
    }
}
