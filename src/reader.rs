use std::io::{Read, Result, Seek, SeekFrom};

use zerocopy::transmute;

use crate::ByteOrder;

/// Cap on terminator scanning used by [`EndianReader::read_null_terminated_string`].
const DEFAULT_MAX_STRING_LENGTH: usize = 32767;

/// Reads typed values from a seekable stream, correcting multi-byte scalars for byte order.
///
/// Every multi-byte read pulls the exact number of bytes for the type off the stream in stream
/// order, reverses them when [`byte_order`](Self::byte_order) differs from the platform's own,
/// and reinterprets the result natively. Single-byte reads pass through unchanged. The byte
/// order is an ordinary public field; formats that switch orders partway through a file flip it
/// between reads.
///
/// The reader keeps no cursor of its own. [`position`](Self::position) and
/// [`set_position`](Self::set_position) go straight to the underlying stream, so seeking the
/// stream out from under the reader is fine as long as only one reader or writer touches it at
/// a time.
pub struct EndianReader<R> {
    /// The underlying stream. Reads consume from its current position.
    pub stream: R,
    /// The byte order applied to multi-byte reads.
    pub byte_order: ByteOrder,
}

impl<R: Read + Seek> EndianReader<R> {
    /// Constructor
    pub fn new(stream: R, byte_order: ByteOrder) -> Self {
        Self { stream, byte_order }
    }

    /// Extracts the inner stream
    pub fn into_inner(self) -> R {
        self.stream
    }

    /// Accesses the inner stream
    pub fn inner_mut(&mut self) -> &mut R {
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

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.stream.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a `bool` value. Any nonzero byte decodes as true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads `len` raw bytes into a freshly allocated buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.stream.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `N` bytes in stream order, reversed in place when the configured byte
    /// order differs from the platform's.
    #[inline(always)]
    fn read_corrected<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.stream.read_exact(&mut buf)?;
        if self.byte_order != ByteOrder::NATIVE {
            buf.reverse();
        }
        Ok(buf)
    }

    /// Reads a `u16` in the configured byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        let value: u16 = transmute!(self.read_corrected::<2>()?);
        Ok(value)
    }

    /// Reads a `u32` in the configured byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        let value: u32 = transmute!(self.read_corrected::<4>()?);
        Ok(value)
    }

    /// Reads a `u64` in the configured byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64> {
        let value: u64 = transmute!(self.read_corrected::<8>()?);
        Ok(value)
    }

    /// Reads a `i16` in the configured byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        let value: i16 = transmute!(self.read_corrected::<2>()?);
        Ok(value)
    }

    /// Reads a `i32` in the configured byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        let value: i32 = transmute!(self.read_corrected::<4>()?);
        Ok(value)
    }

    /// Reads a `i64` in the configured byte order.
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64> {
        let value: i64 = transmute!(self.read_corrected::<8>()?);
        Ok(value)
    }

    /// Reads an IEEE-754 single-precision float in the configured byte order.
    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32> {
        let value: f32 = transmute!(self.read_corrected::<4>()?);
        Ok(value)
    }

    /// Reads an IEEE-754 double-precision float in the configured byte order.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64> {
        let value: f64 = transmute!(self.read_corrected::<8>()?);
        Ok(value)
    }

    /// Skips forward to the next 4-byte boundary. The format pads records to 4-byte blocks.
    pub fn align_stream(&mut self) -> Result<()> {
        self.align_stream_to(4)
    }

    /// Skips forward to the next multiple of `alignment`, measured from the start of the
    /// stream. Skipped bytes are not inspected. `alignment` must be nonzero.
    pub fn align_stream_to(&mut self, alignment: u64) -> Result<()> {
        let position = self.position()?;
        let remainder = position % alignment;
        if remainder != 0 {
            self.set_position(position + (alignment - remainder))?;
        }
        Ok(())
    }

    /// Number of bytes between the current position and the end of the stream. A position past
    /// the end counts as zero remaining.
    fn remaining(&mut self) -> Result<u64> {
        let position = self.stream.stream_position()?;
        let end = self.stream.seek(SeekFrom::End(0))?;
        self.stream.seek(SeekFrom::Start(position))?;
        Ok(end.saturating_sub(position))
    }

    /// Reads the contents of a length-prefixed, 4-byte-aligned string without decoding them.
    ///
    /// The framing is a 32-bit signed length in the configured byte order, followed by that
    /// many raw bytes, followed by padding that brings the absolute stream position to a
    /// multiple of 4.
    ///
    /// A length that is zero, negative, or larger than the number of bytes remaining on the
    /// stream yields an empty buffer: nothing past the prefix is consumed and no alignment
    /// happens. Absent or truncated optional fields decode this way rather than failing.
    pub fn read_aligned_bytes(&mut self) -> Result<Vec<u8>> {
        let length = self.read_i32()?;
        if length > 0 && length as u64 <= self.remaining()? {
            let bytes = self.read_bytes(length as usize)?;
            self.align_stream()?;
            Ok(bytes)
        } else {
            Ok(Vec::new())
        }
    }

    /// Reads a length-prefixed, 4-byte-aligned string and decodes it as UTF-8.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with the Unicode replacement
    /// character. See [`read_aligned_bytes`](Self::read_aligned_bytes) for the framing and for
    /// how out-of-range lengths decode.
    pub fn read_aligned_string(&mut self) -> Result<String> {
        let bytes = self.read_aligned_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a length-prefixed, 4-byte-aligned string and returns its raw bytes as a
    /// `bstr::BString`.
    ///
    /// Name fields in older asset files are not always well-formed UTF-8; this accessor hands
    /// back the stored bytes verbatim where [`read_aligned_string`](Self::read_aligned_string)
    /// would substitute replacement characters.
    #[cfg(feature = "bstr")]
    pub fn read_aligned_bstring(&mut self) -> Result<bstr::BString> {
        Ok(bstr::BString::from(self.read_aligned_bytes()?))
    }

    /// Reads bytes up to (but excluding) a zero terminator, without decoding them.
    ///
    /// Scanning stops at the first zero byte, which is consumed but left out of the result.
    /// It also stops once `max_length` bytes have accumulated (leaving the terminator and the
    /// rest of the run unread) or when the stream runs out; neither cutoff is an error.
    pub fn read_null_terminated_bytes(&mut self, max_length: usize) -> Result<Vec<u8>> {
        let mut accumulated = Vec::new();
        let mut byte = [0u8; 1];
        while accumulated.len() < max_length {
            if self.stream.read(&mut byte)? == 0 {
                break;
            }
            if byte[0] == 0 {
                break;
            }
            accumulated.push(byte[0]);
        }
        Ok(accumulated)
    }

    /// Reads a null-terminated string and decodes it as UTF-8, scanning at most 32767 bytes.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with the Unicode replacement
    /// character. No alignment is performed.
    pub fn read_null_terminated_string(&mut self) -> Result<String> {
        self.read_null_terminated_string_with_limit(DEFAULT_MAX_STRING_LENGTH)
    }

    /// Reads a null-terminated string, scanning at most `max_length` bytes.
    ///
    /// See [`read_null_terminated_bytes`](Self::read_null_terminated_bytes) for the cutoff
    /// rules.
    pub fn read_null_terminated_string_with_limit(&mut self, max_length: usize) -> Result<String> {
        let bytes = self.read_null_terminated_bytes(max_length)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a null-terminated string and returns its raw bytes as a `bstr::BString`, scanning
    /// at most 32767 bytes.
    #[cfg(feature = "bstr")]
    pub fn read_null_terminated_bstring(&mut self) -> Result<bstr::BString> {
        let bytes = self.read_null_terminated_bytes(DEFAULT_MAX_STRING_LENGTH)?;
        Ok(bstr::BString::from(bytes))
    }
}
