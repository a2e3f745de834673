//! Base-128 varint handling for chainstate entries.
//!
//! Bitcoin Core's VARINT (src/serialize.h, WriteVarInt/ReadVarInt) is not
//! the CompactSize used in transaction serialization. Each byte carries 7
//! value bits plus a continuation bit in the MSB, and every continuation
//! byte adds an implicit +1 while decoding. The bias only shows up beyond
//! the first byte; omitting it decodes every multi-byte varint to the
//! wrong magnitude.

use crate::error::DecodeError;

/// Scan one varint starting at `offset` and return the bytes that make it
/// up, terminating byte included.
///
/// A byte with the MSB set means more bytes follow; the first byte with
/// the MSB clear ends the varint. Running off the end of the buffer before
/// that byte is a [`DecodeError::TruncatedVarint`].
pub fn read_varint(buf: &[u8], offset: usize) -> Result<&[u8], DecodeError> {
    let mut end = offset;
    loop {
        let byte = *buf
            .get(end)
            .ok_or(DecodeError::TruncatedVarint { offset })?;
        end += 1;
        if byte & 0x80 == 0 {
            return Ok(&buf[offset..end]);
        }
    }
}

/// Decode a varint byte run produced by [`read_varint`].
///
/// Never fails: any sequence ending in a continuation-clear byte decodes
/// to some integer.
pub fn decode_varint(bytes: &[u8]) -> u64 {
    let mut n: u64 = 0;
    for &byte in bytes {
        // wrapping arithmetic mirrors Core's unchecked uint64 math on
        // overlong input
        n = n.wrapping_shl(7) | u64::from(byte & 0x7f);
        if byte & 0x80 != 0 {
            // the continuation bias
            n = n.wrapping_add(1);
        }
    }
    n
}

/// Read and decode one varint, returning the value and the number of
/// bytes consumed so the caller can advance its cursor.
pub fn read_decoded(buf: &[u8], offset: usize) -> Result<(u64, usize), DecodeError> {
    let bytes = read_varint(buf, offset)?;
    Ok((decode_varint(bytes), bytes.len()))
}
