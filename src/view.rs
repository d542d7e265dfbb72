//! Read-only bit vector borrowed from an encoded byte buffer.
//!
//! `BitVectorView` reads bits straight out of a buffer in the binary format
//! (see [`crate::codec`]) without copying it, e.g. from a memory-mapped file.
//! It never mutates or reallocates, so a view may be shared freely between
//! threads for as long as the buffer lives.

use std::io::Write;

use crate::bitvector::BitVector;
use crate::codec::{encoded_size, ByteOrder, CodecConfig, WORD_BYTES};
use crate::error::{BitVectorError, Result};
use crate::word_ops::{get_bit_idx, get_word_idx, words_needed, Word};

/// Borrowed, immutable view over an encoded bit vector.
#[derive(Clone, Copy, Debug)]
pub struct BitVectorView<'a> {
    length: usize,
    /// Header plus words, trimmed to the declared payload
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> BitVectorView<'a> {
    /// Validate the header of `data` and wrap it.
    ///
    /// # Errors
    ///
    /// - [`BitVectorError::UnexpectedEof`] if `data` is shorter than the
    ///   payload its header declares
    /// - [`BitVectorError::TypeMismatch`] if the length field does not fit a `usize`
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::{BitVector, BitVectorView, CodecConfig};
    ///
    /// let mut bv = BitVector::new(100);
    /// bv.set(7);
    /// let config = CodecConfig::default();
    /// let bytes = bv.to_binary(&config);
    ///
    /// let view = BitVectorView::new(&bytes, &config).unwrap();
    /// assert!(view.test(7));
    /// assert!(!view.test(8));
    /// ```
    pub fn new(data: &'a [u8], config: &CodecConfig) -> Result<Self> {
        if data.len() < WORD_BYTES {
            return Err(BitVectorError::UnexpectedEof {
                expected: WORD_BYTES,
                actual: data.len(),
            });
        }
        let byte_order = config.byte_order;
        let raw = byte_order.decode(Self::word_bytes(data, 0));
        let length = usize::try_from(raw).map_err(|_| BitVectorError::TypeMismatch { length: raw })?;
        let size = encoded_size(length).ok_or(BitVectorError::TypeMismatch { length: raw })?;
        if data.len() < size {
            return Err(BitVectorError::UnexpectedEof {
                expected: size,
                actual: data.len(),
            });
        }
        Ok(Self {
            length,
            data: &data[..size],
            byte_order,
        })
    }

    #[inline]
    fn word_bytes(data: &[u8], offset: usize) -> [u8; WORD_BYTES] {
        let mut buf = [0u8; WORD_BYTES];
        buf.copy_from_slice(&data[offset..offset + WORD_BYTES]);
        buf
    }

    #[inline]
    fn word(&self, w: usize) -> Word {
        self.byte_order
            .decode(Self::word_bytes(self.data, WORD_BYTES * (w + 1)))
    }

    /// Test bit `i`. Positions `>= len()` read as `false`.
    #[inline]
    pub fn test(&self, i: usize) -> bool {
        if i >= self.length {
            return false;
        }
        (self.word(get_word_idx(i)) >> get_bit_idx(i)) & 1 == 1
    }

    /// Declared length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// True if the declared length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The encoded payload this view reads from.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Write the backing bytes unchanged; returns the number written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        writer.write_all(self.data)?;
        Ok(self.data.len())
    }

    /// Copy into an owned, mutable [`BitVector`].
    pub fn to_bit_vector(&self) -> BitVector {
        let words = (0..words_needed(self.length)).map(|w| self.word(w)).collect();
        let mut bv = BitVector {
            length: self.length,
            words,
        };
        bv.clean_last_word();
        bv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_matches_owner() {
        let mut bv = BitVector::new(300);
        for i in [0, 63, 64, 299] {
            bv.set(i);
        }
        for config in [
            CodecConfig::default(),
            CodecConfig::new().with_byte_order(ByteOrder::LittleEndian),
        ] {
            let bytes = bv.to_binary(&config);
            let view = BitVectorView::new(&bytes, &config).unwrap();
            assert_eq!(view.len(), 300);
            for i in 0..320 {
                assert_eq!(view.test(i), bv.test(i), "i={i}");
            }
            assert_eq!(view.to_bit_vector(), bv);
        }
    }

    #[test]
    fn test_view_trims_trailing_bytes() {
        let bv = BitVector::new(10);
        let config = CodecConfig::default();
        let mut bytes = bv.to_binary(&config);
        bytes.extend_from_slice(b"trailing");
        let view = BitVectorView::new(&bytes, &config).unwrap();
        let mut out = Vec::new();
        assert_eq!(view.write_to(&mut out).unwrap(), 16);
        assert_eq!(out, bv.to_binary(&config));
    }

    #[test]
    fn test_view_rejects_short_buffer() {
        let mut bv = BitVector::new(10);
        bv.set(200);
        let config = CodecConfig::default();
        let bytes = bv.to_binary(&config);
        assert!(matches!(
            BitVectorView::new(&bytes[..20], &config),
            Err(BitVectorError::UnexpectedEof { .. })
        ));
        assert!(BitVectorView::new(&[], &config).is_err());
    }
}
