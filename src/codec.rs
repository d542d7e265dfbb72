//! Binary and JSON encodings of a [`BitVector`].
//!
//! # Format
//!
//! ```text
//! [length: u64][word 0: u64][word 1: u64]...[word ceil(length/64)-1: u64]
//! ```
//!
//! Every field is 8 bytes in the configured byte order (big-endian by
//! default), so an encoded vector takes `8 + 8 * ceil(length / 64)` bytes.
//!
//! The JSON form is a single JSON string holding the base64 encoding of the
//! binary form (URL-safe alphabet by default).
//!
//! Decoders stop at the end of the declared payload and ignore anything after
//! it. A payload that ends early is reported as
//! [`BitVectorError::UnexpectedEof`], never zero-filled.
//!
//! # Examples
//!
//! ```
//! use wordbits::{BitVector, CodecConfig};
//!
//! let mut bv = BitVector::new(100);
//! bv.set(42);
//!
//! let config = CodecConfig::default();
//! let json = bv.to_json(&config).unwrap();
//! let restored = BitVector::from_json(json.as_bytes(), &config).unwrap();
//! assert_eq!(bv, restored);
//! ```

use std::fmt;
use std::io::{ErrorKind, Read, Write};

use base64::engine::general_purpose::{GeneralPurpose, STANDARD, URL_SAFE};
use base64::Engine;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bitvector::BitVector;
use crate::error::{BitVectorError, Result};
use crate::word_ops::{words_needed, Word};

/// Size of the length header and of each encoded word, in bytes.
pub const WORD_BYTES: usize = 8;

/// Upper bound on words reserved up front from an untrusted length header.
const MAX_PREALLOC_WORDS: usize = 1 << 16;

// =============================================================================
// Configuration
// =============================================================================

/// Byte order of the length header and the words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    #[inline]
    pub(crate) fn encode(self, value: u64) -> [u8; WORD_BYTES] {
        match self {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        }
    }

    #[inline]
    pub(crate) fn decode(self, bytes: [u8; WORD_BYTES]) -> u64 {
        match self {
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
        }
    }
}

/// Base64 alphabet used by the JSON form. Both variants are padded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Base64Alphabet {
    #[default]
    UrlSafe,
    Standard,
}

impl Base64Alphabet {
    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Base64Alphabet::UrlSafe => &URL_SAFE,
            Base64Alphabet::Standard => &STANDARD,
        }
    }
}

/// Encoding options shared by the binary and JSON codecs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Byte order of every 8-byte field
    pub byte_order: ByteOrder,
    /// Alphabet for the JSON (base64) form
    pub alphabet: Base64Alphabet,
}

impl CodecConfig {
    /// Big-endian, URL-safe base64.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Replace the base64 alphabet.
    pub fn with_alphabet(mut self, alphabet: Base64Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}

// =============================================================================
// Binary Codec
// =============================================================================

/// Read until `buf` is full or the stream ends; returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Total encoded size for a vector of `length` bits, if representable.
pub(crate) fn encoded_size(length: usize) -> Option<usize> {
    words_needed(length)
        .checked_mul(WORD_BYTES)
        .and_then(|n| n.checked_add(WORD_BYTES))
}

impl BitVector {
    /// Number of bytes the binary form occupies.
    pub fn binary_storage_size(&self) -> usize {
        WORD_BYTES * (1 + self.words.len())
    }

    /// Encode into `writer`; returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W, config: &CodecConfig) -> Result<usize> {
        let order = config.byte_order;
        writer.write_all(&order.encode(self.length as u64))?;
        for &word in &self.words {
            writer.write_all(&order.encode(word))?;
        }
        tracing::debug!(
            length = self.length,
            bytes = self.binary_storage_size(),
            "wrote bit vector"
        );
        Ok(self.binary_storage_size())
    }

    /// Decode one vector from `reader`, consuming exactly its payload.
    ///
    /// # Errors
    ///
    /// - [`BitVectorError::UnexpectedEof`] if the stream ends mid-payload
    /// - [`BitVectorError::TypeMismatch`] if the length field does not fit a `usize`
    /// - [`BitVectorError::Io`] for any other read failure
    pub fn read_from<R: Read>(reader: &mut R, config: &CodecConfig) -> Result<Self> {
        let order = config.byte_order;
        let mut buf = [0u8; WORD_BYTES];

        let got = read_full(reader, &mut buf)?;
        if got < WORD_BYTES {
            return Err(BitVectorError::UnexpectedEof {
                expected: WORD_BYTES,
                actual: got,
            });
        }
        let raw = order.decode(buf);
        let length = usize::try_from(raw).map_err(|_| BitVectorError::TypeMismatch { length: raw })?;
        let expected = encoded_size(length).ok_or(BitVectorError::TypeMismatch { length: raw })?;

        let num_words = words_needed(length);
        let mut words: Vec<Word> = Vec::with_capacity(num_words.min(MAX_PREALLOC_WORDS));
        for _ in 0..num_words {
            let got = read_full(reader, &mut buf)?;
            if got < WORD_BYTES {
                return Err(BitVectorError::UnexpectedEof {
                    expected,
                    actual: WORD_BYTES * (1 + words.len()) + got,
                });
            }
            words.push(order.decode(buf));
        }

        tracing::debug!(length, bytes = expected, "read bit vector");
        let mut bv = BitVector { length, words };
        bv.clean_last_word();
        Ok(bv)
    }

    /// Binary form as a byte vector.
    pub fn to_binary(&self, config: &CodecConfig) -> Vec<u8> {
        let order = config.byte_order;
        let mut out = Vec::with_capacity(self.binary_storage_size());
        out.extend_from_slice(&order.encode(self.length as u64));
        for &word in &self.words {
            out.extend_from_slice(&order.encode(word));
        }
        out
    }

    /// Decode the binary form; bytes after the payload are ignored.
    pub fn from_binary(data: &[u8], config: &CodecConfig) -> Result<Self> {
        let mut reader = data;
        Self::read_from(&mut reader, config)
    }

    // =========================================================================
    // JSON Codec
    // =========================================================================

    /// JSON string holding the base64 of the binary form.
    pub fn to_json(&self, config: &CodecConfig) -> Result<String> {
        let encoded = config.alphabet.engine().encode(self.to_binary(config));
        Ok(serde_json::to_string(&encoded)?)
    }

    /// Decode the JSON form. Input after the JSON string is ignored.
    pub fn from_json(data: &[u8], config: &CodecConfig) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_slice(data);
        let encoded = String::deserialize(&mut de)?;
        let bytes = config.alphabet.engine().decode(encoded)?;
        Self::from_binary(&bytes, config)
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for BitVector {
    /// Human-readable formats get the base64 string, binary formats the raw
    /// bytes. Both use [`CodecConfig::default`].
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let config = CodecConfig::default();
        let bytes = self.to_binary(&config);
        if serializer.is_human_readable() {
            serializer.serialize_str(&config.alphabet.engine().encode(bytes))
        } else {
            serializer.serialize_bytes(&bytes)
        }
    }
}

impl<'de> Deserialize<'de> for BitVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(EncodedVisitor)
        } else {
            deserializer.deserialize_bytes(EncodedVisitor)
        }
    }
}

struct EncodedVisitor;

impl<'de> Visitor<'de> for EncodedVisitor {
    type Value = BitVector;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base64 string or byte array holding an encoded bit vector")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<BitVector, E> {
        let config = CodecConfig::default();
        let bytes = config.alphabet.engine().decode(v).map_err(E::custom)?;
        BitVector::from_binary(&bytes, &config).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<BitVector, E> {
        BitVector::from_binary(v, &CodecConfig::default()).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<BitVector, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        self.visit_bytes(&bytes)
    }
}
