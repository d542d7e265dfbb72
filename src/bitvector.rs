//! BitVector - growable bit vector packed into 64-bit words.
//!
//! # Design
//!
//! - Uses `Vec<u64>` for storage (64-bit words, bit 0 of word 0 is position 0)
//! - Bit indexing: word_idx = bit_idx / 64, bit_offset = bit_idx % 64
//! - `words.len() == ceil(len / 64)` at all times
//! - Tail cleanliness: positions `>= len` inside the last word are always 0.
//!   Every mutating operation restores this before returning.
//!
//! # Growth
//!
//! Writes past the end (`set`, `flip`, `insert_at`, range writes) extend the
//! length to cover the written position. Reads past the end (`test`) return
//! `false` and `clear` past the end is a no-op. Storage never shrinks
//! implicitly; only [`BitVector::shrink`] and [`BitVector::compact`] reduce it.
//!
//! # Concurrency
//!
//! `BitVector` follows the plain-slice model: any number of threads may read a
//! shared `&BitVector`, and mutation requires `&mut`. No locking is done.
//!
//! # Examples
//!
//! ```
//! use wordbits::BitVector;
//!
//! let mut bv = BitVector::new(100);
//! bv.set(5);
//! bv.set(10);
//! assert_eq!(bv.count(), 2);
//! assert_eq!(bv.to_vec(), vec![5, 10]);
//!
//! bv.set(1000); // grows
//! assert_eq!(bv.len(), 1001);
//! ```

use std::fmt;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign,
};

use itertools::Itertools;

use crate::error::{BitVectorError, Result};
use crate::word_ops::{
    bitmask, get_bit_idx, get_word_idx, words_needed, Word, WordOps, BITS_PER_WORD, WORD_MAX,
};

/// Growable bit vector using 64-bit word storage.
///
/// All bit indices are 0-based.
#[derive(Clone, Debug, Default)]
pub struct BitVector {
    /// Number of addressable bits
    pub(crate) length: usize,
    /// Storage words, `words_needed(length)` of them
    pub(crate) words: Vec<Word>,
}

impl BitVector {
    /// Create a new BitVector with `n` bits, all initialized to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let bv = BitVector::new(1024);
    /// assert_eq!(bv.len(), 1024);
    /// assert_eq!(bv.count(), 0);
    /// ```
    pub fn new(n: usize) -> Self {
        Self {
            length: n,
            words: vec![0; words_needed(n)],
        }
    }

    /// Build a vector of `64 * words.len()` bits from raw words.
    pub fn from_words(words: Vec<Word>) -> Self {
        Self {
            length: words.len() * BITS_PER_WORD,
            words,
        }
    }

    /// Build a vector from a length and its raw words.
    ///
    /// Bits beyond `length` in the last word are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`BitVectorError::InvalidOperand`] if `words.len()` is not
    /// `ceil(length / 64)`.
    pub fn from_parts(length: usize, words: Vec<Word>) -> Result<Self> {
        let needed = words_needed(length);
        if words.len() != needed {
            return Err(BitVectorError::InvalidOperand(format!(
                "{} words supplied for length {} (need {})",
                words.len(),
                length,
                needed
            )));
        }
        let mut bv = Self { length, words };
        bv.clean_last_word();
        Ok(bv)
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Test bit `i`. Positions `>= len()` read as `false`.
    #[inline]
    pub fn test(&self, i: usize) -> bool {
        if i >= self.length {
            return false;
        }
        (self.words[get_word_idx(i)] >> get_bit_idx(i)) & 1 == 1
    }

    /// Set bit `i` to 1, growing the vector if `i >= len()`.
    ///
    /// # Panics
    ///
    /// Panics if `i == usize::MAX`, since the length would not fit a `usize`.
    #[inline]
    pub fn set(&mut self, i: usize) {
        if i >= self.length {
            self.grow_to(length_covering(i, 0));
        }
        self.words[get_word_idx(i)] |= 1 << get_bit_idx(i);
    }

    /// Clear bit `i`. No-op if `i >= len()`.
    #[inline]
    pub fn clear(&mut self, i: usize) {
        if i >= self.length {
            return;
        }
        self.words[get_word_idx(i)] &= !(1 << get_bit_idx(i));
    }

    /// Set bit `i` to `value`.
    #[inline]
    pub fn set_to(&mut self, i: usize, value: bool) {
        if value {
            self.set(i);
        } else {
            self.clear(i);
        }
    }

    /// Toggle bit `i`. Flipping past the end sets the bit (and grows).
    ///
    /// # Panics
    ///
    /// Panics if `i == usize::MAX`.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        if i >= self.length {
            self.set(i);
            return;
        }
        self.words[get_word_idx(i)] ^= 1 << get_bit_idx(i);
    }

    // =========================================================================
    // Range Operations
    // =========================================================================

    /// Set bits in `[start, end)` to 1, growing to `end` if needed.
    pub fn set_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.grow_to(end);
        self.apply_range(start, end, |w, m| w | m);
    }

    /// Clear bits in `[start, end)`. The part of the range past `len()` is ignored.
    pub fn clear_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.length);
        if start >= end {
            return;
        }
        self.apply_range(start, end, |w, m| w & !m);
    }

    /// Toggle bits in `[start, end)`, growing to `end` if needed.
    pub fn flip_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.grow_to(end);
        self.apply_range(start, end, |w, m| w ^ m);
        self.clean_last_word();
    }

    /// Apply `f(word, mask)` to every word overlapping `[start, end)`, where
    /// `mask` selects the range bits inside that word. Caller ensures
    /// `start < end <= len()`.
    fn apply_range<F>(&mut self, start: usize, end: usize, f: F)
    where
        F: Fn(Word, Word) -> Word,
    {
        let first = get_word_idx(start);
        let last = get_word_idx(end - 1);
        let head = !bitmask(get_bit_idx(start));
        let tail = bitmask(get_bit_idx(end - 1) + 1);

        if first == last {
            self.words[first] = f(self.words[first], head & tail);
            return;
        }
        self.words[first] = f(self.words[first], head);
        for w in &mut self.words[first + 1..last] {
            *w = f(*w, WORD_MAX);
        }
        self.words[last] = f(self.words[last], tail);
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Set all bits in `[0, len())` to 1.
    pub fn set_all(&mut self) {
        self.words.fill(WORD_MAX);
        self.clean_last_word();
    }

    /// Clear all bits to 0. Length is unchanged.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    // =========================================================================
    // Copying
    // =========================================================================

    /// Copy the first `min(len(), dst.len())` bits into `dst` without growing it.
    ///
    /// Bits of `dst` past the copied count are left untouched. Returns the
    /// number of bits copied.
    pub fn copy_into(&self, dst: &mut BitVector) -> usize {
        let count = self.length.min(dst.length);
        let full = get_word_idx(count);
        dst.words[..full].copy_from_slice(&self.words[..full]);

        let rem = get_bit_idx(count);
        if rem != 0 {
            let mask = bitmask(rem);
            dst.words[full] = (dst.words[full] & !mask) | (self.words[full] & mask);
        }
        count
    }

    /// Make `dst` an exact copy of `self`, reusing its allocation.
    pub fn copy_full(&self, dst: &mut BitVector) {
        dst.length = self.length;
        dst.words.clone_from(&self.words);
    }

    // =========================================================================
    // Information and Access
    // =========================================================================

    /// Number of addressable bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    /// True if the vector has no addressable bits.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Count number of set bits (population count).
    #[inline]
    pub fn count(&self) -> usize {
        self.count_with(WordOps::get())
    }

    /// [`count`](Self::count) using the supplied word primitives.
    #[inline]
    pub fn count_with(&self, ops: &WordOps) -> usize {
        ops.popcount_slice(&self.words)
    }

    /// Get number of words in storage.
    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Get direct read-only access to word storage.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Consume the vector and return its word storage.
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Binary dump, highest word first, each word as 64 digits followed by `.`.
    pub fn dump_as_bits(&self) -> String {
        self.words
            .iter()
            .rev()
            .map(|w| format!("{:064b}.", w))
            .collect()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Extend the length to `new_len`, adding zero words as needed.
    pub(crate) fn grow_to(&mut self, new_len: usize) {
        if new_len <= self.length {
            return;
        }
        let needed = words_needed(new_len);
        if needed > self.words.len() {
            tracing::trace!(from = self.length, to = new_len, "growing bit vector");
            self.words.resize(needed, 0);
        }
        self.length = new_len;
    }

    /// Zero the bits past `length` in the last word.
    #[inline]
    pub(crate) fn clean_last_word(&mut self) {
        let rem = get_bit_idx(self.length);
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= bitmask(rem);
            }
        }
    }
}

/// Length needed to address position `pos + extra`.
///
/// Panics when that length exceeds `usize::MAX`, the same contract as
/// `Vec` growth past its capacity limit.
#[inline]
pub(crate) fn length_covering(pos: usize, extra: usize) -> usize {
    match pos.checked_add(extra).and_then(|p| p.checked_add(1)) {
        Some(len) => len,
        None => panic!("bit position {pos} + {extra} exceeds the addressable range"),
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl PartialEq for BitVector {
    /// Word-level comparison. Relies on tail cleanliness rather than masking.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.words == other.words
    }
}

impl Eq for BitVector {}

// =============================================================================
// Formatting
// =============================================================================

impl fmt::Display for BitVector {
    /// Formats as the set of set-bit positions, e.g. `{1,2,3}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.ones().join(","))
    }
}

// =============================================================================
// Bitwise Operators
// =============================================================================

impl BitAnd for &BitVector {
    type Output = BitVector;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr for &BitVector {
    type Output = BitVector;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitXor for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl Sub for &BitVector {
    type Output = BitVector;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

impl Not for BitVector {
    type Output = BitVector;

    fn not(mut self) -> Self::Output {
        self.in_place_complement();
        self
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    fn bitand_assign(&mut self, rhs: &BitVector) {
        self.in_place_intersection(rhs);
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        self.in_place_union(rhs);
    }
}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, rhs: &BitVector) {
        self.in_place_symmetric_difference(rhs);
    }
}

impl SubAssign<&BitVector> for BitVector {
    fn sub_assign(&mut self, rhs: &BitVector) {
        self.in_place_difference(rhs);
    }
}
