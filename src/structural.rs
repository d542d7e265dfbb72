//! Structural edits: single-position insert/delete, whole-vector shifts,
//! sub-range extraction and storage reduction.
//!
//! Insert and delete move every bit above the edit point by one place. Within
//! a word that is a plain shift; across words the bit pushed out of one word's
//! boundary is carried into the neighbouring word.

use crate::bitvector::{length_covering, BitVector};
use crate::error::{BitVectorError, Result};
use crate::word_ops::{bitmask, get_bit_idx, get_word_idx, words_needed, BITS_PER_WORD};

const TOP_BIT: usize = BITS_PER_WORD - 1;

impl BitVector {
    /// Insert a clear bit at `p`, moving every bit at `>= p` up by one.
    ///
    /// Length grows by one. If `p > len()` the vector is first grown to `p`.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed `usize::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut bv = BitVector::new(0);
    /// bv.set(63);
    /// bv.insert_at(10);
    /// assert!(bv.test(64));
    /// assert_eq!(bv.len(), 65);
    /// ```
    pub fn insert_at(&mut self, p: usize) {
        let new_len = length_covering(p.max(self.length), 0);
        self.grow_to(p);
        if words_needed(new_len) > self.words.len() {
            self.words.push(0);
        }

        let w0 = get_word_idx(p);
        let last = self.words.len() - 1;
        for i in (w0 + 1..=last).rev() {
            self.words[i] = (self.words[i] << 1) | (self.words[i - 1] >> TOP_BIT);
        }

        let low = bitmask(get_bit_idx(p));
        let word = self.words[w0];
        self.words[w0] = (word & low) | ((word & !low) << 1);
        self.length = new_len;
    }

    /// Remove the bit at `p`, moving every bit above it down by one.
    ///
    /// Length shrinks by one. No-op if `p >= len()`.
    pub fn delete_at(&mut self, p: usize) {
        if p >= self.length {
            return;
        }
        let w0 = get_word_idx(p);
        let last = self.words.len() - 1;

        let low = bitmask(get_bit_idx(p));
        let word = self.words[w0];
        let mut head = (word & low) | ((word >> 1) & !low);
        if w0 < last {
            head |= self.words[w0 + 1] << TOP_BIT;
        }
        self.words[w0] = head;

        for i in w0 + 1..=last {
            let mut word = self.words[i] >> 1;
            if i < last {
                word |= self.words[i + 1] << TOP_BIT;
            }
            self.words[i] = word;
        }

        self.length -= 1;
        self.words.truncate(words_needed(self.length));
    }

    /// Move every bit up by `n` positions.
    ///
    /// The vector grows if the highest set bit would land past the end. An
    /// all-clear vector is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the highest set bit would move past `usize::MAX - 1`.
    pub fn shift_left(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let top = match self.top() {
            Some(top) => top,
            None => return,
        };
        self.grow_to(length_covering(top, n));

        let whole = get_word_idx(n);
        let rem = get_bit_idx(n);
        let words = &mut self.words;
        for i in (0..words.len()).rev() {
            if i < whole {
                words[i] = 0;
                continue;
            }
            let src = i - whole;
            let mut word = words[src] << rem;
            if rem > 0 && src > 0 {
                word |= words[src - 1] >> (BITS_PER_WORD - rem);
            }
            words[i] = word;
        }
        self.clean_last_word();
    }

    /// Move every bit down by `n` positions. Bits falling below 0 are dropped;
    /// the length is unchanged.
    pub fn shift_right(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let top = match self.top() {
            Some(top) => top,
            None => return,
        };
        if n > top {
            self.clear_all();
            return;
        }

        let whole = get_word_idx(n);
        let rem = get_bit_idx(n);
        let words = &mut self.words;
        let len = words.len();
        for i in 0..len {
            let src = i + whole;
            if src >= len {
                words[i] = 0;
                continue;
            }
            let mut word = words[src] >> rem;
            if rem > 0 && src + 1 < len {
                word |= words[src + 1] << (BITS_PER_WORD - rem);
            }
            words[i] = word;
        }
    }

    /// Copy bits `[start, end)` into a new vector of length `end - start`.
    ///
    /// # Errors
    ///
    /// Returns [`BitVectorError::Range`] if `end < start` or `end > len()`.
    pub fn subset(&self, start: usize, end: usize) -> Result<BitVector> {
        if end < start || end > self.length {
            return Err(BitVectorError::Range {
                start,
                end,
                length: self.length,
            });
        }
        let mut out = BitVector::new(end - start);
        let whole = get_word_idx(start);
        let rem = get_bit_idx(start);
        let src = &self.words;

        if rem == 0 {
            let n = out.words.len();
            out.words.copy_from_slice(&src[whole..whole + n]);
        } else {
            for (i, dst) in out.words.iter_mut().enumerate() {
                let s = whole + i;
                let mut word = src[s] >> rem;
                if s + 1 < src.len() {
                    word |= src[s + 1] << (BITS_PER_WORD - rem);
                }
                *dst = word;
            }
        }
        out.clean_last_word();
        Ok(out)
    }

    /// Reduce the length to the end of the last non-zero word and release
    /// spare capacity. Set bits are never lost.
    pub fn compact(&mut self) {
        let used = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(1, |idx| idx + 1);
        let new_len = used * BITS_PER_WORD;
        if new_len < self.length {
            self.shrink(new_len);
        } else {
            self.words.shrink_to_fit();
        }
    }

    /// Truncate to `new_len` bits, dropping everything at or above it and
    /// releasing the freed storage. Never grows.
    pub fn shrink(&mut self, new_len: usize) {
        if new_len > self.length {
            return;
        }
        tracing::debug!(from = self.length, to = new_len, "shrinking bit vector");
        self.length = new_len;
        self.words.truncate(words_needed(new_len));
        self.words.shrink_to_fit();
        self.clean_last_word();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_positions(len: usize, positions: &[usize]) -> BitVector {
        let mut bv = BitVector::new(len);
        for &p in positions {
            bv.set(p);
        }
        bv
    }

    #[test]
    fn test_insert_at_carries_across_words() {
        let mut bv = from_positions(128, &[0, 63, 64, 127]);
        bv.insert_at(1);
        assert_eq!(bv.len(), 129);
        assert_eq!(bv.num_words(), 3);
        assert_eq!(bv.to_vec(), vec![0, 64, 65, 128]);
    }

    #[test]
    fn test_insert_at_preserves_low_bits() {
        let mut bv = from_positions(10, &[0, 1, 2, 3]);
        bv.insert_at(2);
        assert_eq!(bv.to_vec(), vec![0, 1, 3, 4]);
        assert!(!bv.test(2));
    }

    #[test]
    fn test_insert_at_end_and_past_end() {
        let mut bv = from_positions(64, &[63]);
        bv.insert_at(64);
        assert_eq!(bv.len(), 65);
        assert_eq!(bv.to_vec(), vec![63]);

        let mut bv = from_positions(4, &[1]);
        bv.insert_at(100);
        assert_eq!(bv.len(), 101);
        assert_eq!(bv.to_vec(), vec![1]);
    }

    #[test]
    fn test_delete_at_pulls_carry_down() {
        let mut bv = from_positions(129, &[0, 64, 65, 128]);
        bv.delete_at(1);
        assert_eq!(bv.len(), 128);
        assert_eq!(bv.num_words(), 2);
        assert_eq!(bv.to_vec(), vec![0, 63, 64, 127]);

        bv.delete_at(500);
        assert_eq!(bv.len(), 128);
    }

    #[test]
    fn test_insert_delete_roundtrip() {
        let original = from_positions(150, &[0, 5, 63, 64, 100, 149]);
        for p in 0..=150 {
            let mut bv = original.clone();
            bv.insert_at(p);
            bv.delete_at(p);
            assert_eq!(bv, original, "p={p}");
        }
    }

    #[test]
    #[should_panic(expected = "exceeds the addressable range")]
    fn test_shift_left_past_addressable_range_panics() {
        let mut bv = BitVector::new(10);
        bv.set(1);
        bv.shift_left(usize::MAX);
    }

    #[test]
    fn test_shift_left_grows() {
        let mut bv = from_positions(10, &[0, 9]);
        bv.shift_left(70);
        assert_eq!(bv.to_vec(), vec![70, 79]);
        assert_eq!(bv.len(), 80);

        let mut empty = BitVector::new(10);
        empty.shift_left(5);
        assert_eq!(empty.len(), 10);
    }

    #[test]
    fn test_shift_right_drops_low_bits() {
        let mut bv = from_positions(200, &[3, 64, 150]);
        bv.shift_right(4);
        assert_eq!(bv.to_vec(), vec![60, 146]);
        assert_eq!(bv.len(), 200);

        bv.shift_right(147);
        assert_eq!(bv.count(), 0);
        assert_eq!(bv.len(), 200);
    }

    #[test]
    fn test_subset() {
        let bv = from_positions(200, &[5, 63, 64, 130, 199]);
        let sub = bv.subset(60, 135).unwrap();
        assert_eq!(sub.len(), 75);
        assert_eq!(sub.to_vec(), vec![3, 4, 70]);

        let aligned = bv.subset(64, 200).unwrap();
        assert_eq!(aligned.to_vec(), vec![0, 66, 135]);

        assert!(bv.subset(10, 5).is_err());
        assert!(bv.subset(0, 201).is_err());
        assert!(bv.subset(200, 200).unwrap().is_empty());
    }

    #[test]
    fn test_shrink_and_compact() {
        let mut bv = from_positions(1000, &[3, 70]);
        bv.compact();
        assert_eq!(bv.len(), 128);
        assert_eq!(bv.to_vec(), vec![3, 70]);

        bv.shrink(50);
        assert_eq!(bv.len(), 50);
        assert_eq!(bv.to_vec(), vec![3]);
        bv.shrink(80);
        assert_eq!(bv.len(), 50);

        let mut zeros = BitVector::new(1000);
        zeros.compact();
        assert_eq!(zeros.len(), 64);
    }
}
