//! Forward/backward scans for set and clear bits, and ascending iteration.
//!
//! All scans are confined to `[0, len())`. In particular the clear-bit scans
//! never report a position `>= len()`, even though storage past the end reads
//! as zero: a fully set vector has no next or previous clear bit.

use std::iter::FusedIterator;

use crate::bitvector::BitVector;
use crate::word_ops::{
    bitmask, get_bit_idx, get_word_idx, leading_zeros, trailing_zeros, Word, BITS_PER_WORD,
};

impl BitVector {
    /// Smallest set position `>= i`, or `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut bv = BitVector::new(200);
    /// bv.set(70);
    /// assert_eq!(bv.next_set(3), Some(70));
    /// assert_eq!(bv.next_set(71), None);
    /// ```
    pub fn next_set(&self, i: usize) -> Option<usize> {
        if i >= self.length {
            return None;
        }
        let mut w = get_word_idx(i);
        let word = self.words[w] >> get_bit_idx(i);
        if word != 0 {
            return Some(i + trailing_zeros(word));
        }
        w += 1;
        while w < self.words.len() {
            let word = self.words[w];
            if word != 0 {
                return Some(w * BITS_PER_WORD + trailing_zeros(word));
            }
            w += 1;
        }
        None
    }

    /// Largest set position `<= i`, or `None`.
    ///
    /// An `i` at or past `len()` scans down from the last position.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut bv = BitVector::new(100);
    /// bv.set(5);
    /// assert_eq!(bv.previous_set(50), Some(5));
    /// assert_eq!(bv.previous_set(1000), Some(5));
    /// assert_eq!(bv.previous_set(4), None);
    /// ```
    pub fn previous_set(&self, i: usize) -> Option<usize> {
        let i = self.last_position_at_or_below(i)?;
        let mut w = get_word_idx(i);
        // discard bits above i
        let word = self.words[w] << (BITS_PER_WORD - 1 - get_bit_idx(i));
        if word != 0 {
            return Some(i - leading_zeros(word));
        }
        while w > 0 {
            w -= 1;
            let word = self.words[w];
            if word != 0 {
                return Some(w * BITS_PER_WORD + BITS_PER_WORD - 1 - leading_zeros(word));
            }
        }
        None
    }

    /// Smallest clear position in `[i, len())`, or `None`.
    pub fn next_clear(&self, i: usize) -> Option<usize> {
        if i >= self.length {
            return None;
        }
        let mut w = get_word_idx(i);
        let word = !self.words[w] >> get_bit_idx(i);
        let found = if word != 0 {
            Some(i + trailing_zeros(word))
        } else {
            w += 1;
            self.words[w..]
                .iter()
                .position(|&x| x != Word::MAX)
                .map(|off| (w + off) * BITS_PER_WORD + trailing_zeros(!self.words[w + off]))
        };
        found.filter(|&pos| pos < self.length)
    }

    /// Largest clear position `<= i`, or `None`. An `i` at or past `len()`
    /// scans down from the last position.
    pub fn previous_clear(&self, i: usize) -> Option<usize> {
        let i = self.last_position_at_or_below(i)?;
        let mut w = get_word_idx(i);
        let word = !self.words[w] << (BITS_PER_WORD - 1 - get_bit_idx(i));
        if word != 0 {
            return Some(i - leading_zeros(word));
        }
        while w > 0 {
            w -= 1;
            let word = !self.words[w];
            if word != 0 {
                return Some(w * BITS_PER_WORD + BITS_PER_WORD - 1 - leading_zeros(word));
            }
        }
        None
    }

    /// `i` clamped into `[0, len())`, or `None` for an empty vector.
    #[inline]
    fn last_position_at_or_below(&self, i: usize) -> Option<usize> {
        if self.length == 0 {
            None
        } else {
            Some(i.min(self.length - 1))
        }
    }

    /// Highest set position, or `None` if no bit is set.
    pub fn top(&self) -> Option<usize> {
        self.words
            .iter()
            .rposition(|&w| w != 0)
            .map(|w| w * BITS_PER_WORD + BITS_PER_WORD - 1 - leading_zeros(self.words[w]))
    }

    /// Lazy ascending iterator over set positions.
    ///
    /// Each call starts a fresh scan; dropping the iterator early is free.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut bv = BitVector::new(0);
    /// bv.set(3);
    /// bv.set(64);
    /// assert_eq!(bv.ones().collect::<Vec<_>>(), vec![3, 64]);
    /// ```
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Fill `buffer` with consecutive set positions `>= start` and return the
    /// filled prefix. Resume from `last + 1` to continue.
    pub fn next_set_many<'b>(&self, start: usize, buffer: &'b mut [usize]) -> &'b [usize] {
        if start >= self.length || buffer.is_empty() {
            return &buffer[..0];
        }
        let mut n = 0;
        let mut w = get_word_idx(start);
        let mut word = self.words[w] & !bitmask(get_bit_idx(start));
        loop {
            while word != 0 {
                buffer[n] = w * BITS_PER_WORD + trailing_zeros(word);
                n += 1;
                if n == buffer.len() {
                    return &buffer[..n];
                }
                word &= word - 1;
            }
            w += 1;
            if w >= self.words.len() {
                return &buffer[..n];
            }
            word = self.words[w];
        }
    }

    /// All set positions in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.count());
        out.extend(self.ones());
        out
    }
}

/// Ascending iterator over the set positions of a [`BitVector`].
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    words: &'a [Word],
    word_idx: usize,
    current: Word,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let pos = self.word_idx * BITS_PER_WORD + trailing_zeros(self.current);
        self.current &= self.current - 1; // Clear lowest set bit
        Some(pos)
    }
}

impl FusedIterator for Ones<'_> {}

impl<'a> IntoIterator for &'a BitVector {
    type Item = usize;
    type IntoIter = Ones<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.ones()
    }
}
