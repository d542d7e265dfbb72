//! Whole-vector gather (`extract_to`) and scatter (`deposit_to`) driven by a
//! mask vector.
//!
//! Both work a word at a time with [`pext`]/[`pdep`]. The packed side of the
//! transfer is a bit stream that does not respect word boundaries, so each
//! word's contribution is seamed onto the previous one by an offset shift,
//! spilling into the next packed word when it does not fit.

use crate::bitvector::BitVector;
use crate::word_ops::{get_bit_idx, get_word_idx, pdep, pext, Word, WordOps, BITS_PER_WORD};

impl BitVector {
    /// Gather the bits of `self` at the positions set in `mask` into the low
    /// positions of `dst`, in ascending order.
    ///
    /// `dst` is cleared first and keeps its length; packed bits that do not
    /// fit in it are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut mask = BitVector::new(16);
    /// for i in [0, 5, 10] {
    ///     mask.set(i);
    /// }
    /// let mut src = BitVector::new(16);
    /// src.set(0);
    /// src.set(10);
    ///
    /// let mut dst = BitVector::new(3);
    /// src.extract_to(&mask, &mut dst);
    /// assert_eq!(dst.to_vec(), vec![0, 2]);
    /// ```
    pub fn extract_to(&self, mask: &BitVector, dst: &mut BitVector) {
        dst.clear_all();
        let ops = WordOps::get();
        let capacity = dst.words.len();
        let mut out = 0;

        for (&word, &m) in self.words.iter().zip(mask.words.iter()) {
            if m == 0 {
                continue;
            }
            let w = get_word_idx(out);
            if w >= capacity {
                break;
            }
            let bits = pext(word, m);
            let count = ops.popcount(m);
            let off = get_bit_idx(out);

            dst.words[w] |= bits << off;
            if off > 0 && off + count > BITS_PER_WORD && w + 1 < capacity {
                dst.words[w + 1] |= bits >> (BITS_PER_WORD - off);
            }
            out += count;
        }
        dst.clean_last_word();
    }

    /// Scatter the low bits of `self`, in ascending order, into the positions
    /// set in `mask` within `dst`. Positions of `dst` outside `mask` keep
    /// their value; mask positions past `dst.len()` are ignored.
    pub fn deposit_to(&self, mask: &BitVector, dst: &mut BitVector) {
        let ops = WordOps::get();
        let mut consumed = 0;

        for (slot, &m) in dst.words.iter_mut().zip(mask.words.iter()) {
            if m == 0 {
                continue;
            }
            let bits = self.packed_word_at(consumed);
            *slot = (*slot & !m) | pdep(bits, m);
            consumed += ops.popcount(m);
        }
        dst.clean_last_word();
    }

    /// The 64 bits starting at `pos`, reading zeros past the end of storage.
    #[inline]
    fn packed_word_at(&self, pos: usize) -> Word {
        let w = get_word_idx(pos);
        let off = get_bit_idx(pos);
        let mut word = match self.words.get(w) {
            Some(&word) => word >> off,
            None => return 0,
        };
        if off > 0 {
            if let Some(&next) = self.words.get(w + 1) {
                word |= next << (BITS_PER_WORD - off);
            }
        }
        word
    }
}
