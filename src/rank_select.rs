//! Rank, select and range population counts.
//!
//! These are plain linear scans over the words with no auxiliary index, so
//! they stay valid across arbitrary mutation.

use crate::bitvector::BitVector;
use crate::word_ops::{bitmask, get_bit_idx, get_word_idx, select_in_word, WordOps, BITS_PER_WORD};

impl BitVector {
    /// Number of set bits at positions `<= i`.
    ///
    /// Returns `count()` when `i >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut bv = BitVector::new(100);
    /// bv.set(3);
    /// bv.set(70);
    /// assert_eq!(bv.rank(2), 0);
    /// assert_eq!(bv.rank(3), 1);
    /// assert_eq!(bv.rank(99), 2);
    /// ```
    pub fn rank(&self, i: usize) -> usize {
        if i >= self.length {
            return self.count();
        }
        let ops = WordOps::get();
        let w = get_word_idx(i);
        ops.popcount_slice(&self.words[..w])
            + ops.popcount(self.words[w] & bitmask(get_bit_idx(i) + 1))
    }

    /// Position of the set bit with rank `k + 1` (the k-th set bit, counting
    /// from 0), or `None` if fewer than `k + 1` bits are set.
    pub fn select(&self, k: usize) -> Option<usize> {
        let ops = WordOps::get();
        let mut seen = 0;
        for (w, &word) in self.words.iter().enumerate() {
            let pc = ops.popcount(word);
            if seen + pc > k {
                let bit = select_in_word(word, (k - seen) as u32) as usize;
                return Some(w * BITS_PER_WORD + bit);
            }
            seen += pc;
        }
        None
    }

    /// Number of set bits in `[from, to)`. `to` is clamped to `len()`.
    pub fn ones_between(&self, from: usize, to: usize) -> usize {
        let to = to.min(self.length);
        if from >= to {
            return 0;
        }
        let ops = WordOps::get();
        let (fw, fb) = (get_word_idx(from), get_bit_idx(from));
        let (tw, tb) = (get_word_idx(to), get_bit_idx(to));

        if fw == tw {
            return ops.popcount(self.words[fw] & bitmask(tb) & !bitmask(fb));
        }
        let mut total = ops.popcount(self.words[fw] & !bitmask(fb));
        total += ops.popcount_slice(&self.words[fw + 1..tw]);
        if tb > 0 {
            total += ops.popcount(self.words[tw] & bitmask(tb));
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_rank_basic() {
        let mut bv = BitVector::new(200);
        for i in [0, 63, 64, 150] {
            bv.set(i);
        }
        assert_eq!(bv.rank(0), 1);
        assert_eq!(bv.rank(62), 1);
        assert_eq!(bv.rank(63), 2);
        assert_eq!(bv.rank(64), 3);
        assert_eq!(bv.rank(199), 4);
        assert_eq!(bv.rank(10_000), 4);
        assert_eq!(BitVector::new(0).rank(0), 0);
    }

    #[test]
    fn test_select_basic() {
        let mut bv = BitVector::new(200);
        for i in [0, 63, 64, 150] {
            bv.set(i);
        }
        assert_eq!(bv.select(0), Some(0));
        assert_eq!(bv.select(1), Some(63));
        assert_eq!(bv.select(2), Some(64));
        assert_eq!(bv.select(3), Some(150));
        assert_eq!(bv.select(4), None);
    }

    #[test]
    fn test_rank_select_inverse() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut bv = BitVector::new(1000);
        for i in 0..1000 {
            if rng.gen_bool(0.2) {
                bv.set(i);
            }
        }
        for k in 0..bv.count() {
            let pos = bv.select(k).unwrap();
            assert_eq!(bv.rank(pos), k + 1);
        }
    }

    #[test]
    fn test_ones_between_matches_scan() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut bv = BitVector::new(300);
        for i in 0..300 {
            if rng.gen_bool(0.5) {
                bv.set(i);
            }
        }
        for _ in 0..500 {
            let from = rng.gen_range(0..320);
            let to = rng.gen_range(0..320);
            let naive = (from..to.min(300)).filter(|&i| bv.test(i)).count();
            assert_eq!(bv.ones_between(from, to), naive, "from={from} to={to}");
        }
        assert_eq!(bv.ones_between(0, 300), bv.count());
        assert_eq!(bv.ones_between(64, 128), bv.words()[1].count_ones() as usize);
    }
}
