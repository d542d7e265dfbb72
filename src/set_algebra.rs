//! Set algebra across vectors of possibly different lengths.
//!
//! Positions past an operand's own length read as 0. Result lengths:
//!
//! | operation              | functional result length | in-place receiver length |
//! |------------------------|--------------------------|--------------------------|
//! | union                  | longer operand           | grows to longer          |
//! | intersection           | shorter operand          | grows to longer          |
//! | difference             | `self`                   | unchanged                |
//! | symmetric difference   | longer operand           | grows to longer          |
//!
//! The `*_cardinality` forms count the result without allocating it.

use crate::bitvector::BitVector;
use crate::word_ops::WordOps;

impl BitVector {
    /// Order two vectors as (shorter, longer).
    #[inline]
    fn by_length<'a>(a: &'a BitVector, b: &'a BitVector) -> (&'a BitVector, &'a BitVector) {
        if a.length <= b.length {
            (a, b)
        } else {
            (b, a)
        }
    }

    // =========================================================================
    // Functional Forms
    // =========================================================================

    /// Bits set in either vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordbits::BitVector;
    ///
    /// let mut a = BitVector::new(10);
    /// a.set(1);
    /// let mut b = BitVector::new(100);
    /// b.set(90);
    /// let u = a.union(&b);
    /// assert_eq!(u.len(), 100);
    /// assert_eq!(u.to_vec(), vec![1, 90]);
    /// ```
    pub fn union(&self, other: &BitVector) -> BitVector {
        let (short, long) = Self::by_length(self, other);
        let mut result = long.clone();
        for (dst, &w) in result.words.iter_mut().zip(short.words.iter()) {
            *dst |= w;
        }
        result
    }

    /// Bits set in both vectors. The result has the shorter length.
    pub fn intersection(&self, other: &BitVector) -> BitVector {
        let (short, long) = Self::by_length(self, other);
        let mut result = BitVector::new(short.length);
        for ((dst, &a), &b) in result
            .words
            .iter_mut()
            .zip(short.words.iter())
            .zip(long.words.iter())
        {
            *dst = a & b;
        }
        result
    }

    /// Bits set in `self` but not in `other`. The result has `self`'s length.
    pub fn difference(&self, other: &BitVector) -> BitVector {
        let mut result = self.clone();
        for (dst, &w) in result.words.iter_mut().zip(other.words.iter()) {
            *dst &= !w;
        }
        result
    }

    /// Bits set in exactly one vector.
    pub fn symmetric_difference(&self, other: &BitVector) -> BitVector {
        let (short, long) = Self::by_length(self, other);
        let mut result = long.clone();
        for (dst, &w) in result.words.iter_mut().zip(short.words.iter()) {
            *dst ^= w;
        }
        result
    }

    /// Bitwise NOT over `[0, len())`.
    pub fn complement(&self) -> BitVector {
        let mut result = self.clone();
        result.in_place_complement();
        result
    }

    // =========================================================================
    // In-Place Forms
    // =========================================================================

    /// Set every bit that is set in `other`, growing to `other.len()` if longer.
    pub fn in_place_union(&mut self, other: &BitVector) {
        self.grow_to(other.length);
        for (dst, &w) in self.words.iter_mut().zip(other.words.iter()) {
            *dst |= w;
        }
    }

    /// Keep only bits also set in `other`.
    ///
    /// The receiver grows to the longer of the two lengths; positions past
    /// either operand's end come out clear.
    pub fn in_place_intersection(&mut self, other: &BitVector) {
        let common = self.words.len().min(other.words.len());
        for (dst, &w) in self.words[..common].iter_mut().zip(other.words.iter()) {
            *dst &= w;
        }
        self.words[common..].fill(0);
        self.grow_to(other.length);
    }

    /// Clear every bit that is set in `other`. Length is unchanged.
    pub fn in_place_difference(&mut self, other: &BitVector) {
        for (dst, &w) in self.words.iter_mut().zip(other.words.iter()) {
            *dst &= !w;
        }
    }

    /// Toggle every bit that is set in `other`, growing to `other.len()` if longer.
    pub fn in_place_symmetric_difference(&mut self, other: &BitVector) {
        self.grow_to(other.length);
        for (dst, &w) in self.words.iter_mut().zip(other.words.iter()) {
            *dst ^= w;
        }
    }

    /// Invert every bit in `[0, len())`.
    pub fn in_place_complement(&mut self) {
        for w in &mut self.words {
            *w = !*w;
        }
        self.clean_last_word();
    }

    // =========================================================================
    // Cardinality Forms
    // =========================================================================

    /// `self.union(other).count()` without building the union.
    pub fn union_cardinality(&self, other: &BitVector) -> usize {
        let ops = WordOps::get();
        let (short, long) = Self::by_length(self, other);
        let n = short.words.len().min(long.words.len());
        ops.popcount_zip(&short.words, &long.words, |a, b| a | b)
            + ops.popcount_slice(&long.words[n..])
    }

    /// `self.intersection(other).count()` without building the intersection.
    pub fn intersection_cardinality(&self, other: &BitVector) -> usize {
        WordOps::get().popcount_zip(&self.words, &other.words, |a, b| a & b)
    }

    /// `self.difference(other).count()` without building the difference.
    pub fn difference_cardinality(&self, other: &BitVector) -> usize {
        let ops = WordOps::get();
        let n = self.words.len().min(other.words.len());
        ops.popcount_zip(&self.words, &other.words, |a, b| a & !b)
            + ops.popcount_slice(&self.words[n..])
    }

    /// `self.symmetric_difference(other).count()` without building it.
    pub fn symmetric_difference_cardinality(&self, other: &BitVector) -> usize {
        let ops = WordOps::get();
        let (short, long) = Self::by_length(self, other);
        let n = short.words.len().min(long.words.len());
        ops.popcount_zip(&short.words, &long.words, |a, b| a ^ b)
            + ops.popcount_slice(&long.words[n..])
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// True if every bit in `[0, len())` is set. Vacuously true when empty.
    pub fn all(&self) -> bool {
        self.count() == self.length
    }

    /// True if no bit is set.
    pub fn none(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// True if at least one bit is set.
    pub fn any(&self) -> bool {
        !self.none()
    }

    /// True if every bit set in `other` is also set in `self`.
    pub fn is_superset(&self, other: &BitVector) -> bool {
        let n = self.words.len().min(other.words.len());
        self.words[..n]
            .iter()
            .zip(other.words[..n].iter())
            .all(|(&a, &b)| a & b == b)
            && other.words[n..].iter().all(|&w| w == 0)
    }

    /// True if `self` is a superset of `other` and has at least one bit that
    /// `other` lacks.
    pub fn is_strict_superset(&self, other: &BitVector) -> bool {
        self.count() > other.count() && self.is_superset(other)
    }
}
