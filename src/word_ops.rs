//! Primitive operations on a single 64-bit storage word.
//!
//! Everything here is a pure function of its arguments. The only state is the
//! [`WordOps`] popcount strategy, which is probed once on first use and then
//! handed out read-only for the life of the process.
//!
//! Callers that want a specific strategy build one with
//! [`WordOps::with_strategy`] and pass it to the `*_with` methods, e.g.
//! [`BitVector::count_with`](crate::BitVector::count_with). The plain methods
//! use [`WordOps::get`].
//!
//! # Extract / deposit
//!
//! [`pext`] and [`pdep`] are software emulations of the BMI2 `PEXT`/`PDEP`
//! instructions using the log2(64)-step masked compaction from Hacker's
//! Delight (sections 7-4 and 7-5). No hardware instruction is assumed.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Word type for bit storage (64-bit unsigned integer)
pub type Word = u64;

/// Number of bits per word
pub const BITS_PER_WORD: usize = 64;

/// Maximum word value
pub const WORD_MAX: Word = Word::MAX;

/// log2(BITS_PER_WORD), used for index arithmetic
const LOG2_WORD: usize = 6;

/// Get word index from bit position
#[inline(always)]
pub(crate) const fn get_word_idx(bit_pos: usize) -> usize {
    bit_pos >> LOG2_WORD // bit_pos / 64
}

/// Get bit index within word from bit position
#[inline(always)]
pub(crate) const fn get_bit_idx(bit_pos: usize) -> usize {
    bit_pos & (BITS_PER_WORD - 1) // bit_pos % 64
}

/// Create bitmask with n bits set (from LSB)
#[inline(always)]
pub(crate) const fn bitmask(n: usize) -> Word {
    if n == 0 {
        0
    } else if n >= BITS_PER_WORD {
        WORD_MAX
    } else {
        WORD_MAX >> (BITS_PER_WORD - n)
    }
}

/// Number of words needed to hold `n` bits.
#[inline(always)]
pub const fn words_needed(n: usize) -> usize {
    (n >> LOG2_WORD) + (get_bit_idx(n) != 0) as usize
}

// =============================================================================
// Popcount
// =============================================================================

/// How a word's population count is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopcountStrategy {
    /// `u64::count_ones`, lowered to the hardware instruction when present
    Native,
    /// Branch-free SWAR bit counting, no intrinsics
    Portable,
}

impl PopcountStrategy {
    /// Probe the running CPU for a population-count instruction.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("popcnt") {
                PopcountStrategy::Native
            } else {
                PopcountStrategy::Portable
            }
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            PopcountStrategy::Native
        }
    }

    /// Popcount a single word.
    #[inline(always)]
    pub fn count(self, word: Word) -> u32 {
        match self {
            PopcountStrategy::Native => word.count_ones(),
            PopcountStrategy::Portable => popcount_portable(word),
        }
    }
}

/// Classic parallel bit-count (Hamming weight) with magic constants.
#[inline(always)]
pub fn popcount_portable(mut x: Word) -> u32 {
    const M1: u64 = 0x5555_5555_5555_5555; // 01010101...
    const M2: u64 = 0x3333_3333_3333_3333; // 00110011...
    const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f; // 00001111...
    const H01: u64 = 0x0101_0101_0101_0101; // sum helper

    x -= (x >> 1) & M1;
    x = (x & M2) + ((x >> 2) & M2);
    x = (x + (x >> 4)) & M4;
    (x.wrapping_mul(H01) >> 56) as u32
}

/// Word-level primitives bound to a popcount strategy.
///
/// Obtain the process-wide instance with [`WordOps::get`]; tests and benches
/// may build their own with [`WordOps::with_strategy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordOps {
    strategy: PopcountStrategy,
}

static WORD_OPS: OnceLock<WordOps> = OnceLock::new();

impl WordOps {
    /// Shared instance, selected by capability probing on first call.
    pub fn get() -> &'static WordOps {
        WORD_OPS.get_or_init(|| {
            let strategy = PopcountStrategy::detect();
            tracing::debug!(?strategy, "selected popcount strategy");
            WordOps { strategy }
        })
    }

    /// Instance bound to an explicit strategy instead of the probed one.
    pub const fn with_strategy(strategy: PopcountStrategy) -> Self {
        Self { strategy }
    }

    /// The strategy this instance counts with.
    #[inline(always)]
    pub fn strategy(&self) -> PopcountStrategy {
        self.strategy
    }

    /// Number of set bits in `word`.
    #[inline(always)]
    pub fn popcount(&self, word: Word) -> usize {
        self.strategy.count(word) as usize
    }

    /// Total popcount of a word slice.
    #[inline]
    pub fn popcount_slice(&self, words: &[Word]) -> usize {
        words.iter().map(|&w| self.popcount(w)).sum()
    }

    /// Sum of `popcount(op(a[i], b[i]))` over the common prefix of two slices.
    #[inline]
    pub fn popcount_zip<F>(&self, a: &[Word], b: &[Word], op: F) -> usize
    where
        F: Fn(Word, Word) -> Word,
    {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| self.popcount(op(x, y)))
            .sum()
    }
}

// =============================================================================
// Scanning helpers
// =============================================================================

/// Number of clear bits below the lowest set bit (64 for a zero word).
#[inline(always)]
pub fn trailing_zeros(word: Word) -> usize {
    word.trailing_zeros() as usize
}

/// Number of clear bits above the highest set bit (64 for a zero word).
#[inline(always)]
pub fn leading_zeros(word: Word) -> usize {
    word.leading_zeros() as usize
}

/// Position of the k-th set bit (0-indexed) in `word`, or 64 if there are
/// fewer than k+1 set bits.
#[inline]
pub fn select_in_word(word: Word, k: u32) -> u32 {
    let mut val = word;
    let mut remaining = k;

    loop {
        if val == 0 {
            return BITS_PER_WORD as u32;
        }
        if remaining == 0 {
            return val.trailing_zeros();
        }
        remaining -= 1;
        val &= val - 1; // Clear lowest set bit
    }
}

// =============================================================================
// Extract / Deposit
// =============================================================================

/// Running-parity prefix of `mk`: bit j is the xor of `mk` bits 0..=j.
#[inline(always)]
fn parallel_suffix(mk: Word) -> Word {
    let mut mp = mk ^ (mk << 1);
    mp ^= mp << 2;
    mp ^= mp << 4;
    mp ^= mp << 8;
    mp ^= mp << 16;
    mp ^= mp << 32;
    mp
}

/// Parallel bit extract: gather the bits of `word` selected by `mask` into the
/// low-order bits of the result, preserving their order.
///
/// # Examples
///
/// ```
/// use wordbits::word_ops::pext;
///
/// // mask positions 2,3,6,7 hold bits 1,0,1,1
/// assert_eq!(pext(0b1101_0110, 0b1100_1100), 0b1101);
/// ```
#[inline]
pub fn pext(word: Word, mask: Word) -> Word {
    let mut m = mask;
    let mut x = word & m;
    // mk counts the zeros to the right of each mask bit
    let mut mk = !m << 1;

    for i in 0..LOG2_WORD {
        let mp = parallel_suffix(mk);
        let mv = mp & m;
        m = (m ^ mv) | (mv >> (1 << i));
        let t = x & mv;
        x = (x ^ t) | (t >> (1 << i));
        mk &= !mp;
    }
    x
}

/// Parallel bit deposit: scatter the low `popcount(mask)` bits of `word` into
/// the positions selected by `mask`. Bits outside the mask are zero.
///
/// # Examples
///
/// ```
/// use wordbits::word_ops::pdep;
///
/// assert_eq!(pdep(0b1011, 0b1100_1100), 0b1000_1100);
/// ```
#[inline]
pub fn pdep(word: Word, mask: Word) -> Word {
    let mut m = mask;
    let mut mk = !m << 1;
    let mut moves = [0 as Word; LOG2_WORD];

    for (i, slot) in moves.iter_mut().enumerate() {
        let mp = parallel_suffix(mk);
        let mv = mp & m;
        *slot = mv;
        m = (m ^ mv) | (mv >> (1 << i));
        mk &= !mp;
    }

    let mut x = word;
    for i in (0..LOG2_WORD).rev() {
        let mv = moves[i];
        let t = x << (1 << i);
        x = (x & !mv) | (t & mv);
    }
    x & mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn pext_naive(src: u64, mask: u64) -> u64 {
        let mut result = 0u64;
        let mut k = 0;
        for i in 0..64 {
            if mask & (1u64 << i) != 0 {
                if src & (1u64 << i) != 0 {
                    result |= 1u64 << k;
                }
                k += 1;
            }
        }
        result
    }

    fn pdep_naive(src: u64, mask: u64) -> u64 {
        let mut result = 0u64;
        let mut k = 0;
        for i in 0..64 {
            if mask & (1u64 << i) != 0 {
                if src & (1u64 << k) != 0 {
                    result |= 1u64 << i;
                }
                k += 1;
            }
        }
        result
    }

    #[test]
    fn test_index_helpers() {
        assert_eq!(get_word_idx(63), 0);
        assert_eq!(get_word_idx(64), 1);
        assert_eq!(get_bit_idx(65), 1);
        assert_eq!(bitmask(0), 0);
        assert_eq!(bitmask(3), 0b111);
        assert_eq!(bitmask(64), u64::MAX);
        assert_eq!(words_needed(0), 0);
        assert_eq!(words_needed(1), 1);
        assert_eq!(words_needed(64), 1);
        assert_eq!(words_needed(65), 2);
    }

    #[test]
    fn test_popcount_strategies_agree() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let w: u64 = rng.gen();
            assert_eq!(popcount_portable(w), w.count_ones());
            assert_eq!(
                PopcountStrategy::Native.count(w),
                PopcountStrategy::Portable.count(w)
            );
        }
        assert_eq!(popcount_portable(0), 0);
        assert_eq!(popcount_portable(u64::MAX), 64);
    }

    #[test]
    fn test_word_ops_shared_instance() {
        let ops = WordOps::get();
        assert!(std::ptr::eq(ops, WordOps::get()));
        assert_eq!(ops.popcount_slice(&[0b1011, u64::MAX]), 67);
        let portable = WordOps::with_strategy(PopcountStrategy::Portable);
        assert_eq!(portable.popcount_zip(&[0b1100], &[0b1010], |a, b| a & b), 1);
    }

    #[test]
    fn test_select_in_word() {
        let word = 0b1010_1010u64;
        assert_eq!(select_in_word(word, 0), 1);
        assert_eq!(select_in_word(word, 3), 7);
        assert_eq!(select_in_word(word, 4), 64);
        assert_eq!(select_in_word(1 << 63, 0), 63);
        assert_eq!(select_in_word(0, 0), 64);
    }

    #[test]
    fn test_pext_examples() {
        assert_eq!(pext(0b1101_0110, 0b1100_1100), 13);
        assert_eq!(pext(u64::MAX, 0), 0);
        assert_eq!(pext(0x1234_5678_9abc_def0, u64::MAX), 0x1234_5678_9abc_def0);
        assert_eq!(pext(1 << 63, 1 << 63), 1);
    }

    #[test]
    fn test_pdep_examples() {
        assert_eq!(pdep(0b1011, 0b1100_1100), 140);
        assert_eq!(pdep(u64::MAX, 0), 0);
        assert_eq!(pdep(1, 1 << 63), 1 << 63);
        assert_eq!(pdep(0x1234_5678_9abc_def0, u64::MAX), 0x1234_5678_9abc_def0);
    }

    #[test]
    fn test_pext_pdep_match_naive() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let src: u64 = rng.gen();
            let mask: u64 = rng.gen::<u64>() & rng.gen::<u64>();
            assert_eq!(pext(src, mask), pext_naive(src, mask), "src={src:#x} mask={mask:#x}");
            assert_eq!(pdep(src, mask), pdep_naive(src, mask), "src={src:#x} mask={mask:#x}");
            assert_eq!(pdep(pext(src, mask), mask), src & mask);
        }
    }
}
