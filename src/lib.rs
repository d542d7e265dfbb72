//! Wordbits - Growable Word-Packed Bit Vectors
//!
//! Wordbits provides a dynamically growable bit vector stored in 64-bit words,
//! intended as a building block for bitmap indexes, membership filters and
//! roaring-style containers.
//!
//! # Key Characteristics
//!
//! - Auto-grow on write, benign `false`/no-op on out-of-range reads and clears
//! - Word-level scanning for next/previous set and clear bits
//! - Insert/delete of single positions and whole-vector shifts with carry
//!   propagation across word boundaries
//! - Rank, select and range population counts
//! - Mask-driven gather/scatter built on software `PEXT`/`PDEP`
//! - Set algebra across vectors of different lengths, with allocation-free
//!   cardinality variants
//! - Binary and JSON (base64) encodings, plus a zero-copy read-only view
//!
//! # Architecture
//!
//! - **word_ops**: single-word primitives and the popcount strategy
//! - **BitVector**: storage model and core bit operations
//! - **navigation**, **structural**, **set_algebra**, **rank_select**,
//!   **extract_deposit**: further `impl BitVector` blocks
//! - **codec**: binary/JSON encodings and serde support
//! - **BitVectorView**: borrowed read-only view over an encoded buffer
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use wordbits::BitVector;
//!
//! let mut bv = BitVector::new(128);
//! bv.set(10);
//! bv.set(20);
//! bv.set(300); // grows to 301 bits
//!
//! assert_eq!(bv.count(), 3);
//! assert_eq!(bv.next_set(11), Some(20));
//! assert_eq!(bv.rank(20), 2);
//! assert_eq!(bv.select(2), Some(300));
//!
//! let mut other = BitVector::new(64);
//! other.set(20);
//! assert_eq!((&bv & &other).to_vec(), vec![20]);
//! ```
//!
//! ## Encoding
//!
//! ```
//! use wordbits::{BitVector, CodecConfig};
//!
//! let mut bv = BitVector::new(0);
//! bv.set(5);
//! let bytes = bv.to_binary(&CodecConfig::default());
//! assert_eq!(bytes.len(), 16);
//! assert_eq!(BitVector::from_binary(&bytes, &CodecConfig::default()).unwrap(), bv);
//! ```
//!
//! # Safety
//!
//! Wordbits contains no unsafe code. A `BitVector` may be read from many
//! threads at once through shared references; any mutation (including growth,
//! which reallocates) needs exclusive access, exactly as for a `Vec`.

// Module declarations
pub mod bitvector;
pub mod codec;
pub mod error;
pub mod extract_deposit;
pub mod navigation;
pub mod rank_select;
pub mod set_algebra;
pub mod structural;
pub mod view;
pub mod word_ops;

// Re-exports for convenient access
pub use bitvector::BitVector;
pub use codec::{Base64Alphabet, ByteOrder, CodecConfig};
pub use error::{BitVectorError, Result};
pub use navigation::Ones;
pub use view::BitVectorView;
pub use word_ops::{pdep, pext, PopcountStrategy, Word, WordOps, BITS_PER_WORD};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Wordbits";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
