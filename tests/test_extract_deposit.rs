//! Tests for mask-driven extract (gather) and deposit (scatter).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wordbits::{pdep, pext, BitVector};

fn random_vector(rng: &mut StdRng, len: usize, density: f64) -> BitVector {
    let mut bv = BitVector::new(len);
    for i in 0..len {
        if rng.gen_bool(density) {
            bv.set(i);
        }
    }
    bv
}

/// Gather by walking mask positions one at a time.
fn naive_extract(src: &BitVector, mask: &BitVector, dst_len: usize) -> BitVector {
    let mut dst = BitVector::new(dst_len);
    for (k, pos) in mask.ones().enumerate() {
        if k >= dst_len {
            break;
        }
        if src.test(pos) {
            dst.set(k);
        }
    }
    dst
}

// =============================================================================
// Word Primitives
// =============================================================================

#[test]
fn test_pext_pdep_known_values() {
    assert_eq!(pext(0b1011_0110, 0b1111_0000), 0b1011);
    assert_eq!(pext(0xFFFF_FFFF_FFFF_FFFF, 0x8000_0000_0000_0001), 0b11);
    assert_eq!(pdep(0b1011, 0b1111_0000), 0b1011_0000);
    assert_eq!(pdep(0b11, 0x8000_0000_0000_0001), 0x8000_0000_0000_0001);
    assert_eq!(pext(12345, 0), 0);
    assert_eq!(pdep(12345, 0), 0);
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn test_extract_deposit_scenario() {
    let mut mask = BitVector::new(16);
    for i in [0, 5, 10] {
        mask.set(i);
    }
    let mut src = BitVector::new(16);
    src.set(0);
    src.set(10);

    let mut packed = BitVector::new(3);
    src.extract_to(&mask, &mut packed);
    assert_eq!(packed.to_vec(), vec![0, 2]);

    let mut restored = BitVector::new(16);
    packed.deposit_to(&mask, &mut restored);
    assert_eq!(restored, src);
}

// =============================================================================
// Laws
// =============================================================================

#[test]
fn test_extract_matches_naive() {
    let mut rng = StdRng::seed_from_u64(2024);
    for &(mask_density, len) in &[(0.1, 500), (0.5, 640), (0.95, 300)] {
        let src = random_vector(&mut rng, len, 0.5);
        let mask = random_vector(&mut rng, len, mask_density);
        for dst_len in [mask.count(), mask.count() / 2, 1] {
            let mut dst = BitVector::new(dst_len);
            src.extract_to(&mask, &mut dst);
            assert_eq!(dst, naive_extract(&src, &mask, dst_len), "dst_len={}", dst_len);
        }
    }
}

#[test]
fn test_deposit_then_extract_is_identity() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..20 {
        let mask = random_vector(&mut rng, 400, 0.4);
        let n = mask.count();
        let packed = random_vector(&mut rng, n, 0.5);

        let mut scattered = BitVector::new(400);
        packed.deposit_to(&mask, &mut scattered);
        assert_eq!(scattered.difference(&mask).count(), 0);

        let mut back = BitVector::new(n);
        scattered.extract_to(&mask, &mut back);
        assert_eq!(back, packed);
    }
}

#[test]
fn test_extract_then_deposit_keeps_masked_bits() {
    let mut rng = StdRng::seed_from_u64(3);
    let src = random_vector(&mut rng, 777, 0.5);
    let mask = random_vector(&mut rng, 777, 0.3);

    let mut packed = BitVector::new(mask.count());
    src.extract_to(&mask, &mut packed);
    let mut restored = BitVector::new(777);
    packed.deposit_to(&mask, &mut restored);

    assert_eq!(restored, src.intersection(&mask));
}

#[test]
fn test_empty_mask() {
    let src = BitVector::new(100);
    let mask = BitVector::new(100);
    let mut dst = BitVector::new(10);
    dst.set(3);
    src.extract_to(&mask, &mut dst);
    assert!(dst.none());

    let mut target = BitVector::new(100);
    target.set(50);
    src.deposit_to(&mask, &mut target);
    assert_eq!(target.to_vec(), vec![50]);
}
