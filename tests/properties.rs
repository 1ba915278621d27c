//! Randomized properties of the digit codec and the reference arithmetic.

use modcheck::digits;
use modcheck::trace::record::Op;
use modcheck::verifier::expected_value;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use proptest::collection::vec;
use proptest::prelude::*;

fn big(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

proptest! {
    #[test]
    fn round_trip_holds_at_width_4(bytes in vec(any::<u8>(), 0..48)) {
        let x = big(&bytes);
        prop_assert_eq!(digits::decode(&digits::encode(&x, 4), 4).unwrap(), x);
    }

    #[test]
    fn expected_values_lie_in_modulus_range(
        a in vec(any::<u8>(), 0..24),
        b in vec(any::<u8>(), 0..24),
        m in vec(any::<u8>(), 0..24),
    ) {
        let a = big(&a);
        let b = big(&b);
        let m = big(&m) + 2u32;
        for op in [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::ModExp] {
            prop_assert!(expected_value(op, &a, &b, &m) < m);
        }
    }

    #[test]
    fn subtraction_is_mathematical_modulo(
        a in vec(any::<u8>(), 0..16),
        b in vec(any::<u8>(), 0..16),
        m in vec(any::<u8>(), 0..16),
    ) {
        let a = big(&a);
        let b = big(&b);
        let m = big(&m) + 2u32;
        let e = expected_value(Op::Sub, &a, &b, &m);
        // Adding b back must recover a, both reduced.
        prop_assert_eq!((e + &b) % &m, &a % &m);
    }
}

// 2^61 - 1 is a Mersenne prime, large enough to need more than one 4-byte digit.
const PRIMES: [u64; 4] = [7, 13, 1_000_003, 2_305_843_009_213_693_951];

#[test]
fn fermat_inverse_is_an_inverse_for_prime_moduli() {
    let mut rng = rand::thread_rng();
    for p in PRIMES {
        let m = BigUint::from(p);
        for _ in 0..32 {
            let b = rng.gen_biguint_range(&BigUint::one(), &m);
            let inv = b.modpow(&(&m - 2u32), &m);
            assert_eq!((&b * inv) % &m, BigUint::one(), "modulus {p}");
        }
    }
}

#[test]
fn division_inverts_multiplication_for_prime_moduli() {
    let mut rng = rand::thread_rng();
    let m = BigUint::from(1_000_003u64);
    for _ in 0..32 {
        let a = rng.gen_biguint_below(&m);
        let b = rng.gen_biguint_range(&BigUint::one(), &m);
        let q = expected_value(Op::Div, &a, &b, &m);
        assert_eq!((q * &b) % &m, a);
    }
}

#[test]
fn diagnostic_mask_is_fixed_at_32_bits() {
    // 8-byte digits: a digit of 2^40 loses its high bits to the 32-bit mask,
    // so the encoding is lossy away from 4-byte digits.
    let x = BigUint::from(1u64 << 40);
    assert_eq!(digits::encode(&x, 8), "[0]");
    assert_ne!(digits::decode(&digits::encode(&x, 8), 8).unwrap(), x);

    // 2-byte digits: the mask instead lets a digit overflow its declared
    // width, so the first element carries all 32 low bits.
    let x = BigUint::from(0x1234_5678u32);
    assert_eq!(digits::encode(&x, 2), "[305419896, 4660]");
}
