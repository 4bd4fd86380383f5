//! Splitting a raw-bits buffer into its sign, exponent and fraction fields.

use super::bits::{get_bit, set_bit};
use super::layout::Layout;

/// The categories of an IEEE-754 bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Zero,
    Subnormal,
    Normal,
    Infinity,
    NaN,
}

/// The decoded view of one bit pattern. Derived state: recomputed after
/// every mutation of the buffer, never cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedFields {
    /// The sign bit: 0 positive, 1 negative.
    pub sign: u8,
    /// The exponent field as stored, before bias correction.
    pub raw_exponent: u64,
    /// The bias-corrected exponent. For subnormals this is the effective
    /// power `1 - bias`, not the stored `-bias`.
    pub exponent: i64,
    /// The fraction as its own floating value: `1.fraction` for normal
    /// patterns, `0.fraction` for subnormals.
    pub fraction_value: f64,
    /// True when the raw exponent field is zero.
    pub is_subnormal: bool,
}

/// Decompose the buffer under `layout` into sign, exponent and fraction.
pub fn decompose(bytes: &[u8], layout: Layout) -> DecodedFields {
    debug_assert_eq!(bytes.len(), layout.byte_len());
    let exponent_bits = layout.exponent_bits();

    let sign = get_bit(bytes, 0);

    let mut raw_exponent: u64 = 0;
    for i in 0..exponent_bits {
        let bit = get_bit(bytes, 1 + i) as u64;
        raw_exponent |= bit << (exponent_bits - 1 - i);
    }
    let mut exponent = raw_exponent as i64 - layout.bias();

    // Force the stored exponent field to the bias pattern (0 followed by all
    // ones) and clear the sign, so the buffer reads back as exactly
    // 1.fraction.
    let mut copy = bytes.to_vec();
    for i in 0..exponent_bits {
        set_bit(&mut copy, 1 + i, u8::from(i != 0));
    }
    set_bit(&mut copy, 0, 0);
    let mut fraction_value = layout.width().read(&copy);

    // Subnormals have no implicit leading one: the fraction contributes
    // 0.fraction and the effective power is 1 - bias.
    let is_subnormal = raw_exponent == 0;
    if is_subnormal {
        exponent += 1;
        fraction_value -= 1.0;
    }

    DecodedFields {
        sign,
        raw_exponent,
        exponent,
        fraction_value,
        is_subnormal,
    }
}

/// Classify the bit pattern in the buffer.
pub fn classify(bytes: &[u8], layout: Layout) -> Category {
    let exponent_bits = layout.exponent_bits();
    let all_ones = (0..exponent_bits).all(|i| get_bit(bytes, 1 + i) == 1);
    let all_zeros = (0..exponent_bits).all(|i| get_bit(bytes, 1 + i) == 0);
    let fraction_zero = (1 + exponent_bits..layout.total_bits())
        .all(|i| get_bit(bytes, i) == 0);

    if all_ones {
        if fraction_zero {
            Category::Infinity
        } else {
            Category::NaN
        }
    } else if all_zeros {
        if fraction_zero {
            Category::Zero
        } else {
            Category::Subnormal
        }
    } else {
        Category::Normal
    }
}

#[test]
fn test_decompose_one() {
    let bytes = 0x3F800000u32.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY32);
    assert_eq!(fields.sign, 0);
    assert_eq!(fields.raw_exponent, 127);
    assert_eq!(fields.exponent, 0);
    assert_eq!(fields.fraction_value, 1.0);
    assert!(!fields.is_subnormal);
}

#[test]
fn test_decompose_pi() {
    let bytes = 0x40490FDBu32.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY32);
    assert_eq!(fields.sign, 0);
    assert_eq!(fields.exponent, 1);
    // pi = 1.5707963705062866 * 2^1 at 32 bits.
    assert_eq!(fields.fraction_value, f32::from_bits(0x3FC90FDB) as f64);

    let negated = 0xC0490FDBu32.to_le_bytes();
    let fields = decompose(&negated, crate::BINARY32);
    assert_eq!(fields.sign, 1);
    assert_eq!(fields.exponent, 1);
    // The sign does not leak into the fraction value.
    assert!(fields.fraction_value > 0.0);
}

#[test]
fn test_decompose_smallest_subnormal() {
    let bytes = 0x00000001u32.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY32);
    assert_eq!(fields.sign, 0);
    assert_eq!(fields.raw_exponent, 0);
    assert!(fields.is_subnormal);
    assert_eq!(fields.exponent, -126);
    // 0.fraction with only the lowest bit set: 2^-23.
    assert_eq!(fields.fraction_value, 2f64.powi(-23));
}

#[test]
fn test_decompose_zero() {
    let bytes = 0u64.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY64);
    assert_eq!(fields.sign, 0);
    assert!(fields.is_subnormal);
    assert_eq!(fields.exponent, -1022);
    assert_eq!(fields.fraction_value, 0.0);

    let bytes = 0x8000000000000000u64.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY64);
    assert_eq!(fields.sign, 1);
    assert_eq!(fields.fraction_value, 0.0);
}

#[test]
fn test_decompose_binary16() {
    // 1.0 in binary16 is 0x3C00.
    let bytes = 0x3C00u16.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY16);
    assert_eq!(fields.raw_exponent, 15);
    assert_eq!(fields.exponent, 0);
    assert_eq!(fields.fraction_value, 1.0);

    // The smallest positive binary16 subnormal.
    let bytes = 0x0001u16.to_le_bytes();
    let fields = decompose(&bytes, crate::BINARY16);
    assert!(fields.is_subnormal);
    assert_eq!(fields.exponent, -14);
    assert_eq!(fields.fraction_value, 2f64.powi(-10));
}

#[test]
fn test_classify() {
    use Category::*;
    let cases: [(u32, Category); 8] = [
        (0x00000000, Zero),
        (0x80000000, Zero),
        (0x00000001, Subnormal),
        (0x007FFFFF, Subnormal),
        (0x3F800000, Normal),
        (0x7F800000, Infinity),
        (0xFF800000, Infinity),
        (0x7FC00000, NaN),
    ];
    for (pattern, expected) in cases {
        let bytes = pattern.to_le_bytes();
        assert_eq!(
            classify(&bytes, crate::BINARY32),
            expected,
            "pattern {:#010X}",
            pattern
        );
    }
}

#[test]
fn test_decompose_matches_value() {
    // sign * fraction * 2^exponent must reproduce the numeric value for
    // finite patterns, normal and subnormal alike.
    let mut rng = crate::utils::Rng::new();
    for _ in 0..500 {
        let bytes = ((rng.get64() as u32) & 0x7FFFFFFF).to_le_bytes();
        if classify(&bytes, crate::BINARY32) == Category::NaN
            || classify(&bytes, crate::BINARY32) == Category::Infinity
        {
            continue;
        }
        let fields = decompose(&bytes, crate::BINARY32);
        let value = f32::from_bits(u32::from_le_bytes(bytes)) as f64;
        let rebuilt = fields.fraction_value * 2f64.powi(fields.exponent as i32);
        assert_eq!(rebuilt, value, "pattern {:02X?}", bytes);
    }
}
