//! Fixed-width float reinterpretation.
//!
//! The raw-bits buffer is stored least-significant byte first. This module
//! reads it back as an exact `f64`, and writes `f64` values into it with the
//! rounding the hardware (or, for 16 bits, an emulated binary16) would apply.

/// One of the three storage widths that back a [`Layout`](crate::Layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Width {
    W16,
    W32,
    W64,
}

impl Width {
    /// Reinterpret the buffer as a float of this width. The result is exact:
    /// every 16- and 32-bit value is representable in `f64`.
    pub(crate) fn read(self, bytes: &[u8]) -> f64 {
        match self {
            Width::W16 => f16_to_f64(u16::from_le_bytes([bytes[0], bytes[1]])),
            Width::W32 => {
                let bits =
                    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                f32::from_bits(bits) as f64
            }
            Width::W64 => {
                let mut bits = [0u8; 8];
                bits.copy_from_slice(bytes);
                f64::from_bits(u64::from_le_bytes(bits))
            }
        }
    }

    /// Store `value` into the buffer, rounding to the nearest representable
    /// value of this width (ties to even, overflow to infinity).
    pub(crate) fn write(self, value: f64, bytes: &mut [u8]) {
        match self {
            Width::W16 => {
                bytes.copy_from_slice(&f64_to_f16(value).to_le_bytes());
            }
            Width::W32 => {
                let bits = (value as f32).to_bits();
                bytes.copy_from_slice(&bits.to_le_bytes());
            }
            Width::W64 => {
                bytes.copy_from_slice(&value.to_bits().to_le_bytes());
            }
        }
    }

    /// Round `value` to the nearest value representable at this width and
    /// return it widened back to `f64`.
    pub(crate) fn narrow(self, value: f64) -> f64 {
        match self {
            Width::W16 => f16_to_f64(f64_to_f16(value)),
            Width::W32 => value as f32 as f64,
            Width::W64 => value,
        }
    }

    /// Parse a decimal text and narrow it to this width. Anything that does
    /// not parse as a number is NaN, matching the coercion semantics of an
    /// interactive editor: malformed input is visible feedback, not an error.
    pub(crate) fn parse(self, text: &str) -> f64 {
        self.narrow(text.trim().parse::<f64>().unwrap_or(f64::NAN))
    }
}

/// Widen a binary16 bit pattern to the `f64` with the same value.
pub(crate) fn f16_to_f64(bits: u16) -> f64 {
    let sign = if bits >> 15 == 1 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 10) & 0x1F) as i32;
    let fraction = (bits & 0x3FF) as f64;

    if exponent == 0x1F {
        if fraction != 0.0 {
            return f64::NAN;
        }
        return sign * f64::INFINITY;
    }
    if exponent == 0 {
        // Subnormal or zero: no implicit leading one.
        return sign * fraction * 2f64.powi(-24);
    }
    sign * (1.0 + fraction / 1024.0) * 2f64.powi(exponent - 15)
}

/// Round an `f64` to the nearest binary16 bit pattern, ties to even.
pub(crate) fn f64_to_f16(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;

    if value.is_nan() {
        return sign | 0x7E00;
    }
    if value.is_infinite() {
        return sign | 0x7C00;
    }

    let exp = ((bits >> 52) & 0x7FF) as i64 - 1023;
    let frac = bits & ((1u64 << 52) - 1);

    // Anything at or above 2^16 rounds to infinity (the largest finite
    // binary16 is 65504, and 65520 already ties upward).
    if exp >= 16 {
        return sign | 0x7C00;
    }

    if exp >= -14 {
        // Normal range: keep the top 10 fraction bits and round.
        let mut m = (frac >> 42) as u16;
        let rest = frac & ((1u64 << 42) - 1);
        let halfway = 1u64 << 41;
        if rest > halfway || (rest == halfway && (m & 1) == 1) {
            m += 1;
        }
        let mut e = (exp + 15) as u16;
        if m == 0x400 {
            // The fraction rounded up into the next binade.
            m = 0;
            e += 1;
        }
        if e >= 0x1F {
            return sign | 0x7C00;
        }
        return sign | (e << 10) | m;
    }

    // Below half of the smallest subnormal everything rounds to zero. This
    // also covers f64 subnormals, whose magnitude is far smaller still.
    if exp < -26 {
        return sign;
    }

    // Subnormal range: express the value in units of 2^-24 and round.
    // A result of 0x400 overflows into the smallest normal encoding, which
    // is exactly the bit pattern `sign | 0x0400`.
    let sig = (1u64 << 52) | frac;
    let shift = (28 - exp) as u32;
    let mut m = (sig >> shift) as u16;
    let rest = sig & ((1u64 << shift) - 1);
    let halfway = 1u64 << (shift - 1);
    if rest > halfway || (rest == halfway && (m & 1) == 1) {
        m += 1;
    }
    sign | m
}

#[test]
fn test_f16_decode() {
    assert_eq!(f16_to_f64(0x0000), 0.0);
    assert!(f16_to_f64(0x8000) == 0.0 && f16_to_f64(0x8000).is_sign_negative());
    assert_eq!(f16_to_f64(0x3C00), 1.0);
    assert_eq!(f16_to_f64(0x4000), 2.0);
    assert_eq!(f16_to_f64(0x4248), 3.140625);
    assert_eq!(f16_to_f64(0x7BFF), 65504.0);
    assert_eq!(f16_to_f64(0x0400), 6.103515625e-5);
    assert_eq!(f16_to_f64(0x0001), 5.960464477539063e-8);
    assert_eq!(f16_to_f64(0x7C00), f64::INFINITY);
    assert_eq!(f16_to_f64(0xFC00), f64::NEG_INFINITY);
    assert!(f16_to_f64(0x7C01).is_nan());
    assert!(f16_to_f64(0xFE00).is_nan());
}

#[test]
fn test_f16_encode() {
    assert_eq!(f64_to_f16(0.0), 0x0000);
    assert_eq!(f64_to_f16(-0.0), 0x8000);
    assert_eq!(f64_to_f16(1.0), 0x3C00);
    assert_eq!(f64_to_f16(-1.25), 0xBD00);
    assert_eq!(f64_to_f16(core::f64::consts::PI), 0x4248);
    assert_eq!(f64_to_f16(65504.0), 0x7BFF);
    assert_eq!(f64_to_f16(6.103515625e-5), 0x0400);
    assert_eq!(f64_to_f16(5.960464477539063e-8), 0x0001);
    assert_eq!(f64_to_f16(f64::INFINITY), 0x7C00);
    assert_eq!(f64_to_f16(f64::NEG_INFINITY), 0xFC00);
    assert_eq!(f64_to_f16(f64::NAN), 0x7E00);
}

#[test]
fn test_f16_encode_rounding() {
    // 65520 is exactly halfway between 65504 and 2^16: ties away to Inf.
    assert_eq!(f64_to_f16(65519.999), 0x7BFF);
    assert_eq!(f64_to_f16(65520.0), 0x7C00);
    assert_eq!(f64_to_f16(65536.0), 0x7C00);

    // Half of the smallest subnormal is a tie that rounds to even (zero);
    // anything above it rounds up to the smallest subnormal.
    let min_sub = 5.960464477539063e-8;
    assert_eq!(f64_to_f16(min_sub / 2.0), 0x0000);
    assert_eq!(f64_to_f16(min_sub / 2.0 * 1.0000001), 0x0001);
    assert_eq!(f64_to_f16(min_sub / 4.0), 0x0000);
}

#[test]
fn test_f16_round_trip_all_patterns() {
    // Every binary16 value must survive decode + encode bit-exactly
    // (NaN payloads collapse to the canonical quiet NaN).
    for bits in 0..=u16::MAX {
        let value = f16_to_f64(bits);
        if value.is_nan() {
            assert_eq!(f64_to_f16(value) & 0x7C00, 0x7C00);
            continue;
        }
        assert_eq!(f64_to_f16(value), bits, "pattern {:#06X}", bits);
    }
}

#[test]
fn test_read_write() {
    let mut buf = [0u8; 4];
    Width::W32.write(core::f64::consts::PI, &mut buf);
    assert_eq!(buf, 0x40490FDBu32.to_le_bytes());
    assert_eq!(Width::W32.read(&buf), f32::from_bits(0x40490FDB) as f64);

    let mut buf = [0u8; 8];
    Width::W64.write(core::f64::consts::PI, &mut buf);
    assert_eq!(Width::W64.read(&buf), core::f64::consts::PI);

    let mut buf = [0u8; 2];
    Width::W16.write(core::f64::consts::PI, &mut buf);
    assert_eq!(buf, 0x4248u16.to_le_bytes());
}

#[test]
fn test_parse_coercion() {
    assert_eq!(Width::W64.parse("2.5"), 2.5);
    assert_eq!(Width::W32.parse("  1e10 "), 1e10f32 as f64);
    assert_eq!(Width::W64.parse("inf"), f64::INFINITY);
    assert_eq!(Width::W64.parse("-Infinity"), f64::NEG_INFINITY);
    assert!(Width::W64.parse("bogus").is_nan());
    assert!(Width::W64.parse("").is_nan());
    assert!(Width::W16.parse("nan").is_nan());
}
