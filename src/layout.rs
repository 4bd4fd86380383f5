use super::native::Width;

/// Describes an IEEE-754-style storage format: one sign bit, `exponent_bits`
/// bits of biased exponent, and the remaining bits of fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    total_bits: usize,
    exponent_bits: usize,
}

impl Layout {
    /// Create a new layout. The total width must be one of the storage
    /// widths with a native (or emulated) float type: 16, 32 or 64 bits.
    pub const fn new(total_bits: usize, exponent_bits: usize) -> Self {
        assert!(total_bits == 16 || total_bits == 32 || total_bits == 64);
        assert!(exponent_bits > 0 && exponent_bits < total_bits - 1);
        Layout {
            total_bits,
            exponent_bits,
        }
    }

    /// Returns the total number of bits in the format.
    pub const fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Returns the number of exponent bits.
    pub const fn exponent_bits(&self) -> usize {
        self.exponent_bits
    }

    /// Returns the number of fraction bits (everything after the sign and
    /// the exponent).
    pub const fn fraction_bits(&self) -> usize {
        self.total_bits - 1 - self.exponent_bits
    }

    /// Returns the number of bytes in the raw-bits buffer.
    pub const fn byte_len(&self) -> usize {
        self.total_bits / 8
    }

    /// Returns the exponent bias for the format, as a positive number.
    /// https://en.wikipedia.org/wiki/IEEE_754#Basic_and_interchange_formats
    pub const fn bias(&self) -> i64 {
        ((1u64 << (self.exponent_bits - 1)) - 1) as i64
    }

    /// The native float type that reinterprets this layout's buffer.
    pub(crate) fn width(&self) -> Width {
        match self.total_bits {
            16 => Width::W16,
            32 => Width::W32,
            _ => Width::W64,
        }
    }
}

// IEEE 754-2019
// Table 3.5 — Binary interchange format parameters.

/// Predefined 16-bit layout with 5 exponent bits, and 10 fraction bits.
pub const BINARY16: Layout = Layout::new(16, 5);
/// Predefined 32-bit layout with 8 exponent bits, and 23 fraction bits.
pub const BINARY32: Layout = Layout::new(32, 8);
/// Predefined 64-bit layout with 11 exponent bits, and 52 fraction bits.
pub const BINARY64: Layout = Layout::new(64, 11);

#[test]
fn test_layout_parameters() {
    assert_eq!(BINARY16.fraction_bits(), 10);
    assert_eq!(BINARY32.fraction_bits(), 23);
    assert_eq!(BINARY64.fraction_bits(), 52);

    assert_eq!(BINARY16.bias(), 15);
    assert_eq!(BINARY32.bias(), 127);
    assert_eq!(BINARY64.bias(), 1023);

    assert_eq!(BINARY16.byte_len(), 2);
    assert_eq!(BINARY32.byte_len(), 4);
    assert_eq!(BINARY64.byte_len(), 8);
}

#[test]
fn test_custom_exponent_width() {
    // A bfloat16-style split still has a well defined bias.
    let layout = Layout::new(16, 8);
    assert_eq!(layout.fraction_bits(), 7);
    assert_eq!(layout.bias(), 127);
}
