//! Single-bit access into the raw-bits buffer.
//!
//! Bit index 0 is the sign bit and index `total_bits - 1` is the least
//! significant fraction bit. The buffer itself is stored least-significant
//! byte first, which is where the index arithmetic below comes from.

#[inline]
fn locate(bytes: &[u8], index: usize) -> (usize, u8) {
    let byte_index = bytes.len() - (index >> 3) - 1;
    let mask = 1u8 << (7 - (index & 7));
    (byte_index, mask)
}

/// Returns the bit at `index`.
pub fn get_bit(bytes: &[u8], index: usize) -> u8 {
    let (byte_index, mask) = locate(bytes, index);
    u8::from(bytes[byte_index] & mask != 0)
}

/// Sets the bit at `index` to `value`, leaving every other bit unchanged.
pub fn set_bit(bytes: &mut [u8], index: usize, value: u8) {
    let (byte_index, mask) = locate(bytes, index);
    if value != 0 {
        bytes[byte_index] |= mask;
    } else {
        bytes[byte_index] &= !mask;
    }
}

/// Flips the bit at `index` and returns its new value. A drag gesture keeps
/// the value returned by the initial toggle and paints it over every bit the
/// cursor crosses, rather than toggling each bit independently.
pub fn toggle_bit(bytes: &mut [u8], index: usize) -> u8 {
    let (byte_index, mask) = locate(bytes, index);
    bytes[byte_index] ^= mask;
    u8::from(bytes[byte_index] & mask != 0)
}

#[test]
fn test_bit_indexing() {
    // 1.0f32 = 0x3F800000, stored little-endian.
    let bytes = 0x3F800000u32.to_le_bytes();
    assert_eq!(get_bit(&bytes, 0), 0); // sign
    assert_eq!(get_bit(&bytes, 1), 0); // top exponent bit
    for i in 2..9 {
        assert_eq!(get_bit(&bytes, i), 1, "exponent bit {}", i);
    }
    for i in 9..32 {
        assert_eq!(get_bit(&bytes, i), 0, "fraction bit {}", i);
    }
}

#[test]
fn test_set_bit_is_isolated() {
    let mut bytes = [0u8; 4];
    set_bit(&mut bytes, 0, 1);
    assert_eq!(bytes, 0x80000000u32.to_le_bytes());
    set_bit(&mut bytes, 31, 1);
    assert_eq!(bytes, 0x80000001u32.to_le_bytes());
    set_bit(&mut bytes, 0, 0);
    assert_eq!(bytes, 0x00000001u32.to_le_bytes());

    // Setting an already-set bit is a no-op.
    set_bit(&mut bytes, 31, 1);
    assert_eq!(bytes, 0x00000001u32.to_le_bytes());
}

#[test]
fn test_toggle_symmetry() {
    let mut rng = crate::utils::Rng::new();
    for _ in 0..100 {
        let mut bytes = rng.get64().to_le_bytes();
        let original = bytes;
        for index in [0, 1, 17, 63] {
            let first = toggle_bit(&mut bytes, index);
            let second = toggle_bit(&mut bytes, index);
            assert_eq!(first ^ second, 1);
            assert_eq!(bytes, original);
        }
    }
}
