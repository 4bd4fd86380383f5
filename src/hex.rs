//! The hex codec for the raw-bits buffer.
//!
//! Hex strings read the way a human reads a number: most significant byte
//! first. The raw-bits buffer is stored least-significant byte first, so the
//! editor reverses the buffer on the way in and out of this module.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// The ways a hex edit can be rejected. Both are recoverable: the caller
/// keeps the previous buffer contents and reverts the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// The text contains a character outside `[0-9a-fA-F]`.
    InvalidHex,
    /// The text is longer than two digits per buffer byte.
    TooLong,
}

impl Error for HexError {}

impl Display for HexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HexError::InvalidHex => {
                f.write_str("input contains a non-hexadecimal character")
            }
            HexError::TooLong => {
                f.write_str("input is longer than the buffer it encodes")
            }
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode `bytes` as uppercase hex, two digits per byte, in the given order.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        text.push(HEX_DIGITS[(b >> 4) as usize] as char);
        text.push(HEX_DIGITS[(b & 0xF) as usize] as char);
    }
    text
}

/// Decode a hex string into bytes, in the given order. An odd-length input
/// is right-padded with one '0' nibble before decoding, so "404" decodes to
/// [0x40, 0x40].
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>, HexError> {
    if !text.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidHex);
    }

    let mut nibbles: Vec<u8> = text
        .bytes()
        .map(|c| match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => c - b'A' + 10,
        })
        .collect();
    if nibbles.len() % 2 == 1 {
        nibbles.push(0);
    }

    Ok(nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Decode `text` into the raw-bits buffer. The decoded bytes are reversed
/// into storage order and placed at the top of the buffer, so a partial hex
/// string supplies the leading (most significant) bytes and the rest of the
/// number reads as zero. On error the buffer is left untouched.
pub fn write_hex(bytes: &mut [u8], text: &str) -> Result<(), HexError> {
    if text.len() > bytes.len() * 2 {
        return Err(HexError::TooLong);
    }
    let decoded = hex_to_bytes(text)?;

    bytes.fill(0);
    let start = bytes.len() - decoded.len();
    for (slot, b) in bytes[start..].iter_mut().zip(decoded.iter().rev()) {
        *slot = *b;
    }
    Ok(())
}

#[test]
fn test_hex_encoding() {
    assert_eq!(bytes_to_hex(&[]), "");
    assert_eq!(bytes_to_hex(&[0x40, 0x49, 0x0F, 0xDB]), "40490FDB");
    assert_eq!(bytes_to_hex(&[0x00, 0x01]), "0001");
}

#[test]
fn test_hex_decoding() {
    assert_eq!(hex_to_bytes("40490fdb").unwrap(), [0x40, 0x49, 0x0F, 0xDB]);
    assert_eq!(hex_to_bytes("40490FDB").unwrap(), [0x40, 0x49, 0x0F, 0xDB]);
    assert!(hex_to_bytes("").unwrap().is_empty());

    // The odd-length quirk: the missing nibble is a trailing zero.
    assert_eq!(hex_to_bytes("404").unwrap(), [0x40, 0x40]);
    assert_eq!(hex_to_bytes("4").unwrap(), [0x40]);

    assert_eq!(hex_to_bytes("40g0"), Err(HexError::InvalidHex));
    assert_eq!(hex_to_bytes("0x40"), Err(HexError::InvalidHex));
    assert_eq!(hex_to_bytes(" 40"), Err(HexError::InvalidHex));
}

#[test]
fn test_hex_round_trip() {
    let patterns: [&[u8]; 4] = [
        &[0x00, 0x00],
        &[0x7F, 0xC0, 0x00, 0x00],
        &[0x40, 0x49, 0x0F, 0xDB],
        &[0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA, 0x99, 0x88],
    ];
    for b in patterns {
        assert_eq!(hex_to_bytes(&bytes_to_hex(b)).unwrap(), b);
    }
}

#[test]
fn test_write_hex_fills_from_the_top() {
    // Storage is least-significant byte first; typing "40" into a 32-bit
    // buffer produces the number 0x40000000.
    let mut buf = [0xAAu8; 4];
    write_hex(&mut buf, "40").unwrap();
    assert_eq!(buf, [0x00, 0x00, 0x00, 0x40]);

    write_hex(&mut buf, "4049").unwrap();
    assert_eq!(buf, [0x00, 0x00, 0x49, 0x40]);

    write_hex(&mut buf, "40490FDB").unwrap();
    assert_eq!(buf, [0xDB, 0x0F, 0x49, 0x40]);

    write_hex(&mut buf, "").unwrap();
    assert_eq!(buf, [0x00; 4]);
}

#[test]
fn test_write_hex_rejections_leave_buffer_untouched() {
    let mut buf = [0xDB, 0x0F, 0x49, 0x40];
    assert_eq!(write_hex(&mut buf, "123456789"), Err(HexError::TooLong));
    assert_eq!(buf, [0xDB, 0x0F, 0x49, 0x40]);

    assert_eq!(write_hex(&mut buf, "40z9"), Err(HexError::InvalidHex));
    assert_eq!(buf, [0xDB, 0x0F, 0x49, 0x40]);
}
