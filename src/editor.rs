//! The editing facade that ties the codec pieces together.
//!
//! An [`Editor`] owns one raw-bits buffer for one layout and keeps the three
//! derived views of it (hex text, canonical decimal text, decoded fields)
//! consistent across every mutation. The buffer is created once and mutated
//! in place; the derived views are recomputed from scratch after each edit.

use super::bits;
use super::decompose::{classify, decompose, Category, DecodedFields};
use super::hex::{bytes_to_hex, write_hex, HexError};
use super::layout::Layout;
use super::string::shortest_decimal;

/// A bit-level float editor for one layout.
///
/// Edits enter through one of three doors: decimal text, hex text or single
/// bits. Whichever door is used, the buffer is normalized first and every
/// derived view is re-derived from it, so the views can never disagree.
#[derive(Debug, Clone)]
pub struct Editor {
    layout: Layout,
    bytes: Vec<u8>,
    decimal: String,
    hex: String,
    fields: DecodedFields,
}

impl Editor {
    /// Create an editor seeded with `seed`, narrowed to the layout's width.
    pub fn new(layout: Layout, seed: f64) -> Self {
        let mut bytes = vec![0u8; layout.byte_len()];
        layout.width().write(seed, &mut bytes);
        let fields = decompose(&bytes, layout);
        let mut editor = Editor {
            layout,
            bytes,
            decimal: String::new(),
            hex: String::new(),
            fields,
        };
        editor.resync();
        editor
    }

    /// Recompute every derived view from the buffer.
    fn resync(&mut self) {
        self.fields = decompose(&self.bytes, self.layout);
        let display_order: Vec<u8> =
            self.bytes.iter().rev().copied().collect();
        self.hex = bytes_to_hex(&display_order);
        self.decimal = shortest_decimal(self.layout, self.value());
    }

    /// Parse `text` as a decimal number and store it. Unparseable text
    /// coerces to NaN; this is visible feedback, not an error.
    pub fn set_from_decimal(&mut self, text: &str) {
        let value = text.trim().parse::<f64>().unwrap_or(f64::NAN);
        self.layout.width().write(value, &mut self.bytes);
        self.resync();
    }

    /// Decode `text` as big-endian hex into the buffer. A partial string
    /// supplies the leading bytes of the number. On error the edit is
    /// rejected and the state is unchanged.
    pub fn set_from_hex(&mut self, text: &str) -> Result<(), HexError> {
        write_hex(&mut self.bytes, text)?;
        self.resync();
        Ok(())
    }

    /// Flip one bit and return its new value. A drag gesture uses the
    /// returned value as the paint value for [`Editor::set_bits`].
    pub fn toggle_bit(&mut self, index: usize) -> u8 {
        let value = bits::toggle_bit(&mut self.bytes, index);
        self.resync();
        value
    }

    /// Paint `value` over every listed bit. This is the drag gesture: each
    /// bit under the cursor is set to the value captured by the initial
    /// toggle, not toggled independently.
    pub fn set_bits(&mut self, indices: &[usize], value: u8) {
        for &index in indices {
            bits::set_bit(&mut self.bytes, index, value);
        }
        self.resync();
    }

    /// Add `direction` (+1 or -1) to the numeric value of the decimal text
    /// and store the result at the layout's width. The addition reads the
    /// text, not the buffer: a pattern shown as "0.9995" steps through
    /// 1.9995, not through its stored value 0.99951171875.
    pub fn step(&mut self, direction: i32) {
        let current = self.decimal.parse::<f64>().unwrap_or(f64::NAN);
        let next = current + f64::from(direction);
        self.layout.width().write(next, &mut self.bytes);
        self.resync();
    }

    /// The numeric value of the buffer, exact in `f64`.
    pub fn value(&self) -> f64 {
        self.layout.width().read(&self.bytes)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The raw-bits buffer, least-significant byte first.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The big-endian uppercase hex rendering of the buffer.
    pub fn hex_string(&self) -> &str {
        &self.hex
    }

    /// The shortest decimal text that reparses to the buffer's bit pattern.
    pub fn decimal_string(&self) -> &str {
        &self.decimal
    }

    /// The decoded sign/exponent/fraction view.
    pub fn fields(&self) -> DecodedFields {
        self.fields
    }

    /// The IEEE category of the current bit pattern.
    pub fn category(&self) -> Category {
        classify(&self.bytes, self.layout)
    }

    /// Returns the bit at `index`; index 0 is the sign bit.
    pub fn bit(&self, index: usize) -> u8 {
        bits::get_bit(&self.bytes, index)
    }
}

#[cfg(test)]
use super::layout::{BINARY16, BINARY32, BINARY64};

#[test]
fn test_seeded_with_pi() {
    let editor = Editor::new(BINARY32, core::f64::consts::PI);
    assert_eq!(editor.bytes(), &0x40490FDBu32.to_le_bytes()[..]);
    assert_eq!(editor.hex_string(), "40490FDB");
    assert_eq!(editor.decimal_string(), "3.1415927");
    assert_eq!(editor.fields().exponent, 1);
    assert_eq!(editor.category(), Category::Normal);

    let editor = Editor::new(BINARY16, core::f64::consts::PI);
    assert_eq!(editor.hex_string(), "4248");
    assert_eq!(editor.decimal_string(), "3.14");

    let editor = Editor::new(BINARY64, core::f64::consts::PI);
    assert_eq!(editor.decimal_string(), "3.141592653589793");
}

#[test]
fn test_set_from_decimal() {
    let mut editor = Editor::new(BINARY32, 0.0);
    editor.set_from_decimal("1");
    assert_eq!(editor.hex_string(), "3F800000");
    assert_eq!(editor.fields().exponent, 0);
    assert_eq!(editor.fields().fraction_value, 1.0);

    editor.set_from_decimal("-2");
    assert_eq!(editor.hex_string(), "C0000000");
    assert_eq!(editor.fields().sign, 1);

    // Infinity spellings, any case.
    editor.set_from_decimal("inf");
    assert_eq!(editor.decimal_string(), "Infinity");
    editor.set_from_decimal("-INFINITY");
    assert_eq!(editor.decimal_string(), "-Infinity");

    // Unparseable input coerces to NaN instead of failing.
    editor.set_from_decimal("three point one");
    assert_eq!(editor.decimal_string(), "NaN");
    assert_eq!(editor.category(), Category::NaN);
}

#[test]
fn test_set_from_hex() {
    let mut editor = Editor::new(BINARY32, 0.0);
    editor.set_from_hex("40490FDB").unwrap();
    assert_eq!(editor.decimal_string(), "3.1415927");

    // A partial string supplies the leading bytes.
    editor.set_from_hex("3f8").unwrap();
    assert_eq!(editor.hex_string(), "3F800000");
    assert_eq!(editor.value(), 1.0);

    editor.set_from_hex("").unwrap();
    assert_eq!(editor.value(), 0.0);
    assert_eq!(editor.decimal_string(), "0");
}

#[test]
fn test_set_from_hex_rejections() {
    // A 16-bit layout holds 4 hex characters; a fifth is rejected and the
    // state is unchanged.
    let mut editor = Editor::new(BINARY16, core::f64::consts::PI);
    assert_eq!(editor.set_from_hex("42480"), Err(HexError::TooLong));
    assert_eq!(editor.hex_string(), "4248");
    assert_eq!(editor.decimal_string(), "3.14");

    assert_eq!(editor.set_from_hex("42g8"), Err(HexError::InvalidHex));
    assert_eq!(editor.hex_string(), "4248");
}

#[test]
fn test_toggle_sign_bit() {
    let mut editor = Editor::new(BINARY32, core::f64::consts::PI);
    assert_eq!(editor.toggle_bit(0), 1);
    assert_eq!(editor.decimal_string(), "-3.1415927");
    assert_eq!(editor.hex_string(), "C0490FDB");
    assert_eq!(editor.fields().sign, 1);

    assert_eq!(editor.toggle_bit(0), 0);
    assert_eq!(editor.decimal_string(), "3.1415927");
    assert_eq!(editor.hex_string(), "40490FDB");
}

#[test]
fn test_drag_paints_captured_value() {
    let mut editor = Editor::new(BINARY32, 0.0);

    // Press on a clear bit: the paint value is one.
    let paint = editor.toggle_bit(9);
    assert_eq!(paint, 1);

    // Dragging across bits 10..13 sets them all, even ones already set.
    editor.set_bits(&[10, 11, 12], paint);
    editor.set_bits(&[12, 13], paint);
    for index in 9..14 {
        assert_eq!(editor.bit(index), 1);
    }

    // A second gesture starting on a set bit paints zeros.
    let paint = editor.toggle_bit(9);
    assert_eq!(paint, 0);
    editor.set_bits(&[10, 11, 12, 13], paint);
    assert_eq!(editor.value(), 0.0);
}

#[test]
fn test_step() {
    let mut editor = Editor::new(BINARY32, core::f64::consts::PI);
    editor.step(1);
    assert_eq!(editor.hex_string(), "408487ED");
    assert_eq!(editor.decimal_string(), "4.1415925");

    // Stepping is not invertible: the decimal text carries less precision
    // than the buffer, so stepping back lands on a neighboring pattern.
    editor.step(-1);
    assert_eq!(editor.hex_string(), "40490FDA");
    assert_eq!(editor.decimal_string(), "3.1415925");

    // Stepping at the top of the binary16 range is absorbed by rounding.
    let mut editor = Editor::new(BINARY16, 65504.0);
    editor.step(1);
    assert_eq!(editor.decimal_string(), "65504");
}

#[test]
fn test_step_reads_decimal_text() {
    // 0x3BFF shows as "0.9995" but stores 0.99951171875. Stepping works on
    // the text: 1.9995 rounds down to 0x3FFF ("1.999"). Adding one to the
    // buffer value instead would hit the 1.99951171875 halfway point and
    // round to even, landing on 2.
    let mut editor = Editor::new(BINARY16, 0.0);
    editor.set_from_hex("3BFF").unwrap();
    assert_eq!(editor.decimal_string(), "0.9995");
    editor.step(1);
    assert_eq!(editor.hex_string(), "3FFF");
    assert_eq!(editor.decimal_string(), "1.999");
}

#[test]
fn test_negative_zero_round_trip() {
    let mut editor = Editor::new(BINARY64, 0.0);
    assert_eq!(editor.decimal_string(), "0");
    editor.toggle_bit(0);
    assert_eq!(editor.decimal_string(), "-0");
    assert_eq!(editor.hex_string(), "8000000000000000");
    assert_eq!(editor.category(), Category::Zero);

    // Feeding the canonical text back reproduces the pattern.
    editor.set_from_decimal("-0");
    assert_eq!(editor.hex_string(), "8000000000000000");
}

#[test]
fn test_views_stay_consistent() {
    let mut rng = crate::utils::Rng::new();
    let mut editor = Editor::new(BINARY16, 0.0);
    for _ in 0..200 {
        let index = (rng.get64() % 16) as usize;
        editor.toggle_bit(index);

        let display_order: Vec<u8> =
            editor.bytes().iter().rev().copied().collect();
        assert_eq!(editor.hex_string(), bytes_to_hex(&display_order));
        assert_eq!(
            editor.decimal_string(),
            shortest_decimal(editor.layout(), editor.value())
        );
    }
}

#[test]
fn test_nan_keeps_payload_until_rewritten() {
    // Toggling bits into a NaN payload keeps the payload in the hex view;
    // only a decimal store canonicalizes it.
    let mut editor = Editor::new(BINARY32, 0.0);
    editor.set_from_hex("7FC00001").unwrap();
    assert_eq!(editor.decimal_string(), "NaN");
    assert_eq!(editor.hex_string(), "7FC00001");

    editor.set_from_decimal("NaN");
    assert_eq!(editor.hex_string(), "7FC00000");
}
