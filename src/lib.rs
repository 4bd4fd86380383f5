//! Bit-level inspection and editing of IEEE-754 floating point values.
//!
//! A [`Layout`] describes a storage format (one sign bit, a configurable
//! exponent field, the rest fraction) at one of the 16/32/64-bit widths. An
//! [`Editor`] owns the raw bits of one value in that format and accepts
//! edits through decimal text, hex text or individual bits, keeping every
//! representation consistent:
//!
//! ```
//! use floatbits::{Editor, BINARY32};
//!
//! let mut editor = Editor::new(BINARY32, std::f64::consts::PI);
//! assert_eq!(editor.hex_string(), "40490FDB");
//! assert_eq!(editor.decimal_string(), "3.1415927");
//!
//! editor.toggle_bit(0);
//! assert_eq!(editor.decimal_string(), "-3.1415927");
//! ```
//!
//! The decimal text is the shortest string that reparses to the exact bit
//! pattern at the value's own width, so `0.1` renders as "0.1" in every
//! format even though none of them stores one tenth exactly.

mod bits;
mod decompose;
mod editor;
mod hex;
mod layout;
mod native;
mod string;
#[cfg(test)]
mod utils;

pub use self::bits::{get_bit, set_bit, toggle_bit};
pub use self::decompose::{classify, decompose, Category, DecodedFields};
pub use self::editor::Editor;
pub use self::hex::{bytes_to_hex, hex_to_bytes, HexError};
pub use self::layout::{Layout, BINARY16, BINARY32, BINARY64};
pub use self::string::shortest_decimal;
