//! The shortest round-trip decimal formatter.
//!
//! The canonical decimal text of a bit pattern is the shortest string that,
//! parsed back at the same storage width, reproduces the pattern exactly.
//! The algorithm is a progressive minimizer: starting from the default
//! decimal conversion it keeps removing the last fraction digit, first by
//! truncating and then by rounding the truncated text up, for as long as the
//! shortened text still reparses to the same value. It is not guaranteed to
//! find a globally minimal string, and the tests pin its actual outputs.

use super::layout::Layout;

/// Render `value` at `layout`'s storage width as the shortest decimal text
/// that reparses to the same bit pattern. The specials are returned
/// verbatim: "NaN", "Infinity", "-Infinity" and "-0".
pub fn shortest_decimal(layout: Layout, value: f64) -> String {
    let width = layout.width();
    let value = width.narrow(value);

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 && value.is_sign_negative() {
        return "-0".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }

    // The default conversion. `f64` Display is already a shortest-f64
    // round-trip conversion and never uses scientific notation.
    let full = value.to_string();
    let (whole, mut fraction, suffix) = split_decimal(&full);
    let mut text = full.clone();

    // Remove digits one by one until the number changes.
    while !fraction.is_empty() {
        // Try truncating.
        let truncated = &fraction[..fraction.len() - 1];
        let candidate = join_decimal(whole, truncated, suffix);
        if width.parse(&candidate) == value {
            fraction = truncated.to_string();
            text = candidate;
            continue;
        }

        // Try rounding the truncated text up instead.
        let rounded = round_up_last_digit(truncated);
        let candidate = join_decimal(whole, &rounded, suffix);
        if width.parse(&candidate) == value {
            fraction = rounded;
            text = candidate;
            continue;
        }

        // Both candidates changed the value; the previous text is final.
        break;
    }

    text
}

/// Split a decimal text into its whole part, fraction digits (without the
/// point) and scientific-notation suffix (with the 'e').
fn split_decimal(text: &str) -> (&str, String, &str) {
    let (body, suffix) = match text.find(|c| c == 'e' || c == 'E') {
        Some(idx) => text.split_at(idx),
        None => (text, ""),
    };
    match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction.to_string(), suffix),
        None => (body, String::new(), suffix),
    }
}

fn join_decimal(whole: &str, fraction: &str, suffix: &str) -> String {
    if fraction.is_empty() {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, fraction, suffix)
    }
}

/// Increment the last fraction digit, carrying through nines. A carry that
/// runs off the front of the fraction wraps the leading digit modulo 10 and
/// is dropped; it never extends into the whole part.
fn round_up_last_digit(fraction: &str) -> String {
    let mut digits: Vec<u8> = fraction.bytes().collect();
    let mut i = digits.len();
    while i > 0 {
        i -= 1;
        let digit = digits[i] - b'0';
        digits[i] = (digit + 1) % 10 + b'0';
        if digit < 9 {
            break;
        }
    }
    // The digits came from a valid decimal text.
    String::from_utf8(digits).unwrap_or_default()
}

#[test]
fn test_specials() {
    for layout in [crate::BINARY16, crate::BINARY32, crate::BINARY64] {
        assert_eq!(shortest_decimal(layout, f64::NAN), "NaN");
        assert_eq!(shortest_decimal(layout, f64::INFINITY), "Infinity");
        assert_eq!(shortest_decimal(layout, f64::NEG_INFINITY), "-Infinity");
        assert_eq!(shortest_decimal(layout, -0.0), "-0");
        assert_eq!(shortest_decimal(layout, 0.0), "0");
    }
    // Overflow of the narrower widths is an infinity at that width.
    assert_eq!(shortest_decimal(crate::BINARY16, 1e6), "Infinity");
    assert_eq!(shortest_decimal(crate::BINARY32, -1e39), "-Infinity");
}

#[test]
fn test_known_values() {
    use core::f64::consts::PI;
    assert_eq!(shortest_decimal(crate::BINARY64, PI), "3.141592653589793");
    assert_eq!(shortest_decimal(crate::BINARY32, PI), "3.1415927");
    assert_eq!(shortest_decimal(crate::BINARY16, PI), "3.14");

    assert_eq!(shortest_decimal(crate::BINARY64, 0.1), "0.1");
    assert_eq!(shortest_decimal(crate::BINARY32, 0.1), "0.1");
    assert_eq!(shortest_decimal(crate::BINARY16, 0.1), "0.1");

    assert_eq!(shortest_decimal(crate::BINARY32, 1.0), "1");
    assert_eq!(shortest_decimal(crate::BINARY16, 65504.0), "65504");
    assert_eq!(shortest_decimal(crate::BINARY32, 1.0 / 3.0), "0.33333334");
}

#[test]
fn test_pi_reparse_and_length() {
    // Seeding the 32-bit layout with pi must produce a text that reparses to
    // 0x40490FDB exactly, no longer than the default conversion.
    let exact = f32::from_bits(0x40490FDB) as f64;
    let text = shortest_decimal(crate::BINARY32, exact);
    assert_eq!((text.parse::<f64>().unwrap() as f32).to_bits(), 0x40490FDB);
    assert!(text.len() <= exact.to_string().len());
}

#[test]
fn test_idempotent() {
    let values = [
        core::f64::consts::PI,
        0.1,
        1.0 / 3.0,
        65504.0,
        1.401298464324817e-45,
        -2.5,
    ];
    for layout in [crate::BINARY16, crate::BINARY32, crate::BINARY64] {
        for v in values {
            let once = shortest_decimal(layout, v);
            let twice =
                shortest_decimal(layout, once.parse::<f64>().unwrap_or(f64::NAN));
            assert_eq!(once, twice, "layout {:?} value {}", layout, v);
        }
    }
}

#[test]
fn test_subnormal_output() {
    // The smallest positive 32-bit subnormal trims to a single significant
    // digit 45 places down.
    let min_sub = f32::from_bits(1) as f64;
    let text = shortest_decimal(crate::BINARY32, min_sub);
    assert_eq!(text, format!("0.{}1", "0".repeat(44)));
    assert_eq!((text.parse::<f64>().unwrap() as f32).to_bits(), 1);

    // And the smallest binary16 subnormal.
    let text = shortest_decimal(crate::BINARY16, 2f64.powi(-24));
    assert_eq!(text, "0.00000005");
}

#[test]
fn test_full_carry_is_dropped() {
    // 0x3BFF is 0.99951171875. Trimming reaches "0.9995"; the next
    // truncation produces "0.999", whose rounding candidate carries through
    // every remaining nine and wraps to "0.00" without touching the whole
    // part. Both candidates fail to reparse, so "0.9995" is final. The
    // wrap-and-drop behavior is intentional and must not be "fixed".
    let value = crate::native::f16_to_f64(0x3BFF);
    assert_eq!(shortest_decimal(crate::BINARY16, value), "0.9995");
    assert_eq!(round_up_last_digit("999"), "000");
    assert_eq!(round_up_last_digit("89"), "90");
    assert_eq!(round_up_last_digit("28"), "29");
    assert_eq!(round_up_last_digit(""), "");
}

#[test]
fn test_round_trip_random_patterns() {
    // Property: for every bit pattern, reparsing the shortest decimal at the
    // same width reproduces the pattern (NaN excepted: any NaN renders as
    // "NaN").
    let mut rng = crate::utils::Rng::new();

    for _ in 0..500 {
        let bits = rng.get64() as u16;
        let value = crate::native::f16_to_f64(bits);
        let text = shortest_decimal(crate::BINARY16, value);
        if value.is_nan() {
            assert_eq!(text, "NaN");
            continue;
        }
        let reparsed =
            crate::native::f64_to_f16(text.parse::<f64>().unwrap_or(f64::NAN));
        assert_eq!(reparsed, bits, "pattern {:#06X} text {}", bits, text);
    }

    for _ in 0..500 {
        let bits = rng.get64() as u32;
        let value = f32::from_bits(bits) as f64;
        let text = shortest_decimal(crate::BINARY32, value);
        if value.is_nan() {
            assert_eq!(text, "NaN");
            continue;
        }
        let reparsed = text.parse::<f64>().unwrap_or(f64::NAN) as f32;
        assert_eq!(reparsed.to_bits(), bits, "pattern {:#010X}", bits);
    }

    for _ in 0..500 {
        let bits = rng.get64();
        let value = f64::from_bits(bits);
        let text = shortest_decimal(crate::BINARY64, value);
        if value.is_nan() {
            assert_eq!(text, "NaN");
            continue;
        }
        let reparsed = text.parse::<f64>().unwrap_or(f64::NAN);
        assert_eq!(reparsed.to_bits(), bits, "pattern {:#018X}", bits);
    }
}

#[test]
fn test_round_trip_special_values() {
    for v in crate::utils::get_special_test_values() {
        for layout in [crate::BINARY16, crate::BINARY32, crate::BINARY64] {
            let text = shortest_decimal(layout, v);
            if v.is_nan() {
                assert_eq!(text, "NaN");
                continue;
            }
            let narrowed = layout.width().narrow(v);
            let reparsed = layout.width().parse(&text);
            assert_eq!(
                reparsed.to_bits(),
                narrowed.to_bits(),
                "layout {:?} value {}",
                layout,
                v
            );
        }
    }
}
