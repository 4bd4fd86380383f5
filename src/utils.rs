//! This file contains test helpers shared by the module tests.

/// Values that tend to catch edge cases: specials, subnormals, exact powers
/// of two and values near the binary16 overflow threshold.
pub fn get_special_test_values() -> [f64; 20] {
    [
        f64::NAN,
        -f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        0.0,
        -0.0,
        f64::MIN,
        f64::MAX,
        f64::EPSILON,
        std::f64::consts::PI,
        std::f64::consts::E,
        0.1,
        0.3,
        -0.00001,
        65504.0,   // largest finite binary16
        65520.0,   // ties to binary16 infinity
        6.103515625e-5,  // smallest normal binary16
        1.401298464324817e-45, // smallest subnormal binary32
        -2.0,
        10.0,
    ]
}

// Pseudorandom bit patterns for the property tests. An xorshift* generator
// is plenty: we only need deterministic, well spread 64-bit patterns.
pub struct Rng {
    state: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng {
    pub fn new() -> Rng {
        Rng {
            state: 0x2545F4914F6CDD1D,
        }
    }

    pub fn get64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }
}

#[test]
fn test_generator_balance() {
    let mut rng = Rng::new();

    // Count the number of bits, and the number of 1s.
    let mut bits = 0;
    let mut ones = 0;
    for _ in 0..10000 {
        let mut u = rng.get64();
        for _ in 0..64 {
            bits += 1;
            ones += u & 1;
            u >>= 1;
        }
    }
    // Make sure that we have around 50% ones and 50% zeros.
    assert!((ones as f64) < (0.55 * bits as f64));
    assert!((ones as f64) > (0.45 * bits as f64));
}

#[test]
fn test_generator_does_not_repeat_quickly() {
    let mut rng = Rng::new();
    let first = rng.get64();
    for _ in 0..30000 {
        assert_ne!(first, rng.get64());
    }
}
