use floatbits::{
    bytes_to_hex, decompose, shortest_decimal, Editor, BINARY16, BINARY32,
    BINARY64,
};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Deterministic pseudorandom bit patterns (xorshift*).
fn patterns(count: usize) -> Vec<u64> {
    let mut state: u64 = 0x2545F4914F6CDD1D;
    (0..count)
        .map(|_| {
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            state.wrapping_mul(0x2545F4914F6CDD1D)
        })
        .collect()
}

fn test_shortest_decimal_f64() {
    for bits in patterns(100) {
        black_box(shortest_decimal(BINARY64, f64::from_bits(bits)));
    }
}

fn test_shortest_decimal_f32() {
    for bits in patterns(100) {
        black_box(shortest_decimal(
            BINARY32,
            f32::from_bits(bits as u32) as f64,
        ));
    }
}

fn test_decompose() {
    for bits in patterns(100) {
        black_box(decompose(&bits.to_le_bytes(), BINARY64));
    }
}

fn test_hex_encode() {
    for bits in patterns(100) {
        black_box(bytes_to_hex(&bits.to_be_bytes()));
    }
}

fn test_editor_toggle() {
    let mut editor = Editor::new(BINARY16, std::f64::consts::PI);
    for i in 0..16 {
        editor.toggle_bit(i);
        black_box(editor.decimal_string());
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("shortest_decimal_f64", |b| {
        b.iter(test_shortest_decimal_f64)
    });
    c.bench_function("shortest_decimal_f32", |b| {
        b.iter(test_shortest_decimal_f32)
    });
    c.bench_function("decompose", |b| b.iter(test_decompose));
    c.bench_function("hex_encode", |b| b.iter(test_hex_encode));
    c.bench_function("editor_toggle", |b| b.iter(test_editor_toggle));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
