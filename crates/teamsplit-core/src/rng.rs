// Deterministic 32-bit pseudorandom generator (mulberry32).
//
// The whole generator is one u32 of state owned by the caller, so concurrent
// runs never share randomness. Seeds are any integer, reduced mod 2^32.

use rand::Rng;

/// Upper bound (exclusive) for generated seeds.
const GENERATED_SEED_LIMIT: i64 = 1_000_000_000;

/// Seeded generator returning values in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Only the low 32 bits of `seed` are used, so `-5` and `2^32 - 5`
    /// give the same stream.
    pub fn new(seed: i64) -> Self {
        SeededRng { state: seed as u32 }
    }

    /// Advance the state and return the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64).floor() as usize
    }
}

/// Pick a fresh seed for runs that were not given one.
pub fn generate_seed() -> i64 {
    rand::thread_rng().gen_range(0..GENERATED_SEED_LIMIT)
}
