//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible match execution. Uses a simple but
//! effective xorshift algorithm.

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence. Every match draws from
/// its own stream, so matches stay independently reproducible regardless of
/// the order they execute in.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a tournament seed and a stream index.
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut state = seed ^ 0x9e3779b97f4a7c15;
        state ^= stream.wrapping_mul(0x517cc1b727220a95);
        if state == 0 {
            state = 0x4d595df4d0f33173;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}
