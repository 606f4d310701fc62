//! Helpers shared by test modules.

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, so property-style tests replay the same cases every run.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Generate a random float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

#[test]
fn rng_deterministic() {
    let mut rng1 = Rng::new(42);
    let mut rng2 = Rng::new(42);
    for _ in 0..10 {
        assert_eq!(rng1.next_int(1000), rng2.next_int(1000));
    }
}

#[test]
fn rng_float_in_unit_range() {
    let mut rng = Rng::new(0);
    for _ in 0..1000 {
        let f = rng.next_f32();
        assert!((0.0..1.0).contains(&f));
    }
}
