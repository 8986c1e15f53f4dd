//! Deterministic RNG helpers.
//!
//! Behavior states never reach for a global generator: each one is handed its own seeded stream
//! so a scenario replays identically. This is **not** cryptographic.

use crate::Vec2;

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Uniform in `[0, 1)`, built from the top 24 bits.
    fn next_f32_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[lo, hi)`; returns `lo` when the range is empty or inverted.
    fn next_f32_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f32_unit()
    }

    fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    /// `1.0` or `-1.0`.
    fn next_sign(&mut self) -> f32 {
        if self.next_bool() {
            1.0
        } else {
            -1.0
        }
    }
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64. Small, fast, and stable across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

/// The SplitMix64 output finalizer.
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Seed for one agent's named stream, so states never share a sequence.
pub fn derive_seed(global_seed: u64, agent: u64, stream: u64) -> u64 {
    mix64(global_seed ^ mix64(agent.wrapping_add(GOLDEN_GAMMA)) ^ mix64(stream))
}

/// Area-uniform random point inside a circle.
pub fn point_in_radius<R: DeterministicRng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let angle = rng.next_f32_unit() * core::f32::consts::TAU;
    let r = radius.max(0.0) * rng.next_f32_unit().sqrt();
    center + Vec2::from_angle(angle) * r
}
