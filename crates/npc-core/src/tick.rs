use crate::{rng, ActorId, SplitMix64};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    /// Frame delta with negative or non-finite values treated as a zero-length step.
    pub fn dt(&self) -> f32 {
        if self.dt_seconds.is_finite() && self.dt_seconds > 0.0 {
            self.dt_seconds
        } else {
            0.0
        }
    }

    pub fn rng_for_agent(&self, agent: ActorId, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
