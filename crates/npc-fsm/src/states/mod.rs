//! The five behavior states and the standard registry built from an [`NpcConfig`].

mod attack;
mod chase;
mod investigate;
mod patrol;
mod return_home;

pub use attack::{AttackPhase, AttackState};
pub use chase::ChaseState;
pub use investigate::InvestigateState;
pub use patrol::PatrolState;
pub use return_home::ReturnHomeState;

use npc_core::rng::derive_seed;
use npc_core::{ActorId, NpcConfig, NpcWorld, SplitMix64, Vec2};

use crate::NpcState;

/// RNG stream for patrol point and dwell draws.
pub const PATROL_STREAM: u64 = 0x5041_5452;
/// RNG stream for attack orbit direction.
pub const ATTACK_STREAM: u64 = 0x4154_4b00;

/// One instance of every state, each with its own seeded generator.
pub fn standard_states<W>(
    agent: ActorId,
    home: Vec2,
    config: &NpcConfig,
    seed: u64,
) -> Vec<Box<dyn NpcState<W>>>
where
    W: NpcWorld + 'static,
{
    let patrol_rng = SplitMix64::new(derive_seed(seed, agent.stable_id(), PATROL_STREAM));
    let attack_rng = SplitMix64::new(derive_seed(seed, agent.stable_id(), ATTACK_STREAM));
    vec![
        Box::new(PatrolState::new(home, config.patrol, config.movement.walk_speed, patrol_rng)),
        Box::new(InvestigateState::new(config.investigate, config.movement.walk_speed)),
        Box::new(ChaseState::new(config.chase, config.movement.run_speed)),
        Box::new(AttackState::new(config.attack, config.movement.walk_speed, attack_rng)),
        Box::new(ReturnHomeState::new(home, config.return_home, config.movement.walk_speed)),
    ]
}
