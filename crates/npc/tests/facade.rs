#![cfg(feature = "full")]

use npc::brain::Brain;
use npc::core::{
    ActorId, CombatWorld, MovementWorld, NpcConfig, PerceptionWorld, StateKind, TickContext, Vec2,
    WorldView,
};

struct Still;

impl WorldView for Still {
    fn is_valid(&self, actor: ActorId) -> bool {
        actor == ActorId(1)
    }

    fn position(&self, actor: ActorId) -> Option<Vec2> {
        (actor == ActorId(1)).then_some(Vec2::ZERO)
    }
}

impl MovementWorld for Still {
    fn set_desired_velocity(&mut self, _agent: ActorId, _velocity: Vec2) {}

    fn stop(&mut self, _agent: ActorId) {}
}

impl CombatWorld for Still {
    fn can_attack(&self, _agent: ActorId, _target: ActorId) -> bool {
        false
    }

    fn is_in_range(&self, _agent: ActorId, _target: ActorId) -> bool {
        false
    }

    fn attack_range(&self, _agent: ActorId) -> f32 {
        30.0
    }

    fn attack_enter_range(&self, _agent: ActorId) -> f32 {
        24.0
    }

    fn do_attack(&mut self, _agent: ActorId, _target: ActorId) {}
}

impl PerceptionWorld for Still {}

#[test]
fn facade_exposes_a_working_brain() {
    let mut brain: Brain<Still> = Brain::new(ActorId(1), Vec2::ZERO, NpcConfig::default(), 0);
    let ctx = TickContext::new(0, 0.1, 0);
    brain.start(&ctx, &mut Still);
    assert_eq!(brain.current_state(), Some(StateKind::Patrol));
    brain.tick(&ctx, &mut Still);
    assert_eq!(brain.current_state(), Some(StateKind::Patrol));
}

#[cfg(feature = "serde")]
#[test]
fn config_roundtrips_through_facade() {
    let config = NpcConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: NpcConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
