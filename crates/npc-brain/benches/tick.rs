use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use npc_brain::{tick_brains, Brain};
use npc_core::{
    ActorId, CombatWorld, MovementWorld, NpcConfig, PerceptionEvent, PerceptionWorld, TickContext,
    Vec2, WorldView,
};

const PLAYER: ActorId = ActorId(0);

#[derive(Default)]
struct World {
    positions: BTreeMap<ActorId, Vec2>,
    velocities: BTreeMap<ActorId, Vec2>,
}

impl World {
    fn step(&mut self, dt: f32) {
        for (id, v) in &self.velocities {
            if let Some(p) = self.positions.get_mut(id) {
                *p += *v * dt;
            }
        }
    }
}

impl WorldView for World {
    fn is_valid(&self, actor: ActorId) -> bool {
        self.positions.contains_key(&actor)
    }

    fn position(&self, actor: ActorId) -> Option<Vec2> {
        self.positions.get(&actor).copied()
    }

    fn velocity(&self, actor: ActorId) -> Vec2 {
        self.velocities.get(&actor).copied().unwrap_or_default()
    }
}

impl MovementWorld for World {
    fn set_desired_velocity(&mut self, agent: ActorId, velocity: Vec2) {
        self.velocities.insert(agent, velocity);
    }

    fn stop(&mut self, agent: ActorId) {
        self.velocities.insert(agent, Vec2::ZERO);
    }
}

impl CombatWorld for World {
    fn can_attack(&self, _agent: ActorId, _target: ActorId) -> bool {
        true
    }

    fn is_in_range(&self, agent: ActorId, target: ActorId) -> bool {
        match (self.position(agent), self.position(target)) {
            (Some(a), Some(b)) => a.distance(b) <= 30.0,
            _ => false,
        }
    }

    fn attack_range(&self, _agent: ActorId) -> f32 {
        30.0
    }

    fn attack_enter_range(&self, _agent: ActorId) -> f32 {
        24.0
    }

    fn do_attack(&mut self, _agent: ActorId, _target: ActorId) {}
}

impl PerceptionWorld for World {}

fn bench_tick_brains(c: &mut Criterion) {
    let mut world = World::default();
    world.positions.insert(PLAYER, Vec2::new(50.0, 50.0));

    let mut brains: Vec<Brain<World>> = (1..=64u64)
        .map(|id| {
            let home = Vec2::new((id % 8) as f32 * 40.0, (id / 8) as f32 * 40.0);
            world.positions.insert(ActorId(id), home);
            Brain::new(ActorId(id), home, NpcConfig::default(), 3)
        })
        .collect();
    let start = TickContext::new(0, 0.1, 3);
    for brain in &mut brains {
        brain.start(&start, &mut world);
    }

    let mut tick: u64 = 0;
    c.bench_function("npc-brain/tick_brains(agents=64)", |b| {
        b.iter(|| {
            let ctx = TickContext::new(tick, 0.1, 3);
            if tick % 10 == 0 {
                let seen = world.positions[&PLAYER];
                for brain in brains.iter_mut().step_by(4) {
                    brain.perceive(PerceptionEvent::seen(PLAYER, seen, 0.8));
                }
            }
            tick_brains(&ctx, &mut world, &mut brains);
            world.step(0.1);
            black_box(brains[0].current_state());
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_tick_brains);
criterion_main!(benches);
