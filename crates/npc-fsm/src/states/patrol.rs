use npc_core::rng::point_in_radius;
use npc_core::{
    ActorId, Blackboard, DeterministicRng, NpcWorld, PatrolConfig, SplitMix64, StateKind,
    TickContext, Vec2,
};

use crate::steering::seek;
use crate::NpcState;

/// Wander between random points around home, idling for a random dwell at each.
#[derive(Debug, Clone)]
pub struct PatrolState {
    home: Vec2,
    config: PatrolConfig,
    walk_speed: f32,
    rng: SplitMix64,
    point: Option<Vec2>,
    idle_timer: f32,
    moving: bool,
}

impl PatrolState {
    pub fn new(home: Vec2, config: PatrolConfig, walk_speed: f32, rng: SplitMix64) -> Self {
        Self {
            home,
            config,
            walk_speed,
            rng,
            point: None,
            idle_timer: 0.0,
            moving: false,
        }
    }

    /// Current patrol destination, if one is picked.
    pub fn point(&self) -> Option<Vec2> {
        self.point
    }

    pub fn idle_remaining(&self) -> f32 {
        self.idle_timer
    }

    fn halt<W: NpcWorld>(&mut self, agent: ActorId, world: &mut W) {
        world.stop(agent);
        self.moving = false;
    }
}

impl<W> NpcState<W> for PatrolState
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind {
        StateKind::Patrol
    }

    fn enter(&mut self, _ctx: &TickContext, _agent: ActorId, _world: &mut W, bb: &mut Blackboard) {
        bb.is_chasing = false;
        bb.is_attacking = false;
        bb.in_combat = false;
    }

    fn exit(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, _bb: &mut Blackboard) {
        if self.moving {
            self.halt(agent, world);
        }
    }

    fn tick(&mut self, ctx: &TickContext, agent: ActorId, world: &mut W, _bb: &mut Blackboard) {
        if self.idle_timer > 0.0 {
            self.idle_timer = (self.idle_timer - ctx.dt()).max(0.0);
            self.halt(agent, world);
            return;
        }

        let Some(pos) = world.position(agent) else {
            self.halt(agent, world);
            return;
        };

        let point = match self.point {
            Some(p) => p,
            None => {
                let p = point_in_radius(&mut self.rng, self.home, self.config.radius);
                self.point = Some(p);
                p
            }
        };

        if pos.distance(point) <= self.config.stop_distance {
            self.point = None;
            self.idle_timer = self
                .rng
                .next_f32_range(self.config.idle_min_secs, self.config.idle_max_secs);
            self.halt(agent, world);
            return;
        }

        world.set_desired_velocity(agent, seek(pos, point) * self.walk_speed);
        self.moving = true;
    }
}
