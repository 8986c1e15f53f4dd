use npc_core::{ActorId, Blackboard, ChaseConfig, NpcWorld, StateKind, TickContext, Vec2};

use crate::steering::arrive;
use crate::NpcState;

/// Pursue the locked target, leading it by its estimated velocity.
///
/// Stop and go use different thresholds: a moving agent stops once the predicted position is
/// within `stop_enter`, a stationary one only starts again beyond `stop_exit`.
#[derive(Debug, Clone)]
pub struct ChaseState {
    config: ChaseConfig,
    run_speed: f32,
    sample: Option<(ActorId, Vec2)>,
    target_velocity: Vec2,
    moving: bool,
}

impl ChaseState {
    pub fn new(config: ChaseConfig, run_speed: f32) -> Self {
        Self {
            config,
            run_speed,
            sample: None,
            target_velocity: Vec2::ZERO,
            moving: false,
        }
    }

    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    fn halt<W: NpcWorld>(&mut self, agent: ActorId, world: &mut W) {
        world.stop(agent);
        self.moving = false;
    }

    fn observe(&mut self, target: ActorId, current: Vec2, dt: f32) {
        match self.sample {
            Some((id, last)) if id == target => {
                if dt > 0.0 {
                    self.target_velocity = (current - last) / dt;
                }
            }
            _ => self.target_velocity = Vec2::ZERO,
        }
        self.sample = Some((target, current));
    }
}

impl<W> NpcState<W> for ChaseState
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind {
        StateKind::Chase
    }

    fn enter(&mut self, _ctx: &TickContext, _agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        bb.is_chasing = true;
        bb.is_attacking = false;
        bb.in_combat = true;

        self.target_velocity = Vec2::ZERO;
        self.sample = bb
            .valid_target(world)
            .and_then(|t| world.position(t).map(|p| (t, p)));
    }

    fn exit(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        bb.is_chasing = false;
        if self.moving {
            self.halt(agent, world);
        }
    }

    fn tick(&mut self, ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        let dt = ctx.dt();
        let Some(pos) = world.position(agent) else {
            self.halt(agent, world);
            return;
        };

        let target = bb
            .valid_target(world)
            .and_then(|t| world.position(t).map(|p| (t, p)));

        let Some((target, current)) = target else {
            self.sample = None;
            if bb.has_last_known_position && bb.lose_sight_timer > 0.0 {
                let v = arrive(pos, bb.last_known_position, self.run_speed, dt);
                world.set_desired_velocity(agent, v);
                self.moving = true;
                return;
            }
            bb.is_chasing = false;
            self.halt(agent, world);
            return;
        };

        self.observe(target, current, dt);
        bb.remember_position(current);

        let predicted = current + self.target_velocity * self.config.lead_time_secs;
        let dist = pos.distance(predicted);

        let moving = self.moving || world.velocity(agent).length() > 0.1;
        if moving && dist <= self.config.stop_enter {
            self.halt(agent, world);
            return;
        }
        if !moving && dist < self.config.stop_exit {
            return;
        }

        world.set_desired_velocity(agent, arrive(pos, predicted, self.run_speed, dt));
        self.moving = true;
    }
}
