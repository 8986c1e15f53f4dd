use npc_core::{ActorId, Blackboard, NpcWorld, SeekConfig, StateKind, TickContext};

use crate::steering::seek;
use crate::NpcState;

/// Walk to the last known position and look around until the evidence fades.
#[derive(Debug, Clone)]
pub struct InvestigateState {
    config: SeekConfig,
    walk_speed: f32,
    moving: bool,
}

impl InvestigateState {
    pub fn new(config: SeekConfig, walk_speed: f32) -> Self {
        Self {
            config,
            walk_speed,
            moving: false,
        }
    }

    fn halt<W: NpcWorld>(&mut self, agent: ActorId, world: &mut W) {
        world.stop(agent);
        self.moving = false;
    }
}

impl<W> NpcState<W> for InvestigateState
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind {
        StateKind::Investigate
    }

    fn enter(&mut self, _ctx: &TickContext, _agent: ActorId, _world: &mut W, bb: &mut Blackboard) {
        bb.is_chasing = false;
        bb.is_attacking = false;
    }

    fn exit(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, _bb: &mut Blackboard) {
        if self.moving {
            self.halt(agent, world);
        }
    }

    fn tick(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        // Target is back; the brain will switch to a pursuit state.
        if bb.has_valid_target(world) {
            if self.moving {
                self.halt(agent, world);
            }
            return;
        }

        let position = world.position(agent);
        let (Some(pos), true) = (position, bb.has_last_known_position) else {
            self.halt(agent, world);
            return;
        };

        if pos.distance(bb.last_known_position) <= self.config.stop_distance {
            self.halt(agent, world);
            return;
        }

        world.set_desired_velocity(agent, seek(pos, bb.last_known_position) * self.walk_speed);
        self.moving = true;
    }
}
