use npc_core::{ActorId, Blackboard, NpcWorld, SeekConfig, StateKind, TickContext, Vec2};

use crate::steering::seek;
use crate::NpcState;

/// Walk back to the home anchor.
///
/// Entering this state drops all pursuit evidence so the agent does not re-acquire the target it
/// was just leashed away from.
#[derive(Debug, Clone)]
pub struct ReturnHomeState {
    home: Vec2,
    config: SeekConfig,
    walk_speed: f32,
    moving: bool,
}

impl ReturnHomeState {
    pub fn new(home: Vec2, config: SeekConfig, walk_speed: f32) -> Self {
        Self {
            home,
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

impl<W> NpcState<W> for ReturnHomeState
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind {
        StateKind::ReturnHome
    }

    fn enter(&mut self, _ctx: &TickContext, agent: ActorId, _world: &mut W, bb: &mut Blackboard) {
        bb.clear_pursuit();
        tracing::trace!(%agent, "pursuit evidence cleared on return home");
    }

    fn exit(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, _bb: &mut Blackboard) {
        if self.moving {
            self.halt(agent, world);
        }
    }

    fn tick(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, _bb: &mut Blackboard) {
        let Some(pos) = world.position(agent) else {
            self.halt(agent, world);
            return;
        };
        if pos.distance(self.home) <= self.config.stop_distance {
            self.halt(agent, world);
            return;
        }
        world.set_desired_velocity(agent, seek(pos, self.home) * self.walk_speed);
        self.moving = true;
    }
}
