use npc_core::{
    ActorId, AttackConfig, Blackboard, DeterministicRng, NpcWorld, SplitMix64, StateKind,
    TickContext, Vec2,
};

use crate::steering::orbit;
use crate::NpcState;

/// Phases of the melee cycle. Every phase ends on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPhase {
    /// Waiting for the combat module's cooldown gate, at most `ready_timeout_secs`.
    Ready,
    Swinging,
    /// Circling the target at the preferred distance.
    Repositioning,
    Settle,
}

/// `Ready -> Swinging -> Repositioning -> Settle -> Ready`.
#[derive(Debug, Clone)]
pub struct AttackState {
    config: AttackConfig,
    walk_speed: f32,
    rng: SplitMix64,
    phase: AttackPhase,
    timer: f32,
    orbit_sign: f32,
    stuck_anchor: Vec2,
    stuck_timer: f32,
    moving: bool,
}

impl AttackState {
    pub fn new(config: AttackConfig, walk_speed: f32, rng: SplitMix64) -> Self {
        Self {
            config,
            walk_speed,
            rng,
            phase: AttackPhase::Ready,
            timer: 0.0,
            orbit_sign: 1.0,
            stuck_anchor: Vec2::ZERO,
            stuck_timer: 0.0,
            moving: false,
        }
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// Winding picked for the current repositioning, `1.0` or `-1.0`.
    pub fn orbit_sign(&self) -> f32 {
        self.orbit_sign
    }

    fn halt<W: NpcWorld>(&mut self, agent: ActorId, world: &mut W) {
        world.stop(agent);
        self.moving = false;
    }

    fn begin_ready(&mut self) {
        self.phase = AttackPhase::Ready;
        self.timer = 0.0;
    }

    fn begin_reposition(&mut self, pos: Vec2) {
        self.phase = AttackPhase::Repositioning;
        self.timer = self.config.reposition_secs;
        self.orbit_sign = self.rng.next_sign();
        self.stuck_anchor = pos;
        self.stuck_timer = 0.0;
    }

    fn begin_settle(&mut self) {
        self.phase = AttackPhase::Settle;
        self.timer = self.config.settle_secs;
    }

    /// Displacement over the last sample window fell under epsilon.
    fn is_stuck(&mut self, pos: Vec2, dt: f32) -> bool {
        self.stuck_timer += dt;
        if self.stuck_timer < self.config.stuck_window_secs {
            return false;
        }
        let stuck = pos.distance(self.stuck_anchor) < self.config.stuck_epsilon;
        self.stuck_anchor = pos;
        self.stuck_timer = 0.0;
        stuck
    }
}

impl<W> NpcState<W> for AttackState
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind {
        StateKind::Attack
    }

    fn enter(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        bb.is_chasing = false;
        bb.is_attacking = true;
        bb.in_combat = true;
        self.begin_ready();
        self.halt(agent, world);
    }

    fn exit(&mut self, _ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        bb.is_attacking = false;
        if self.moving {
            self.halt(agent, world);
        }
    }

    fn tick(&mut self, ctx: &TickContext, agent: ActorId, world: &mut W, bb: &mut Blackboard) {
        let dt = ctx.dt();
        let Some(target) = bb.valid_target(world) else {
            if self.moving {
                self.halt(agent, world);
            }
            return;
        };
        let (Some(pos), Some(target_pos)) = (world.position(agent), world.position(target)) else {
            self.halt(agent, world);
            return;
        };

        match self.phase {
            AttackPhase::Ready => {
                if world.can_attack(agent, target) && world.is_in_range(agent, target) {
                    world.do_attack(agent, target);
                    self.phase = AttackPhase::Swinging;
                    self.timer = self.config.swing_secs;
                    return;
                }
                self.timer += dt;
                if self.timer >= self.config.ready_timeout_secs {
                    self.begin_reposition(pos);
                } else if self.moving {
                    self.halt(agent, world);
                }
            }
            AttackPhase::Swinging => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.begin_reposition(pos);
                }
            }
            AttackPhase::Repositioning => {
                self.timer -= dt;
                if self.timer <= 0.0 || self.is_stuck(pos, dt) {
                    self.begin_settle();
                    self.halt(agent, world);
                }
            }
            AttackPhase::Settle => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.begin_ready();
                }
                if self.moving {
                    self.halt(agent, world);
                }
            }
        }

        if self.phase == AttackPhase::Repositioning {
            let radius = world.attack_ranges(agent).attack_enter_range;
            let dir = orbit(target_pos, pos, radius, self.orbit_sign);
            world.set_desired_velocity(agent, dir * self.walk_speed);
            self.moving = true;
        }
    }
}
