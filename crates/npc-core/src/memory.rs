use crate::blackboard::{non_negative, unit};
use crate::{ActorId, Blackboard, MemoryConfig, Vec2, WorldView};

/// Perception memory.
///
/// The only writer of decay and forgetting, and the only legitimate converter of raw perception
/// into blackboard evidence. Invalid actor handles are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Memory {
    config: MemoryConfig,
}

impl Memory {
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Decay, advance timers, drop dead targets, forget stale evidence.
    pub fn tick<W: WorldView + ?Sized>(&self, bb: &mut Blackboard, world: &W, dt: f32) {
        let dt = non_negative(if dt.is_finite() { dt } else { 0.0 });
        let cfg = &self.config;

        bb.suspicion = unit(bb.suspicion - cfg.suspicion_decay_per_sec * dt);
        bb.alertness = unit(bb.alertness - cfg.alertness_decay_per_sec * dt);
        bb.damage_awareness = unit(bb.damage_awareness - cfg.damage_awareness_decay_per_sec * dt);

        bb.time_since_last_seen = non_negative(bb.time_since_last_seen) + dt;
        bb.time_since_last_heard = non_negative(bb.time_since_last_heard) + dt;

        bb.lose_sight_timer = non_negative(bb.lose_sight_timer - dt);
        bb.retaliate_timer = non_negative(bb.retaliate_timer - dt);

        if let Some(target) = bb.target {
            if !world.is_valid(target) {
                tracing::trace!(%target, "dropping unresolvable target");
                bb.target = None;
            }
        }

        // Both channels must be stale: one fresh hearing cue keeps a visually lost position.
        let forget_after = cfg.forget_position_after_secs;
        if bb.has_last_known_position
            && bb.time_since_last_seen >= forget_after
            && bb.time_since_last_heard >= forget_after
        {
            bb.has_last_known_position = false;
        }
    }

    /// Visual contact: lock identity and refresh evidence.
    pub fn on_see<W: WorldView + ?Sized>(
        &self,
        bb: &mut Blackboard,
        world: &W,
        actor: ActorId,
        position: Vec2,
        strength: f32,
    ) {
        if !world.is_valid(actor) || !position.is_finite() {
            return;
        }
        let strength = unit(strength);
        let cfg = &self.config;

        bb.target = Some(actor);
        bb.remember_position(position);
        bb.lose_sight_timer = cfg.lose_sight_grace_secs;

        bb.suspicion = unit(bb.suspicion + cfg.suspicion_gain_on_see * strength);
        bb.alertness = unit(bb.alertness + cfg.alertness_gain_on_see * strength);

        bb.time_since_last_seen = 0.0;
    }

    /// Auditory cue: directional evidence only, never identity.
    pub fn on_hear(&self, bb: &mut Blackboard, position: Vec2, strength: f32) {
        if !position.is_finite() {
            return;
        }
        let strength = unit(strength);
        let cfg = &self.config;

        bb.remember_position(position);

        bb.suspicion = unit(bb.suspicion + cfg.suspicion_gain_on_hear * strength);
        bb.alertness = unit(bb.alertness + cfg.alertness_gain_on_hear * strength);

        bb.time_since_last_heard = 0.0;
    }

    /// Sight of `actor` ended at `position`.
    ///
    /// Only meaningful for the locked target: evidence is kept, identity is released and the
    /// chase grace restarts. Lost-sight reports about any other actor are ignored.
    pub fn on_lost_sight(&self, bb: &mut Blackboard, actor: ActorId, position: Vec2) {
        if bb.target != Some(actor) {
            return;
        }
        if position.is_finite() {
            bb.remember_position(position);
        }
        bb.target = None;
        bb.lose_sight_timer = self.config.lose_sight_grace_secs;
        bb.time_since_last_seen = 0.0;
    }

    /// Being hit is unambiguous evidence.
    ///
    /// A resolvable attacker is locked instantly through [`Memory::on_see`]. Otherwise only the
    /// hit position is recorded and a minimum investigate grace is guaranteed.
    pub fn on_damaged<W: WorldView + ?Sized>(
        &self,
        bb: &mut Blackboard,
        world: &W,
        attacker: Option<ActorId>,
        hit_position: Vec2,
        strength: f32,
    ) {
        let strength = unit(strength);
        let cfg = &self.config;

        bb.suspicion = unit(bb.suspicion + cfg.suspicion_gain_on_damage * strength);
        bb.alertness = unit(bb.alertness + cfg.alertness_gain_on_damage * strength);
        bb.damage_awareness = unit(bb.damage_awareness + cfg.damage_awareness_gain * strength);

        let resolved = attacker
            .filter(|&a| world.is_valid(a))
            .and_then(|a| world.position(a).map(|p| (a, p)));
        if let Some((actor, position)) = resolved {
            self.on_see(bb, world, actor, position, strength);
            return;
        }

        if hit_position.is_finite() {
            bb.remember_position(hit_position);
        }
        bb.time_since_last_heard = 0.0;
        bb.lose_sight_timer = bb
            .lose_sight_timer
            .max(cfg.damaged_investigate_grace_secs);
    }
}
