use crate::{ActorId, LeashConfig, Vec2, WorldView};

/// Per-agent shared data record.
///
/// Written by the memory model (perception evidence, decay), the utility engine (leash state),
/// the behavior states (execution flags) and the brain's damage hook. Holds no behavior beyond
/// small accessors. One instance per agent, owned by that agent's brain.
#[derive(Debug, Clone, PartialEq)]
pub struct Blackboard {
    /// Currently locked actor. Non-owning; resolve through [`Blackboard::valid_target`].
    pub target: Option<ActorId>,

    pub last_known_position: Vec2,
    /// Evidence of where the target was. Independent of `target`: hearing or a blind hit can
    /// leave evidence with no locked identity.
    pub has_last_known_position: bool,

    pub suspicion: f32,
    pub alertness: f32,
    pub damage_awareness: f32,

    /// Grace window during which chase continues without a direct target.
    pub lose_sight_timer: f32,
    /// Grace window for a short counter-attack while the leash is broken.
    pub retaliate_timer: f32,

    pub leash_broken: bool,
    pub leash_enter_distance: f32,
    pub leash_exit_distance: f32,

    pub time_since_last_seen: f32,
    pub time_since_last_heard: f32,

    pub is_dead: bool,
    pub is_attacking: bool,
    pub is_chasing: bool,
    pub in_combat: bool,

    /// Asserted by the attack-range sensor. An input to scoring, not a decision.
    pub request_attack: bool,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new(&LeashConfig::default())
    }
}

impl Blackboard {
    pub fn new(leash: &LeashConfig) -> Self {
        Self {
            target: None,
            last_known_position: Vec2::ZERO,
            has_last_known_position: false,
            suspicion: 0.0,
            alertness: 0.0,
            damage_awareness: 0.0,
            lose_sight_timer: 0.0,
            retaliate_timer: 0.0,
            leash_broken: false,
            leash_enter_distance: leash.enter_distance,
            leash_exit_distance: leash.exit_distance,
            time_since_last_seen: 0.0,
            time_since_last_heard: 0.0,
            is_dead: false,
            is_attacking: false,
            is_chasing: false,
            in_combat: false,
            request_attack: false,
        }
    }

    /// The locked target, only if the world still resolves it.
    pub fn valid_target<W: WorldView + ?Sized>(&self, world: &W) -> Option<ActorId> {
        self.target.filter(|&t| world.is_valid(t))
    }

    pub fn has_valid_target<W: WorldView + ?Sized>(&self, world: &W) -> bool {
        self.valid_target(world).is_some()
    }

    /// Record `position` as evidence of the target's whereabouts.
    pub fn remember_position(&mut self, position: Vec2) {
        self.last_known_position = position;
        self.has_last_known_position = true;
    }

    /// Drop every piece of pursuit evidence so the agent cannot re-acquire from stale data.
    pub fn clear_pursuit(&mut self) {
        self.target = None;
        self.has_last_known_position = false;
        self.lose_sight_timer = 0.0;
        self.request_attack = false;
        self.in_combat = false;
        self.is_chasing = false;
        self.is_attacking = false;
    }

    /// Re-establish `[0,1]` on the psychological scalars and `>= 0` on timers.
    pub fn clamp_scalars(&mut self) {
        self.suspicion = unit(self.suspicion);
        self.alertness = unit(self.alertness);
        self.damage_awareness = unit(self.damage_awareness);
        self.lose_sight_timer = non_negative(self.lose_sight_timer);
        self.retaliate_timer = non_negative(self.retaliate_timer);
        self.time_since_last_seen = non_negative(self.time_since_last_seen);
        self.time_since_last_heard = non_negative(self.time_since_last_heard);
    }
}

pub(crate) fn unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

pub(crate) fn non_negative(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.max(0.0)
    }
}
