use crate::{ActorId, ConfigError, Vec2};

/// Read-only world access.
///
/// The decision core never owns actors. It asks the host whether a handle still resolves and where
/// it is; everything else (physics, animation, hit resolution) stays on the host side.
pub trait WorldView {
    /// Whether `actor` still refers to a live, perceivable actor.
    fn is_valid(&self, actor: ActorId) -> bool;

    fn position(&self, actor: ActorId) -> Option<Vec2>;

    /// Current velocity as integrated by the host. Hosts without velocity tracking may keep the
    /// default.
    fn velocity(&self, _actor: ActorId) -> Vec2 {
        Vec2::ZERO
    }
}

/// Movement actuator: accepts a desired velocity, integrates it on the host side.
pub trait MovementWorld: WorldView {
    fn set_desired_velocity(&mut self, agent: ActorId, velocity: Vec2);

    fn stop(&mut self, agent: ActorId);
}

/// Combat collaborator: range/cooldown queries plus a fire-and-forget attack command.
pub trait CombatWorld: WorldView {
    /// Cooldown / validity gate.
    fn can_attack(&self, agent: ActorId, target: ActorId) -> bool;

    fn is_in_range(&self, agent: ActorId, target: ActorId) -> bool;

    /// Maximum distance at which an attack may start.
    fn attack_range(&self, agent: ActorId) -> f32;

    /// Distance at which the agent prefers to stand while engaged. Expected `<= attack_range`.
    fn attack_enter_range(&self, agent: ActorId) -> f32;

    fn do_attack(&mut self, agent: ActorId, target: ActorId);

    /// Both ranges, clamped so `enter <= range` even when the host's tuning disagrees.
    fn attack_ranges(&self, agent: ActorId) -> CombatRanges {
        CombatRanges::clamped(self.attack_range(agent), self.attack_enter_range(agent))
    }
}

/// Perception sensor hooks the brain can poke.
pub trait PerceptionWorld: WorldView {
    /// Ask the agent's sensors to re-emit events for everything currently overlapping them.
    ///
    /// Events produced by the re-scan are expected in the agent's inbox on a later tick.
    fn request_rescan(&mut self, _agent: ActorId) {}
}

/// Everything a full NPC brain needs from its host.
pub trait NpcWorld: MovementWorld + CombatWorld + PerceptionWorld {}

impl<T> NpcWorld for T where T: MovementWorld + CombatWorld + PerceptionWorld {}

/// Attack distances reported by a combat module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatRanges {
    pub attack_range: f32,
    pub attack_enter_range: f32,
}

impl CombatRanges {
    /// Strict constructor for load-time validation.
    pub fn new(attack_range: f32, attack_enter_range: f32) -> Result<Self, ConfigError> {
        if !attack_range.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "attack_range",
            });
        }
        if !attack_enter_range.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "attack_enter_range",
            });
        }
        if attack_range < 0.0 {
            return Err(ConfigError::NegativeValue {
                field: "attack_range",
                value: attack_range,
            });
        }
        if attack_enter_range > attack_range {
            return Err(ConfigError::AttackRanges {
                enter: attack_enter_range,
                range: attack_range,
            });
        }
        Ok(Self {
            attack_range,
            attack_enter_range: attack_enter_range.max(0.0),
        })
    }

    /// Lenient constructor: clamps into `0 <= enter <= range`.
    pub fn clamped(attack_range: f32, attack_enter_range: f32) -> Self {
        let range = if attack_range.is_finite() {
            attack_range.max(0.0)
        } else {
            0.0
        };
        let enter = if attack_enter_range.is_finite() {
            attack_enter_range.clamp(0.0, range)
        } else {
            range
        };
        Self {
            attack_range: range,
            attack_enter_range: enter,
        }
    }
}
