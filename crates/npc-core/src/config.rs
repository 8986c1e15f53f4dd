//! Per-archetype tuning.
//!
//! Everything here is flat numeric data, loaded by the host and read-only at runtime. Defaults
//! match the reference melee archetype. Bad tuning never panics: [`NpcConfig::validate`] reports
//! problems and [`NpcConfig::sanitized`] clamps into a safe range.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StateKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("leash exit distance {exit} must be below enter distance {enter}")]
    LeashThresholds { enter: f32, exit: f32 },

    #[error("attack enter range {enter} exceeds attack range {range}")]
    AttackRanges { enter: f32, range: f32 },

    #[error("chase stop-enter distance {enter} exceeds stop-exit distance {exit}")]
    ChaseThresholds { enter: f32, exit: f32 },

    #[error("idle dwell range {min}..{max} is inverted")]
    IdleRange { min: f32, max: f32 },

    #[error("{field} must be non-negative (got {value})")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
}

/// Perception memory tuning: gains, decay rates, forgetting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MemoryConfig {
    pub suspicion_gain_on_see: f32,
    /// Lower than vision: hearing is directional evidence only.
    pub suspicion_gain_on_hear: f32,
    pub alertness_gain_on_see: f32,
    pub alertness_gain_on_hear: f32,
    pub suspicion_gain_on_damage: f32,
    pub alertness_gain_on_damage: f32,
    pub damage_awareness_gain: f32,
    pub suspicion_decay_per_sec: f32,
    pub alertness_decay_per_sec: f32,
    pub damage_awareness_decay_per_sec: f32,
    /// Last-known position is dropped once both sight and hearing are this stale.
    pub forget_position_after_secs: f32,
    /// Chase grace restored on every sighting.
    pub lose_sight_grace_secs: f32,
    /// Minimum grace after a hit from an unresolvable attacker.
    pub damaged_investigate_grace_secs: f32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            suspicion_gain_on_see: 0.8,
            suspicion_gain_on_hear: 0.35,
            alertness_gain_on_see: 0.5,
            alertness_gain_on_hear: 0.25,
            suspicion_gain_on_damage: 0.9,
            alertness_gain_on_damage: 0.7,
            damage_awareness_gain: 1.0,
            suspicion_decay_per_sec: 0.12,
            alertness_decay_per_sec: 0.05,
            damage_awareness_decay_per_sec: 0.1,
            forget_position_after_secs: 4.0,
            lose_sight_grace_secs: 2.0,
            damaged_investigate_grace_secs: 0.8,
        }
    }
}

/// Home leash thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeashConfig {
    /// `distance_home >= enter_distance` breaks the leash.
    pub enter_distance: f32,
    /// `distance_home <= exit_distance` restores it. Must stay below `enter_distance`.
    pub exit_distance: f32,
    /// Distance from home at which the return-home score starts to rise.
    pub max_home_distance: f32,
}

impl Default for LeashConfig {
    fn default() -> Self {
        Self {
            enter_distance: 700.0,
            exit_distance: 250.0,
            max_home_distance: 400.0,
        }
    }
}

/// Brain-level arbitration tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionConfig {
    /// Minimum dwell after a committed switch before a non-urgent switch is allowed.
    pub dwell_lock_secs: f32,
    /// Counter-attack window opened by a hit taken while the leash is broken.
    pub retaliate_window_secs: f32,
    /// State used when the utility engine decides `Idle`.
    pub idle_fallback: StateKind,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            dwell_lock_secs: 0.20,
            retaliate_window_secs: 1.5,
            idle_fallback: StateKind::Patrol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 70.0,
            run_speed: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatrolConfig {
    pub radius: f32,
    pub stop_distance: f32,
    pub idle_min_secs: f32,
    pub idle_max_secs: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            stop_distance: 6.0,
            idle_min_secs: 1.0,
            idle_max_secs: 3.0,
        }
    }
}

/// Seek-to-point arrival tuning (investigate, return home).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeekConfig {
    pub stop_distance: f32,
}

impl Default for SeekConfig {
    fn default() -> Self {
        Self { stop_distance: 8.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// While moving, stop once the predicted target is this close.
    pub stop_enter: f32,
    /// While stationary, start moving again once the predicted target is this far.
    pub stop_exit: f32,
    pub lead_time_secs: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            stop_enter: 10.0,
            stop_exit: 16.0,
            lead_time_secs: 0.25,
        }
    }
}

/// Attack cycle timers. Every phase is bounded by one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackConfig {
    /// Longest wait for the combat module's cooldown gate before shuffling position anyway.
    pub ready_timeout_secs: f32,
    pub swing_secs: f32,
    pub reposition_secs: f32,
    pub settle_secs: f32,
    /// Sample window for the stuck detector.
    pub stuck_window_secs: f32,
    /// Displacement below this over one window counts as stuck.
    pub stuck_epsilon: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            ready_timeout_secs: 1.0,
            swing_secs: 0.4,
            reposition_secs: 0.6,
            settle_secs: 0.25,
            stuck_window_secs: 0.3,
            stuck_epsilon: 2.0,
        }
    }
}

/// Full tuning for one NPC archetype.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcConfig {
    pub memory: MemoryConfig,
    pub leash: LeashConfig,
    pub decision: DecisionConfig,
    pub movement: MovementConfig,
    pub patrol: PatrolConfig,
    pub investigate: SeekConfig,
    pub return_home: SeekConfig,
    pub chase: ChaseConfig,
    pub attack: AttackConfig,
}

/// Expands one `visit(name, &mut field, default)` call per `section.field` path.
macro_rules! scalar_fields {
    ($cfg:ident, $defaults:ident, $visit:ident; $($section:ident . $field:ident),* $(,)?) => {
        $(
            $visit(
                concat!(stringify!($section), ".", stringify!($field)),
                &mut $cfg.$section.$field,
                $defaults.$section.$field,
            );
        )*
    };
}

impl NpcConfig {
    /// First problem found, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every problem found, in field order.
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut out = Vec::new();
        let mut scratch = *self;
        scratch.visit_scalars(&NpcConfig::default(), |field, value, _| {
            let value = *value;
            if !value.is_finite() {
                out.push(ConfigError::NotFinite { field });
            } else if value < 0.0 {
                out.push(ConfigError::NegativeValue { field, value });
            }
        });

        let leash = &self.leash;
        if leash.exit_distance >= leash.enter_distance {
            out.push(ConfigError::LeashThresholds {
                enter: leash.enter_distance,
                exit: leash.exit_distance,
            });
        }
        if self.chase.stop_enter > self.chase.stop_exit {
            out.push(ConfigError::ChaseThresholds {
                enter: self.chase.stop_enter,
                exit: self.chase.stop_exit,
            });
        }
        if self.patrol.idle_min_secs > self.patrol.idle_max_secs {
            out.push(ConfigError::IdleRange {
                min: self.patrol.idle_min_secs,
                max: self.patrol.idle_max_secs,
            });
        }
        out
    }

    /// A copy clamped into the valid range.
    ///
    /// Non-finite values fall back to the archetype default, negatives clamp to zero, and the
    /// relational invariants are repaired conservatively (a degenerate leash is narrowed rather
    /// than widened).
    pub fn sanitized(&self) -> NpcConfig {
        let defaults = NpcConfig::default();
        let mut out = *self;

        out.visit_scalars(&defaults, |_, value, default| {
            let v = *value;
            *value = if v.is_finite() { v.max(0.0) } else { default };
        });

        if out.leash.exit_distance >= out.leash.enter_distance {
            if out.leash.enter_distance <= 0.0 {
                out.leash.enter_distance = defaults.leash.enter_distance;
                out.leash.exit_distance = defaults.leash.exit_distance;
            } else {
                out.leash.exit_distance = out.leash.enter_distance * 0.5;
            }
        }
        if out.chase.stop_enter > out.chase.stop_exit {
            out.chase.stop_exit = out.chase.stop_enter;
        }
        if out.patrol.idle_min_secs > out.patrol.idle_max_secs {
            core::mem::swap(&mut out.patrol.idle_min_secs, &mut out.patrol.idle_max_secs);
        }
        out
    }

    /// Visit every scalar field with its dotted name and archetype default.
    fn visit_scalars(
        &mut self,
        defaults: &NpcConfig,
        mut visit: impl FnMut(&'static str, &mut f32, f32),
    ) {
        let cfg = self;
        scalar_fields!(cfg, defaults, visit;
            memory.suspicion_gain_on_see,
            memory.suspicion_gain_on_hear,
            memory.alertness_gain_on_see,
            memory.alertness_gain_on_hear,
            memory.suspicion_gain_on_damage,
            memory.alertness_gain_on_damage,
            memory.damage_awareness_gain,
            memory.suspicion_decay_per_sec,
            memory.alertness_decay_per_sec,
            memory.damage_awareness_decay_per_sec,
            memory.forget_position_after_secs,
            memory.lose_sight_grace_secs,
            memory.damaged_investigate_grace_secs,
            leash.enter_distance,
            leash.exit_distance,
            leash.max_home_distance,
            decision.dwell_lock_secs,
            decision.retaliate_window_secs,
            movement.walk_speed,
            movement.run_speed,
            patrol.radius,
            patrol.stop_distance,
            patrol.idle_min_secs,
            patrol.idle_max_secs,
            investigate.stop_distance,
            return_home.stop_distance,
            chase.stop_enter,
            chase.stop_exit,
            chase.lead_time_secs,
            attack.ready_timeout_secs,
            attack.swing_secs,
            attack.reposition_secs,
            attack.settle_secs,
            attack.stuck_window_secs,
            attack.stuck_epsilon,
        );
    }
}
