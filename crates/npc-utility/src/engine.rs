use npc_core::{ActorId, Blackboard, CombatWorld, LeashConfig, Vec2};

use crate::curves::{inverse_lerp, ramp};
use crate::leash::{update_leash, LeashChange};
use crate::Action;

/// World-derived facts the scoring formulas need besides the blackboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// `target` is set and still resolves.
    pub has_valid_target: bool,
    /// The combat module reports the target inside its attack range.
    pub target_in_range: bool,
    pub distance_home: f32,
}

/// Score for every action from one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionScores {
    pub idle: f32,
    pub patrol: f32,
    pub investigate: f32,
    pub chase: f32,
    pub attack: f32,
    pub return_home: f32,
}

impl ActionScores {
    pub fn get(&self, action: Action) -> f32 {
        match action {
            Action::Idle => self.idle,
            Action::Patrol => self.patrol,
            Action::Investigate => self.investigate,
            Action::Chase => self.chase,
            Action::Attack => self.attack,
            Action::ReturnHome => self.return_home,
        }
    }

    /// Strictly-greatest action, starting from `(Idle, 0)` and walking [`Action::PRIORITY`].
    pub fn best(&self) -> (Action, f32) {
        let mut best = (Action::Idle, 0.0f32);
        for action in Action::PRIORITY {
            let s = self.get(action);
            // NaN compares false and never wins.
            if s > best.1 {
                best = (action, s);
            }
        }
        best
    }
}

/// Result of [`UtilityEngine::decide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub score: f32,
    pub scores: ActionScores,
    /// Set when this call flipped the leash.
    pub leash_change: Option<LeashChange>,
}

impl Decision {
    /// The do-nothing decision, all scores zero.
    pub fn idle() -> Self {
        Self {
            action: Action::Idle,
            score: 0.0,
            scores: ActionScores::default(),
            leash_change: None,
        }
    }
}

/// Scores the candidate actions and owns the home anchor the leash is measured from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityEngine {
    home: Vec2,
    max_home_distance: f32,
}

impl UtilityEngine {
    pub fn new(home: Vec2, max_home_distance: f32) -> Self {
        Self {
            home,
            max_home_distance: if max_home_distance.is_finite() {
                max_home_distance.max(0.0)
            } else {
                LeashConfig::default().max_home_distance
            },
        }
    }

    pub fn from_config(home: Vec2, leash: &LeashConfig) -> Self {
        Self::new(home, leash.max_home_distance)
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn max_home_distance(&self) -> f32 {
        self.max_home_distance
    }

    /// Pure scoring of all six actions. Does not touch the leash.
    pub fn score(&self, bb: &Blackboard, inputs: &ScoreInputs) -> ActionScores {
        if bb.is_dead {
            return ActionScores::default();
        }
        ActionScores {
            idle: 0.0,
            patrol: self.score_patrol(bb, inputs),
            investigate: self.score_investigate(bb),
            chase: self.score_chase(bb, inputs),
            attack: self.score_attack(bb, inputs),
            return_home: self.score_return_home(bb, inputs),
        }
    }

    /// Leash step, scoring and selection for one agent.
    ///
    /// Dead agents decide `Idle` without scoring. An agent whose own position does not resolve
    /// also decides `Idle`.
    pub fn decide<W: CombatWorld + ?Sized>(
        &self,
        agent: ActorId,
        world: &W,
        bb: &mut Blackboard,
    ) -> Decision {
        if bb.is_dead {
            return Decision::idle();
        }
        let Some(position) = world.position(agent) else {
            return Decision::idle();
        };

        let distance_home = position.distance(self.home);
        let leash_change = update_leash(bb, distance_home);
        if let Some(change) = leash_change {
            tracing::debug!(%agent, ?change, distance_home, "leash");
        }

        let target = bb.valid_target(world);
        let inputs = ScoreInputs {
            has_valid_target: target.is_some(),
            target_in_range: target.is_some_and(|t| world.is_in_range(agent, t)),
            distance_home,
        };

        let scores = self.score(bb, &inputs);
        let (action, score) = scores.best();
        Decision {
            action,
            score,
            scores,
            leash_change,
        }
    }

    fn score_attack(&self, bb: &Blackboard, inputs: &ScoreInputs) -> f32 {
        if !inputs.has_valid_target || !inputs.target_in_range {
            return 0.0;
        }
        if bb.leash_broken {
            // Short counter-attack only; never re-engages a chase.
            return if bb.retaliate_timer > 0.0 { 1.0 } else { 0.0 };
        }
        if !bb.request_attack {
            return 0.0;
        }
        ramp(0.95 + 0.05 * bb.suspicion)
    }

    fn score_chase(&self, bb: &Blackboard, inputs: &ScoreInputs) -> f32 {
        if bb.leash_broken {
            return 0.0;
        }
        if !inputs.has_valid_target && bb.lose_sight_timer <= 0.0 {
            return 0.0;
        }
        ramp(0.7 * bb.suspicion + 0.3)
    }

    fn score_investigate(&self, bb: &Blackboard) -> f32 {
        if bb.leash_broken || !bb.has_last_known_position {
            return 0.0;
        }
        ramp(0.6 * bb.suspicion + 0.4 * bb.damage_awareness)
    }

    fn score_return_home(&self, bb: &Blackboard, inputs: &ScoreInputs) -> f32 {
        if bb.leash_broken {
            return 1.0;
        }
        let d = inputs.distance_home;
        if d.is_nan() || d < self.max_home_distance {
            return 0.0;
        }
        let far = inverse_lerp(self.max_home_distance, self.max_home_distance * 1.5, d);
        ramp((1.0 - bb.suspicion) * far)
    }

    fn score_patrol(&self, bb: &Blackboard, inputs: &ScoreInputs) -> f32 {
        if inputs.has_valid_target {
            return 0.0;
        }
        (0.4 * (1.0 - bb.suspicion)).clamp(0.0, 0.4)
    }
}
