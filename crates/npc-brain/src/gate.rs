use npc_core::{Blackboard, StateKind, WorldView};
use npc_utility::Action;

/// Why a switch was allowed (or not) this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateReason {
    /// `Attack` and `Chase` pre-empt the lock.
    Urgent,
    /// `ReturnHome` while the leash is broken.
    LeashReturn,
    /// The active state's preconditions no longer hold.
    Stuck,
    /// The dwell lock has elapsed.
    Unlocked,
    /// Held by the dwell lock.
    Locked,
}

impl GateReason {
    pub fn allows_switch(self) -> bool {
        !matches!(self, GateReason::Locked)
    }
}

/// Anti-flip-flop gate in front of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gate {
    lock_timer: f32,
}

impl Gate {
    pub fn lock_remaining(&self) -> f32 {
        self.lock_timer
    }

    pub fn is_locked(&self) -> bool {
        self.lock_timer > 0.0
    }

    pub fn arm(&mut self, secs: f32) {
        self.lock_timer = secs.max(0.0);
    }

    pub fn advance(&mut self, dt: f32) {
        self.lock_timer = (self.lock_timer - dt).max(0.0);
    }

    /// Evaluate the overrides in priority order, then the lock.
    pub fn evaluate<W: WorldView + ?Sized>(
        &self,
        action: Action,
        current: Option<StateKind>,
        world: &W,
        bb: &Blackboard,
    ) -> GateReason {
        if action.is_urgent() {
            GateReason::Urgent
        } else if action == Action::ReturnHome && bb.leash_broken {
            GateReason::LeashReturn
        } else if current.is_some_and(|kind| is_stuck(kind, world, bb)) {
            GateReason::Stuck
        } else if !self.is_locked() {
            GateReason::Unlocked
        } else {
            GateReason::Locked
        }
    }
}

/// A state whose preconditions no longer hold and must be allowed to exit immediately.
///
/// Chase with no target, no grace and no evidence; Investigate while the target is visible again.
pub fn is_stuck<W: WorldView + ?Sized>(kind: StateKind, world: &W, bb: &Blackboard) -> bool {
    match kind {
        StateKind::Chase => {
            !bb.has_valid_target(world) && bb.lose_sight_timer <= 0.0 && !bb.has_last_known_position
        }
        StateKind::Investigate => bb.has_valid_target(world),
        _ => false,
    }
}
