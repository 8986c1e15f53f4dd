use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use npc_core::StateKind;

/// High-level intent chosen by the utility engine.
///
/// An intent, not an execution state: the brain maps it onto a [`StateKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    #[default]
    Idle,
    Patrol,
    Investigate,
    Chase,
    Attack,
    ReturnHome,
}

impl Action {
    /// Selection order. Earlier entries win ties.
    pub const PRIORITY: [Action; 5] = [
        Action::Attack,
        Action::Chase,
        Action::Investigate,
        Action::ReturnHome,
        Action::Patrol,
    ];

    /// The state that executes this intent. `Idle` has no state of its own.
    pub fn state_kind(self) -> Option<StateKind> {
        match self {
            Action::Idle => None,
            Action::Patrol => Some(StateKind::Patrol),
            Action::Investigate => Some(StateKind::Investigate),
            Action::Chase => Some(StateKind::Chase),
            Action::Attack => Some(StateKind::Attack),
            Action::ReturnHome => Some(StateKind::ReturnHome),
        }
    }

    /// Urgent intents pre-empt the dwell lock.
    pub fn is_urgent(self) -> bool {
        matches!(self, Action::Attack | Action::Chase)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Patrol => "patrol",
            Action::Investigate => "investigate",
            Action::Chase => "chase",
            Action::Attack => "attack",
            Action::ReturnHome => "return_home",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
