use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable tag for each behavior state the state machine can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateKind {
    Patrol,
    Investigate,
    Chase,
    Attack,
    ReturnHome,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Patrol => "patrol",
            StateKind::Investigate => "investigate",
            StateKind::Chase => "chase",
            StateKind::Attack => "attack",
            StateKind::ReturnHome => "return_home",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
