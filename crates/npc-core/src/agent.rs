use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for an actor (an NPC, the player, anything a sensor can report).
///
/// The id is a non-owning handle: whether it still resolves to a live actor is a question for
/// [`WorldView::is_valid`](crate::WorldView::is_valid), never an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActorId(pub u64);

impl ActorId {
    pub fn stable_id(self) -> u64 {
        self.0
    }
}

impl From<u64> for ActorId {
    fn from(value: u64) -> Self {
        ActorId(value)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}
