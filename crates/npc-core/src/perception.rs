//! Perception payloads and the per-agent inbox.
//!
//! Sensors do not call into the brain. They push events into the agent's inbox, and the brain
//! drains it at the start of its own tick, before memory decay and scoring run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ActorId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sense {
    Visual,
    Auditory,
}

/// One report from a perception sensor.
///
/// A visual event with `strength == 0` means "lost sight of `actor`".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerceptionEvent {
    pub actor: Option<ActorId>,
    pub position: Vec2,
    /// `[0, 1]`.
    pub strength: f32,
    pub sense: Sense,
}

impl PerceptionEvent {
    pub fn seen(actor: ActorId, position: Vec2, strength: f32) -> Self {
        Self {
            actor: Some(actor),
            position,
            strength,
            sense: Sense::Visual,
        }
    }

    pub fn lost(actor: ActorId, position: Vec2) -> Self {
        Self {
            actor: Some(actor),
            position,
            strength: 0.0,
            sense: Sense::Visual,
        }
    }

    pub fn heard(position: Vec2, strength: f32) -> Self {
        Self {
            actor: None,
            position,
            strength,
            sense: Sense::Auditory,
        }
    }

    pub fn is_visual(&self) -> bool {
        self.sense == Sense::Visual
    }

    pub fn is_lost_sight(&self) -> bool {
        self.is_visual() && self.strength <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorEvent {
    Perceived(PerceptionEvent),
    /// The attack-range sensor's overlap changed.
    AttackRange { actor: ActorId, in_range: bool },
}

impl From<PerceptionEvent> for SensorEvent {
    fn from(value: PerceptionEvent) -> Self {
        SensorEvent::Perceived(value)
    }
}

/// FIFO of sensor events waiting for the next brain tick.
#[derive(Debug, Clone, Default)]
pub struct PerceptionInbox {
    events: Vec<SensorEvent>,
}

impl PerceptionInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<SensorEvent>) {
        self.events.push(event.into());
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SensorEvent> {
        self.events.drain(..)
    }
}
