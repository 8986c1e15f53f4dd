//! Deterministic, engine-agnostic NPC decision primitives.
//!
//! This crate holds the per-agent data record (`Blackboard`), the perception memory model that
//! writes to it, and the narrow collaborator traits (movement, combat, perception) the rest of the
//! decision stack talks through.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod config;
pub mod kind;
pub mod math;
pub mod memory;
pub mod perception;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::ActorId;
pub use blackboard::Blackboard;
pub use config::{
    AttackConfig, ChaseConfig, ConfigError, DecisionConfig, LeashConfig, MemoryConfig,
    MovementConfig, NpcConfig, PatrolConfig, SeekConfig,
};
pub use kind::StateKind;
pub use math::Vec2;
pub use memory::Memory;
pub use perception::{PerceptionEvent, PerceptionInbox, SensorEvent, Sense};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{CombatRanges, CombatWorld, MovementWorld, NpcWorld, PerceptionWorld, WorldView};
