//! Utility AI scoring for NPC intents.
//!
//! Every tick the engine scores each candidate [`Action`] in `[0, 1]` and returns the strictly
//! greatest. Ties keep the earlier-evaluated (higher-priority) action, so the result is stable for
//! a given blackboard snapshot. A two-threshold leash controller runs before scoring and can force
//! the agent home.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod curves;
pub mod engine;
pub mod leash;

pub use action::Action;
pub use engine::{ActionScores, Decision, ScoreInputs, UtilityEngine};
pub use leash::{update_leash, LeashChange};
