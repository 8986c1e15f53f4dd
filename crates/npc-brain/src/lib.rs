//! The per-agent orchestrator.
//!
//! A [`Brain`] owns one agent's blackboard, perception inbox, memory model, utility engine and
//! state machine, and runs them in a fixed order every tick:
//!
//! 1. drain the perception inbox into memory
//! 2. decay and forget (`Memory::tick`)
//! 3. score and decide (`UtilityEngine::decide`)
//! 4. gate the switch (urgency, leash return, stuck state, dwell lock)
//! 5. change state, then tick the active state
//!
//! Errors never leave the agent: a brain that loses a collaborator halts itself and keeps
//! returning.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod brain;
pub mod gate;

pub use brain::{tick_brains, Brain, TAG_FORCED_EXIT, TAG_HALT, TAG_LEASH, TAG_TRANSITION};
pub use gate::{Gate, GateReason};
