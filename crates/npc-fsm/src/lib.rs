//! Execution layer: one active behavior state at a time.
//!
//! States implement [`NpcState`] and talk to the host only through the collaborator traits in
//! `npc-core`. They never see the state machine, so a state cannot switch itself; the brain owns
//! every transition.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod machine;
pub mod state;
pub mod states;
pub mod steering;

pub use machine::{ChangeOutcome, FsmError, StateMachine};
pub use state::NpcState;
pub use states::{AttackPhase, AttackState, ChaseState, InvestigateState, PatrolState, ReturnHomeState};
