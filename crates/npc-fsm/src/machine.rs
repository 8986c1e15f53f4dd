use std::collections::BTreeMap;

use npc_core::{ActorId, Blackboard, NpcWorld, StateKind, TickContext};
use thiserror::Error;

use crate::NpcState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Changed,
    /// Already in the requested state; no exit/enter ran.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("no state registered for `{0}`")]
    UnregisteredState(StateKind),

    #[error("state machine has no active state")]
    NoActiveState,
}

/// Holds one boxed state per [`StateKind`] and exactly one active state once started.
pub struct StateMachine<W>
where
    W: NpcWorld + 'static,
{
    states: BTreeMap<StateKind, Box<dyn NpcState<W>>>,
    current: Option<StateKind>,
}

impl<W> Default for StateMachine<W>
where
    W: NpcWorld + 'static,
{
    fn default() -> Self {
        Self {
            states: BTreeMap::new(),
            current: None,
        }
    }
}

impl<W> StateMachine<W>
where
    W: NpcWorld + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states(states: impl IntoIterator<Item = Box<dyn NpcState<W>>>) -> Self {
        let mut sm = Self::new();
        for state in states {
            sm.add(state);
        }
        sm
    }

    /// Register `state` under its own kind, returning any state it replaced.
    pub fn add(&mut self, state: Box<dyn NpcState<W>>) -> Option<Box<dyn NpcState<W>>> {
        self.states.insert(state.kind(), state)
    }

    pub fn contains(&self, kind: StateKind) -> bool {
        self.states.contains_key(&kind)
    }

    pub fn current_kind(&self) -> Option<StateKind> {
        self.current
    }

    pub fn is_in(&self, kind: StateKind) -> bool {
        self.current == Some(kind)
    }

    /// Switch to `kind`: exit the current state, swap, enter the new one.
    ///
    /// Requesting the active kind is a no-op. An unregistered kind is rejected before the
    /// current state is exited, so a failed change leaves the machine untouched.
    pub fn change(
        &mut self,
        kind: StateKind,
        ctx: &TickContext,
        agent: ActorId,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<ChangeOutcome, FsmError> {
        if self.current == Some(kind) {
            return Ok(ChangeOutcome::Unchanged);
        }
        if !self.states.contains_key(&kind) {
            return Err(FsmError::UnregisteredState(kind));
        }

        if let Some(prev) = self.current.take() {
            if let Some(state) = self.states.get_mut(&prev) {
                state.exit(ctx, agent, world, blackboard);
            }
        }

        self.current = Some(kind);
        if let Some(state) = self.states.get_mut(&kind) {
            state.enter(ctx, agent, world, blackboard);
        }
        Ok(ChangeOutcome::Changed)
    }

    /// Exit the active state without entering another, returning the kind that was exited.
    pub fn stop(
        &mut self,
        ctx: &TickContext,
        agent: ActorId,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Option<StateKind> {
        let prev = self.current.take()?;
        if let Some(state) = self.states.get_mut(&prev) {
            state.exit(ctx, agent, world, blackboard);
        }
        Some(prev)
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: ActorId,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<(), FsmError> {
        let kind = self.current.ok_or(FsmError::NoActiveState)?;
        let state = self
            .states
            .get_mut(&kind)
            .ok_or(FsmError::UnregisteredState(kind))?;
        state.tick(ctx, agent, world, blackboard);
        Ok(())
    }
}
