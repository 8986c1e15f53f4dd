use npc_core::{
    ActorId, Blackboard, Memory, NpcConfig, NpcWorld, PerceptionEvent, PerceptionInbox, Sense,
    SensorEvent, StateKind, TickContext, Vec2,
};
use npc_fsm::states::standard_states;
use npc_fsm::{ChangeOutcome, FsmError, NpcState, StateMachine};
use npc_tools::{TraceEvent, TraceRecorder};
use npc_utility::{Decision, LeashChange, UtilityEngine};

use crate::gate::{Gate, GateReason};

pub const TAG_TRANSITION: &str = "brain.transition";
pub const TAG_LEASH: &str = "brain.leash";
pub const TAG_FORCED_EXIT: &str = "brain.forced_exit";
pub const TAG_HALT: &str = "brain.halt";

/// One agent's decision core.
pub struct Brain<W>
where
    W: NpcWorld + 'static,
{
    pub agent: ActorId,
    pub blackboard: Blackboard,
    pub inbox: PerceptionInbox,
    pub trace: TraceRecorder,
    config: NpcConfig,
    memory: Memory,
    engine: UtilityEngine,
    fsm: StateMachine<W>,
    gate: Gate,
    last_decision: Option<Decision>,
    halted: bool,
    dead_stopped: bool,
}

impl<W> Brain<W>
where
    W: NpcWorld + 'static,
{
    /// A brain with the five standard states, anchored at `home`.
    ///
    /// `seed` feeds the per-state generators (patrol points, idle dwell, orbit direction).
    pub fn new(agent: ActorId, home: Vec2, config: NpcConfig, seed: u64) -> Self {
        let config = sanitize(agent, &config);
        let states = standard_states(agent, home, &config, seed);
        Self::assemble(agent, home, config, states)
    }

    /// A brain over a caller-supplied state set.
    ///
    /// Any kind the utility engine can ask for but `states` lacks halts the brain when requested.
    pub fn with_states(
        agent: ActorId,
        home: Vec2,
        config: NpcConfig,
        states: Vec<Box<dyn NpcState<W>>>,
    ) -> Self {
        let config = sanitize(agent, &config);
        Self::assemble(agent, home, config, states)
    }

    fn assemble(
        agent: ActorId,
        home: Vec2,
        config: NpcConfig,
        states: Vec<Box<dyn NpcState<W>>>,
    ) -> Self {
        Self {
            agent,
            blackboard: Blackboard::new(&config.leash),
            inbox: PerceptionInbox::new(),
            trace: TraceRecorder::new(),
            memory: Memory::new(config.memory),
            engine: UtilityEngine::from_config(home, &config.leash),
            fsm: StateMachine::with_states(states),
            gate: Gate::default(),
            last_decision: None,
            halted: false,
            dead_stopped: false,
            config,
        }
    }

    pub fn with_trace(mut self, trace: TraceRecorder) -> Self {
        self.trace = trace;
        self
    }

    pub fn config(&self) -> &NpcConfig {
        &self.config
    }

    pub fn home(&self) -> Vec2 {
        self.engine.home()
    }

    pub fn current_state(&self) -> Option<StateKind> {
        self.fsm.current_kind()
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    pub fn lock_remaining(&self) -> f32 {
        self.gate.lock_remaining()
    }

    /// The brain lost a required collaborator and no longer acts.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Queue a sensor event for the next tick.
    pub fn perceive(&mut self, event: impl Into<SensorEvent>) {
        self.inbox.push(event);
    }

    /// Damage hook: the only entry point that turns a hit into blackboard evidence.
    ///
    /// A hit taken while the leash is broken opens the retaliation window.
    pub fn on_damaged(&mut self, world: &W, attacker: Option<ActorId>, hit_position: Vec2) {
        if self.blackboard.is_dead || self.halted {
            return;
        }
        self.memory
            .on_damaged(&mut self.blackboard, world, attacker, hit_position, 1.0);
        if self.blackboard.leash_broken {
            self.blackboard.retaliate_timer = self.config.decision.retaliate_window_secs;
        }
        tracing::debug!(agent = %self.agent, ?attacker, "damaged");
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        if self.halted {
            return;
        }
        if self.blackboard.is_dead {
            if !self.dead_stopped {
                self.on_death(ctx, world);
            }
            self.inbox.clear();
            return;
        }
        self.dead_stopped = false;
        if world.position(self.agent).is_none() {
            world.stop(self.agent);
            self.halt(ctx, "agent position unresolvable");
            return;
        }
        if self.fsm.current_kind().is_none() {
            self.start(ctx, world);
            if self.halted {
                return;
            }
        }

        let dt = ctx.dt();
        self.drain_inbox(world);
        self.memory.tick(&mut self.blackboard, world, dt);
        self.gate.advance(dt);

        let decision = self.engine.decide(self.agent, world, &mut self.blackboard);
        if let Some(change) = decision.leash_change {
            let to = match change {
                LeashChange::Broken => "broken",
                LeashChange::Restored => "restored",
            };
            self.trace.emit(
                TraceEvent::new(ctx.tick, TAG_LEASH)
                    .with_agent(self.agent)
                    .with_to(to),
            );
        }
        self.last_decision = Some(decision);

        if let Err(err) = self.apply(ctx, world, &decision) {
            self.fail(ctx, world, err);
            return;
        }

        if let Err(err) = self
            .fsm
            .tick(ctx, self.agent, world, &mut self.blackboard)
        {
            self.fail(ctx, world, err);
        }
    }

    /// Enter Patrol now rather than on the first tick.
    ///
    /// Does nothing once a state is active, or while the brain is halted, dead or has no
    /// resolvable position. A state set without Patrol halts the brain.
    pub fn start(&mut self, ctx: &TickContext, world: &mut W) {
        if self.halted
            || self.blackboard.is_dead
            || self.fsm.current_kind().is_some()
            || world.position(self.agent).is_none()
        {
            return;
        }
        if let Err(err) = self.fsm.change(
            StateKind::Patrol,
            ctx,
            self.agent,
            world,
            &mut self.blackboard,
        ) {
            self.fail(ctx, world, err);
        }
    }

    /// First dead tick: leave the active state, drop combat intent, stand still.
    fn on_death(&mut self, ctx: &TickContext, world: &mut W) {
        self.dead_stopped = true;
        let from = self
            .fsm
            .stop(ctx, self.agent, world, &mut self.blackboard);
        let bb = &mut self.blackboard;
        bb.is_attacking = false;
        bb.is_chasing = false;
        bb.in_combat = false;
        bb.request_attack = false;
        world.stop(self.agent);
        self.last_decision = Some(Decision::idle());
        tracing::debug!(
            agent = %self.agent,
            from = from.map_or("none", StateKind::as_str),
            "agent died"
        );
    }

    fn apply(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        decision: &Decision,
    ) -> Result<(), FsmError> {
        let target = decision
            .action
            .state_kind()
            .unwrap_or(self.config.decision.idle_fallback);
        let from = self.fsm.current_kind();
        if from == Some(target) {
            return Ok(());
        }

        let reason = self
            .gate
            .evaluate(decision.action, from, &*world, &self.blackboard);
        if !reason.allows_switch() {
            tracing::trace!(agent = %self.agent, action = %decision.action, "switch held by dwell lock");
            return Ok(());
        }

        let outcome = self
            .fsm
            .change(target, ctx, self.agent, world, &mut self.blackboard)?;
        if outcome == ChangeOutcome::Unchanged {
            return Ok(());
        }
        self.gate.arm(self.config.decision.dwell_lock_secs);

        let from_str = from.map_or("none", StateKind::as_str);
        tracing::debug!(
            agent = %self.agent,
            from = from_str,
            to = %target,
            action = %decision.action,
            score = decision.score,
            ?reason,
            "state transition"
        );
        if reason == GateReason::Stuck {
            self.trace.emit(
                TraceEvent::new(ctx.tick, TAG_FORCED_EXIT)
                    .with_agent(self.agent)
                    .with_from(from_str)
                    .with_to(target.as_str()),
            );
        }
        self.trace.emit(
            TraceEvent::new(ctx.tick, TAG_TRANSITION)
                .with_agent(self.agent)
                .with_from(from_str)
                .with_to(target.as_str()),
        );

        // Passive detection was suppressed on the way home.
        if from == Some(StateKind::ReturnHome) && target == StateKind::Patrol {
            world.request_rescan(self.agent);
        }
        Ok(())
    }

    fn drain_inbox(&mut self, world: &W) {
        let mut inbox = std::mem::take(&mut self.inbox);
        for event in inbox.drain() {
            match event {
                SensorEvent::Perceived(e) => self.on_perceived(world, e),
                SensorEvent::AttackRange { actor, in_range } => {
                    self.on_attack_range(world, actor, in_range)
                }
            }
        }
        self.inbox = inbox;
    }

    fn on_perceived(&mut self, world: &W, e: PerceptionEvent) {
        let bb = &mut self.blackboard;
        match e.sense {
            Sense::Auditory => self.memory.on_hear(bb, e.position, e.strength),
            Sense::Visual => {
                let Some(actor) = e.actor else {
                    tracing::trace!(agent = %self.agent, "visual event without actor dropped");
                    return;
                };
                if e.is_lost_sight() {
                    self.memory.on_lost_sight(bb, actor, e.position);
                } else if self.fsm.is_in(StateKind::ReturnHome) {
                    tracing::trace!(agent = %self.agent, %actor, "sighting suppressed while returning home");
                } else {
                    self.memory.on_see(bb, world, actor, e.position, e.strength);
                }
            }
        }
    }

    fn on_attack_range(&mut self, world: &W, actor: ActorId, in_range: bool) {
        let bb = &mut self.blackboard;
        if in_range {
            if !world.is_valid(actor) {
                return;
            }
            bb.request_attack = true;
            if bb.target.is_none() && !self.fsm.is_in(StateKind::ReturnHome) {
                bb.target = Some(actor);
            }
        } else if bb.target.is_none() || bb.target == Some(actor) {
            bb.request_attack = false;
        }
    }

    fn fail(&mut self, ctx: &TickContext, world: &mut W, err: FsmError) {
        world.stop(self.agent);
        self.halt(ctx, &err.to_string());
    }

    fn halt(&mut self, ctx: &TickContext, why: &str) {
        if self.halted {
            return;
        }
        self.halted = true;
        tracing::error!(agent = %self.agent, reason = why, "brain halted");
        self.trace.emit(
            TraceEvent::new(ctx.tick, TAG_HALT)
                .with_agent(self.agent)
                .with_to(why.to_owned()),
        );
    }
}

fn sanitize(agent: ActorId, config: &NpcConfig) -> NpcConfig {
    for issue in config.issues() {
        tracing::warn!(%agent, %issue, "npc config clamped");
    }
    config.sanitized()
}

/// Tick every brain in stable id order.
pub fn tick_brains<W>(ctx: &TickContext, world: &mut W, brains: &mut [Brain<W>])
where
    W: NpcWorld + 'static,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(ctx, world);
    }
}
