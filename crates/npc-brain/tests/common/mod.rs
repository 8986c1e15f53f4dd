#![allow(dead_code)]

use std::collections::BTreeMap;

use npc_core::{ActorId, CombatWorld, MovementWorld, PerceptionWorld, TickContext, Vec2, WorldView};

pub const NPC: ActorId = ActorId(1);
pub const PLAYER: ActorId = ActorId(2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Velocity(ActorId, Vec2),
    Stop(ActorId),
    Attack(ActorId, ActorId),
    Rescan(ActorId),
}

/// Kinematic test host: records every command and integrates velocities on `step`.
#[derive(Debug, Default)]
pub struct TestWorld {
    pub positions: BTreeMap<ActorId, Vec2>,
    pub velocities: BTreeMap<ActorId, Vec2>,
    pub commands: Vec<Command>,
    pub can_attack: bool,
    pub in_range: bool,
    pub attack_range: f32,
    pub attack_enter_range: f32,
    /// Agents listed here never move, whatever they are told.
    pub pinned: Vec<ActorId>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            can_attack: true,
            in_range: true,
            attack_range: 30.0,
            attack_enter_range: 24.0,
            ..Self::default()
        }
    }

    pub fn with_actor(mut self, id: ActorId, pos: Vec2) -> Self {
        self.positions.insert(id, pos);
        self
    }

    pub fn place(&mut self, id: ActorId, pos: Vec2) {
        self.positions.insert(id, pos);
    }

    pub fn remove(&mut self, id: ActorId) {
        self.positions.remove(&id);
        self.velocities.remove(&id);
    }

    pub fn pos(&self, id: ActorId) -> Vec2 {
        self.positions.get(&id).copied().unwrap_or_default()
    }

    /// Integrate desired velocities over `dt`.
    pub fn step(&mut self, dt: f32) {
        for (id, v) in &self.velocities {
            if self.pinned.contains(id) {
                continue;
            }
            if let Some(p) = self.positions.get_mut(id) {
                *p += *v * dt;
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn last_velocity(&self, id: ActorId) -> Option<Vec2> {
        self.commands.iter().rev().find_map(|c| match *c {
            Command::Velocity(a, v) if a == id => Some(v),
            _ => None,
        })
    }

    pub fn attacks(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Attack(..)))
            .count()
    }
}

impl WorldView for TestWorld {
    fn is_valid(&self, actor: ActorId) -> bool {
        self.positions.contains_key(&actor)
    }

    fn position(&self, actor: ActorId) -> Option<Vec2> {
        self.positions.get(&actor).copied()
    }

    fn velocity(&self, actor: ActorId) -> Vec2 {
        self.velocities.get(&actor).copied().unwrap_or_default()
    }
}

impl MovementWorld for TestWorld {
    fn set_desired_velocity(&mut self, agent: ActorId, velocity: Vec2) {
        self.velocities.insert(agent, velocity);
        self.commands.push(Command::Velocity(agent, velocity));
    }

    fn stop(&mut self, agent: ActorId) {
        self.velocities.insert(agent, Vec2::ZERO);
        self.commands.push(Command::Stop(agent));
    }
}

impl CombatWorld for TestWorld {
    fn can_attack(&self, _agent: ActorId, _target: ActorId) -> bool {
        self.can_attack
    }

    fn is_in_range(&self, _agent: ActorId, _target: ActorId) -> bool {
        self.in_range
    }

    fn attack_range(&self, _agent: ActorId) -> f32 {
        self.attack_range
    }

    fn attack_enter_range(&self, _agent: ActorId) -> f32 {
        self.attack_enter_range
    }

    fn do_attack(&mut self, agent: ActorId, target: ActorId) {
        self.commands.push(Command::Attack(agent, target));
    }
}

impl PerceptionWorld for TestWorld {
    fn request_rescan(&mut self, agent: ActorId) {
        self.commands.push(Command::Rescan(agent));
    }
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1, 7)
}
