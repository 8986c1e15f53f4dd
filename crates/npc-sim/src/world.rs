use std::collections::BTreeMap;

use npc_core::{ActorId, CombatWorld, MovementWorld, PerceptionWorld, Vec2, WorldView};

#[derive(Debug, Clone, Copy, Default)]
struct Body {
    position: Vec2,
    velocity: Vec2,
    cooldown: f32,
}

/// Kinematic host world: integrates desired velocities and owns melee cooldowns.
#[derive(Debug)]
pub struct SimWorld {
    bodies: BTreeMap<ActorId, Body>,
    attack_range: f32,
    attack_enter_range: f32,
    attack_cooldown: f32,
    rescans: Vec<ActorId>,
    attacks: Vec<(ActorId, ActorId)>,
}

impl SimWorld {
    pub fn new(attack_range: f32, attack_enter_range: f32, attack_cooldown: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            attack_range,
            attack_enter_range,
            attack_cooldown,
            rescans: Vec::new(),
            attacks: Vec::new(),
        }
    }

    pub fn spawn(&mut self, id: ActorId, position: Vec2) {
        self.bodies.insert(
            id,
            Body {
                position,
                ..Body::default()
            },
        );
    }

    /// Teleport without touching velocity. Used for scripted actors.
    pub fn place(&mut self, id: ActorId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = position;
        }
    }

    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.position += body.velocity * dt;
            body.cooldown = (body.cooldown - dt).max(0.0);
        }
    }

    pub fn take_rescans(&mut self) -> Vec<ActorId> {
        std::mem::take(&mut self.rescans)
    }

    pub fn take_attacks(&mut self) -> Vec<(ActorId, ActorId)> {
        std::mem::take(&mut self.attacks)
    }
}

impl WorldView for SimWorld {
    fn is_valid(&self, actor: ActorId) -> bool {
        self.bodies.contains_key(&actor)
    }

    fn position(&self, actor: ActorId) -> Option<Vec2> {
        self.bodies.get(&actor).map(|b| b.position)
    }

    fn velocity(&self, actor: ActorId) -> Vec2 {
        self.bodies.get(&actor).map_or(Vec2::ZERO, |b| b.velocity)
    }
}

impl MovementWorld for SimWorld {
    fn set_desired_velocity(&mut self, agent: ActorId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.velocity = if velocity.is_finite() {
                velocity
            } else {
                Vec2::ZERO
            };
        }
    }

    fn stop(&mut self, agent: ActorId) {
        self.set_desired_velocity(agent, Vec2::ZERO);
    }
}

impl CombatWorld for SimWorld {
    fn can_attack(&self, agent: ActorId, _target: ActorId) -> bool {
        self.bodies.get(&agent).is_some_and(|b| b.cooldown <= 0.0)
    }

    fn is_in_range(&self, agent: ActorId, target: ActorId) -> bool {
        match (self.position(agent), self.position(target)) {
            (Some(a), Some(t)) => a.distance(t) <= self.attack_range,
            _ => false,
        }
    }

    fn attack_range(&self, _agent: ActorId) -> f32 {
        self.attack_range
    }

    fn attack_enter_range(&self, _agent: ActorId) -> f32 {
        self.attack_enter_range
    }

    fn do_attack(&mut self, agent: ActorId, target: ActorId) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.cooldown = self.attack_cooldown;
        }
        self.attacks.push((agent, target));
    }
}

impl PerceptionWorld for SimWorld {
    fn request_rescan(&mut self, agent: ActorId) {
        self.rescans.push(agent);
    }
}
