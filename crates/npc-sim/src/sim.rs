use std::collections::BTreeMap;

use npc_brain::{tick_brains, Brain, TAG_TRANSITION};
use npc_core::{ActorId, NpcConfig, StateKind, TickContext, WorldView};
use npc_tools::{TraceEvent, TraceRecorder, VecTraceSink};

use crate::scenario::{fires, Scenario};
use crate::sensors::Sensors;
use crate::world::SimWorld;

pub const PLAYER: ActorId = ActorId(0);

/// Per-NPC tallies collected over a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpcStats {
    pub transitions: usize,
    pub attacks: usize,
    pub time_in: BTreeMap<StateKind, f32>,
    pub final_state: Option<StateKind>,
    pub halted: bool,
}

/// One scenario run: world, sensors and a brain per NPC.
pub struct Simulation {
    scenario: Scenario,
    world: SimWorld,
    sensors: Sensors,
    brains: Vec<Brain<SimWorld>>,
    trace: VecTraceSink,
    attacks: BTreeMap<ActorId, usize>,
    time_in: BTreeMap<ActorId, BTreeMap<StateKind, f32>>,
    tick: u64,
    dt: f32,
    seed: u64,
}

impl Simulation {
    pub fn new(scenario: Scenario, config: NpcConfig, dt: f32, seed: u64) -> Self {
        let mut world = SimWorld::new(
            scenario.attack_range,
            scenario.attack_enter_range,
            scenario.attack_cooldown_secs,
        );
        if let Some(p) = scenario.player_position(0.0) {
            world.spawn(PLAYER, p);
        }

        let trace = VecTraceSink::new();
        let start = TickContext::new(0, dt, seed);
        let brains = scenario
            .npc_homes
            .iter()
            .enumerate()
            .map(|(i, &home)| {
                let id = npc_id(i);
                world.spawn(id, home);
                let recorder = TraceRecorder::new().with_sink(Box::new(trace.clone()));
                let mut brain = Brain::new(id, home, config, seed).with_trace(recorder);
                brain.start(&start, &mut world);
                brain
            })
            .collect();

        let sensors = Sensors::new(scenario.sensors, scenario.attack_range);
        Self {
            scenario,
            world,
            sensors,
            brains,
            trace,
            attacks: BTreeMap::new(),
            time_in: BTreeMap::new(),
            tick: 0,
            dt,
            seed,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn now(&self) -> f32 {
        self.tick as f32 * self.dt
    }

    pub fn run(&mut self) {
        for _ in 0..self.scenario.ticks(self.dt) {
            self.step();
        }
    }

    /// Advance one frame: script, sensors, brains, then physics.
    pub fn step(&mut self) {
        let now = self.now();
        let dt = self.dt;
        let ctx = TickContext::new(self.tick, dt, self.seed);

        self.run_script(now, dt);

        let rescans = self.world.take_rescans();
        let hostiles = if self.world.position(PLAYER).is_some() {
            vec![PLAYER]
        } else {
            Vec::new()
        };
        for brain in &mut self.brains {
            let rescan = rescans.contains(&brain.agent);
            for event in self.sensors.scan(&self.world, brain.agent, &hostiles, rescan) {
                brain.perceive(event);
            }
        }

        tick_brains(&ctx, &mut self.world, &mut self.brains);

        for (agent, target) in self.world.take_attacks() {
            tracing::info!(t = now, %agent, %target, "attack");
            *self.attacks.entry(agent).or_default() += 1;
        }
        for brain in &self.brains {
            if let Some(kind) = brain.current_state() {
                *self
                    .time_in
                    .entry(brain.agent)
                    .or_default()
                    .entry(kind)
                    .or_default() += dt;
            }
        }

        self.world.step(dt);
        self.tick += 1;
    }

    fn run_script(&mut self, now: f32, dt: f32) {
        if let Some(p) = self.scenario.player_position(now) {
            self.world.place(PLAYER, p);
        }

        for noise in self.scenario.noises.iter().filter(|n| fires(n.t, now, dt)) {
            tracing::info!(t = now, x = noise.position.x, y = noise.position.y, "noise");
            for brain in &mut self.brains {
                if let Some(event) =
                    self.sensors
                        .hear(&self.world, brain.agent, noise.position, noise.loudness)
                {
                    brain.perceive(event);
                }
            }
        }

        for hit in self.scenario.hits.iter().filter(|h| fires(h.t, now, dt)) {
            let Some(brain) = self.brains.iter_mut().find(|b| b.agent == npc_id(hit.npc)) else {
                tracing::warn!(npc = hit.npc, "scripted hit on unknown npc");
                continue;
            };
            let at = self.world.position(brain.agent).unwrap_or_default();
            tracing::info!(t = now, agent = %brain.agent, "player hits");
            brain.on_damaged(&self.world, Some(PLAYER), at);
        }

        for death in self.scenario.deaths.iter().filter(|d| fires(d.t, now, dt)) {
            if let Some(brain) = self.brains.iter_mut().find(|b| b.agent == npc_id(death.npc)) {
                tracing::info!(t = now, agent = %brain.agent, "npc dies");
                brain.blackboard.is_dead = true;
            }
        }
    }

    pub fn stats(&self) -> BTreeMap<ActorId, NpcStats> {
        let events = self.trace.events();
        self.brains
            .iter()
            .map(|b| {
                let transitions = events
                    .iter()
                    .filter(|e| e.agent == b.agent.stable_id() && e.tag == TAG_TRANSITION)
                    .count();
                let stats = NpcStats {
                    transitions,
                    attacks: self.attacks.get(&b.agent).copied().unwrap_or(0),
                    time_in: self.time_in.get(&b.agent).cloned().unwrap_or_default(),
                    final_state: b.current_state(),
                    halted: b.is_halted(),
                };
                (b.agent, stats)
            })
            .collect()
    }

    /// Every recorded trace event across all brains, in emission order.
    pub fn trace_events(&self) -> Vec<TraceEvent> {
        self.trace.events()
    }
}

fn npc_id(index: usize) -> ActorId {
    ActorId(index as u64 + 1)
}

#[cfg(test)]
mod tests {
    use npc_core::Vec2;

    use super::*;
    use crate::scenario::Keyframe;

    fn standoff() -> Scenario {
        Scenario {
            name: "standoff".to_owned(),
            duration_secs: 4.0,
            player_path: vec![Keyframe {
                t: 0.0,
                position: Vec2::new(60.0, 0.0),
            }],
            noises: Vec::new(),
            hits: Vec::new(),
            deaths: Vec::new(),
            ..Scenario::default()
        }
    }

    #[test]
    fn npc_engages_a_visible_player() {
        let mut sim = Simulation::new(standoff(), NpcConfig::default(), 0.1, 7);
        sim.run();

        let stats = sim.stats();
        let npc = &stats[&ActorId(1)];
        assert!(!npc.halted);
        assert!(npc.transitions >= 1);
        assert!(npc.attacks >= 1);
        assert!(npc.time_in.contains_key(&StateKind::Chase));
    }

    #[test]
    fn npcs_patrol_before_the_first_frame() {
        let sim = Simulation::new(standoff(), NpcConfig::default(), 0.1, 7);
        assert_eq!(sim.brains[0].current_state(), Some(StateKind::Patrol));
        assert!(sim.trace_events().is_empty());
    }

    #[test]
    fn same_seed_same_trace() {
        let run = || {
            let mut sim = Simulation::new(Scenario::default(), NpcConfig::default(), 0.1, 11);
            sim.run();
            sim.trace_events()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn dead_npc_stays_put() {
        let mut scenario = standoff();
        scenario.deaths = vec![crate::scenario::NpcEvent { t: 0.0, npc: 0 }];
        let mut sim = Simulation::new(scenario, NpcConfig::default(), 0.1, 7);
        sim.run();

        assert_eq!(sim.world.position(ActorId(1)), Some(Vec2::ZERO));
        assert_eq!(sim.stats()[&ActorId(1)].attacks, 0);
    }
}
