use npc_core::Vec2;
use serde::{Deserialize, Serialize};

use crate::sensors::SensorConfig;

/// Where the scripted player is at time `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub t: f32,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Noise {
    pub t: f32,
    pub position: Vec2,
    pub loudness: f32,
}

/// Something happening to one NPC, addressed by its index in `npc_homes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpcEvent {
    pub t: f32,
    pub npc: usize,
}

/// A scripted encounter between one player and a handful of NPCs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub duration_secs: f32,
    pub npc_homes: Vec<Vec2>,
    pub player_path: Vec<Keyframe>,
    pub noises: Vec<Noise>,
    /// The player hits these NPCs (ranged, so distance does not matter).
    pub hits: Vec<NpcEvent>,
    pub deaths: Vec<NpcEvent>,
    pub sensors: SensorConfig,
    pub attack_range: f32,
    pub attack_enter_range: f32,
    pub attack_cooldown_secs: f32,
}

impl Default for Scenario {
    /// Noise, approach, melee, a long kite past the leash, a parting shot, a second approach.
    fn default() -> Self {
        let key = |t: f32, x: f32, y: f32| Keyframe {
            t,
            position: Vec2::new(x, y),
        };
        let noise = |t: f32| Noise {
            t,
            position: Vec2::new(-250.0, 0.0),
            loudness: 1.0,
        };
        Self {
            name: "ambush".to_owned(),
            duration_secs: 40.0,
            npc_homes: vec![Vec2::ZERO],
            player_path: vec![
                key(0.0, -400.0, 0.0),
                key(3.0, -400.0, 0.0),
                key(6.0, -100.0, 0.0),
                key(10.0, -100.0, 0.0),
                key(16.0, -900.0, 0.0),
                key(24.0, -900.0, 0.0),
                key(32.0, -60.0, 40.0),
            ],
            noises: vec![noise(1.0), noise(1.5), noise(2.0)],
            hits: vec![NpcEvent { t: 19.0, npc: 0 }],
            deaths: vec![NpcEvent { t: 37.0, npc: 0 }],
            sensors: SensorConfig::default(),
            attack_range: 30.0,
            attack_enter_range: 24.0,
            attack_cooldown_secs: 1.2,
        }
    }
}

impl Scenario {
    /// Piecewise-linear player position. Clamps outside the keyframe range.
    pub fn player_position(&self, t: f32) -> Option<Vec2> {
        let first = self.player_path.first()?;
        if t <= first.t {
            return Some(first.position);
        }
        for pair in self.player_path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= 0.0 {
                    return Some(b.position);
                }
                let k = (t - a.t) / span;
                return Some(a.position + (b.position - a.position) * k);
            }
        }
        self.player_path.last().map(|k| k.position)
    }

    pub fn ticks(&self, dt: f32) -> u64 {
        if dt <= 0.0 || !self.duration_secs.is_finite() {
            return 0;
        }
        (self.duration_secs.max(0.0) / dt).round() as u64
    }
}

/// `true` when `t` falls in the frame `[now, now + dt)`.
pub fn fires(t: f32, now: f32, dt: f32) -> bool {
    t >= now && t < now + dt
}
