use std::collections::BTreeSet;

use npc_core::{ActorId, PerceptionEvent, SensorEvent, Vec2, WorldView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub vision_radius: f32,
    pub hearing_radius: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            vision_radius: 180.0,
            hearing_radius: 400.0,
        }
    }
}

/// Overlap-style sensors: events fire on enter and exit, not every frame.
///
/// Vision and the melee range area both behave like trigger volumes. A re-scan re-emits an
/// enter event for everything currently inside the vision volume.
#[derive(Debug, Clone)]
pub struct Sensors {
    config: SensorConfig,
    attack_radius: f32,
    visible: BTreeSet<(ActorId, ActorId)>,
    in_range: BTreeSet<(ActorId, ActorId)>,
}

impl Sensors {
    pub fn new(config: SensorConfig, attack_radius: f32) -> Self {
        Self {
            config,
            attack_radius,
            visible: BTreeSet::new(),
            in_range: BTreeSet::new(),
        }
    }

    pub fn scan<W: WorldView>(
        &mut self,
        world: &W,
        observer: ActorId,
        hostiles: &[ActorId],
        rescan: bool,
    ) -> Vec<SensorEvent> {
        let mut out = Vec::new();
        let Some(eye) = world.position(observer) else {
            return out;
        };

        for &other in hostiles {
            let key = (observer, other);
            let seen_pos = world.position(other);
            let distance = seen_pos.map(|p| eye.distance(p));

            let inside = distance.is_some_and(|d| d <= self.config.vision_radius);
            let was_inside = self.visible.contains(&key);
            match (seen_pos, inside, was_inside) {
                (Some(p), true, false) => {
                    self.visible.insert(key);
                    out.push(PerceptionEvent::seen(other, p, self.vision_strength(eye, p)).into());
                }
                (Some(p), true, true) if rescan => {
                    out.push(PerceptionEvent::seen(other, p, self.vision_strength(eye, p)).into());
                }
                (_, false, true) => {
                    self.visible.remove(&key);
                    let last = seen_pos.unwrap_or(eye);
                    out.push(PerceptionEvent::lost(other, last).into());
                }
                _ => {}
            }

            let near = distance.is_some_and(|d| d <= self.attack_radius);
            let was_near = self.in_range.contains(&key);
            if near != was_near {
                if near {
                    self.in_range.insert(key);
                } else {
                    self.in_range.remove(&key);
                }
                out.push(SensorEvent::AttackRange {
                    actor: other,
                    in_range: near,
                });
            }
        }
        out
    }

    /// A noise at `at` as heard from `observer`, if it carries that far.
    pub fn hear<W: WorldView>(
        &self,
        world: &W,
        observer: ActorId,
        at: Vec2,
        loudness: f32,
    ) -> Option<PerceptionEvent> {
        let ear = world.position(observer)?;
        let reach = self.config.hearing_radius * loudness.clamp(0.0, 1.0);
        let d = ear.distance(at);
        if reach <= 0.0 || d > reach {
            return None;
        }
        Some(PerceptionEvent::heard(at, loudness * (1.0 - 0.5 * d / reach)))
    }

    fn vision_strength(&self, eye: Vec2, seen: Vec2) -> f32 {
        if self.config.vision_radius <= 0.0 {
            return 1.0;
        }
        1.0 - 0.5 * (eye.distance(seen) / self.config.vision_radius).min(1.0)
    }
}
