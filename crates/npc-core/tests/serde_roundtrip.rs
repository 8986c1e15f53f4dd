#![cfg(feature = "serde")]

use npc_core::{ActorId, NpcConfig, PerceptionEvent, SensorEvent, StateKind, Vec2};

#[test]
fn config_roundtrips_through_json() {
    let mut cfg = NpcConfig::default();
    cfg.decision.idle_fallback = StateKind::ReturnHome;
    cfg.patrol.radius = 123.0;

    let json = serde_json::to_string(&cfg).unwrap();
    let back: NpcConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, cfg);
}

#[test]
fn partial_config_fills_in_defaults() {
    let json = r#"{ "leash": { "enter_distance": 900.0 }, "movement": { "run_speed": 140.0 } }"#;
    let cfg: NpcConfig = serde_json::from_str(json).unwrap();

    assert_eq!(cfg.leash.enter_distance, 900.0);
    assert_eq!(cfg.leash.exit_distance, 250.0);
    assert_eq!(cfg.movement.run_speed, 140.0);
    assert_eq!(cfg.movement.walk_speed, 70.0);
    assert_eq!(cfg.memory, NpcConfig::default().memory);
}

#[test]
fn sensor_events_roundtrip() {
    let events = vec![
        SensorEvent::from(PerceptionEvent::seen(ActorId(3), Vec2::new(1.0, 2.0), 0.5)),
        SensorEvent::AttackRange {
            actor: ActorId(3),
            in_range: true,
        },
    ];

    let json = serde_json::to_string(&events).unwrap();
    let back: Vec<SensorEvent> = serde_json::from_str(&json).unwrap();

    assert_eq!(back, events);
}

fn numbers(value: &serde_json::Value, path: &str, out: &mut Vec<(String, f64)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                numbers(child, &path, out);
            }
        }
        serde_json::Value::Number(n) => out.push((path.to_string(), n.as_f64().unwrap())),
        _ => {}
    }
}

#[test]
fn sanitizing_reaches_every_scalar_field() {
    let mut json = serde_json::to_value(NpcConfig::default()).unwrap();
    fn negate(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => map.values_mut().for_each(negate),
            serde_json::Value::Number(_) => *value = serde_json::json!(-1.0),
            _ => {}
        }
    }
    negate(&mut json);
    let cfg: NpcConfig = serde_json::from_value(json).unwrap();

    let mut fields = Vec::new();
    numbers(&serde_json::to_value(cfg).unwrap(), "", &mut fields);
    let negatives = cfg
        .issues()
        .iter()
        .filter(|e| matches!(e, npc_core::ConfigError::NegativeValue { .. }))
        .count();
    assert_eq!(negatives, fields.len());

    let mut fixed = Vec::new();
    numbers(&serde_json::to_value(cfg.sanitized()).unwrap(), "", &mut fixed);
    for (field, value) in fixed {
        match field.as_str() {
            "leash.enter_distance" => assert_eq!(value, 700.0),
            "leash.exit_distance" => assert_eq!(value, 250.0),
            _ => assert_eq!(value, 0.0, "{field}"),
        }
    }
}
