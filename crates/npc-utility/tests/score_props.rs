use npc_core::{Blackboard, LeashConfig, Vec2};
use npc_utility::{update_leash, Action, ScoreInputs, UtilityEngine};
use proptest::prelude::*;

fn blackboard() -> impl Strategy<Value = Blackboard> {
    (
        0.0f32..=1.0,
        0.0f32..=1.0,
        0.0f32..3.0,
        0.0f32..2.0,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(s, dmg, lose, ret, leash, lkp, req)| {
            let mut bb = Blackboard::default();
            bb.suspicion = s;
            bb.damage_awareness = dmg;
            bb.lose_sight_timer = lose;
            bb.retaliate_timer = ret;
            bb.leash_broken = leash;
            bb.has_last_known_position = lkp;
            bb.request_attack = req;
            bb
        })
}

proptest! {
    #[test]
    fn every_score_is_a_unit_value(
        bb in blackboard(),
        target in any::<bool>(),
        in_range in any::<bool>(),
        distance in 0.0f32..5_000.0,
    ) {
        let engine = UtilityEngine::new(Vec2::ZERO, 400.0);
        let inputs = ScoreInputs { has_valid_target: target, target_in_range: in_range, distance_home: distance };
        let scores = engine.score(&bb, &inputs);

        for action in Action::PRIORITY {
            let v = scores.get(action);
            prop_assert!((0.0..=1.0).contains(&v), "{action} scored {v}");
        }
        let (best, score) = scores.best();
        prop_assert!(Action::PRIORITY.iter().all(|&a| scores.get(a) <= score));
        if score == 0.0 {
            prop_assert_eq!(best, Action::Idle);
        }
    }

    #[test]
    fn broken_leash_never_chases(bb in blackboard(), target in any::<bool>(), distance in 0.0f32..5_000.0) {
        let mut bb = bb;
        bb.leash_broken = true;
        let engine = UtilityEngine::new(Vec2::ZERO, 400.0);
        let inputs = ScoreInputs { has_valid_target: target, target_in_range: false, distance_home: distance };
        let scores = engine.score(&bb, &inputs);

        prop_assert_eq!(scores.chase, 0.0);
        prop_assert_eq!(scores.investigate, 0.0);
        prop_assert_eq!(scores.return_home, 1.0);
    }

    #[test]
    fn leash_holds_inside_the_band(start in any::<bool>(), d in 250.5f32..699.5) {
        let leash = LeashConfig::default();
        let mut bb = Blackboard::new(&leash);
        bb.leash_broken = start;

        prop_assert_eq!(update_leash(&mut bb, d), None);
        prop_assert_eq!(bb.leash_broken, start);
    }
}
