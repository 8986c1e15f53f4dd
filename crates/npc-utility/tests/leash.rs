use npc_core::{Blackboard, LeashConfig};
use npc_utility::{update_leash, LeashChange};

#[test]
fn leash_holds_between_thresholds() {
    let mut bb = Blackboard::new(&LeashConfig::default());

    assert_eq!(update_leash(&mut bb, 400.0), None);
    assert!(!bb.leash_broken);

    assert_eq!(update_leash(&mut bb, 750.0), Some(LeashChange::Broken));
    assert!(bb.leash_broken);

    for d in [699.0, 400.0, 251.0, 650.0, 400.0] {
        assert_eq!(update_leash(&mut bb, d), None);
        assert!(bb.leash_broken, "leash restored early at d={d}");
    }

    assert_eq!(update_leash(&mut bb, 250.0), Some(LeashChange::Restored));
    assert!(!bb.leash_broken);

    assert_eq!(update_leash(&mut bb, 699.9), None);
    assert!(!bb.leash_broken);
}

#[test]
fn leash_breaks_exactly_at_enter_distance() {
    let mut bb = Blackboard::default();
    assert_eq!(update_leash(&mut bb, 700.0), Some(LeashChange::Broken));
}

#[test]
fn non_finite_distance_keeps_state() {
    let mut bb = Blackboard::default();
    bb.leash_broken = true;
    assert_eq!(update_leash(&mut bb, f32::NAN), None);
    assert!(bb.leash_broken);
}
