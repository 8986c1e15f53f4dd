mod common;

use common::{TestWorld, NPC, PLAYER};
use npc_brain::gate::is_stuck;
use npc_brain::{Gate, GateReason};
use npc_core::{Blackboard, StateKind, Vec2};
use npc_utility::Action;

fn armed() -> Gate {
    let mut gate = Gate::default();
    gate.arm(0.2);
    assert!(gate.is_locked());
    gate
}

fn world() -> TestWorld {
    TestWorld::new()
        .with_actor(NPC, Vec2::ZERO)
        .with_actor(PLAYER, Vec2::new(40.0, 0.0))
}

#[test]
fn urgent_actions_pass_an_armed_lock() {
    let gate = armed();
    let bb = Blackboard::default();

    for action in [Action::Chase, Action::Attack] {
        let reason = gate.evaluate(action, Some(StateKind::Investigate), &world(), &bb);
        assert_eq!(reason, GateReason::Urgent);
        assert!(reason.allows_switch());
    }
}

#[test]
fn return_home_passes_only_with_a_broken_leash() {
    let gate = armed();
    let mut bb = Blackboard::default();

    assert_eq!(
        gate.evaluate(Action::ReturnHome, Some(StateKind::Patrol), &world(), &bb),
        GateReason::Locked
    );

    bb.leash_broken = true;
    assert_eq!(
        gate.evaluate(Action::ReturnHome, Some(StateKind::Patrol), &world(), &bb),
        GateReason::LeashReturn
    );
}

#[test]
fn chase_without_target_grace_or_evidence_is_stuck() {
    let gate = armed();
    let mut bb = Blackboard::default();
    let w = world();

    assert!(is_stuck(StateKind::Chase, &w, &bb));
    assert_eq!(
        gate.evaluate(Action::Patrol, Some(StateKind::Chase), &w, &bb),
        GateReason::Stuck
    );

    bb.remember_position(Vec2::new(40.0, 0.0));
    assert!(!is_stuck(StateKind::Chase, &w, &bb));
    assert_eq!(
        gate.evaluate(Action::Investigate, Some(StateKind::Chase), &w, &bb),
        GateReason::Locked
    );

    bb.has_last_known_position = false;
    bb.lose_sight_timer = 0.5;
    assert!(!is_stuck(StateKind::Chase, &w, &bb));
}

#[test]
fn investigate_with_a_visible_target_is_stuck() {
    let gate = armed();
    let mut bb = Blackboard::default();
    let mut w = world();

    assert_eq!(
        gate.evaluate(Action::Patrol, Some(StateKind::Investigate), &w, &bb),
        GateReason::Locked
    );

    bb.target = Some(PLAYER);
    assert!(is_stuck(StateKind::Investigate, &w, &bb));
    assert_eq!(
        gate.evaluate(Action::Patrol, Some(StateKind::Investigate), &w, &bb),
        GateReason::Stuck
    );

    // A target that no longer resolves does not count.
    w.remove(PLAYER);
    assert!(!is_stuck(StateKind::Investigate, &w, &bb));
}

#[test]
fn other_states_never_report_stuck() {
    let mut bb = Blackboard::default();
    bb.target = Some(PLAYER);
    let w = world();

    for kind in [StateKind::Patrol, StateKind::Attack, StateKind::ReturnHome] {
        assert!(!is_stuck(kind, &w, &bb));
    }
    assert_eq!(
        armed().evaluate(Action::Investigate, None, &w, &bb),
        GateReason::Locked
    );
}

#[test]
fn lock_runs_out_and_unlocks() {
    let mut gate = armed();
    let bb = Blackboard::default();

    gate.advance(0.1);
    let held = gate.evaluate(Action::Investigate, Some(StateKind::Patrol), &world(), &bb);
    assert_eq!(held, GateReason::Locked);
    assert!(!held.allows_switch());

    gate.advance(0.15);
    assert_eq!(gate.lock_remaining(), 0.0);
    assert_eq!(
        gate.evaluate(Action::Investigate, Some(StateKind::Patrol), &world(), &bb),
        GateReason::Unlocked
    );

    gate.advance(1.0);
    assert_eq!(gate.lock_remaining(), 0.0);
    gate.arm(-3.0);
    assert!(!gate.is_locked());
}
