use npc_core::Blackboard;

/// A leash flip produced by [`update_leash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeashChange {
    Broken,
    Restored,
}

/// One hysteresis step against the blackboard's enter/exit thresholds.
///
/// Breaks at `distance_home >= enter`, restores only at `distance_home <= exit`. Anything in
/// between keeps the previous state.
pub fn update_leash(bb: &mut Blackboard, distance_home: f32) -> Option<LeashChange> {
    if !distance_home.is_finite() {
        return None;
    }
    if !bb.leash_broken && distance_home >= bb.leash_enter_distance {
        bb.leash_broken = true;
        Some(LeashChange::Broken)
    } else if bb.leash_broken && distance_home <= bb.leash_exit_distance {
        bb.leash_broken = false;
        Some(LeashChange::Restored)
    } else {
        None
    }
}
