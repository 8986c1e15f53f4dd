use npc_core::{ActorId, Blackboard, NpcWorld, StateKind, TickContext};

/// Capability every behavior state provides.
///
/// `enter` sets or clears the flags the state owns. `tick` issues at most one desired-velocity
/// command or one attack command. `exit` stops motion the state started. Repeated `tick` calls
/// must be safe, and `tick` must not assume `enter` ran just before it.
pub trait NpcState<W>: 'static
where
    W: NpcWorld + 'static,
{
    fn kind(&self) -> StateKind;

    fn enter(
        &mut self,
        _ctx: &TickContext,
        _agent: ActorId,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    fn exit(
        &mut self,
        _ctx: &TickContext,
        _agent: ActorId,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    fn tick(&mut self, ctx: &TickContext, agent: ActorId, world: &mut W, blackboard: &mut Blackboard);
}
