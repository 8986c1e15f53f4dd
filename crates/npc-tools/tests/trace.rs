use npc_core::ActorId;
use npc_tools::{TraceEvent, TraceRecorder, VecTraceSink};

#[test]
fn disabled_recorder_drops_events() {
    let mut rec = TraceRecorder::new();
    assert!(!rec.is_enabled());

    rec.emit(TraceEvent::new(1, "transition"));

    assert!(rec.log().is_none());
}

#[test]
fn emit_writes_to_log_when_present() {
    let mut rec = TraceRecorder::new().with_log();

    rec.emit(
        TraceEvent::new(4, "transition")
            .with_agent(ActorId(9))
            .with_from("patrol")
            .with_to("chase"),
    );

    let log = rec.log().unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].tick, 4);
    assert_eq!(log.events[0].agent, 9);
    assert_eq!(log.events[0].from, "patrol");
    assert_eq!(log.events[0].to, "chase");
}

#[test]
fn emit_writes_to_both_log_and_sink() {
    let sink = VecTraceSink::new();
    let mut rec = TraceRecorder::new()
        .with_log()
        .with_sink(Box::new(sink.clone()));

    rec.emit(TraceEvent::new(2, "leash").with_to("broken"));
    rec.emit(TraceEvent::new(3, "transition"));

    assert_eq!(sink.len(), 2);
    let log = rec.take_log().unwrap();
    assert_eq!(log.with_tag("leash").count(), 1);
    assert!(rec.log().unwrap().events.is_empty());
}

#[test]
fn cloned_sinks_share_one_stream() {
    let sink = VecTraceSink::new();
    let mut a = TraceRecorder::new().with_sink(Box::new(sink.clone()));
    let mut b = TraceRecorder::new().with_sink(Box::new(sink.clone()));
    assert!(sink.is_empty());

    a.emit(TraceEvent::new(1, "transition").with_agent(ActorId(1)));
    b.emit(TraceEvent::new(1, "transition").with_agent(ActorId(2)));
    a.emit(TraceEvent::new(2, "leash").with_agent(ActorId(1)));

    let agents: Vec<u64> = sink.events().iter().map(|e| e.agent).collect();
    assert_eq!(agents, vec![1, 2, 1]);
    assert!(a.log().is_none());
}
