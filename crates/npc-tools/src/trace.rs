#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use npc_core::ActorId;

/// One decision-level event: a transition, a leash flip, a forced exit.
///
/// Plain data so it can be recorded during simulation and inspected afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: u64,
    pub tag: Cow<'static, str>,
    pub from: Cow<'static, str>,
    pub to: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            agent: 0,
            tag: tag.into(),
            from: Cow::Borrowed(""),
            to: Cow::Borrowed(""),
        }
    }

    pub fn with_agent(mut self, agent: ActorId) -> Self {
        self.agent = agent.stable_id();
        self
    }

    pub fn with_from(mut self, from: impl Into<Cow<'static, str>>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_to(mut self, to: impl Into<Cow<'static, str>>) -> Self {
        self.to = to.into();
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// In-memory sink whose clones all append to one buffer, in emission order.
///
/// Hand a clone to each brain's recorder and read the merged stream from the original.
#[derive(Debug, Clone, Default)]
pub struct VecTraceSink {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl VecTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Per-brain trace endpoint: an optional in-memory log and an optional streaming sink.
///
/// Disabled by default; emitting into a disabled recorder is free.
#[derive(Default)]
pub struct TraceRecorder {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting events in memory.
    pub fn with_log(mut self) -> Self {
        self.log = Some(TraceLog::default());
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some() || self.sink.is_some()
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.as_mut().map(std::mem::take)
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.push(event.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl std::fmt::Debug for TraceRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceRecorder")
            .field("log", &self.log)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
