#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use flee_core::{Agent, BbKey, Blackboard, Scratch};

/// One recorded decision event.
///
/// `a` and `b` are tag-specific payload slots (step counts, path lengths, thresholds).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub cycle: u64,
    pub agent: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(cycle: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            cycle,
            agent: 0,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_agent(mut self, agent: u64) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink: Send {
    fn emit(&mut self, event: TraceEvent);
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

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().map(|e| e.tag.as_ref())
    }
}

/// Scratch key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0xF1EE_7ACE_0000_0001);
/// Scratch key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new(0xF1EE_7ACE_0000_0002);

/// Forward `event` to `tracing` and to whichever of [`TRACE_LOG`] / [`TRACE_SINK`] is installed.
pub fn emit(scratch: &mut Scratch, event: TraceEvent) {
    tracing::trace!(
        cycle = event.cycle,
        agent = event.agent,
        tag = %event.tag,
        a = event.a,
        b = event.b,
        "trace event"
    );
    if let Ok(Some(log)) = scratch.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Ok(Some(sink)) = scratch.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}

/// Emit an event stamped with the blackboard's current cycle and agent.
pub fn record<G: ?Sized, A: Agent>(
    blackboard: &mut Blackboard<G, A>,
    tag: &'static str,
    a: u64,
    b: u64,
) {
    let event = TraceEvent::new(blackboard.cycle(), tag)
        .with_agent(blackboard.agent().stable_id())
        .with_a(a)
        .with_b(b);
    emit(blackboard.scratch_mut(), event);
}
