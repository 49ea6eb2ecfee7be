//! Tracing primitives for flee planning.
//!
//! Events are recorded into the agent's blackboard scratch so tooling can replay a decision
//! cycle after the fact. Every event is also forwarded to `tracing` at `TRACE` level.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, record, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};
