//! Tooling primitives for NPC decision making.
//!
//! Lightweight and engine-agnostic: brains record [`TraceEvent`]s, tooling renders them later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{TraceEvent, TraceLog, TraceRecorder, TraceSink, VecTraceSink};
