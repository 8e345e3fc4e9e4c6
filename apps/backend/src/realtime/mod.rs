//! Phase-cue delivery and the presentation stand-ins that consume it.

pub mod announcer;
pub mod broker;
pub mod client;

pub use broker::{CueBroker, CueStream, OverflowPolicy};
