//! Web boundary helpers. Service code does not import from here.

pub mod trace_ctx;
