// src/verify/mod.rs
// =============================================================================
// This module verifies a set of links concurrently.
//
// Features:
// - Fixed-size worker pool (no auto-scaling)
// - Exactly one outcome per link, however the workers interleave
// - Two result streams: reachable and unreachable
// - Streams close only after every worker has finished
//
// Rust concepts:
// - tokio tasks: lightweight threads scheduled by the async runtime
// - Channels: the only way workers talk to each other and to the caller
// =============================================================================

mod outcome;
mod pool;

pub use outcome::{Outcome, OutcomeCollection};
pub use pool::{spawn_verification, verify, verify_with, Verification};
