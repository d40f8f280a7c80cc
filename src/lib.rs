// src/lib.rs
// =============================================================================
// Library root: the link-checking core, used by the binary in main.rs.
//
// - checker: extracts links from text and probes a single link
// - verify: runs the probes on a fixed-size worker pool
// =============================================================================

pub mod checker;
pub mod verify;
