// src/checker/mod.rs
// =============================================================================
// This module contains the link extraction and single-link checking logic.
//
// Submodules:
// - extract: Finds http(s) links in raw document text
// - http: Checks whether one link is reachable (HEAD, then GET)
// - error: Error types shared with the verification engine
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod error;
mod extract;
mod http;

// Re-export public items so callers can write `checker::extract_links()`
// instead of `checker::extract::extract_links()`
pub use error::{CheckError, ProbeError};
pub use extract::extract_links;
pub use http::{
    probe, HttpClient, LinkClient, LinkStatus, ProbeConfig, DEFAULT_MAX_REDIRECTS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WORKER_COUNT,
};
