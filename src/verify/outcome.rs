// src/verify/outcome.rs
// Result types produced by the verification engine.

use serde::Serialize;

use crate::checker::LinkStatus;

/// The classification of exactly one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub link: String,
    pub status: LinkStatus,
}

/// Every outcome of a finished run, split by status.
///
/// Order inside each list follows the order in which workers finished,
/// not the order of the links in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCollection {
    pub reachable: Vec<String>,
    pub unreachable: Vec<String>,
}

impl OutcomeCollection {
    /// True when no link is unreachable
    pub fn is_clean(&self) -> bool {
        self.unreachable.is_empty()
    }

    pub fn total(&self) -> usize {
        self.reachable.len() + self.unreachable.len()
    }
}
