// src/checker/error.rs
// =============================================================================
// Error types shared by the checker and the verification engine.
//
// Two kinds of failure exist in this tool:
// - Structural errors (CheckError): the run cannot continue at all.
//   These bubble up to main.rs and end the process with exit code 2.
// - Probe errors (ProbeError): a single request failed. These never leave
//   the prober - they are turned into LinkStatus::Unreachable.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display and Error impls for us
// - #[from]: lets the ? operator convert the inner error automatically
// =============================================================================

use thiserror::Error;

/// Errors that abort a whole run before (or instead of) producing results.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The link pattern did not compile
    #[error("failed to compile link pattern: {0}")]
    Extraction(#[from] regex::Error),

    /// The worker pool was asked to run with no workers
    #[error("invalid worker count {worker_count}: at least one worker is required")]
    Configuration { worker_count: usize },

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A worker task panicked, so some outcomes may be missing
    #[error("verification worker stopped unexpectedly: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Failure of a single HEAD or GET request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Transport(error.to_string())
        }
    }
}
