// src/verify/pool.rs
// =============================================================================
// This module runs the link probes on a fixed-size pool of worker tasks.
//
// How it works:
// 1. Spawn exactly `worker_count` workers, all sharing one work queue
// 2. Put every link on the queue, then close it
// 3. Each worker claims links one at a time, probes them, and sends the
//    Outcome to either the "reachable" or the "unreachable" channel
// 4. A barrier task waits for every worker to finish and only then drops
//    the last senders, which closes both outcome channels
// 5. The caller reads both channels until they are closed
//
// Guarantee: every link submitted produces exactly one Outcome.
// - The queue hands each link to exactly one worker
// - Workers only exit once the queue is closed AND empty
// - The outcome channels cannot close while any worker is still running
//
// Rust concepts:
// - tokio::sync::mpsc: async channels (many senders, one receiver)
// - Arc<Mutex<Receiver>>: lets many workers share one receiver
// - JoinHandle: a handle to await a spawned task's result
// =============================================================================

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::outcome::{Outcome, OutcomeCollection};
use crate::checker::{probe, CheckError, HttpClient, LinkClient, LinkStatus, ProbeConfig};

type WorkQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// A running verification.
///
/// Both streams end (return `None`) once every worker has finished.
pub struct Verification {
    reachable: mpsc::Receiver<Outcome>,
    unreachable: mpsc::Receiver<Outcome>,
    barrier: JoinHandle<Result<(), CheckError>>,
}

impl Verification {
    /// Next reachable outcome, or None once the run is done
    pub async fn next_reachable(&mut self) -> Option<Outcome> {
        self.reachable.recv().await
    }

    /// Next unreachable outcome, or None once the run is done
    pub async fn next_unreachable(&mut self) -> Option<Outcome> {
        self.unreachable.recv().await
    }

    /// Drains both streams to exhaustion and waits for the barrier.
    ///
    /// Fails with `CheckError::Worker` if a worker panicked, since its
    /// outcome would otherwise be silently missing.
    pub async fn collect(mut self) -> Result<OutcomeCollection, CheckError> {
        let mut collection = OutcomeCollection::default();

        // The channels are sized to hold every outcome, so workers never wait
        // on us and draining one stream before the other cannot deadlock.
        while let Some(outcome) = self.reachable.recv().await {
            collection.reachable.push(outcome.link);
        }
        while let Some(outcome) = self.unreachable.recv().await {
            collection.unreachable.push(outcome.link);
        }

        self.barrier.await??;
        Ok(collection)
    }
}

// Verifies every link with the real HTTP client
//
// This is the entry point used by main.rs.
pub async fn verify(links: &[String], config: &ProbeConfig) -> Result<OutcomeCollection, CheckError> {
    let client = Arc::new(HttpClient::new(config)?);
    verify_with(links, config, client).await
}

// Same as verify(), but with any LinkClient (used by tests)
pub async fn verify_with(
    links: &[String],
    config: &ProbeConfig,
    client: Arc<dyn LinkClient>,
) -> Result<OutcomeCollection, CheckError> {
    let collection = spawn_verification(links, config, client).await?.collect().await?;

    tracing::info!(
        reachable = collection.reachable.len(),
        unreachable = collection.unreachable.len(),
        "verification finished"
    );
    Ok(collection)
}

// Starts the worker pool and returns a handle to the two outcome streams
//
// Parameters:
//   links: the deduplicated links to check
//   config: shared probe settings (worker_count must be at least 1)
//   client: the network client every worker probes with
//
// Returns: Err(CheckError::Configuration) before any worker starts if
// worker_count is 0.
pub async fn spawn_verification(
    links: &[String],
    config: &ProbeConfig,
    client: Arc<dyn LinkClient>,
) -> Result<Verification, CheckError> {
    // Zero workers could never drain a non-empty queue and would hang forever
    if config.worker_count == 0 {
        return Err(CheckError::Configuration {
            worker_count: config.worker_count,
        });
    }

    let capacity = links.len().max(1);
    let (reachable_tx, reachable_rx) = mpsc::channel(capacity);
    let (unreachable_tx, unreachable_rx) = mpsc::channel(capacity);

    if links.is_empty() {
        tracing::debug!("no links to verify");
        return Ok(Verification {
            reachable: reachable_rx,
            unreachable: unreachable_rx,
            // Senders are dropped here, so both streams are already closed
            barrier: tokio::spawn(async { Ok(()) }),
        });
    }

    let (work_tx, work_rx) = mpsc::channel::<String>(capacity);
    let queue: WorkQueue = Arc::new(Mutex::new(work_rx));

    tracing::debug!(
        workers = config.worker_count,
        links = links.len(),
        "dispatching"
    );

    // All workers exist before the first link is queued
    let workers: Vec<JoinHandle<()>> = (0..config.worker_count)
        .map(|id| {
            tokio::spawn(run_worker(
                id,
                queue.clone(),
                client.clone(),
                reachable_tx.clone(),
                unreachable_tx.clone(),
            ))
        })
        .collect();

    for link in links {
        // Only fails if every worker already died; the barrier reports that
        if work_tx.send(link.clone()).await.is_err() {
            break;
        }
    }
    // Close the queue: workers finish what is left, then exit
    drop(work_tx);

    tracing::debug!("queue closed, draining");

    let barrier = tokio::spawn(async move {
        let results = futures::future::join_all(workers).await;

        // Every worker has returned, so no more outcomes can be produced.
        // Dropping the original senders closes both streams.
        drop(reachable_tx);
        drop(unreachable_tx);
        tracing::debug!("all workers finished, streams closed");

        for result in results {
            result?;
        }
        Ok::<(), CheckError>(())
    });

    Ok(Verification {
        reachable: reachable_rx,
        unreachable: unreachable_rx,
        barrier,
    })
}

// One worker: claim a link, probe it, report, repeat until the queue is done
async fn run_worker(
    id: usize,
    queue: WorkQueue,
    client: Arc<dyn LinkClient>,
    reachable: mpsc::Sender<Outcome>,
    unreachable: mpsc::Sender<Outcome>,
) {
    let mut checked = 0usize;

    loop {
        // The lock is held only while claiming, never during the probe
        let next = queue.lock().await.recv().await;
        let Some(link) = next else {
            break;
        };

        let status = probe(client.as_ref(), &link).await;
        let stream = match status {
            LinkStatus::Reachable => &reachable,
            LinkStatus::Unreachable => &unreachable,
        };
        checked += 1;

        // The Verification handle was dropped; nobody wants the results
        if stream.send(Outcome { link, status }).await.is_err() {
            break;
        }
    }

    tracing::debug!(worker = id, checked, "worker finished");
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not buffer_unordered like a simple stream of futures?
//    - buffer_unordered also bounds concurrency, but all futures run on one
//      task. Here each worker is its own tokio task, so probes can run on
//      several threads at once.
//
// 2. Why wrap the queue receiver in Arc<Mutex<...>>?
//    - tokio's mpsc has exactly one receiver
//    - The Mutex lets workers take turns receiving; whoever gets the lock
//      gets the next link, so no link is handed out twice
//
// 3. Why does the barrier drop the senders instead of the workers?
//    - A channel closes when its last Sender is dropped
//    - Workers hold clones; the barrier holds the originals
//    - The barrier only drops them after join_all() returns, so a reader can
//      never see "closed" while a worker might still send
//
// 4. What does `??` mean?
//    - The first ? handles the JoinError (the task panicked)
//    - The second ? handles the Result the task itself returned
// -----------------------------------------------------------------------------
