//! Bounded-concurrency gather for independent per-item model calls.
//!
//! Items within a stage may complete in any order, but the output sequence
//! is reassembled in original input order before the stage returns — order
//! is a correctness contract, since downstream cutoffs rely on positions.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Runs the given futures with at most `max_concurrent` in flight and
/// returns one settled outcome per input, in input order. A panicking
/// worker surfaces as `Err` at its own index and never touches its
/// siblings, so callers can substitute a per-item fallback.
pub(crate) async fn gather_settled<F, R>(
    futures: Vec<F>,
    max_concurrent: usize,
) -> Vec<Result<R, JoinError>>
where
    F: std::future::Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    let handles: Vec<_> = futures
        .into_iter()
        .map(|future| {
            let semaphore = Arc::clone(&semaphore);
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                future.await
            })
        })
        .collect();

    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        outputs.push(handle.await);
    }
    outputs
}

/// As `gather_settled`, but any worker panic fails the whole batch. For
/// stages where a panic can only mean a bug, not bad per-item input.
pub(crate) async fn gather_in_order<F, R>(futures: Vec<F>, max_concurrent: usize) -> Result<Vec<R>>
where
    F: std::future::Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    gather_settled(futures, max_concurrent)
        .await
        .into_iter()
        .map(|outcome| outcome.map_err(|e| anyhow!("screening worker panicked: {e}")))
        .collect()
}
