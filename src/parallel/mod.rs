//! Failure-isolated fan-out of independent async lookups
//!
//! Every task is spawned before any is awaited and raced against its own
//! deadline. The batch waits for each race to settle and always returns one
//! entry per task name: the value on success, otherwise the task's fallback
//! (or `None`). Nothing is raised to the caller.
//!
//! A task that loses its race is detached, not aborted. It keeps running on
//! the runtime until it finishes on its own and its result is discarded.

pub mod types;

pub use types::ParallelTask;

use crate::config::ParallelSettings;
use crate::errors::TaskFailure;
use crate::logger::{self, LogTag};
use futures::future::join_all;
use indexmap::IndexMap;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Duration, Instant};

/// Per-task timeout used by `parallel_fetch_default`
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Outcome of a batch, keyed by task name in submission order
pub type OutcomeMap<T> = IndexMap<String, Option<T>>;

/// Run `tasks` concurrently, each bounded by `timeout`
///
/// Must be called from within a Tokio runtime.
///
/// Task names are expected to be unique. A repeated name is not rejected:
/// outcomes are assembled in submission order, so the later-submitted task
/// overwrites the earlier one while keeping the first occurrence's position.
pub async fn parallel_fetch<T>(tasks: Vec<ParallelTask<T>>, timeout: Duration) -> OutcomeMap<T>
where
    T: Send + 'static,
{
    let start = Instant::now();
    let total = tasks.len();

    // Launch everything first; each deadline starts at its own spawn
    let (slots, races): (Vec<_>, Vec<_>) = tasks
        .into_iter()
        .map(|task| {
            let deadline = Instant::now() + timeout;
            let handle = tokio::spawn(task.operation);
            ((task.name, task.fallback), settle(handle, deadline, timeout))
        })
        .unzip();

    let settled = join_all(races).await;

    let mut outcomes = OutcomeMap::with_capacity(total);
    let mut succeeded = 0usize;

    for ((name, fallback), result) in slots.into_iter().zip(settled) {
        let value = match result {
            Ok(value) => {
                succeeded += 1;
                Some(value)
            }
            Err(failure) => {
                report_failure(&name, &failure, fallback.is_some());
                fallback
            }
        };

        if outcomes.insert(name.clone(), value).is_some() {
            logger::warning(
                LogTag::Parallel,
                &format!("Duplicate task name '{}', later task overwrote earlier outcome", name),
            );
        }
    }

    logger::debug(
        LogTag::Parallel,
        &format!(
            "Batch complete: {}/{} succeeded in {}ms",
            succeeded,
            total,
            start.elapsed().as_millis()
        ),
    );

    outcomes
}

/// `parallel_fetch` with `DEFAULT_TASK_TIMEOUT`
pub async fn parallel_fetch_default<T>(tasks: Vec<ParallelTask<T>>) -> OutcomeMap<T>
where
    T: Send + 'static,
{
    parallel_fetch(tasks, DEFAULT_TASK_TIMEOUT).await
}

/// `parallel_fetch` with the configured `parallel.default_timeout_ms`
pub async fn parallel_fetch_configured<T>(
    tasks: Vec<ParallelTask<T>>,
    settings: &ParallelSettings,
) -> OutcomeMap<T>
where
    T: Send + 'static,
{
    parallel_fetch(tasks, settings.default_timeout()).await
}

/// Race one spawned operation against its deadline
///
/// On timeout the join handle is dropped, which detaches the task.
async fn settle<T>(
    handle: JoinHandle<anyhow::Result<T>>,
    deadline: Instant,
    timeout: Duration,
) -> Result<T, TaskFailure> {
    match timeout_at(deadline, handle).await {
        Err(_) => Err(TaskFailure::TimedOut(timeout)),
        Ok(Err(join_error)) => Err(TaskFailure::Panicked(join_error.to_string())),
        Ok(Ok(Err(cause))) => Err(TaskFailure::Failed(cause)),
        Ok(Ok(Ok(value))) => Ok(value),
    }
}

fn report_failure(name: &str, failure: &TaskFailure, has_fallback: bool) {
    let substitute = if has_fallback { "fallback" } else { "none" };
    let message = if failure.is_timeout() {
        format!("{} timed out: {} (using {})", name, failure, substitute)
    } else {
        format!("{} failed: {} (using {})", name, failure, substitute)
    };
    logger::warning(LogTag::Parallel, &message);
}
