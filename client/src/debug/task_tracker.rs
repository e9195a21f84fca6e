//! Async task lifecycle tracking

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Tasks currently running
static ACTIVE_TASKS: AtomicUsize = AtomicUsize::new(0);
/// Monotonic id source
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);
/// Runtime after which a task is logged as slow
static SLOW_TASK_SECS: AtomicU64 = AtomicU64::new(30);

/// Get current number of active tasks
pub fn active_task_count() -> usize {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

pub fn set_slow_task_threshold(secs: u64) {
    SLOW_TASK_SECS.store(secs, Ordering::Relaxed);
}

/// Spawn an async task with lifecycle logging
///
/// # Arguments
///
/// * `name` - Task name for logging (e.g., "login", "session_restore")
/// * `future` - The async task to execute
///
/// # Example
///
/// ```rust,no_run
/// use signal_client::debug::spawn_tracked;
///
/// # async fn demo() {
/// let handle = spawn_tracked("ping", async { 1 + 1 });
/// assert_eq!(handle.await.unwrap(), 2);
/// # }
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::debug!(task = %name, task_id, "Task spawned");

    tokio::spawn(async move {
        let result = future.await;
        let duration = start.elapsed();
        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);

        if duration.as_secs() >= SLOW_TASK_SECS.load(Ordering::Relaxed) {
            tracing::warn!(
                task = %name,
                task_id,
                duration_ms = duration.as_millis(),
                "Task took very long"
            );
        } else {
            tracing::debug!(
                task = %name,
                task_id,
                duration_ms = duration.as_millis(),
                "Task completed"
            );
        }
        result
    })
}
