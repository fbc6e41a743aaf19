use futures::future::LocalBoxFuture;

use basketsync_core::traits::executor::TaskSpawner;

/// Spawns onto the current `tokio::task::LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` (or a task of that set).
pub struct TokioSpawner;

impl TaskSpawner for TokioSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        // Detached; main drains the LocalSet before exiting.
        drop(tokio::task::spawn_local(task));
    }
}
