use futures::future::LocalBoxFuture;

/// Starts a detached task on the current thread's executor.
///
/// Browser builds hand tasks to `wasm_bindgen_futures::spawn_local`; native
/// builds use a `tokio` `LocalSet`.
pub trait TaskSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
