use futures::future::LocalBoxFuture;

use basketsync_core::traits::executor::TaskSpawner;

/// Runs tasks on the browser microtask queue.
#[derive(Default)]
pub struct WasmSpawner;

impl TaskSpawner for WasmSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
