//! Browser platform: `Date.now()` clock, `spawn_local` executor, console logging.

pub mod wasm_clock;
pub mod spawner;
pub mod logging;

pub use wasm_clock::WasmClock;
pub use spawner::WasmSpawner;
