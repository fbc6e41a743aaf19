//! Native platform: system clock and a `tokio` local task spawner.

pub mod native_clock;
pub mod spawner;

pub use native_clock::NativeClock;
pub use spawner::TokioSpawner;
