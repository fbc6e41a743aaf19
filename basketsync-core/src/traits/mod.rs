//! Platform abstraction traits for cross-target compilation (native and WASM).

pub mod storage;
pub mod page;
pub mod display;
pub mod transport;
pub mod clock;
pub mod executor;
