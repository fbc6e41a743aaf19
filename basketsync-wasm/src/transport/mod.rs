//! Browser network transport (Fetch API).

pub mod fetch;

pub use fetch::FetchTransport;
