//! Native network transport (`reqwest`).

pub mod http;

pub use http::HttpTransport;
