//! Native storage: cookie jar persisted as a JSON file.

pub mod file_jar;

pub use file_jar::FileCookieJar;
