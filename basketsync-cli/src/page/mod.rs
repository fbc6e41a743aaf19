//! Page fixtures standing in for a rendered storefront page.

pub mod fixture;
pub mod header;

pub use fixture::FixturePage;
pub use header::TerminalHeader;
