//! Cookie read/write primitives over a [`CookieJar`].
//!
//! Wire format: `<name>=<value>; expires=<HTTP-date>`. Deletion writes an
//! empty value that expired at the Unix epoch.

pub mod memory;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::constants::{COOKIE_EPOCH_EXPIRY, COOKIE_TTL_MILLIS};
use crate::error::{BasketSyncError, Result};
use crate::traits::clock::Clock;
use crate::traits::storage::CookieJar;

pub use memory::MemoryCookieJar;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// Find `name` in a `document.cookie`-style header.
///
/// Entries are split on `;` and stripped of leading spaces; the first entry
/// starting with `name=` wins.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    header
        .split(';')
        .map(|entry| entry.trim_start_matches(' '))
        .find_map(|entry| entry.strip_prefix(prefix.as_str()))
}

pub fn read_cookie(jar: &dyn CookieJar, name: &str) -> Result<Option<String>> {
    let header = jar.cookie_header()?;
    Ok(find_cookie(&header, name).map(str::to_string))
}

pub fn write_cookie(
    jar: &dyn CookieJar,
    name: &str,
    value: &str,
    expires: DateTime<Utc>,
) -> Result<()> {
    let assignment = format!("{name}={value}; expires={}", format_http_date(expires));
    info!("Writing cookie {name} ({} bytes)", value.len());
    jar.apply(&assignment)
}

/// Idempotent: deleting a cookie that does not exist is not an error.
pub fn delete_cookie(jar: &dyn CookieJar, name: &str) -> Result<()> {
    debug!("Deleting cookie {name}");
    jar.apply(&format!("{name}=; expires={COOKIE_EPOCH_EXPIRY}"))
}

/// Expiry for a cookie written now.
pub fn cookie_expiry(clock: &dyn Clock) -> Result<DateTime<Utc>> {
    let now = clock.now_millis()?;
    now.checked_add(COOKIE_TTL_MILLIS)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| {
            BasketSyncError::Platform(format!("cookie expiry out of range for now={now}ms"))
        })
}

pub fn format_http_date(at: DateTime<Utc>) -> String {
    format!("{} GMT", at.format(HTTP_DATE_FORMAT))
}

/// Parse an `expires` attribute. Accepts the `GMT` and `UTC` zone spellings.
pub fn parse_http_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let bare = text
        .strip_suffix(" GMT")
        .or_else(|| text.strip_suffix(" UTC"))?;
    NaiveDateTime::parse_from_str(bare, HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
