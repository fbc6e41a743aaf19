use std::cell::RefCell;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cookie::parse_http_date;
use crate::error::{BasketSyncError, Result};
use crate::traits::storage::CookieJar;

/// One stored cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    /// Expiry in Unix milliseconds; `None` for a session cookie.
    pub expires_ms: Option<i64>,
}

/// In-process cookie jar that applies assignments the way a browser does.
///
/// A later assignment to the same name replaces the earlier one; an
/// assignment whose `expires` is not in the future removes the cookie.
/// Attributes other than `expires` are ignored.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<StoredCookie>>,
    assignments: RefCell<Vec<String>>,
    frozen_now_ms: Option<i64>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar whose notion of "now" is fixed, for deterministic expiry.
    pub fn frozen_at(now_ms: i64) -> Self {
        Self {
            frozen_now_ms: Some(now_ms),
            ..Self::default()
        }
    }

    /// Restore a jar previously exported with [`MemoryCookieJar::to_json`].
    pub fn from_json(text: &str) -> Result<Self> {
        let cookies: Vec<StoredCookie> = serde_json::from_str(text)?;
        Ok(Self {
            cookies: RefCell::new(cookies),
            ..Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let live: Vec<StoredCookie> = self
            .cookies
            .borrow()
            .iter()
            .filter(|c| self.is_live(c))
            .cloned()
            .collect();
        Ok(serde_json::to_string_pretty(&live)?)
    }

    /// Every assignment applied so far, oldest first.
    pub fn assignments(&self) -> Vec<String> {
        self.assignments.borrow().clone()
    }

    pub fn get(&self, name: &str) -> Option<StoredCookie> {
        self.cookies
            .borrow()
            .iter()
            .find(|c| c.name == name && self.is_live(c))
            .cloned()
    }

    fn now_ms(&self) -> i64 {
        self.frozen_now_ms
            .unwrap_or_else(|| Utc::now().timestamp_millis())
    }

    fn is_live(&self, cookie: &StoredCookie) -> bool {
        cookie.expires_ms.map_or(true, |at| at > self.now_ms())
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookie_header(&self) -> Result<String> {
        let header = self
            .cookies
            .borrow()
            .iter()
            .filter(|c| self.is_live(c))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(header)
    }

    fn apply(&self, assignment: &str) -> Result<()> {
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            BasketSyncError::Storage(format!("malformed cookie assignment: {assignment}"))
        })?;
        if name.is_empty() {
            return Err(BasketSyncError::Storage(format!(
                "cookie assignment without a name: {assignment}"
            )));
        }

        let mut expires_ms = None;
        for attr in parts {
            if let Some((key, val)) = attr.trim().split_once('=') {
                if key.trim().eq_ignore_ascii_case("expires") {
                    let at = parse_http_date(val).ok_or_else(|| {
                        BasketSyncError::Storage(format!("unparseable expires: {val}"))
                    })?;
                    expires_ms = Some(at.timestamp_millis());
                }
            }
        }

        self.assignments.borrow_mut().push(assignment.to_string());

        let mut cookies = self.cookies.borrow_mut();
        cookies.retain(|c| c.name != name);
        let cookie = StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            expires_ms,
        };
        if self.is_live(&cookie) {
            cookies.push(cookie);
        }
        Ok(())
    }
}
